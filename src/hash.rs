//! Content hashing for embedded entries using blake3.
//!
//! Every computed entry carries the digest of its bytes exactly as served
//! (after any transform, before compression). The digest doubles as the
//! HTTP validator: `etag()` is the quoted hex encoding.

/// A 256-bit content hash (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Hash a byte slice.
    #[inline]
    pub fn of<T: AsRef<[u8]> + ?Sized>(data: &T) -> Self {
        Self(*blake3::hash(data.as_ref()).as_bytes())
    }

    /// Create a ContentHash from raw digest bytes.
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw digest bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// Create from hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        let mut arr = [0u8; 32];
        if bytes.len() != arr.len() {
            return None;
        }
        arr.copy_from_slice(&bytes);
        Some(Self(arr))
    }

    /// Strong HTTP validator for this hash (quoted hex).
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.to_hex())
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Display first 16 chars of hex for brevity
        write!(f, "{}", &self.to_hex()[..16])
    }
}
