//! Transform-wrapping generator.

use super::{BuildEnv, Generator};
use crate::entry::{RawEntry, Transform};
use crate::error::Result;

/// Applies a transform to every entry of an inner generator.
///
/// When an entry already carries a transform, the wrapped transform runs on
/// its output.
pub struct Transformed {
    inner: Box<dyn Generator>,
    transform: Transform,
}

impl Transformed {
    pub fn new(inner: Box<dyn Generator>, transform: Transform) -> Self {
        Self { inner, transform }
    }
}

impl Generator for Transformed {
    fn generate(&self, env: &BuildEnv) -> Result<Vec<RawEntry>> {
        let entries = self.inner.generate(env)?;
        Ok(entries
            .into_iter()
            .map(|entry| entry.map_transform(&self.transform))
            .collect())
    }
}
