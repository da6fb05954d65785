//! HTTP serving glue over tiny_http.
//!
//! Host-facing convenience: binds a server (with port retry), runs the
//! request loop on a small thread pool, and supports graceful shutdown.
//! Frameworks with their own routing can skip this module and call
//! [`dispatch::handle`] directly with each request under the engine mount.

pub mod dispatch;
mod response;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::thread;

use anyhow::Result;
use crossbeam::channel::{self, Receiver, Sender};
use tiny_http::Server;

use crate::engine::Engine;
use crate::log;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Worker threads handling requests concurrently, so a dev-mode compile
/// does not block other requests.
const WORKER_THREADS: usize = 4;

/// Bind the HTTP server, retrying on successive ports when taken.
pub fn bind(interface: IpAddr, base_port: u16) -> Result<BoundServer> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                // Resolve the actual address (relevant when binding port 0)
                let addr = server.server_addr().to_ip().unwrap_or(addr);
                let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
                return Ok(BoundServer {
                    server: Arc::new(server),
                    addr,
                    shutdown_tx,
                    shutdown_rx,
                });
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

/// Bound server ready to accept requests.
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    shutdown_tx: Sender<()>,
    shutdown_rx: Receiver<()>,
}

/// Handle for stopping a running server from another thread.
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<Server>,
    tx: Sender<()>,
}

impl ShutdownHandle {
    /// Stop accepting requests; `run` returns once the accept loop exits.
    pub fn shutdown(&self) {
        let _ = self.tx.send(());
        self.server.unblock();
    }
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: Arc::clone(&self.server),
            tx: self.shutdown_tx.clone(),
        }
    }

    /// Run the request loop (blocking) until shutdown.
    pub fn run(self, engine: Arc<Engine>) -> Result<()> {
        log!("serve"; "http://{}", self.addr);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(WORKER_THREADS)
            .build()?;

        // Unblock the accept loop when a shutdown handle fires. A closed
        // channel means no handle will ever signal; the thread just exits.
        let monitor = {
            let server = Arc::clone(&self.server);
            let rx = self.shutdown_rx.clone();
            thread::spawn(move || {
                if rx.recv().is_ok() {
                    server.unblock();
                }
            })
        };

        for request in self.server.incoming_requests() {
            let engine = Arc::clone(&engine);
            pool.spawn(move || {
                if let Err(e) = dispatch::handle(&engine, request) {
                    log!("serve"; "request error: {e}");
                }
            });
        }

        drop(monitor);
        Ok(())
    }
}
