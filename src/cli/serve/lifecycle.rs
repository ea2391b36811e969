//! Server lifecycle management.

use crate::log;
use anyhow::{Result, anyhow};
use crossbeam::channel::Receiver;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// How long shutdown waits for in-flight requests.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Bind to the specified interface and port, with automatic port retry.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Wait until `pending` requests report completion, or the drain timeout
/// elapses. Returns how many were still running.
pub fn drain_in_flight(done_rx: &Receiver<()>, pending: usize) -> usize {
    let deadline = Instant::now() + DRAIN_TIMEOUT;
    let mut remaining = pending;

    while remaining > 0 {
        let timeout = deadline.saturating_duration_since(Instant::now());
        match done_rx.recv_timeout(timeout) {
            Ok(()) => remaining -= 1,
            Err(_) => break,
        }
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;
    use std::net::Ipv4Addr;

    #[test]
    fn test_bind_with_retry_skips_taken_port() {
        let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
        let (first, first_addr) = bind_with_retry(localhost, 0).unwrap();
        let taken = first.server_addr().to_ip().unwrap().port();

        let (_second, addr) = bind_with_retry(localhost, taken).unwrap();
        assert_ne!(addr.port(), taken);
        assert_eq!(first_addr.port(), 0);
    }

    #[test]
    fn test_drain_in_flight() {
        let (tx, rx) = channel::unbounded();
        tx.send(()).unwrap();
        tx.send(()).unwrap();
        assert_eq!(drain_in_flight(&rx, 2), 0);

        drop(tx);
        assert_eq!(drain_in_flight(&rx, 1), 1);
    }
}
