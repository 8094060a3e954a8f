//! TCP liveness probe.

use std::time::Duration;

use tokio::net::TcpStream;
use tracing::{debug, trace};

/// Try one TCP connection to `host:port` within `timeout`.
///
/// Name resolution counts against the timeout. The connection is closed
/// immediately on success.
pub async fn tcp_reachable(host: &str, port: u16, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_stream)) => {
            trace!("TCP probe succeeded for {}:{}", host, port);
            true
        }
        Ok(Err(e)) => {
            debug!("TCP probe failed for {}:{}: {}", host, port, e);
            false
        }
        Err(_) => {
            debug!("TCP probe timed out for {}:{} after {:?}", host, port, timeout);
            false
        }
    }
}
