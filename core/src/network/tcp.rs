use labwire_common::probe::{ProbeRequest, ProbeResult};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Attempts one TCP connection to `request` and settles before or at `deadline`.
///
/// The connect future and the deadline timer race inside [`timeout`]; whichever
/// completes first decides the outcome and the other is dropped on the spot, so
/// the result is produced exactly once. On expiry the pending connect future is
/// dropped, which closes the half-open socket.
///
/// Network failures are never returned as errors: refusals, unreachable
/// hosts and expired deadlines all become a [`ProbeResult`].
pub async fn connect_probe(request: &ProbeRequest, deadline: Duration) -> ProbeResult {
    let socket_addr: SocketAddr = request.socket_addr();
    let started: Instant = Instant::now();
    debug!(target_addr = %socket_addr, deadline_ms = deadline.as_millis() as u64, "connecting");

    let result: ProbeResult = match timeout(deadline, TcpStream::connect(socket_addr)).await {
        Ok(Ok(stream)) => {
            close_gracefully(stream).await;
            ProbeResult::connected(request, started.elapsed())
        }
        Ok(Err(e)) => ProbeResult::failed(request, e, started.elapsed()),
        Err(_elapsed) => ProbeResult::timed_out(request, deadline, started.elapsed()),
    };

    debug!(
        target_addr = %socket_addr,
        outcome = %result.outcome,
        elapsed_ms = result.elapsed.as_millis() as u64,
        "probe settled"
    );
    result
}

/// Sends FIN without waiting for the peer. Nothing is written or read.
async fn close_gracefully(mut stream: TcpStream) {
    if let Err(e) = stream.shutdown().await {
        debug!("shutdown after connect failed: {e}");
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
