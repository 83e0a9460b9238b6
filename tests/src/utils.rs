#![cfg(test)]
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::time::timeout;

/// Binds a listener on an ephemeral loopback port and accepts in the background.
pub async fn accepting_listener() -> SocketAddr {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });
    addr
}

/// Returns a loopback port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}

/// A listener that never accepts and whose accept queue is full.
///
/// The kernel silently drops further SYNs, so new connects neither succeed nor
/// fail: the closest loopback stand-in for a filtering firewall.
pub struct SaturatedListener {
    pub addr: SocketAddr,
    _listener: TcpListener,
    _queued: Vec<TcpStream>,
}

pub async fn saturated_listener() -> Option<SaturatedListener> {
    let socket: TcpSocket = TcpSocket::new_v4().ok()?;
    socket.bind("127.0.0.1:0".parse().ok()?).ok()?;
    let listener: TcpListener = socket.listen(0).ok()?;
    let addr: SocketAddr = listener.local_addr().ok()?;

    let mut queued: Vec<TcpStream> = Vec::new();
    for _ in 0..64 {
        match timeout(Duration::from_millis(200), TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => queued.push(stream),
            Ok(Err(_)) => return None,
            Err(_elapsed) => {
                return Some(SaturatedListener { addr, _listener: listener, _queued: queued });
            }
        }
    }
    None
}
