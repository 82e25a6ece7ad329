//! WebSocket transport implementation using `tokio-tungstenite`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

use crate::{Connection, ConnectionId, Transport, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Upgraded connections waiting for [`Transport::accept`].
const ACCEPT_QUEUE_SIZE: usize = 64;

type WsStream = tokio_tungstenite::WebSocketStream<TcpStream>;
type Accepted = Result<WebSocketConnection, TransportError>;

/// A WebSocket-based [`Transport`] that listens for incoming connections.
///
/// A background task owns the listener. Every TCP connection is upgraded
/// in its own task, so a peer that never finishes the handshake only
/// holds up itself. Finished connections are queued for [`accept`].
///
/// [`accept`]: Transport::accept
pub struct WebSocketTransport {
    local_addr: SocketAddr,
    incoming: mpsc::Receiver<Accepted>,
    acceptor: JoinHandle<()>,
}

impl WebSocketTransport {
    /// Binds a new WebSocket transport to the given address.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        let local_addr =
            listener.local_addr().map_err(TransportError::AcceptFailed)?;
        tracing::info!(%local_addr, "WebSocket transport listening");

        let (tx, incoming) = mpsc::channel(ACCEPT_QUEUE_SIZE);
        let acceptor = tokio::spawn(accept_loop(listener, tx));
        Ok(Self {
            local_addr,
            incoming,
            acceptor,
        })
    }

    /// Returns the address the listener is bound to.
    ///
    /// Useful after binding to port 0.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        Ok(self.local_addr)
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.acceptor.abort();
    }
}

impl Transport for WebSocketTransport {
    type Connection = WebSocketConnection;
    type Error = TransportError;

    async fn accept(&mut self) -> Result<Self::Connection, Self::Error> {
        match self.incoming.recv().await {
            Some(accepted) => accepted,
            None => Err(TransportError::ConnectionClosed(
                "listener stopped".into(),
            )),
        }
    }
}

/// Accepts TCP connections and hands each one to its own upgrade task.
async fn accept_loop(listener: TcpListener, tx: mpsc::Sender<Accepted>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    match upgrade(stream).await {
                        Ok(conn) => {
                            tracing::debug!(
                                id = %conn.id,
                                %addr,
                                "accepted WebSocket connection"
                            );
                            let _ = tx.send(Ok(conn)).await;
                        }
                        Err(e) => {
                            tracing::debug!(%addr, error = %e, "WebSocket upgrade failed");
                        }
                    }
                });
            }
            Err(e) => {
                if tx.send(Err(TransportError::AcceptFailed(e))).await.is_err() {
                    break;
                }
            }
        }
        if tx.is_closed() {
            break;
        }
    }
}

/// Performs the WebSocket handshake on a raw TCP stream.
async fn upgrade(stream: TcpStream) -> Result<WebSocketConnection, TransportError> {
    let ws = tokio_tungstenite::accept_async(stream).await.map_err(|e| {
        TransportError::AcceptFailed(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            e,
        ))
    })?;

    let id = ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed));
    let (sink, stream) = ws.split();
    Ok(WebSocketConnection {
        id,
        sink: Mutex::new(sink),
        stream: Mutex::new(stream),
    })
}

/// A single WebSocket connection.
///
/// The write and read halves sit behind separate locks so that one task
/// can push outbound messages while another is parked in [`recv`].
///
/// [`recv`]: Connection::recv
pub struct WebSocketConnection {
    id: ConnectionId,
    sink: Mutex<SplitSink<WsStream, Message>>,
    stream: Mutex<SplitStream<WsStream>>,
}

impl Connection for WebSocketConnection {
    type Error = TransportError;

    async fn send(&self, text: &str) -> Result<(), Self::Error> {
        self.sink
            .lock()
            .await
            .send(Message::text(text.to_owned()))
            .await
            .map_err(|e| {
                TransportError::SendFailed(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    e,
                ))
            })
    }

    async fn recv(&self) -> Result<Option<String>, Self::Error> {
        let mut stream = self.stream.lock().await;
        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_str().to_owned()));
                }
                Some(Ok(Message::Binary(data))) => {
                    match String::from_utf8(data.to_vec()) {
                        Ok(text) => return Ok(Some(text)),
                        Err(_) => {
                            tracing::debug!(
                                id = %self.id,
                                "skipping non-UTF-8 binary frame"
                            );
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // ping/pong/raw frame
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(
                        std::io::Error::new(
                            std::io::ErrorKind::ConnectionReset,
                            e,
                        ),
                    ));
                }
            }
        }
    }

    async fn close(&self) -> Result<(), Self::Error> {
        self.sink
            .lock()
            .await
            .send(Message::Close(None))
            .await
            .map_err(|e| {
                TransportError::ConnectionClosed(e.to_string())
            })
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
