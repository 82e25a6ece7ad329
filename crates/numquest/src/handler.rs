//! Per-connection handler: registration, outbound queue, and inbound loop.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Register the session with the room along with its outbound queue
//!   2. Spawn a writer task that drains the queue onto the socket
//!   3. Loop: receive lines → decode → forward to the room
//!   4. On close, the guard tells the room the session left

use std::sync::Arc;

use numquest_game::{RoomHandle, OUTBOUND_QUEUE_CAPACITY};
use numquest_protocol::{Codec, SessionId};
use numquest_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::server::ServerState;
use crate::NumquestError;

/// Drop guard that removes the session from the room when the handler
/// exits, even on panic. `Drop` is synchronous, so the async leave runs
/// in a fire-and-forget task.
struct SessionGuard {
    session: SessionId,
    room: RoomHandle,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let session = self.session;
        let room = self.room.clone();
        tokio::spawn(async move {
            if let Err(e) = room.leave(session).await {
                tracing::debug!(session_id = %session, error = %e, "leave failed");
            }
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), NumquestError> {
    let conn = Arc::new(conn);
    let session = SessionId::from(conn.id());
    tracing::debug!(session_id = %session, "handling new connection");

    let (tx, mut rx) = mpsc::channel(OUTBOUND_QUEUE_CAPACITY);
    state.room.enter(session, tx).await?;
    let _guard = SessionGuard {
        session,
        room: state.room.clone(),
    };

    // Writer: the room pushes onto the queue, this task does the socket I/O.
    let writer = {
        let conn = Arc::clone(&conn);
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let text = state.codec.encode(&msg);
                if let Err(e) = conn.send(&text).await {
                    tracing::debug!(session_id = %session, error = %e, "send failed");
                    let _ = conn.close().await;
                    break;
                }
            }
        })
    };

    loop {
        let text = match conn.recv().await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::info!(session_id = %session, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(session_id = %session, error = %e, "recv error");
                break;
            }
        };

        let msg = match state.codec.decode(&text) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(
                    session_id = %session,
                    error = %e,
                    "ignoring malformed message"
                );
                continue;
            }
        };

        state.room.send_message(session, msg).await?;
    }

    writer.abort();
    // _guard drops here → room leave fires.
    Ok(())
}
