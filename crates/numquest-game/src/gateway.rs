//! Broadcast gateway: delivers protocol messages to sessions.
//!
//! The room never touches sockets. Each session has a bounded outbound
//! queue drained by its connection task; the gateway only pushes onto those
//! queues and never waits. A push fails when the connection task is gone
//! or when the queue is full because the client stopped reading. Either
//! failure is logged and that message is dropped for that recipient only,
//! so a stalled client can neither block the room nor grow its memory
//! without limit.

use std::collections::BTreeMap;

use numquest_protocol::{ServerMessage, SessionId};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Messages a session may have waiting before further ones are dropped.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

/// Outbound queue for one session. Create it with
/// `mpsc::channel(OUTBOUND_QUEUE_CAPACITY)`.
pub type SessionSender = mpsc::Sender<ServerMessage>;

/// Outbound queues of every connected session, in connection order.
#[derive(Debug, Default)]
pub struct BroadcastGateway {
    senders: BTreeMap<SessionId, SessionSender>,
}

impl BroadcastGateway {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts delivering to `session`. Replaces any previous queue.
    pub fn add(&mut self, session: SessionId, sender: SessionSender) {
        self.senders.insert(session, sender);
    }

    /// Stops delivering to `session`. Returns `true` if it was present.
    pub fn remove(&mut self, session: SessionId) -> bool {
        self.senders.remove(&session).is_some()
    }

    /// Sends `msg` to every connected session.
    ///
    /// Returns how many recipients could not be reached.
    pub fn broadcast_all(&self, msg: &ServerMessage) -> usize {
        self.senders
            .iter()
            .filter(|(session, sender)| !deliver(**session, sender, msg.clone()))
            .count()
    }

    /// Sends `msg` to one session. Returns `false` if it could not be
    /// delivered; the session's own disconnect handling cleans up.
    pub fn send_one(&self, session: SessionId, msg: ServerMessage) -> bool {
        let Some(sender) = self.senders.get(&session) else {
            return false;
        };
        deliver(session, sender, msg)
    }

    /// Number of connected sessions.
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// Returns `true` if nobody is connected.
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

/// Queues `msg` without waiting. Returns `false` if it was dropped.
fn deliver(session: SessionId, sender: &SessionSender, msg: ServerMessage) -> bool {
    match sender.try_send(msg) {
        Ok(()) => true,
        Err(TrySendError::Full(msg)) => {
            tracing::warn!(
                session_id = %session,
                tag = msg.tag(),
                "outbound queue full, dropping message"
            );
            false
        }
        Err(TrySendError::Closed(msg)) => {
            tracing::debug!(
                session_id = %session,
                tag = msg.tag(),
                "recipient gone"
            );
            false
        }
    }
}
