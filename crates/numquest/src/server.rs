//! `NumquestServer` builder and server loop.
//!
//! This is the entry point for running a numquest server. It ties together
//! all the layers: transport → protocol → room actor.

use std::sync::Arc;

use numquest_game::{spawn_room, GameConfig, RoomHandle};
use numquest_leaderboard::LeaderboardStore;
use numquest_protocol::{Codec, TextCodec};
use numquest_transport::{Transport, TransportError, WebSocketTransport};

use crate::handler::handle_connection;
use crate::NumquestError;

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. All game
/// state lives behind `room`; nothing here needs a lock.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) room: RoomHandle,
    pub(crate) codec: C,
}

/// Builder for configuring and starting a numquest server.
///
/// # Example
///
/// ```rust,ignore
/// use numquest::prelude::*;
///
/// let server = NumquestServer::builder()
///     .bind("0.0.0.0:8080")
///     .game_config(GameConfig::default())
///     .build(MemoryLeaderboard::new())
///     .await?;
/// server.run().await
/// ```
pub struct NumquestServerBuilder {
    bind_addr: String,
    game_config: GameConfig,
}

impl NumquestServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            game_config: GameConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the game rules.
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }

    /// Validates the config, binds the listener and spawns the room.
    ///
    /// Uses `TextCodec` and `WebSocketTransport`.
    pub async fn build<S: LeaderboardStore>(
        self,
        leaderboard: S,
    ) -> Result<NumquestServer<TextCodec>, NumquestError> {
        self.game_config.validate()?;

        let transport = WebSocketTransport::bind(&self.bind_addr).await?;
        let room = spawn_room(self.game_config, leaderboard);

        let state = Arc::new(ServerState {
            room,
            codec: TextCodec,
        });

        Ok(NumquestServer { transport, state })
    }
}

impl Default for NumquestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running numquest server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct NumquestServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
}

impl NumquestServer<TextCodec> {
    /// Creates a new builder.
    pub fn builder() -> NumquestServerBuilder {
        NumquestServerBuilder::new()
    }
}

impl<C: Codec> NumquestServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Handle to the room, for inspecting or shutting it down.
    pub fn room(&self) -> RoomHandle {
        self.state.room.clone()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each
    /// one. Runs until the process is terminated or the listener stops.
    pub async fn run(mut self) -> Result<(), NumquestError> {
        tracing::info!("numquest server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(TransportError::ConnectionClosed(reason)) => {
                    tracing::error!(%reason, "listener stopped");
                    return Err(TransportError::ConnectionClosed(reason).into());
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
