//! Room actor: an isolated Tokio task that owns the game.
//!
//! All shared state lives here and is touched only by the actor loop, one
//! command at a time. Connection handlers hold a cheap [`RoomHandle`] and
//! send commands through its channel. Commands from one handler are
//! applied in the order they were sent.

use numquest_leaderboard::LeaderboardStore;
use numquest_protocol::{
    ClientMessage, GuessReport, ScoreLine, ServerMessage, SessionId,
};
use numquest_session::{PlayerRegistry, UNNAMED_PLAYER};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use crate::{
    evaluate, BroadcastGateway, GameConfig, QuorumVote, RestartQuorum,
    RoomError, Round, RoundController, RoundPhase, SessionSender,
};

/// Default command channel size for the room actor.
const DEFAULT_CHANNEL_SIZE: usize = 256;

/// Commands sent to the room actor through its channel.
///
/// The `oneshot::Sender` in some variants is a reply channel: the caller
/// waits on it so it knows the command has been applied.
enum RoomCommand {
    /// A connection opened.
    Enter {
        session: SessionId,
        sender: SessionSender,
        reply: oneshot::Sender<()>,
    },

    /// A decoded client message.
    Message {
        session: SessionId,
        msg: ClientMessage,
    },

    /// A connection closed.
    Leave {
        session: SessionId,
        reply: oneshot::Sender<()>,
    },

    /// Request a metadata snapshot.
    GetInfo { reply: oneshot::Sender<RoomInfo> },

    /// Stop the actor.
    Shutdown,
}

/// A snapshot of room metadata. Never includes the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    /// Current round phase.
    pub phase: RoundPhase,
    /// Connected sessions, named or not.
    pub connected: usize,
    /// Digit count of the active round.
    pub digits: Option<u8>,
    /// Restart votes collected so far.
    pub restart_votes: usize,
}

/// Handle to the running room actor.
///
/// Cheap to clone: it is just an `mpsc::Sender`. Each connection task keeps
/// its own clone.
#[derive(Debug, Clone)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Registers a new connection and its outbound queue.
    pub async fn enter(
        &self,
        session: SessionId,
        sender: SessionSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Enter {
                session,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable)?;
        reply_rx.await.map_err(|_| RoomError::Unavailable)
    }

    /// Forwards a client message (fire-and-forget).
    pub async fn send_message(
        &self,
        session: SessionId,
        msg: ClientMessage,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Message { session, msg })
            .await
            .map_err(|_| RoomError::Unavailable)
    }

    /// Removes a connection and waits until the room has cleaned up.
    pub async fn leave(&self, session: SessionId) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                session,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable)?;
        reply_rx.await.map_err(|_| RoomError::Unavailable)
    }

    /// Requests the current room info.
    pub async fn info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable)?;
        reply_rx.await.map_err(|_| RoomError::Unavailable)
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable)
    }
}

/// The internal room state. Runs inside a Tokio task.
struct RoomActor<S: LeaderboardStore> {
    config: GameConfig,
    rng: StdRng,
    registry: PlayerRegistry,
    gateway: BroadcastGateway,
    round: RoundController,
    quorum: RestartQuorum,
    leaderboard: S,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl<S: LeaderboardStore> RoomActor<S> {
    /// Runs the actor loop, processing commands until shutdown or until
    /// every handle is dropped.
    async fn run(mut self) {
        tracing::info!("room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Enter {
                    session,
                    sender,
                    reply,
                } => {
                    self.handle_enter(session, sender);
                    let _ = reply.send(());
                }
                RoomCommand::Message { session, msg } => match msg {
                    ClientMessage::Join { username } => {
                        self.handle_join(session, &username);
                    }
                    ClientMessage::Restart => self.handle_restart(session),
                    ClientMessage::Guess(guess) => {
                        self.handle_guess(session, &guess);
                    }
                },
                RoomCommand::Leave { session, reply } => {
                    self.handle_leave(session);
                    let _ = reply.send(());
                }
                RoomCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::Shutdown => {
                    tracing::info!("room shutting down");
                    break;
                }
            }
        }

        tracing::info!("room actor stopped");
    }

    fn handle_enter(&mut self, session: SessionId, sender: SessionSender) {
        self.registry.connect(session, Instant::now());
        self.gateway.add(session, sender);
        tracing::info!(
            session_id = %session,
            connected = self.gateway.len(),
            "player connected"
        );
    }

    fn handle_join(&mut self, session: SessionId, username: &str) {
        if !self.registry.register(session, username, Instant::now()) {
            tracing::debug!(session_id = %session, "join from unknown session");
            return;
        }
        if let Err(e) = self.leaderboard.ensure_player(username) {
            tracing::warn!(error = %e, name = username, "leaderboard insert failed");
        }

        if let Some(digits) = self.round.active_round().map(Round::digits) {
            // Late joiner: catch up without disturbing the round.
            self.gateway.send_one(session, ServerMessage::Start { digits });
            self.broadcast_scores();
            if let Some(board) = self.leaderboard_message() {
                self.gateway.send_one(session, board);
            }
        } else if self.gateway.len() >= self.config.min_players {
            self.start_round();
        } else {
            self.gateway.send_one(session, ServerMessage::Wait);
        }
    }

    fn handle_guess(&mut self, session: SessionId, guess: &str) {
        let counts = match self.round.active_round() {
            Some(round) => evaluate(round.target(), guess),
            None => {
                tracing::debug!(
                    session_id = %session,
                    "ignoring message outside an active round"
                );
                return;
            }
        };

        let Some(elapsed) = self.registry.touch(session, Instant::now()) else {
            return;
        };
        let points = self.config.scoring.score(counts, elapsed);
        let Some(total) = self.registry.record_guess_score(session, points)
        else {
            return;
        };

        tracing::debug!(
            session_id = %session,
            exact = counts.exact,
            other = counts.other,
            points,
            total,
            "guess scored"
        );

        self.gateway.send_one(
            session,
            ServerMessage::Result(GuessReport {
                guess: guess.to_owned(),
                exact: counts.exact,
                other: counts.other,
                points,
                total,
            }),
        );
        self.broadcast_scores();

        let winner = self
            .registry
            .display_name(session)
            .unwrap_or(UNNAMED_PLAYER)
            .to_owned();
        if let Some(target) = self.round.finish_if_won(guess, &winner) {
            self.finish_round(target);
        }
    }

    fn handle_restart(&mut self, session: SessionId) {
        if self.round.is_active() {
            tracing::debug!(session_id = %session, "restart vote during a round, ignoring");
            return;
        }
        let Some(voter) = self.registry.display_name(session) else {
            return;
        };
        let voter = voter.to_owned();

        self.gateway.send_one(session, ServerMessage::RestartConfirmed);

        match self.quorum.vote(session) {
            QuorumVote::Reached => {
                tracing::info!(session_id = %session, "restart quorum reached");
                self.start_round();
            }
            QuorumVote::Pending { votes, needed } => {
                self.gateway.broadcast_all(&ServerMessage::Info(format!(
                    "{voter} wants to play again ({votes}/{needed})"
                )));
                self.gateway.send_one(session, ServerMessage::Wait);
            }
        }
    }

    fn handle_leave(&mut self, session: SessionId) {
        let removed = self.registry.remove(session);
        self.gateway.remove(session);
        self.quorum.remove(session);
        let Some(gone) = removed else {
            return;
        };

        let connected = self.gateway.len();
        tracing::info!(
            session_id = %gone.id,
            name = gone.display_name(),
            connected,
            "player left"
        );

        if connected < self.config.min_players && self.round.abandon() {
            tracing::info!(connected, "round abandoned: not enough players");
        }
        self.broadcast_scores();
    }

    /// Draws a new round, resets every score and tells everyone.
    fn start_round(&mut self) {
        let now = Instant::now();
        let round = Round::draw(&mut self.rng, &self.config, now);
        let digits = round.digits();
        tracing::debug!(target_value = round.target(), "target drawn");

        if !self.round.start(round) {
            return;
        }
        self.quorum.clear();
        self.registry.reset_all(now);

        tracing::info!(digits, players = self.registry.len(), "round started");

        self.gateway.broadcast_all(&ServerMessage::Start { digits });
        self.broadcast_scores();
        if let Some(board) = self.leaderboard_message() {
            self.gateway.broadcast_all(&board);
        }
    }

    /// Records personal bests and announces the winner.
    fn finish_round(&mut self, target: String) {
        for line in self.registry.named_scores() {
            if let Err(e) =
                self.leaderboard.upsert_candidate(&line.name, line.score)
            {
                tracing::warn!(
                    error = %e,
                    name = %line.name,
                    "failed to record personal best"
                );
            }
        }

        let winner = self
            .round
            .last_winner()
            .unwrap_or(UNNAMED_PLAYER)
            .to_owned();
        let duration = self
            .round
            .finished_round()
            .map(|r| r.started_at().elapsed())
            .unwrap_or_default();
        tracing::info!(winner = %winner, ?duration, "round won");

        self.gateway
            .broadcast_all(&ServerMessage::GameOver { target, winner });
        if let Some(board) = self.leaderboard_message() {
            self.gateway.broadcast_all(&board);
        }
    }

    fn broadcast_scores(&self) {
        self.gateway
            .broadcast_all(&ServerMessage::Scores(self.registry.snapshot()));
    }

    /// The current top-N, or `None` if the store could not be read.
    fn leaderboard_message(&self) -> Option<ServerMessage> {
        match self.leaderboard.top_n(self.config.leaderboard_size) {
            Ok(entries) => Some(ServerMessage::Leaderboard(
                entries
                    .into_iter()
                    .map(|e| ScoreLine::new(e.name, e.best))
                    .collect(),
            )),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read leaderboard");
                None
            }
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            phase: self.round.phase(),
            connected: self.gateway.len(),
            digits: self.round.active_round().map(Round::digits),
            restart_votes: self.quorum.len(),
        }
    }
}

/// Spawns the room actor task and returns a handle to it.
///
/// Must be called from within a Tokio runtime. The caller is expected to
/// have checked `config` with [`GameConfig::validate`].
pub fn spawn_room<S: LeaderboardStore>(
    config: GameConfig,
    leaderboard: S,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_SIZE);

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let actor = RoomActor {
        rng,
        registry: PlayerRegistry::new(),
        gateway: BroadcastGateway::new(),
        round: RoundController::new(),
        quorum: RestartQuorum::new(config.restart_quorum),
        leaderboard,
        receiver: rx,
        config,
    };

    tokio::spawn(actor.run());

    RoomHandle { sender: tx }
}
