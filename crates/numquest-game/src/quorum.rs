//! Restart quorum: votes to start the next round.
//!
//! The threshold is fixed when the tracker is built and does not depend on
//! how many players are connected. With three players, two votes restart
//! the round even if the third never voted.

use std::collections::BTreeSet;

use numquest_protocol::SessionId;

/// Outcome of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuorumVote {
    /// The threshold was met. The tracker has already been cleared.
    Reached,
    /// Still short of the threshold.
    Pending { votes: usize, needed: usize },
}

/// The set of sessions that asked for another round.
#[derive(Debug, Clone)]
pub struct RestartQuorum {
    threshold: usize,
    voters: BTreeSet<SessionId>,
}

impl RestartQuorum {
    /// Creates an empty tracker that fires at `threshold` distinct voters.
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            voters: BTreeSet::new(),
        }
    }

    /// Records a vote. Voting twice counts once.
    pub fn vote(&mut self, voter: SessionId) -> QuorumVote {
        self.voters.insert(voter);
        if self.voters.len() >= self.threshold {
            self.voters.clear();
            return QuorumVote::Reached;
        }
        QuorumVote::Pending {
            votes: self.voters.len(),
            needed: self.threshold,
        }
    }

    /// Forgets every vote if `voter` had voted. Called on disconnect.
    ///
    /// Returns `true` if the tracker was cleared.
    pub fn remove(&mut self, voter: SessionId) -> bool {
        if !self.voters.contains(&voter) {
            return false;
        }
        self.voters.clear();
        true
    }

    /// Forgets every vote. Called whenever a round starts.
    pub fn clear(&mut self) {
        self.voters.clear();
    }

    /// Number of votes collected so far.
    pub fn len(&self) -> usize {
        self.voters.len()
    }

    /// Returns `true` if nobody has voted.
    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }
}
