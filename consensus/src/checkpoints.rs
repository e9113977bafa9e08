//! Hardcoded checkpoint enforcement
//!
//! Checkpoints pin the canonical chain at fixed heights so low forks are
//! rejected cheaply. The guard is skipped entirely above the highest
//! checkpointed height; it is a shortcut, not a chain-selection rule.

use std::collections::BTreeMap;

use consensus_core::{ChainParams, Hash};

/// Validates candidate blocks against the network's checkpoint table
#[derive(Debug, Clone)]
pub struct CheckpointGuard {
    checkpoints: BTreeMap<u64, Hash>,
}

impl CheckpointGuard {
    pub fn new(checkpoints: BTreeMap<u64, Hash>) -> Self {
        Self { checkpoints }
    }

    pub fn from_params(params: &ChainParams) -> Self {
        Self::new(params.checkpoints.clone())
    }

    /// Verdict for a candidate block at `height`. A mismatch against a
    /// checkpointed hash is a consensus violation; heights without an
    /// entry pass, and heights above the table are not examined at all.
    pub fn accepts(&self, height: u64, hash: Hash) -> bool {
        match self.last_checkpoint_height() {
            None => true,
            Some(last) if height > last => true,
            Some(_) => match self.checkpoints.get(&height) {
                Some(expected) => *expected == hash,
                None => true,
            },
        }
    }

    /// The monotonic height floor: the chain below this never reorganizes
    pub fn last_checkpoint_height(&self) -> Option<u64> {
        self.checkpoints.keys().next_back().copied()
    }
}
