use thiserror::Error;

use crate::config::params::DeploymentId;
use crate::Hash;

/// Startup configuration failures. None of these are recoverable at
/// runtime; a process that hits one must not proceed to serve traffic.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown chain \"{0}\"")]
    UnknownChain(String),

    #[error("deployment {0}: start time {1} is not before timeout {2}")]
    InvalidDeploymentWindow(DeploymentId, i64, i64),

    #[error("deployment {0}: signal bit {1} is out of range")]
    SignalBitOutOfRange(DeploymentId, u8),

    #[error("deployments {0} and {1} share signal bit {2} over overlapping windows")]
    DuplicateSignalBit(DeploymentId, DeploymentId, u8),

    #[error("deployment {id}: override window {window} is below override threshold {threshold}")]
    InvalidOverride {
        id: DeploymentId,
        window: u32,
        threshold: u32,
    },

    #[error("deployment {0}: confirmation window must not be empty")]
    EmptyConfirmationWindow(DeploymentId),

    #[error("chain parameters already selected")]
    AlreadySelected,

    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

/// The running binary's consensus data does not reproduce the network's
/// genesis block. Fatal by contract: a node that fails this check cannot
/// possibly agree with the rest of the network.
#[derive(Error, Debug)]
pub enum IntegrityError {
    #[error("genesis block hash mismatch: expected {expected}, computed {actual}")]
    GenesisHashMismatch { expected: Hash, actual: Hash },

    #[error("genesis merkle root mismatch: expected {expected}, computed {actual}")]
    GenesisMerkleMismatch { expected: Hash, actual: Hash },
}
