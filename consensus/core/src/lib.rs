//! Core consensus primitives and per-network chain parameters
//!
//! This crate defines the chain's block, transaction, and script
//! primitives together with the immutable parameter bundle each network
//! runs under, including the self-verifying genesis block.

pub mod block;
pub mod config;
pub mod constants;
pub mod errors;
pub mod hashing;
pub mod merkle;
pub mod network;
pub mod script;
pub mod tx;

// Re-export key types for easier access
pub use nrgc_hashes::{Hash, ZERO_HASH};

pub use block::{Block, Header};
pub use config::genesis::GenesisParams;
pub use config::params::{ChainParams, ConsensusParams, DeploymentId, DeploymentSchedule};
pub use errors::{ConfigError, IntegrityError};
pub use network::Network;
