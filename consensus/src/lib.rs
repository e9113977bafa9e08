//! Consensus state machines built over the core parameter bundle
//!
//! This crate runs the soft-fork signaling protocol per confirmation
//! window, guards the active chain against checkpoint violations and
//! uncorroborated deep reorganizations, and owns the one-shot network
//! selection that publishes the process-wide parameter set.

pub mod chain;
pub mod checkpoints;
pub mod reorg;
pub mod selector;
pub mod versionbits;

// Re-export key types for easier access
pub use consensus_core::{ChainParams, DeploymentId, Hash, Network};

pub use chain::{BlockSummary, ChainHistory, MemoryChain, MEDIAN_TIME_SPAN};
pub use checkpoints::CheckpointGuard;
pub use reorg::ReorgGuard;
pub use selector::{params, select_params, try_params, ChainParamsBuilder};
pub use versionbits::{
    DeploymentStates, ThresholdState, VERSIONBITS_NUM_BITS, VERSIONBITS_TOP_BITS,
    VERSIONBITS_TOP_MASK,
};
