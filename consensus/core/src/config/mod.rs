pub mod chains;
pub mod genesis;
pub mod params;

pub use genesis::{GenesisParams, MAIN_GENESIS, REGTEST_GENESIS, TEST_GENESIS};
pub use params::{ChainParams, ConsensusParams, DeploymentId, DeploymentSchedule};
