//! Per-network consensus parameter bundle
//!
//! One concrete [`ChainParams`] value per network, produced by a factory
//! keyed on [`Network`]; per-network differences are data, not types.
//! Construction validates the deployment table and rebuilds the genesis
//! block against its hardcoded identity before the value can be used.

use std::collections::BTreeMap;
use std::fmt;

use log::info;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::config::{chains, genesis};
use crate::errors::ConfigError;
use crate::network::Network;
use crate::Hash;

/// The optional protocol rules that activate through miner signaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentId {
    /// Deployment used by tests to exercise the signaling machinery
    TestDummy,
    /// Asset issuance and transfer
    Assets,
    /// Messaging and restricted assets
    MsgRestAssets,
    /// Enlarged transfer script size
    TransferScriptSize,
    /// Strict value enforcement in asset scripts
    EnforceValue,
    /// Assets in coinbase transactions
    CoinbaseAssets,
}

impl DeploymentId {
    pub const COUNT: usize = 6;

    /// Returns an iterator over all deployments
    pub fn iter() -> impl Iterator<Item = DeploymentId> {
        [
            DeploymentId::TestDummy,
            DeploymentId::Assets,
            DeploymentId::MsgRestAssets,
            DeploymentId::TransferScriptSize,
            DeploymentId::EnforceValue,
            DeploymentId::CoinbaseAssets,
        ]
        .into_iter()
    }
}

impl fmt::Display for DeploymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeploymentId::TestDummy => "testdummy",
            DeploymentId::Assets => "assets",
            DeploymentId::MsgRestAssets => "messaging_restricted",
            DeploymentId::TransferScriptSize => "transfer_script_size",
            DeploymentId::EnforceValue => "enforce_value",
            DeploymentId::CoinbaseAssets => "coinbase_assets",
        };
        f.write_str(name)
    }
}

/// Signaling schedule for one deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentSchedule {
    /// Signal bit in the block version field, 0 through 28
    pub bit: u8,
    /// Unix time at which signal tallying can begin
    pub start_time: i64,
    /// Unix time at which the deployment fails if not locked in
    pub timeout: i64,
    /// Replaces the network's activation threshold for this deployment
    pub threshold_override: Option<u32>,
    /// Replaces the network's confirmation window for this deployment
    pub window_override: Option<u32>,
}

impl DeploymentSchedule {
    /// Sentinel start/timeout marking a deployment that never signals
    pub const NEVER: i64 = i64::MAX;

    /// Highest bit usable for signaling
    pub const MAX_SIGNAL_BIT: u8 = 28;

    /// A permanently disabled deployment stays `Defined` forever
    pub fn is_disabled(&self) -> bool {
        self.start_time == Self::NEVER && self.timeout == Self::NEVER
    }

    /// True when the signaling windows of two deployments can be live at
    /// the same time
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_disabled()
            && !other.is_disabled()
            && self.start_time < other.timeout
            && other.start_time < self.timeout
    }
}

/// Consensus rules shared by every block of a network
#[derive(Debug, Clone)]
pub struct ConsensusParams {
    pub subsidy_halving_interval: u64,
    /// Independent enforcement toggles; tests may narrow them pre-publish
    pub bip34_enabled: bool,
    pub bip65_enabled: bool,
    pub bip66_enabled: bool,
    pub segwit_enabled: bool,
    pub csv_enabled: bool,
    /// Highest admissible proof-of-work target
    pub pow_limit: U256,
    /// Starting target once the alternate proof-of-work algorithm activates
    pub kawpow_limit: U256,
    pub pow_target_timespan: u64,
    pub pow_target_spacing: u64,
    pub pow_allow_min_difficulty_blocks: bool,
    pub pow_no_retargeting: bool,
    /// Signals required within a confirmation window to lock a rule in
    pub rule_change_activation_threshold: u32,
    /// Confirmation window length in blocks
    pub miner_confirmation_window: u32,
    /// Signaling schedule per deployment, indexed by [`DeploymentId`]
    pub deployments: [DeploymentSchedule; DeploymentId::COUNT],
    /// The active chain must carry at least this much work
    pub minimum_chain_work: U256,
    /// Ancestors of this block are assumed to have valid signatures
    pub assume_valid: Hash,
}

/// Version byte / version bytes for each address role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base58Prefixes {
    pub pubkey: u8,
    pub script: u8,
    pub secret: u8,
    pub ext_public: [u8; 4],
    pub ext_secret: [u8; 4],
}

/// Coins destroyed per asset operation
#[derive(Debug, Clone, Copy)]
pub struct AssetBurnAmounts {
    pub issue: u64,
    pub reissue: u64,
    pub issue_sub: u64,
    pub issue_unique: u64,
    pub issue_msg_channel: u64,
    pub issue_qualifier: u64,
    pub issue_sub_qualifier: u64,
    pub issue_restricted: u64,
    pub add_null_qualifier_tag: u64,
}

/// Destination addresses for the per-operation burns
#[derive(Debug, Clone, Copy)]
pub struct AssetBurnAddresses {
    pub issue: &'static str,
    pub reissue: &'static str,
    pub issue_sub: &'static str,
    pub issue_unique: &'static str,
    pub issue_msg_channel: &'static str,
    pub issue_qualifier: &'static str,
    pub issue_sub_qualifier: &'static str,
    pub issue_restricted: &'static str,
    pub add_null_qualifier_tag: &'static str,
}

/// The immutable parameter bundle one network runs under
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub network: Network,
    pub consensus: ConsensusParams,

    /// First four bytes of every P2P message on this network
    pub message_start: [u8; 4],
    pub default_port: u16,
    pub prune_after_height: u64,
    pub dns_seeds: Vec<&'static str>,

    pub genesis: Block,
    pub genesis_hash: Hash,

    pub base58_prefixes: Base58Prefixes,
    /// BIP44 coin type
    pub ext_coin_type: u32,

    /// Hardcoded canonical block hashes, strictly increasing by height
    pub checkpoints: BTreeMap<u64, Hash>,

    pub burn_amounts: AssetBurnAmounts,
    pub burn_addresses: AssetBurnAddresses,
    pub global_burn_address: &'static str,
    /// Percentage of block rewards allocated to the community fund
    pub community_fund_percent: u8,
    pub community_fund_address: &'static str,

    /// Height at which the difficulty algorithm switches to DGW
    pub dgw_activation_height: u64,

    pub max_reorg_depth: u64,
    pub min_reorg_peers: u32,
    /// Seconds; competing chains older than this need no extra corroboration
    pub min_reorg_age: u64,

    pub asset_activation_height: u64,
    pub messaging_activation_height: u64,
    pub restricted_activation_height: u64,
    /// Unix time at which the alternate proof-of-work algorithm activates
    pub kawpow_activation_time: i64,

    pub default_consistency_checks: bool,
    pub require_standard: bool,
    pub mine_blocks_on_demand: bool,
    pub mining_requires_peers: bool,
}

impl ChainParams {
    /// Builds the fully validated parameter bundle for `network`.
    ///
    /// Rebuilds the genesis block and checks it against the hardcoded
    /// identity constants; any mismatch or malformed deployment table
    /// fails construction, and nothing may run with the partial result.
    pub fn for_network(network: Network) -> Result<Self, ConfigError> {
        let params = match network {
            Network::Main => chains::main(),
            Network::Test => chains::test(),
            Network::Regtest => chains::regtest(),
        };
        params.validate_deployments()?;
        genesis::literals(network).verify(&params.genesis)?;
        info!("{} chain parameters built, genesis {}", network, params.genesis_hash);
        Ok(params)
    }

    /// The schedule of one deployment
    pub fn deployment(&self, id: DeploymentId) -> &DeploymentSchedule {
        &self.consensus.deployments[id as usize]
    }

    /// Activation threshold for one deployment, honoring its override
    pub fn threshold(&self, id: DeploymentId) -> u32 {
        self.deployment(id)
            .threshold_override
            .unwrap_or(self.consensus.rule_change_activation_threshold)
    }

    /// Confirmation window for one deployment, honoring its override
    pub fn window(&self, id: DeploymentId) -> u32 {
        self.deployment(id)
            .window_override
            .unwrap_or(self.consensus.miner_confirmation_window)
    }

    pub fn bip34(&self) -> bool {
        self.consensus.bip34_enabled
    }

    pub fn bip65(&self) -> bool {
        self.consensus.bip65_enabled
    }

    pub fn bip66(&self) -> bool {
        self.consensus.bip66_enabled
    }

    pub fn csv_enabled(&self) -> bool {
        self.consensus.csv_enabled
    }

    pub fn segwit_enabled(&self) -> bool {
        self.consensus.segwit_enabled
    }

    fn validate_deployments(&self) -> Result<(), ConfigError> {
        let table: Vec<(DeploymentId, &DeploymentSchedule)> =
            DeploymentId::iter().map(|id| (id, self.deployment(id))).collect();

        for (id, dep) in &table {
            if dep.bit > DeploymentSchedule::MAX_SIGNAL_BIT {
                return Err(ConfigError::SignalBitOutOfRange(*id, dep.bit));
            }
            if !dep.is_disabled() && dep.start_time >= dep.timeout {
                return Err(ConfigError::InvalidDeploymentWindow(*id, dep.start_time, dep.timeout));
            }
            if dep.window_override == Some(0) {
                return Err(ConfigError::EmptyConfirmationWindow(*id));
            }
            if let (Some(threshold), Some(window)) = (dep.threshold_override, dep.window_override) {
                if window < threshold {
                    return Err(ConfigError::InvalidOverride { id: *id, window, threshold });
                }
            }
        }

        for (i, (id_a, dep_a)) in table.iter().enumerate() {
            for (id_b, dep_b) in &table[i + 1..] {
                if dep_a.bit == dep_b.bit && dep_a.overlaps(dep_b) {
                    return Err(ConfigError::DuplicateSignalBit(*id_a, *id_b, dep_a.bit));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> ChainParams {
        ChainParams::for_network(Network::Regtest).unwrap()
    }

    #[test]
    fn all_networks_construct() {
        for network in Network::iter() {
            let params = ChainParams::for_network(network).unwrap();
            assert_eq!(params.network, network);
            assert_eq!(params.genesis.hash(), params.genesis_hash);
        }
    }

    #[test]
    fn genesis_checkpoint_present_everywhere() {
        for network in Network::iter() {
            let params = ChainParams::for_network(network).unwrap();
            assert_eq!(params.checkpoints.get(&0), Some(&params.genesis_hash));
        }
    }

    #[test]
    fn overrides_take_precedence() {
        let params = base_params();
        // Regtest overrides every deployment to its own threshold/window
        assert_eq!(params.threshold(DeploymentId::TestDummy), 108);
        assert_eq!(params.window(DeploymentId::TestDummy), 144);
        assert_eq!(params.threshold(DeploymentId::CoinbaseAssets), 400);
        assert_eq!(params.window(DeploymentId::CoinbaseAssets), 500);
    }

    #[test]
    fn bip_flags_are_independent() {
        let mut params = base_params();
        params.consensus.bip34_enabled = false;
        assert!(!params.bip34());
        assert!(params.bip65());
        assert!(params.bip66());
    }

    #[test]
    fn inverted_window_is_rejected() {
        let mut params = base_params();
        params.consensus.deployments[DeploymentId::Assets as usize].start_time = 2_000_000_000;
        params.consensus.deployments[DeploymentId::Assets as usize].timeout = 1_000_000_000;
        assert!(matches!(
            params.validate_deployments(),
            Err(ConfigError::InvalidDeploymentWindow(DeploymentId::Assets, _, _))
        ));
    }

    #[test]
    fn duplicate_bit_in_overlapping_windows_is_rejected() {
        let mut params = base_params();
        params.consensus.deployments[DeploymentId::Assets as usize].bit = 28;
        assert!(matches!(
            params.validate_deployments(),
            Err(ConfigError::DuplicateSignalBit(DeploymentId::TestDummy, DeploymentId::Assets, 28))
        ));
    }

    #[test]
    fn duplicate_bit_in_disjoint_windows_is_allowed() {
        let mut params = base_params();
        let assets = &mut params.consensus.deployments[DeploymentId::Assets as usize];
        assets.bit = 28;
        // TestDummy times out before this window opens
        assets.start_time = 1_900_000_000;
        assets.timeout = 1_950_000_000;
        assert!(params.validate_deployments().is_ok());
    }

    #[test]
    fn disabled_deployment_skips_window_check() {
        let mut params = base_params();
        let dep = &mut params.consensus.deployments[DeploymentId::TestDummy as usize];
        dep.start_time = DeploymentSchedule::NEVER;
        dep.timeout = DeploymentSchedule::NEVER;
        assert!(params.validate_deployments().is_ok());
    }

    #[test]
    fn oversized_bit_is_rejected() {
        let mut params = base_params();
        params.consensus.deployments[DeploymentId::Assets as usize].bit = 29;
        assert!(matches!(
            params.validate_deployments(),
            Err(ConfigError::SignalBitOutOfRange(DeploymentId::Assets, 29))
        ));
    }

    #[test]
    fn zero_override_window_is_rejected() {
        let mut params = base_params();
        params.consensus.deployments[DeploymentId::Assets as usize].window_override = Some(0);
        assert!(matches!(
            params.validate_deployments(),
            Err(ConfigError::EmptyConfirmationWindow(DeploymentId::Assets))
        ));
    }

    #[test]
    fn undersized_override_window_is_rejected() {
        let mut params = base_params();
        let dep = &mut params.consensus.deployments[DeploymentId::Assets as usize];
        dep.threshold_override = Some(200);
        dep.window_override = Some(150);
        assert!(matches!(
            params.validate_deployments(),
            Err(ConfigError::InvalidOverride { id: DeploymentId::Assets, window: 150, threshold: 200 })
        ));
    }
}
