//! Per-network parameter tables
//!
//! These constants are the network's consensus identity: every node of a
//! network must reproduce them bit for bit to interoperate with existing
//! deployments. Factories here only assemble data; validation and genesis
//! verification happen in [`ChainParams::for_network`].

use std::collections::BTreeMap;

use primitive_types::U256;

use crate::config::genesis::{MAIN_GENESIS, REGTEST_GENESIS, TEST_GENESIS};
use crate::config::params::{
    AssetBurnAddresses, AssetBurnAmounts, Base58Prefixes, ChainParams, ConsensusParams,
    DeploymentSchedule,
};
use crate::constants::COIN;
use crate::network::Network;
use crate::ZERO_HASH;

const MAIN_POW_LIMIT: U256 = U256([u64::MAX, u64::MAX, u64::MAX, 0x00ff_ffff_ffff_ffff]);
// Estimated starting difficulty for the first kawpow blocks
const MAIN_KAWPOW_LIMIT: U256 = U256([u64::MAX, u64::MAX, u64::MAX, 0x0000_0000_00ff_ffff]);
const TEST_POW_LIMIT: U256 = U256([u64::MAX, u64::MAX, u64::MAX, u64::MAX]);
const REGTEST_POW_LIMIT: U256 = U256([u64::MAX, u64::MAX, u64::MAX, 0x7fff_ffff_ffff_ffff]);

const ZERO_WORK: U256 = U256([0, 0, 0, 0]);

/// Burn amounts are identical on every network
const BURN_AMOUNTS: AssetBurnAmounts = AssetBurnAmounts {
    issue: 50 * COIN,
    reissue: 10 * COIN,
    issue_sub: 10 * COIN,
    issue_unique: COIN / 2,
    issue_msg_channel: 10 * COIN,
    issue_qualifier: 100 * COIN,
    issue_sub_qualifier: 10 * COIN,
    issue_restricted: 150 * COIN,
    add_null_qualifier_tag: COIN / 100,
};

const TEST_BURN_ADDRESSES: AssetBurnAddresses = AssetBurnAddresses {
    issue: "n1issueAssetXXXXXXXXXXXXXXXXWdnemQ",
    reissue: "n1ReissueAssetXXXXXXXXXXXXXXWG9NLd",
    issue_sub: "n1issueSubAssetXXXXXXXXXXXXXbNiH6v",
    issue_unique: "n1issueUniqueAssetXXXXXXXXXXS4695i",
    issue_msg_channel: "n1issueMsgChanneLAssetXXXXXXT2PBdD",
    issue_qualifier: "n1issueQuaLifierXXXXXXXXXXXXUysLTj",
    issue_sub_qualifier: "n1issueSubQuaLifierXXXXXXXXXYffPLh",
    issue_restricted: "n1issueRestrictedXXXXXXXXXXXXZVT9V",
    add_null_qualifier_tag: "n1addTagBurnXXXXXXXXXXXXXXXXX5oLMH",
};

pub(super) fn main() -> ChainParams {
    let genesis = MAIN_GENESIS.build();

    // 2024-04-01 00:00:00 through 2024-12-31 00:00:00
    let start_time = 1711929600;
    let timeout = 1735603200;
    let deployments = [
        // TestDummy
        DeploymentSchedule {
            bit: 28,
            start_time,
            timeout,
            threshold_override: Some(1814),
            window_override: Some(2016),
        },
        // Assets
        DeploymentSchedule {
            bit: 6,
            start_time,
            timeout,
            threshold_override: Some(1814),
            window_override: Some(2016),
        },
        // MsgRestAssets
        DeploymentSchedule {
            bit: 7,
            start_time,
            timeout,
            threshold_override: Some(1714),
            window_override: Some(2016),
        },
        // TransferScriptSize
        DeploymentSchedule {
            bit: 8,
            start_time,
            timeout,
            threshold_override: Some(1714),
            window_override: Some(2016),
        },
        // EnforceValue
        DeploymentSchedule {
            bit: 9,
            start_time,
            timeout,
            threshold_override: Some(1411),
            window_override: Some(2016),
        },
        // CoinbaseAssets
        DeploymentSchedule {
            bit: 10,
            start_time,
            timeout,
            threshold_override: Some(1411),
            window_override: Some(2016),
        },
    ];

    ChainParams {
        network: Network::Main,
        consensus: ConsensusParams {
            subsidy_halving_interval: 210_000,
            bip34_enabled: true,
            bip65_enabled: true,
            bip66_enabled: true,
            segwit_enabled: true,
            csv_enabled: true,
            pow_limit: MAIN_POW_LIMIT,
            kawpow_limit: MAIN_KAWPOW_LIMIT,
            pow_target_timespan: 2016 * 60,
            pow_target_spacing: 60,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
            rule_change_activation_threshold: 1613, // Approx 80% of 2016
            miner_confirmation_window: 2016,        // pow_target_timespan / pow_target_spacing
            deployments,
            minimum_chain_work: ZERO_WORK,
            assume_valid: ZERO_HASH,
        },
        message_start: *b"NRGC",
        default_port: 9876,
        prune_after_height: 100_000,
        dns_seeds: vec![],
        genesis_hash: MAIN_GENESIS.hash,
        genesis,
        base58_prefixes: Base58Prefixes {
            pubkey: 33,
            script: 76,
            secret: 128,
            ext_public: [0x04, 0x88, 0xB2, 0x1E],
            ext_secret: [0x04, 0x88, 0xAD, 0xE4],
        },
        ext_coin_type: 0,
        checkpoints: BTreeMap::from([(0, MAIN_GENESIS.hash)]),
        burn_amounts: BURN_AMOUNTS,
        burn_addresses: AssetBurnAddresses {
            issue: "NCissueAssetXXXXXXXXXXXXXXXXXhhZGt",
            reissue: "NCReissueAssetXXXXXXXXXXXXXXVEFAWu",
            issue_sub: "NCissueSubAssetXXXXXXXXXXXXXWcwhwL",
            issue_unique: "NCissueUniqueAssetXXXXXXXXXXWEAe58",
            issue_msg_channel: "NCissueMsgChanneLAssetXXXXXXSjHvAY",
            issue_qualifier: "NCissueQuaLifierXXXXXXXXXXXXUgEDbC",
            issue_sub_qualifier: "NCissueSubQuaLifierXXXXXXXXXVTzvv5",
            issue_restricted: "NCissueRestrictedXXXXXXXXXXXXzJZ1q",
            add_null_qualifier_tag: "NCaddTagBurnXXXXXXXXXXXXXXXXZQm5ya",
        },
        global_burn_address: "NCBurnXXXXXXXXXXXXXXXXXXXXXXWUo9FV",
        community_fund_percent: 10,
        community_fund_address: "XuyCzNG3XdibTQvZgVu7ypmeVDBA1kvyev",
        dgw_activation_height: 1,
        max_reorg_depth: 60, // +/- 60 minutes at one-minute spacing
        min_reorg_peers: 4,
        min_reorg_age: 60 * 60 * 12,
        asset_activation_height: 1,
        messaging_activation_height: 1,
        restricted_activation_height: 1,
        kawpow_activation_time: MAIN_GENESIS.time as i64 + 1,
        default_consistency_checks: false,
        require_standard: true,
        mine_blocks_on_demand: false,
        mining_requires_peers: true,
    }
}

pub(super) fn test() -> ChainParams {
    let genesis = TEST_GENESIS.build();

    ChainParams {
        network: Network::Test,
        consensus: ConsensusParams {
            subsidy_halving_interval: 2_100_000,
            bip34_enabled: true,
            bip65_enabled: true,
            bip66_enabled: true,
            segwit_enabled: true,
            csv_enabled: true,
            pow_limit: TEST_POW_LIMIT,
            kawpow_limit: TEST_POW_LIMIT,
            pow_target_timespan: 2016 * 60,
            pow_target_spacing: 60,
            pow_allow_min_difficulty_blocks: false,
            pow_no_retargeting: false,
            rule_change_activation_threshold: 1613,
            miner_confirmation_window: 2016,
            deployments: test_chain_deployments(),
            minimum_chain_work: ZERO_WORK,
            assume_valid: ZERO_HASH,
        },
        message_start: *b"AIDP",
        default_port: 17002,
        prune_after_height: 1000,
        dns_seeds: vec![
            "seed-testnet-raven.bitactivate.com",
            "seed-testnet-raven.ravencoin.com",
            "seed-testnet-raven.ravencoin.org",
        ],
        genesis_hash: TEST_GENESIS.hash,
        genesis,
        base58_prefixes: Base58Prefixes {
            pubkey: 20,
            script: 20,
            secret: 239,
            ext_public: [0x04, 0x35, 0x87, 0xCF],
            ext_secret: [0x04, 0x35, 0x83, 0x94],
        },
        ext_coin_type: 1,
        checkpoints: BTreeMap::from([(0, TEST_GENESIS.hash)]),
        burn_amounts: BURN_AMOUNTS,
        burn_addresses: TEST_BURN_ADDRESSES,
        global_burn_address: "n1BurnXXXXXXXXXXXXXXXXXXXXXXU1qejP",
        community_fund_percent: 10,
        community_fund_address: "XuyCzNG3XdibTQvZgVu7ypmeVDBA1kvyev",
        dgw_activation_height: 1,
        max_reorg_depth: 60,
        min_reorg_peers: 4,
        min_reorg_age: 60 * 60 * 12,
        asset_activation_height: 1,
        messaging_activation_height: 1,
        restricted_activation_height: 1,
        kawpow_activation_time: TEST_GENESIS.time as i64 + 1,
        default_consistency_checks: false,
        require_standard: false,
        mine_blocks_on_demand: false,
        mining_requires_peers: true,
    }
}

pub(super) fn regtest() -> ChainParams {
    let genesis = REGTEST_GENESIS.build();

    ChainParams {
        network: Network::Regtest,
        consensus: ConsensusParams {
            subsidy_halving_interval: 150,
            bip34_enabled: true,
            bip65_enabled: true,
            bip66_enabled: true,
            segwit_enabled: true,
            csv_enabled: true,
            pow_limit: REGTEST_POW_LIMIT,
            kawpow_limit: REGTEST_POW_LIMIT,
            pow_target_timespan: 2016 * 60,
            pow_target_spacing: 60,
            pow_allow_min_difficulty_blocks: true,
            pow_no_retargeting: true,
            rule_change_activation_threshold: 108, // 75% for test chains
            miner_confirmation_window: 144,
            deployments: test_chain_deployments(),
            minimum_chain_work: ZERO_WORK,
            assume_valid: ZERO_HASH,
        },
        message_start: *b"AIDP",
        default_port: 17003,
        prune_after_height: 1000,
        dns_seeds: vec![],
        genesis_hash: REGTEST_GENESIS.hash,
        genesis,
        base58_prefixes: Base58Prefixes {
            pubkey: 76,
            script: 76,
            secret: 239,
            ext_public: [0x04, 0x35, 0x87, 0xCF],
            ext_secret: [0x04, 0x35, 0x83, 0x94],
        },
        ext_coin_type: 1,
        checkpoints: BTreeMap::from([(0, REGTEST_GENESIS.hash)]),
        burn_amounts: BURN_AMOUNTS,
        burn_addresses: TEST_BURN_ADDRESSES,
        global_burn_address: "n1BurnXXXXXXXXXXXXXXXXXXXXXXU1qejP",
        community_fund_percent: 10,
        community_fund_address: "Axxxxxxxxxxxxxxxxxxxxxxxxxxxx",
        dgw_activation_height: 200,
        max_reorg_depth: 60,
        min_reorg_peers: 4,
        min_reorg_age: 60 * 60 * 12,
        asset_activation_height: 0,
        messaging_activation_height: 0,
        restricted_activation_height: 0,
        // Far future; regtest mines with the base algorithm
        kawpow_activation_time: 3582830167,
        default_consistency_checks: true,
        require_standard: false,
        mine_blocks_on_demand: true,
        mining_requires_peers: false,
    }
}

/// Test and regtest share one deployment schedule: open signaling from
/// the start of time until 2029-12-31, with small per-rule overrides
fn test_chain_deployments() -> [DeploymentSchedule; 6] {
    let timeout = 1893452400;
    [
        // TestDummy
        DeploymentSchedule {
            bit: 28,
            start_time: 0,
            timeout,
            threshold_override: Some(108),
            window_override: Some(144),
        },
        // Assets
        DeploymentSchedule {
            bit: 6,
            start_time: 0,
            timeout,
            threshold_override: Some(108),
            window_override: Some(144),
        },
        // MsgRestAssets
        DeploymentSchedule {
            bit: 7,
            start_time: 0,
            timeout,
            threshold_override: Some(108),
            window_override: Some(144),
        },
        // TransferScriptSize
        DeploymentSchedule {
            bit: 8,
            start_time: 0,
            timeout,
            threshold_override: Some(208),
            window_override: Some(288),
        },
        // EnforceValue
        DeploymentSchedule {
            bit: 9,
            start_time: 0,
            timeout,
            threshold_override: Some(108),
            window_override: Some(144),
        },
        // CoinbaseAssets
        DeploymentSchedule {
            bit: 10,
            start_time: 0,
            timeout,
            threshold_override: Some(400),
            window_override: Some(500),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::params::DeploymentId;

    #[test]
    fn network_identity_bytes() {
        let main = ChainParams::for_network(Network::Main).unwrap();
        assert_eq!(main.message_start, [0x4e, 0x52, 0x47, 0x43]);
        assert_eq!(main.default_port, 9876);
        assert_eq!(main.ext_coin_type, 0);

        let test = ChainParams::for_network(Network::Test).unwrap();
        assert_eq!(test.message_start, [0x41, 0x49, 0x44, 0x50]);
        assert_eq!(test.default_port, 17002);

        let regtest = ChainParams::for_network(Network::Regtest).unwrap();
        assert_eq!(regtest.default_port, 17003);
        assert_eq!(regtest.message_start, test.message_start);
    }

    #[test]
    fn deployment_bits_match_registered_table() {
        let params = ChainParams::for_network(Network::Main).unwrap();
        let expected = [
            (DeploymentId::TestDummy, 28),
            (DeploymentId::Assets, 6),
            (DeploymentId::MsgRestAssets, 7),
            (DeploymentId::TransferScriptSize, 8),
            (DeploymentId::EnforceValue, 9),
            (DeploymentId::CoinbaseAssets, 10),
        ];
        for (id, bit) in expected {
            assert_eq!(params.deployment(id).bit, bit, "{id}");
        }
    }

    #[test]
    fn pow_limits_are_ordered() {
        let main = ChainParams::for_network(Network::Main).unwrap();
        assert!(main.consensus.kawpow_limit < main.consensus.pow_limit);

        let regtest = ChainParams::for_network(Network::Regtest).unwrap();
        assert!(main.consensus.pow_limit < regtest.consensus.pow_limit);
    }

    #[test]
    fn burn_economics() {
        let params = ChainParams::for_network(Network::Main).unwrap();
        assert_eq!(params.burn_amounts.issue, 50 * COIN);
        assert_eq!(params.burn_amounts.issue_unique, COIN / 2);
        assert_eq!(params.burn_amounts.add_null_qualifier_tag, COIN / 100);
        assert_eq!(params.community_fund_percent, 10);
        assert!(params.burn_addresses.issue.starts_with("NC"));
    }

    #[test]
    fn reorg_limits() {
        for network in Network::iter() {
            let params = ChainParams::for_network(network).unwrap();
            assert_eq!(params.max_reorg_depth, 60);
            assert_eq!(params.min_reorg_peers, 4);
            assert_eq!(params.min_reorg_age, 43_200);
        }
    }
}
