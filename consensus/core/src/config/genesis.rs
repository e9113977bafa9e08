//! Genesis block construction and per-network genesis constants
//!
//! Every network's chain starts from a single coinbase-only block built
//! from fixed inputs. The expected hash and merkle root are baked in next
//! to the inputs; parameter construction rebuilds the block and refuses to
//! run if the recomputed values drift from these constants.

use crate::block::{Block, Header};
use crate::constants::COIN;
use crate::errors::IntegrityError;
use crate::script::Script;
use crate::tx::{OutPoint, Transaction, TxIn, TxOut, SEQUENCE_FINAL};
use crate::{Hash, ZERO_HASH};

/// The message embedded in every network's coinbase signature script
pub const GENESIS_TIMESTAMP_MESSAGE: &str = "ENERGY START";

/// The fixed public key the genesis reward is paid to
pub const GENESIS_OUTPUT_PUBKEY: [u8; 65] = [
    0x04, 0x67, 0x8a, 0xfd, 0xb0, 0xfe, 0x55, 0x48, 0x27, 0x19, 0x67, 0xf1, 0xa6,
    0x71, 0x30, 0xb7, 0x10, 0x5c, 0xd6, 0xa8, 0x28, 0xe0, 0x39, 0x09, 0xa6, 0x79,
    0x62, 0xe0, 0xea, 0x1f, 0x61, 0xde, 0xb6, 0x49, 0xf6, 0xbc, 0x3f, 0x4c, 0xef,
    0x38, 0xc4, 0xf3, 0x55, 0x04, 0xe5, 0x1e, 0xc1, 0x12, 0xde, 0x5c, 0x38, 0x4d,
    0xf7, 0xba, 0x0b, 0x8d, 0x57, 0x8a, 0x4c, 0x70, 0x2b, 0x6b, 0xf2, 0x2d, 0x5f,
];

/// The script paying the genesis reward
pub fn genesis_output_script() -> Script {
    Script::pay_to_pubkey(&GENESIS_OUTPUT_PUBKEY)
}

/// Builds a genesis block from its fixed inputs. Deterministic; the block
/// carries one coinbase transaction paying `reward` to `output_script`,
/// a null previous-block hash, and the merkle root of that single
/// transaction.
pub fn build_genesis_block(
    timestamp_message: &str,
    output_script: Script,
    time: u32,
    nonce: u32,
    bits: u32,
    version: i32,
    reward: u64,
) -> Block {
    let script_sig = Script::new()
        .push_scriptnum(0)
        .push_scriptnum(486604799)
        .push_scriptnum(4)
        .push_data(timestamp_message.as_bytes());

    let coinbase = Transaction::new(
        1,
        vec![TxIn::new(OutPoint::null(), script_sig, SEQUENCE_FINAL)],
        vec![TxOut::new(reward, output_script)],
        0,
    );

    let merkle_root = coinbase.txid();
    let header = Header::new(version, ZERO_HASH, merkle_root, time, bits, nonce);
    Block::new(header, vec![coinbase])
}

/// The fixed inputs and expected identity of one network's genesis block
#[derive(Clone, Copy, Debug)]
pub struct GenesisParams {
    pub time: u32,
    pub nonce: u32,
    pub bits: u32,
    pub version: i32,
    pub reward: u64,
    /// Expected block hash under the chain's block hash function
    pub hash: Hash,
    /// Expected merkle root of the single coinbase transaction
    pub merkle_root: Hash,
}

impl GenesisParams {
    /// Builds this network's genesis block from its fixed inputs
    pub fn build(&self) -> Block {
        build_genesis_block(
            GENESIS_TIMESTAMP_MESSAGE,
            genesis_output_script(),
            self.time,
            self.nonce,
            self.bits,
            self.version,
            self.reward,
        )
    }

    /// Checks a built genesis block against the expected constants
    pub fn verify(&self, block: &Block) -> Result<(), IntegrityError> {
        let actual = block.hash();
        if actual != self.hash {
            return Err(IntegrityError::GenesisHashMismatch { expected: self.hash, actual });
        }
        let actual_root = block.header.merkle_root;
        if actual_root != self.merkle_root {
            return Err(IntegrityError::GenesisMerkleMismatch {
                expected: self.merkle_root,
                actual: actual_root,
            });
        }
        Ok(())
    }
}

pub const MAIN_GENESIS: GenesisParams = GenesisParams {
    time: 1727286590,
    nonce: 119,
    bits: 0x2000ffff,
    version: 4,
    reward: 3000 * COIN,
    hash: Hash::from_byte_array([
        0xbf, 0xd9, 0xe2, 0xb2, 0x0a, 0x64, 0xf9, 0x5e, 0xab, 0x72, 0x42, 0xe4, 0x78, 0x77,
        0xbe, 0xd7, 0x4b, 0x52, 0x9f, 0x02, 0xc5, 0x84, 0xce, 0x57, 0xd6, 0xc7, 0x04, 0x7c,
        0x6f, 0x7c, 0x37, 0xb3,
    ]),
    merkle_root: Hash::from_byte_array([
        0x5a, 0xe1, 0x77, 0x4b, 0xc0, 0xe9, 0x59, 0xf4, 0x2f, 0x0b, 0x35, 0x82, 0x22, 0x35,
        0xab, 0xf9, 0x7e, 0x5b, 0x89, 0xe5, 0x99, 0x82, 0xe9, 0x4f, 0x4d, 0xe5, 0x36, 0xeb,
        0x1b, 0x8a, 0xd7, 0x6f,
    ]),
};

pub const TEST_GENESIS: GenesisParams = GenesisParams {
    time: 1714226400,
    nonce: 21553080,
    bits: 0x1e00ffff,
    version: 4,
    reward: 3000 * COIN,
    hash: Hash::from_byte_array([
        0xef, 0xda, 0x63, 0x62, 0x38, 0xf7, 0xbc, 0x9a, 0x20, 0xe4, 0x22, 0x85, 0x0f, 0xe8,
        0xf6, 0x0f, 0x7b, 0x5b, 0x31, 0xb6, 0xa5, 0xc5, 0x40, 0x9e, 0xf5, 0x08, 0x5f, 0x0e,
        0xb7, 0x9c, 0xea, 0x01,
    ]),
    merkle_root: Hash::from_byte_array([
        0x5a, 0xe1, 0x77, 0x4b, 0xc0, 0xe9, 0x59, 0xf4, 0x2f, 0x0b, 0x35, 0x82, 0x22, 0x35,
        0xab, 0xf9, 0x7e, 0x5b, 0x89, 0xe5, 0x99, 0x82, 0xe9, 0x4f, 0x4d, 0xe5, 0x36, 0xeb,
        0x1b, 0x8a, 0xd7, 0x6f,
    ]),
};

pub const REGTEST_GENESIS: GenesisParams = GenesisParams {
    time: 1714226400,
    nonce: 1,
    bits: 0x207fffff,
    version: 4,
    reward: 600 * COIN,
    hash: Hash::from_byte_array([
        0x0d, 0xfb, 0xa5, 0xeb, 0x9f, 0x27, 0x14, 0x5e, 0xdb, 0x44, 0x67, 0xf5, 0x15, 0x2f,
        0x15, 0xe6, 0x7a, 0x7d, 0x21, 0x39, 0xd0, 0x8a, 0x80, 0xb0, 0x48, 0xb7, 0x41, 0x53,
        0x0b, 0x9c, 0xda, 0x4d,
    ]),
    merkle_root: Hash::from_byte_array([
        0x9c, 0x2e, 0x7d, 0xc5, 0xac, 0x4c, 0x8e, 0x17, 0x02, 0x7b, 0x17, 0x55, 0x93, 0x55,
        0x66, 0x88, 0xa6, 0xa0, 0xf3, 0x3d, 0x4e, 0x62, 0xa8, 0xeb, 0xa1, 0x85, 0x5a, 0xfc,
        0x88, 0x73, 0x8a, 0x5e,
    ]),
};

/// The genesis constants for a given network
pub fn literals(network: crate::Network) -> &'static GenesisParams {
    match network {
        crate::Network::Main => &MAIN_GENESIS,
        crate::Network::Test => &TEST_GENESIS,
        crate::Network::Regtest => &REGTEST_GENESIS,
    }
}
