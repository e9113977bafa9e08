//! Wire serialization and identity hashing for chain primitives
//!
//! Transactions and headers are encoded in the network's canonical
//! little-endian wire format; identifiers are the double-SHA256 of that
//! encoding.

use nrgc_hashes::double_sha256;

use crate::block::Header;
use crate::constants::HEADER_SIZE;
use crate::tx::Transaction;
use crate::Hash;

/// Appends a variable-length size prefix (compact size encoding)
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x10000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Serializes a transaction into its wire encoding
pub fn serialize_transaction(tx: &Transaction) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(64);
    bytes.extend_from_slice(&tx.version.to_le_bytes());

    write_compact_size(&mut bytes, tx.inputs.len() as u64);
    for input in &tx.inputs {
        bytes.extend_from_slice(input.previous_output.txid.as_bytes());
        bytes.extend_from_slice(&input.previous_output.vout.to_le_bytes());
        write_compact_size(&mut bytes, input.script_sig.len() as u64);
        bytes.extend_from_slice(input.script_sig.as_bytes());
        bytes.extend_from_slice(&input.sequence.to_le_bytes());
    }

    write_compact_size(&mut bytes, tx.outputs.len() as u64);
    for output in &tx.outputs {
        bytes.extend_from_slice(&output.value.to_le_bytes());
        write_compact_size(&mut bytes, output.script_pubkey.len() as u64);
        bytes.extend_from_slice(output.script_pubkey.as_bytes());
    }

    bytes.extend_from_slice(&tx.lock_time.to_le_bytes());
    bytes
}

/// Serializes the 80-byte header wire encoding
pub fn serialize_header(header: &Header) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE);
    bytes.extend_from_slice(&header.version.to_le_bytes());
    bytes.extend_from_slice(header.prev_block.as_bytes());
    bytes.extend_from_slice(header.merkle_root.as_bytes());
    bytes.extend_from_slice(&header.time.to_le_bytes());
    bytes.extend_from_slice(&header.bits.to_le_bytes());
    bytes.extend_from_slice(&header.nonce.to_le_bytes());
    bytes
}

/// Computes a transaction's identifier
pub fn transaction_id(tx: &Transaction) -> Hash {
    double_sha256(&serialize_transaction(tx))
}

/// Computes a header's block hash
pub fn header_hash(header: &Header) -> Hash {
    double_sha256(&serialize_header(header))
}
