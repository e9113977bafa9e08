//!
//! # Transaction
//!
//! This module implements the consensus [`Transaction`] structure and
//! related types.
//!

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::hashing;
use crate::script::Script;
use crate::{Hash, ZERO_HASH};

/// COINBASE_TRANSACTION_INDEX is the index of the coinbase transaction in every block
pub const COINBASE_TRANSACTION_INDEX: usize = 0;

/// A 32-byte transaction identifier
pub type TransactionId = Hash;

/// Sequence value that marks an input as final
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// References an output of a previous transaction
#[derive(Eq, Default, Hash, PartialEq, Debug, Copy, Clone, Serialize, Deserialize, BorshSerialize, BorshDeserialize, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct OutPoint {
    pub txid: TransactionId,
    pub vout: u32,
}

impl OutPoint {
    pub fn new(txid: TransactionId, vout: u32) -> Self {
        Self { txid, vout }
    }

    /// The null outpoint used by coinbase inputs
    pub fn null() -> Self {
        Self { txid: ZERO_HASH, vout: u32::MAX }
    }

    pub fn is_null(&self) -> bool {
        self.txid.is_zero() && self.vout == u32::MAX
    }
}

impl Display for OutPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.txid, self.vout)
    }
}

/// Represents a transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxIn {
    pub previous_output: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

impl TxIn {
    pub fn new(previous_output: OutPoint, script_sig: Script, sequence: u32) -> Self {
        Self { previous_output, script_sig, sequence }
    }
}

/// Represents a transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxOut {
    pub value: u64,
    pub script_pubkey: Script,
}

impl TxOut {
    pub fn new(value: u64, script_pubkey: Script) -> Self {
        Self { value, script_pubkey }
    }
}

/// A transaction: inputs spending previous outputs, and new outputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    pub fn new(version: i32, inputs: Vec<TxIn>, outputs: Vec<TxOut>, lock_time: u32) -> Self {
        Self { version, inputs, outputs, lock_time }
    }

    /// A coinbase transaction has exactly one input spending the null outpoint
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].previous_output.is_null()
    }

    /// Computes the transaction identifier over the wire encoding
    pub fn txid(&self) -> TransactionId {
        hashing::transaction_id(self)
    }
}
