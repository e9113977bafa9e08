use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::hashing;
use crate::merkle::MerkleTree;
use crate::tx::Transaction;
use crate::Hash;

/// Block header containing chain linkage and proof-of-work fields
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub version: i32,
    pub prev_block: Hash,
    pub merkle_root: Hash,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl Header {
    pub fn new(version: i32, prev_block: Hash, merkle_root: Hash, time: u32, bits: u32, nonce: u32) -> Self {
        Self { version, prev_block, merkle_root, time, bits, nonce }
    }

    /// Computes the block hash over the wire encoding
    pub fn hash(&self) -> Hash {
        hashing::header_hash(self)
    }
}

/// Complete block structure including header and transactions
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Block header containing metadata and linkage
    pub header: Header,
    /// List of transactions in the block
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Creates a new block with the given header and transactions
    pub fn new(header: Header, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions }
    }

    /// Computes the block hash
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Computes the merkle root over the block's transactions
    pub fn compute_merkle_root(&self) -> Hash {
        let txids = self.transactions.iter().map(|tx| tx.txid()).collect();
        MerkleTree::from_hashes(txids).root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Script;
    use crate::tx::{OutPoint, TxIn, TxOut, SEQUENCE_FINAL};
    use crate::ZERO_HASH;

    #[test]
    fn merkle_root_of_single_tx_is_its_txid() {
        let tx = Transaction::new(
            1,
            vec![TxIn::new(OutPoint::null(), Script::new(), SEQUENCE_FINAL)],
            vec![TxOut::new(100, Script::new())],
            0,
        );
        let txid = tx.txid();
        let block = Block::new(Header::new(1, ZERO_HASH, txid, 0, 0, 0), vec![tx]);
        assert_eq!(block.compute_merkle_root(), txid);
    }
}
