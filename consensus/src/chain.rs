//! Active-chain history as seen by the consensus state machines
//!
//! The signaling machinery never touches storage; callers supply the
//! active chain through [`ChainHistory`], and all timestamps, version
//! bits, and hashes arrive synchronously through it.

use nrgc_hashes::double_sha256;
use serde::{Deserialize, Serialize};

use consensus_core::Hash;

/// Number of trailing blocks considered for the median time past
pub const MEDIAN_TIME_SPAN: usize = 11;

/// The per-block facts the consensus state machines consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    pub height: u64,
    pub hash: Hash,
    pub version: i32,
    pub time: u32,
}

/// Read access to the current active chain
pub trait ChainHistory {
    /// Height of the chain tip, `None` for an empty chain
    fn tip_height(&self) -> Option<u64>;

    /// The active-chain block at `height`, `None` past the tip
    fn block_at(&self, height: u64) -> Option<BlockSummary>;

    /// Median timestamp of the up-to-eleven blocks ending at `height`.
    /// Uses the sorted middle element, resisting manipulation by any
    /// single block's timestamp.
    fn median_time_past(&self, height: u64) -> Option<i64> {
        let mut times = Vec::with_capacity(MEDIAN_TIME_SPAN);
        let mut cursor = height;
        loop {
            let block = self.block_at(cursor)?;
            times.push(block.time as i64);
            if times.len() == MEDIAN_TIME_SPAN || cursor == 0 {
                break;
            }
            cursor -= 1;
        }
        times.sort_unstable();
        Some(times[times.len() / 2])
    }
}

/// An in-memory active chain, used by tests and light embedders
#[derive(Debug, Clone, Default)]
pub struct MemoryChain {
    blocks: Vec<BlockSummary>,
}

impl MemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block with the given version and timestamp; the hash is
    /// derived from the block's position and contents so distinct chains
    /// never share summaries
    pub fn push(&mut self, version: i32, time: u32) -> BlockSummary {
        let height = self.blocks.len() as u64;
        let mut seed = Vec::with_capacity(16);
        seed.extend_from_slice(&height.to_le_bytes());
        seed.extend_from_slice(&version.to_le_bytes());
        seed.extend_from_slice(&time.to_le_bytes());
        let summary = BlockSummary { height, hash: double_sha256(&seed), version, time };
        self.blocks.push(summary);
        summary
    }

    /// Discards every block above `height`, as a reorganization would
    pub fn truncate(&mut self, height: u64) {
        self.blocks.truncate(height as usize + 1);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl ChainHistory for MemoryChain {
    fn tip_height(&self) -> Option<u64> {
        (self.blocks.len() as u64).checked_sub(1)
    }

    fn block_at(&self, height: u64) -> Option<BlockSummary> {
        self.blocks.get(height as usize).copied()
    }
}
