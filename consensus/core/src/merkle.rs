use nrgc_hashes::double_sha256;

use crate::{Hash, ZERO_HASH};

/// Represents a merkle tree over transaction identifiers
#[derive(Clone, Debug)]
pub struct MerkleTree {
    /// Nodes at each level of the tree (leaves at level 0)
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Creates a new merkle tree from a list of transaction identifiers
    pub fn from_hashes(hashes: Vec<Hash>) -> Self {
        if hashes.is_empty() {
            return Self { levels: vec![] };
        }

        let mut levels = vec![hashes];

        while levels.last().is_some_and(|level| level.len() > 1) {
            let current_level = &levels[levels.len() - 1];
            let mut next_level = Vec::with_capacity((current_level.len() + 1) / 2);

            for chunk in current_level.chunks(2) {
                let left = chunk[0];
                // An odd node is paired with itself
                let right = if chunk.len() == 2 { chunk[1] } else { left };
                next_level.push(Self::hash_pair(&left, &right));
            }

            levels.push(next_level);
        }

        Self { levels }
    }

    /// Returns the merkle root hash
    pub fn root(&self) -> Hash {
        match self.levels.last() {
            Some(level) => level[0],
            None => ZERO_HASH,
        }
    }

    /// Hashes two nodes together to create their parent
    fn hash_pair(left: &Hash, right: &Hash) -> Hash {
        let mut combined = Vec::with_capacity(64);
        combined.extend_from_slice(left.as_bytes());
        combined.extend_from_slice(right.as_bytes());
        double_sha256(&combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tree() {
        let tree = MerkleTree::from_hashes(vec![]);
        assert_eq!(tree.root(), ZERO_HASH);
    }

    #[test]
    fn test_single_tx() {
        let hash = Hash::from_byte_array([1u8; 32]);
        let tree = MerkleTree::from_hashes(vec![hash]);
        assert_eq!(tree.root(), hash);
    }

    #[test]
    fn test_pair() {
        let a = Hash::from_byte_array([1u8; 32]);
        let b = Hash::from_byte_array([2u8; 32]);
        let tree = MerkleTree::from_hashes(vec![a, b]);

        let mut combined = Vec::new();
        combined.extend_from_slice(a.as_bytes());
        combined.extend_from_slice(b.as_bytes());
        assert_eq!(tree.root(), double_sha256(&combined));
    }

    #[test]
    fn test_odd_leaf_duplicated() {
        let a = Hash::from_byte_array([1u8; 32]);
        let b = Hash::from_byte_array([2u8; 32]);
        let c = Hash::from_byte_array([3u8; 32]);
        let three = MerkleTree::from_hashes(vec![a, b, c]).root();
        let four = MerkleTree::from_hashes(vec![a, b, c, c]).root();
        assert_eq!(three, four);
    }
}
