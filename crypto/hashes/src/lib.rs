pub mod hasher;

// Re-export commonly used types
pub use hasher::{double_sha256, sha256, HashError, HashWriter};

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const HASH_SIZE: usize = 32;

/// A 32-byte hash wrapper used across the project.
///
/// Bytes are stored in wire order (the raw digest output). Display and
/// parsing use the reversed, big-endian hex convention that block hashes
/// are quoted in.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Hash([u8; HASH_SIZE]);

/// The all-zero hash
pub const ZERO_HASH: Hash = Hash([0u8; HASH_SIZE]);

impl Hash {
    /// Const constructor from a wire-order byte array
    pub const fn from_byte_array(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns raw bytes in wire order
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Creates a zeroed hash
    pub fn zeroed() -> Self {
        ZERO_HASH
    }

    /// True if every byte is zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; HASH_SIZE]
    }

    /// Tries to create a Hash from a slice of bytes
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, std::array::TryFromSliceError> {
        let array: [u8; HASH_SIZE] = slice.try_into()?;
        Ok(Self(array))
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl From<Hash> for [u8; HASH_SIZE] {
    fn from(h: Hash) -> Self {
        h.0
    }
}

impl TryFrom<&[u8]> for Hash {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(slice)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter().rev() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self)
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != HASH_SIZE * 2 {
            return Err(HashError::DecodingError("expected 64 hex characters"));
        }
        let mut bytes =
            hex::decode(s).map_err(|_| HashError::DecodingError("invalid hex character"))?;
        bytes.reverse();
        let array: [u8; HASH_SIZE] = bytes
            .try_into()
            .map_err(|_| HashError::DecodingError("expected 32 bytes"))?;
        Ok(Self(array))
    }
}
