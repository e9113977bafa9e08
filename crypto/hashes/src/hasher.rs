use sha2::{Digest, Sha256};
use std::io::Write;

use crate::Hash;

#[derive(Debug)]
pub enum HashError {
    EncodingError(std::io::Error),
    DecodingError(&'static str),
}

impl std::fmt::Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashError::EncodingError(e) => write!(f, "Hash encoding error: {}", e),
            HashError::DecodingError(msg) => write!(f, "Hash decoding error: {}", msg),
        }
    }
}

impl std::error::Error for HashError {}

/// Compute SHA256(SHA256(data))
pub fn double_sha256(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    Hash::from_byte_array(second.into())
}

/// Compute SHA256(data)
pub fn sha256(data: &[u8]) -> Hash {
    Hash::from_byte_array(Sha256::digest(data).into())
}

/// HashWriter wraps a Sha256 hasher to implement Write trait
#[derive(Clone)]
pub struct HashWriter(Sha256);

impl HashWriter {
    pub fn new() -> Self {
        Self(Sha256::new())
    }

    pub fn finalize(self) -> Hash {
        Hash::from_byte_array(self.0.finalize().into())
    }

    /// Finalizes the first round and hashes the digest once more
    pub fn finalize_double(self) -> Hash {
        let first: [u8; 32] = self.0.finalize().into();
        Hash::from_byte_array(Sha256::digest(first).into())
    }
}

impl Write for HashWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Default for HashWriter {
    fn default() -> Self {
        Self::new()
    }
}
