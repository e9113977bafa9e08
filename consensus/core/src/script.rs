use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Script opcodes used by this crate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    // Constants
    OP_0 = 0x00,
    OP_PUSHDATA1 = 0x4c,
    OP_PUSHDATA2 = 0x4d,
    OP_PUSHDATA4 = 0x4e,
    OP_1 = 0x51,
    OP_16 = 0x60,

    // Flow control
    OP_RETURN = 0x6a,

    // Stack
    OP_DUP = 0x76,

    // Bitwise logic
    OP_EQUAL = 0x87,
    OP_EQUALVERIFY = 0x88,

    // Crypto
    OP_HASH160 = 0xa9,
    OP_CHECKSIG = 0xac,
}

/// Represents a script containing opcodes and data
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct Script {
    /// Raw script bytes
    bytes: Vec<u8>,
}

impl Script {
    /// Creates a new empty script
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates a script from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the raw script bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the script length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Appends a bare opcode
    pub fn push_opcode(mut self, op: Opcode) -> Self {
        self.bytes.push(op as u8);
        self
    }

    /// Appends a data push with the shortest push prefix for its length.
    /// An empty push is encoded as the single OP_0 byte.
    pub fn push_data(mut self, data: &[u8]) -> Self {
        match data.len() {
            0 => self.bytes.push(Opcode::OP_0 as u8),
            n @ 1..=0x4b => self.bytes.push(n as u8),
            n @ 0x4c..=0xff => {
                self.bytes.push(Opcode::OP_PUSHDATA1 as u8);
                self.bytes.push(n as u8);
            }
            n @ 0x100..=0xffff => {
                self.bytes.push(Opcode::OP_PUSHDATA2 as u8);
                self.bytes.extend_from_slice(&(n as u16).to_le_bytes());
            }
            n => {
                self.bytes.push(Opcode::OP_PUSHDATA4 as u8);
                self.bytes.extend_from_slice(&(n as u32).to_le_bytes());
            }
        }
        self.bytes.extend_from_slice(data);
        self
    }

    /// Appends a number in minimal little-endian signed-magnitude
    /// encoding, pushed as data. Zero becomes an empty push.
    pub fn push_scriptnum(self, value: i64) -> Self {
        let mut encoded = Vec::new();
        if value != 0 {
            let negative = value < 0;
            let mut abs = value.unsigned_abs();
            while abs > 0 {
                encoded.push((abs & 0xff) as u8);
                abs >>= 8;
            }
            // The top bit carries the sign; pad when the magnitude uses it
            if encoded.last().is_some_and(|b| b & 0x80 != 0) {
                encoded.push(if negative { 0x80 } else { 0x00 });
            } else if negative {
                if let Some(last) = encoded.last_mut() {
                    *last |= 0x80;
                }
            }
        }
        self.push_data(&encoded)
    }

    /// Creates a pay-to-pubkey script
    pub fn pay_to_pubkey(pubkey: &[u8]) -> Self {
        Self::new().push_data(pubkey).push_opcode(Opcode::OP_CHECKSIG)
    }

    /// Creates a pay-to-pubkey-hash script
    pub fn pay_to_pubkey_hash(pubkey_hash: &[u8; 20]) -> Self {
        Self::new()
            .push_opcode(Opcode::OP_DUP)
            .push_opcode(Opcode::OP_HASH160)
            .push_data(pubkey_hash)
            .push_opcode(Opcode::OP_EQUALVERIFY)
            .push_opcode(Opcode::OP_CHECKSIG)
    }
}
