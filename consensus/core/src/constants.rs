/// Number of base units in one coin
pub const COIN: u64 = 100_000_000;

/// Serialized size of a block header in bytes
pub const HEADER_SIZE: usize = 80;
