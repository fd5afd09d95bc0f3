//! Byte-sequence / fixed-width integer conversions.
//!
//! The wire protocol carries multi-byte integers least-significant byte
//! first by default, but devices on the far end may be either-endian, so
//! every conversion takes the byte order explicitly. Scalar forms work on
//! fixed-size arrays; sequence forms decode or encode consecutive
//! equal-width groups in input order.

use crate::error::ConvertError;

/// Byte order of a multi-byte integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Least-significant byte first (the protocol default).
    #[default]
    LsbFirst,
    /// Most-significant byte first.
    MsbFirst,
}

/// Width of an encoded 16-bit integer in bytes.
pub const U16_WIDTH: usize = 2;

/// Width of an encoded 32-bit integer in bytes.
pub const U32_WIDTH: usize = 4;

/// Decode one 16-bit value from its wire bytes.
pub fn u16_from_bytes(bytes: [u8; U16_WIDTH], order: ByteOrder) -> u16 {
    match order {
        ByteOrder::LsbFirst => u16::from_le_bytes(bytes),
        ByteOrder::MsbFirst => u16::from_be_bytes(bytes),
    }
}

/// Decode one 32-bit value from its wire bytes.
pub fn u32_from_bytes(bytes: [u8; U32_WIDTH], order: ByteOrder) -> u32 {
    match order {
        ByteOrder::LsbFirst => u32::from_le_bytes(bytes),
        ByteOrder::MsbFirst => u32::from_be_bytes(bytes),
    }
}

/// Encode a 16-bit value into its wire bytes.
pub fn u16_to_bytes(value: u16, order: ByteOrder) -> [u8; U16_WIDTH] {
    match order {
        ByteOrder::LsbFirst => value.to_le_bytes(),
        ByteOrder::MsbFirst => value.to_be_bytes(),
    }
}

/// Encode a 32-bit value into its wire bytes.
pub fn u32_to_bytes(value: u32, order: ByteOrder) -> [u8; U32_WIDTH] {
    match order {
        ByteOrder::LsbFirst => value.to_le_bytes(),
        ByteOrder::MsbFirst => value.to_be_bytes(),
    }
}

/// Decode consecutive 16-bit groups, input order preserved.
///
/// The input length must be a non-zero multiple of 2; a trailing partial
/// group is an error, never silently dropped.
pub fn u16_seq_from_bytes(bytes: &[u8], order: ByteOrder) -> Result<Vec<u16>, ConvertError> {
    check_groups(bytes.len(), U16_WIDTH)?;
    Ok(bytes
        .chunks_exact(U16_WIDTH)
        .map(|group| u16_from_bytes([group[0], group[1]], order))
        .collect())
}

/// Decode consecutive 32-bit groups, input order preserved.
///
/// The input length must be a non-zero multiple of 4.
pub fn u32_seq_from_bytes(bytes: &[u8], order: ByteOrder) -> Result<Vec<u32>, ConvertError> {
    check_groups(bytes.len(), U32_WIDTH)?;
    Ok(bytes
        .chunks_exact(U32_WIDTH)
        .map(|group| u32_from_bytes([group[0], group[1], group[2], group[3]], order))
        .collect())
}

/// Encode a sequence of 16-bit values, concatenation order preserved.
pub fn u16_seq_to_bytes(values: &[u16], order: ByteOrder) -> Vec<u8> {
    values
        .iter()
        .flat_map(|&value| u16_to_bytes(value, order))
        .collect()
}

/// Encode a sequence of 32-bit values, concatenation order preserved.
pub fn u32_seq_to_bytes(values: &[u32], order: ByteOrder) -> Vec<u8> {
    values
        .iter()
        .flat_map(|&value| u32_to_bytes(value, order))
        .collect()
}

/// Expand a byte slice into its per-byte decimal values.
///
/// An identity conversion, kept as a named operation so byte dumps read
/// uniformly next to the width conversions above.
pub fn bytes_to_decimal(bytes: &[u8]) -> Vec<u8> {
    bytes.to_vec()
}

fn check_groups(len: usize, width: usize) -> Result<(), ConvertError> {
    if len == 0 || len % width != 0 {
        return Err(ConvertError::InvalidLength { len, width });
    }
    Ok(())
}
