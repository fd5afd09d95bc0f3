//! Framed message protocol for serial links.
//!
//! This is the core value-add layer of serlink. Every message is framed
//! with:
//! - A 1-byte start marker (0x55) for frame boundary detection
//! - A 4-byte command tag identifying the message purpose
//! - A 4-byte payload length
//! - The payload itself, followed by a 1-byte end marker (0x77)
//!
//! Command and length are LSB-first by default; the byte order is carried
//! in [`FrameConfig`] for devices that speak MSB-first. Receives validate
//! every field as it arrives and fail on the first mismatch. No partial
//! data, no internal retry.

pub mod channel;
pub mod codec;
pub mod convert;
pub mod error;

pub use channel::FrameChannel;
pub use codec::{
    encode_frame, Frame, FrameConfig, FrameField, DEFAULT_MAX_PAYLOAD, END_MARKER, FRAME_OVERHEAD,
    START_MARKER,
};
pub use convert::{
    bytes_to_decimal, u16_from_bytes, u16_seq_from_bytes, u16_seq_to_bytes, u16_to_bytes,
    u32_from_bytes, u32_seq_from_bytes, u32_seq_to_bytes, u32_to_bytes, ByteOrder,
};
pub use error::{ConvertError, FrameError, Result};
