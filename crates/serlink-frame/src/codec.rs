use bytes::{BufMut, Bytes, BytesMut};

use crate::convert::{u32_to_bytes, ByteOrder};
use crate::error::{FrameError, Result};

/// Framing overhead: start (1) + command (4) + length (4) + end (1).
pub const FRAME_OVERHEAD: usize = 10;

/// Start-of-frame marker.
pub const START_MARKER: u8 = 0x55;

/// End-of-frame marker.
pub const END_MARKER: u8 = 0x77;

/// Default maximum payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// A framed message with its command tag.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Opaque 32-bit tag both ends agree on out of band.
    pub command: u32,
    /// The message payload.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(command: u32, payload: impl Into<Bytes>) -> Self {
        Self {
            command,
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame (framing bytes + payload).
    pub fn wire_size(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }
}

/// The frame field currently on the wire; names the receive step that
/// failed in [`FrameError::Timeout`](crate::error::FrameError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameField {
    StartMarker,
    Command,
    Length,
    Payload,
    EndMarker,
}

impl std::fmt::Display for FrameField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FrameField::StartMarker => "start marker",
            FrameField::Command => "command",
            FrameField::Length => "payload length",
            FrameField::Payload => "payload",
            FrameField::EndMarker => "end marker",
        })
    }
}

/// Configuration for a framed channel.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Byte order of the command and length fields. Default: LSB-first.
    pub byte_order: ByteOrder,
    /// Maximum payload size accepted or produced. Default: 16 MiB.
    pub max_payload_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::LsbFirst,
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌────────────┬───────────┬───────────┬────────────────┬────────────┐
/// │ Start (1B) │ Command   │ Length    │ Payload        │ End (1B)   │
/// │ 0x55       │ (4B)      │ (4B)      │ (Length bytes) │ 0x77       │
/// └────────────┴───────────┴───────────┴────────────────┴────────────┘
/// ```
///
/// Command and length use the configured byte order (LSB-first by
/// default); the length field always equals the exact payload byte count.
pub fn encode_frame(
    command: u32,
    payload: &[u8],
    config: &FrameConfig,
    dst: &mut BytesMut,
) -> Result<()> {
    let max = config.max_payload_size.min(u32::MAX as usize);
    if payload.len() > max {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max,
        });
    }
    dst.reserve(FRAME_OVERHEAD + payload.len());
    dst.put_u8(START_MARKER);
    dst.put_slice(&u32_to_bytes(command, config.byte_order));
    dst.put_slice(&u32_to_bytes(payload.len() as u32, config.byte_order));
    dst.put_slice(payload);
    dst.put_u8(END_MARKER);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_frame_is_exactly_ten_bytes() {
        let mut buf = BytesMut::new();
        encode_frame(2, b"", &FrameConfig::default(), &mut buf).unwrap();

        assert_eq!(
            buf.as_ref(),
            [0x55, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x77]
        );
    }

    #[test]
    fn payload_sits_between_length_and_end_marker() {
        let mut buf = BytesMut::new();
        encode_frame(0x0102_0304, b"\xAA\xBB", &FrameConfig::default(), &mut buf).unwrap();

        assert_eq!(
            buf.as_ref(),
            [0x55, 0x04, 0x03, 0x02, 0x01, 0x02, 0x00, 0x00, 0x00, 0xAA, 0xBB, 0x77]
        );
        assert_eq!(buf.len(), FRAME_OVERHEAD + 2);
    }

    #[test]
    fn msb_first_config_reverses_header_fields() {
        let cfg = FrameConfig {
            byte_order: crate::convert::ByteOrder::MsbFirst,
            ..FrameConfig::default()
        };
        let mut buf = BytesMut::new();
        encode_frame(0x0102_0304, b"x", &cfg, &mut buf).unwrap();

        assert_eq!(
            buf.as_ref(),
            [0x55, 0x01, 0x02, 0x03, 0x04, 0x00, 0x00, 0x00, 0x01, b'x', 0x77]
        );
    }

    #[test]
    fn oversized_payload_rejected() {
        let cfg = FrameConfig {
            max_payload_size: 4,
            ..FrameConfig::default()
        };
        let mut buf = BytesMut::new();
        let err = encode_frame(1, b"oversized", &cfg, &mut buf).unwrap_err();
        assert!(matches!(err, FrameError::PayloadTooLarge { size: 9, max: 4 }));
        assert!(buf.is_empty());
    }

    #[test]
    fn frame_wire_size() {
        let frame = Frame::new(1, Bytes::from_static(b"test"));
        assert_eq!(frame.wire_size(), FRAME_OVERHEAD + 4);
    }
}
