use crate::codec::FrameField;

/// Errors produced by the byte/integer conversion helpers.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// The input length is not a positive multiple of the target width.
    #[error("invalid input length {len} (need a positive multiple of {width} bytes)")]
    InvalidLength { len: usize, width: usize },
}

/// Errors that can occur while framing or de-framing messages.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A frame field did not arrive in full before the endpoint timed out.
    #[error("timed out reading {field} ({got}/{expected} bytes)")]
    Timeout {
        field: FrameField,
        expected: usize,
        got: usize,
    },

    /// The first byte of the frame was not the start marker.
    #[error("bad start marker 0x{found:02X} (expected 0x55)")]
    BadStartMarker { found: u8 },

    /// The final byte of the frame was not the end marker.
    #[error("bad end marker 0x{found:02X} (expected 0x77)")]
    BadEndMarker { found: u8 },

    /// The decoded command differs from the command the caller expected.
    #[error("command mismatch (received {received}, expected {expected})")]
    CommandMismatch { expected: u32, received: u32 },

    /// The payload (or decoded length field) exceeds the configured maximum.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The endpoint accepted no more bytes mid-frame.
    #[error("connection closed (endpoint stopped accepting writes)")]
    ConnectionClosed,

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
