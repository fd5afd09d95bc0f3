use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use serlink_transport::{SerialConfig, SerialLink};
use tracing::{debug, trace};

use crate::codec::{encode_frame, Frame, FrameConfig, FrameField, END_MARKER, START_MARKER};
use crate::convert::{u32_from_bytes, U32_WIDTH};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 1024;

/// Sends and receives framed messages over a byte-stream endpoint.
///
/// The endpoint is anything `Read + Write`, typically a [`SerialLink`],
/// whose reads return short once its configured timeout elapses. A short
/// read at any point of a frame maps to [`FrameError::Timeout`]. Every
/// `receive` starts fresh at the start marker; a stream that has fallen
/// out of frame sync must be drained by the caller before retrying.
pub struct FrameChannel<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T> FrameChannel<T> {
    /// Create a channel with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a channel with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Borrow the underlying endpoint.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying endpoint.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the channel and return the endpoint.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Current channel configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Update maximum payload size for subsequent frames.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }
}

impl<T: Write> FrameChannel<T> {
    /// Encode and send one frame: start marker, command, payload length,
    /// payload, end marker.
    ///
    /// An absent payload is the empty slice; the frame then carries a
    /// zero length field and no payload bytes.
    pub fn send(&mut self, command: u32, payload: &[u8]) -> Result<()> {
        self.buf.clear();
        encode_frame(command, payload, &self.config, &mut self.buf)?;
        trace!(command, len = payload.len(), "sending frame");

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Send an already-built [`Frame`].
    pub fn send_frame(&mut self, frame: &Frame) -> Result<()> {
        self.send(frame.command, frame.payload.as_ref())
    }

    /// Flush the underlying endpoint.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }
}

impl<T: Read> FrameChannel<T> {
    /// Receive one frame and return its payload.
    ///
    /// Fields are read strictly in wire order (start marker, command,
    /// length, payload, end marker) and validated as they arrive. The
    /// first failure aborts the receive; no partial data is returned and
    /// no resynchronization is attempted.
    pub fn receive(&mut self, expected_command: u32) -> Result<Bytes> {
        let start = self.read_field_byte(FrameField::StartMarker)?;
        if start != START_MARKER {
            debug!(found = start, "rejecting frame: bad start marker");
            return Err(FrameError::BadStartMarker { found: start });
        }

        let mut word = [0u8; U32_WIDTH];
        self.read_field(FrameField::Command, &mut word)?;
        let received = u32_from_bytes(word, self.config.byte_order);
        if received != expected_command {
            debug!(received, expected_command, "rejecting frame: command mismatch");
            return Err(FrameError::CommandMismatch {
                expected: expected_command,
                received,
            });
        }

        self.read_field(FrameField::Length, &mut word)?;
        let length = u32_from_bytes(word, self.config.byte_order) as usize;
        if length > self.config.max_payload_size {
            debug!(length, "rejecting frame: length field over maximum");
            return Err(FrameError::PayloadTooLarge {
                size: length,
                max: self.config.max_payload_size,
            });
        }

        let mut payload = vec![0u8; length];
        self.read_field(FrameField::Payload, &mut payload)?;

        let end = self.read_field_byte(FrameField::EndMarker)?;
        if end != END_MARKER {
            debug!(found = end, "rejecting frame: bad end marker");
            return Err(FrameError::BadEndMarker { found: end });
        }

        trace!(command = received, len = length, "received frame");
        Ok(Bytes::from(payload))
    }

    /// Read exactly `buf.len()` bytes for `field`.
    ///
    /// The endpoint contract is "short read on timeout", so running out
    /// of bytes mid-field (a timeout error, a zero read, EOF) maps to
    /// [`FrameError::Timeout`] naming the field.
    fn read_field(&mut self, field: FrameField, buf: &mut [u8]) -> Result<()> {
        let expected = buf.len();
        let mut got = 0usize;
        while got < expected {
            match self.inner.read(&mut buf[got..]) {
                Ok(0) => {
                    return Err(FrameError::Timeout {
                        field,
                        expected,
                        got,
                    })
                }
                Ok(n) => got += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err)
                    if err.kind() == ErrorKind::TimedOut
                        || err.kind() == ErrorKind::WouldBlock =>
                {
                    return Err(FrameError::Timeout {
                        field,
                        expected,
                        got,
                    })
                }
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
        Ok(())
    }

    fn read_field_byte(&mut self, field: FrameField) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read_field(field, &mut byte)?;
        Ok(byte[0])
    }
}

impl FrameChannel<SerialLink> {
    /// Open a serial port and frame it with default configuration.
    pub fn open_serial(
        port: impl Into<String>,
        baud_rate: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let link = SerialLink::open(port, baud_rate, timeout).map_err(transport_to_frame_error)?;
        Ok(Self::new(link))
    }

    /// Open a serial port with explicit serial and frame configuration.
    pub fn open_serial_with_config(serial: &SerialConfig, config: FrameConfig) -> Result<Self> {
        let link = SerialLink::open_with_config(serial).map_err(transport_to_frame_error)?;
        Ok(Self::with_config(link, config))
    }
}

fn transport_to_frame_error(err: serlink_transport::TransportError) -> FrameError {
    match err {
        serlink_transport::TransportError::Io(io) => FrameError::Io(io),
        other => FrameError::Io(std::io::Error::other(other.to_string())),
    }
}
