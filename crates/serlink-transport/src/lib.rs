//! Serial-port byte-stream endpoint.
//!
//! Provides the physical transport the framed protocol runs over: a
//! connected serial link configured with a port name, baud rate, and read
//! timeout. The link implements [`std::io::Read`] and [`std::io::Write`],
//! so the framing layer above never touches serial-specific types.
//!
//! This is the lowest layer of serlink. Everything else builds on top of
//! the [`SerialLink`] type provided here.

pub mod error;
pub mod serial;

pub use error::{Result, TransportError};
pub use serial::{available_ports, SerialConfig, SerialLink};
