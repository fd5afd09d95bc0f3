use std::io::{Read, Write};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, TransportError};

/// Configuration for opening a serial link.
///
/// The defaults match the common microcontroller bring-up setup:
/// 9600 bps, 200 ms read timeout.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Port name, e.g. `/dev/ttyUSB0` or `COM4`.
    pub port: String,
    /// Signaling rate in bits per second.
    pub baud_rate: u32,
    /// How long a read may wait for bytes before returning short.
    pub timeout: Duration,
}

impl SerialConfig {
    /// Default baud rate.
    pub const DEFAULT_BAUD_RATE: u32 = 9_600;
    /// Default read timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

    /// Configuration for `port` with default baud rate and timeout.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: Self::DEFAULT_BAUD_RATE,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Set the baud rate.
    pub fn baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the read timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// A connected serial endpoint — implements Read + Write.
///
/// Reads return short when the configured timeout elapses before the
/// requested bytes arrive; they never block indefinitely. Writes hand the
/// full buffer to the OS driver or fail.
pub struct SerialLink {
    inner: Box<dyn serialport::SerialPort>,
    port: String,
}

impl SerialLink {
    /// Open a serial port with explicit baud rate and read timeout.
    pub fn open(port: impl Into<String>, baud_rate: u32, timeout: Duration) -> Result<Self> {
        Self::open_with_config(&SerialConfig {
            port: port.into(),
            baud_rate,
            timeout,
        })
    }

    /// Open a serial port from a [`SerialConfig`].
    pub fn open_with_config(config: &SerialConfig) -> Result<Self> {
        let inner = serialport::new(config.port.as_str(), config.baud_rate)
            .timeout(config.timeout)
            .open()
            .map_err(|e| TransportError::Open {
                port: config.port.clone(),
                source: e,
            })?;

        info!(
            port = %config.port,
            baud_rate = config.baud_rate,
            timeout_ms = config.timeout.as_millis() as u64,
            "opened serial link"
        );

        Ok(Self {
            inner,
            port: config.port.clone(),
        })
    }

    /// Update the read timeout on the open port.
    pub fn set_timeout(&mut self, timeout: Duration) -> Result<()> {
        self.inner
            .set_timeout(timeout)
            .map_err(|e| TransportError::Configure {
                port: self.port.clone(),
                source: e,
            })?;
        debug!(port = %self.port, timeout_ms = timeout.as_millis() as u64, "updated read timeout");
        Ok(())
    }

    /// The port name this link was opened on.
    pub fn port_name(&self) -> &str {
        &self.port
    }
}

impl Read for SerialLink {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for SerialLink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl std::fmt::Debug for SerialLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialLink").field("port", &self.port).finish()
    }
}

/// List the serial ports visible on this host, by name.
pub fn available_ports() -> Result<Vec<String>> {
    let ports = serialport::available_ports().map_err(TransportError::Enumerate)?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}
