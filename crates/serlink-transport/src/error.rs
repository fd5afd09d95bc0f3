/// Errors that can occur in serial transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the specified serial port.
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        source: serialport::Error,
    },

    /// Failed to reconfigure the open port.
    #[error("failed to configure serial port {port}: {source}")]
    Configure {
        port: String,
        source: serialport::Error,
    },

    /// Failed to enumerate serial ports on this host.
    #[error("failed to enumerate serial ports: {0}")]
    Enumerate(serialport::Error),

    /// An I/O error occurred on the serial stream.
    #[error("serial I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;
