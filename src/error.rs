//! Error types for the VN-100 driver
//!
//! Two failure classes are kept deliberately distinct:
//!
//! - [`ConfigError`] and [`LinkError`] are fatal and always propagate to the
//!   caller (bad configuration aborts startup; a link failure aborts `open`,
//!   which the caller may retry from the closed state).
//! - Per-frame faults (incomplete frame, CRC mismatch, timeout) are soft:
//!   they never escape the poll loop. They are logged and surface only as
//!   `Imu::latest()` returning `None`.

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors (fatal at startup)
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config source could not be read
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Required key absent from the recognized section
    #[error("Config missing required key '{0}'")]
    MissingKey(&'static str),

    /// Key present but its value does not parse
    #[error("Config key '{key}' has invalid value '{value}'")]
    InvalidValue {
        /// Key whose value was rejected
        key: &'static str,
        /// Offending value as found in the source
        value: String,
    },
}

/// Sensor link errors (fatal for `open`; recoverable by retrying from Closed)
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Serial port error
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Link is already open; `close()` first
    #[error("Link already open")]
    AlreadyOpen,

    /// Operation requires an open link
    #[error("Link not open")]
    NotOpen,

    /// Sample rate must be positive and divide the sensor base rate evenly
    #[error("Unsupported sample rate: {0} Hz")]
    InvalidFrequency(u32),
}

/// Top-level error for binaries and callers that handle both classes
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Link failure
    #[error(transparent)]
    Link(#[from] LinkError),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
