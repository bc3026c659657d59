//! Sensor link boundary
//!
//! [`SensorLink`] is the seam between the acquisition loop and the
//! physical sensor: connect, select outputs, fetch frames, disconnect.
//! [`SerialLink`] is the real implementation over a byte [`Transport`];
//! [`MockLink`] scripts frame outcomes for tests.
//!
//! [`Transport`]: crate::transport::Transport

mod commands;
mod frame;
mod mock;
mod reader;
mod serial;

pub use commands::{rate_divisor, BASE_RATE_HZ};
pub use frame::Frame;
pub use mock::MockLink;
pub use reader::FrameReader;
pub use serial::SerialLink;

use crate::error::LinkError;
use std::time::Duration;

/// Boundary to the sensor hardware
pub trait SensorLink: Send {
    /// Open the connection to the sensor
    fn connect(&mut self, port: &str, baud_rate: u32) -> Result<(), LinkError>;

    /// Select the streamed measurement groups and the sample rate
    fn configure_output(&mut self, frequency_hz: u32) -> Result<(), LinkError>;

    /// Wait up to `timeout` for the next decoded frame
    ///
    /// Returns `Ok(None)` on timeout. Never yields a partially decoded
    /// frame: a frame either passed CRC validation or is dropped.
    fn next_frame(&mut self, timeout: Duration) -> Result<Option<Frame>, LinkError>;

    /// Release the connection; idempotent, safe when not connected
    fn disconnect(&mut self);
}
