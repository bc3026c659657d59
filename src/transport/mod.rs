//! Transport layer for byte-level I/O abstraction

use crate::error::LinkError;

mod mock;
mod serial;

pub use mock::MockTransport;
pub use serial::SerialTransport;

/// Transport trait for sensor communication
pub trait Transport: Send {
    /// Read data into buffer, returns number of bytes read (0 on timeout)
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, LinkError>;

    /// Write data from buffer, returns number of bytes written
    fn write(&mut self, data: &[u8]) -> Result<usize, LinkError>;

    /// Flush any pending writes (blocking until complete)
    fn flush(&mut self) -> Result<(), LinkError>;

    /// Check if data is available to read
    fn available(&mut self) -> Result<usize, LinkError> {
        Ok(0) // Default implementation
    }
}
