//! Acquisition loop: poll, validate, publish-or-reject
//!
//! [`Imu`] owns the sensor link, the link state and the latest-snapshot
//! cell. Polling cadence and consumption cadence are deliberately
//! decoupled: `poll_once` is driven at the sensor rate, `latest` is a
//! level-triggered read of the last published snapshot ("last value
//! wins", not a queue).
//!
//! Failure asymmetry: `open` errors are fatal and propagate; per-poll
//! faults (incomplete frame, timeout, read error) are soft. A soft fault
//! clears the freshness flag so `latest` reports no data instead of
//! stale numbers, logs a warning and leaves the link open.

use crate::config::Config;
use crate::error::LinkError;
use crate::link::{SensorLink, SerialLink};
use crate::types::ImuSnapshot;
use std::time::Duration;

/// How long one poll waits for a frame before giving up
const FRAME_TIMEOUT: Duration = Duration::from_millis(50);

/// Link lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    Closed,
    Open,
}

/// VN-100 acquisition driver
pub struct Imu {
    link: Box<dyn SensorLink>,
    state: LinkState,
    snapshot: ImuSnapshot,
    /// True only while `snapshot` reflects the last frame in full
    valid: bool,
}

impl Imu {
    /// Create a driver over the serial sensor link
    pub fn new() -> Self {
        Self::with_link(Box::new(SerialLink::new()))
    }

    /// Create a driver over any sensor link implementation
    pub fn with_link(link: Box<dyn SensorLink>) -> Self {
        Imu {
            link,
            state: LinkState::Closed,
            snapshot: ImuSnapshot::zero(),
            valid: false,
        }
    }

    /// Connect and configure the sensor
    ///
    /// Requires the closed state; opening an already-open driver fails
    /// with [`LinkError::AlreadyOpen`]. If configuration fails after the
    /// connection was established, the link is disconnected before the
    /// error is surfaced, so no half-configured handle is left open.
    pub fn open(&mut self, config: &Config) -> Result<(), LinkError> {
        if self.state == LinkState::Open {
            return Err(LinkError::AlreadyOpen);
        }

        self.link.connect(&config.port, config.baud_rate)?;
        if let Err(e) = self.link.configure_output(config.frequency_hz) {
            self.link.disconnect();
            return Err(e);
        }

        self.state = LinkState::Open;
        log::info!(
            "IMU open on {} at {} baud, {} Hz",
            config.port,
            config.baud_rate,
            config.frequency_hz
        );
        Ok(())
    }

    /// Poll for one frame and publish it if complete
    ///
    /// No-op when closed. Soft failures never change the link state.
    pub fn poll_once(&mut self) {
        if self.state != LinkState::Open {
            return;
        }

        match self.link.next_frame(FRAME_TIMEOUT) {
            Ok(Some(frame)) => match frame.to_snapshot() {
                Some(snapshot) => {
                    self.snapshot = snapshot;
                    self.valid = true;
                }
                None => {
                    self.valid = false;
                    log::warn!("Incomplete frame from IMU (missing measurement group)");
                }
            },
            Ok(None) => {
                self.valid = false;
                log::warn!("Timed out waiting for IMU frame");
            }
            Err(e) => {
                self.valid = false;
                log::warn!("IMU frame read error: {}", e);
            }
        }
    }

    /// Latest snapshot, if the last poll published one
    ///
    /// Level-triggered: repeated reads between polls return the same
    /// value; reading never consumes the snapshot.
    pub fn latest(&self) -> Option<ImuSnapshot> {
        self.valid.then_some(self.snapshot)
    }

    /// Whether the link is open
    pub fn is_open(&self) -> bool {
        self.state == LinkState::Open
    }

    /// Close the link
    ///
    /// Idempotent. Always releases the link handle, even when logically
    /// closed already, so no handle can leak on teardown paths.
    pub fn close(&mut self) {
        self.link.disconnect();
        self.state = LinkState::Closed;
    }
}

impl Default for Imu {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Imu {
    fn drop(&mut self) {
        self.close();
    }
}
