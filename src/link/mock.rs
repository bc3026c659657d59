//! Scripted sensor link for testing
//!
//! Clones share state, so a test can keep one handle for scripting and
//! inspection while the acquisition loop owns the other.

use super::frame::Frame;
use super::SensorLink;
use crate::error::LinkError;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Outcome of one `next_frame` call
enum Scripted {
    Frame(Frame),
    Timeout,
    ReadError,
}

#[derive(Default)]
struct MockLinkInner {
    script: VecDeque<Scripted>,
    connected: bool,
    configured_hz: Option<u32>,
    fail_connect: bool,
    fail_configure: bool,
    disconnects: usize,
}

/// Scripted sensor link
#[derive(Clone, Default)]
pub struct MockLink {
    inner: Arc<Mutex<MockLinkInner>>,
}

impl MockLink {
    /// Create a link that connects and configures successfully
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a frame for the next `next_frame` call
    pub fn push_frame(&self, frame: Frame) {
        self.inner.lock().unwrap().script.push_back(Scripted::Frame(frame));
    }

    /// Queue a timeout (no frame)
    pub fn push_timeout(&self) {
        self.inner.lock().unwrap().script.push_back(Scripted::Timeout);
    }

    /// Queue a transport read error
    pub fn push_read_error(&self) {
        self.inner.lock().unwrap().script.push_back(Scripted::ReadError);
    }

    /// Make the next `connect` fail
    pub fn fail_connect(&self) {
        self.inner.lock().unwrap().fail_connect = true;
    }

    /// Make the next `configure_output` fail
    pub fn fail_configure(&self) {
        self.inner.lock().unwrap().fail_configure = true;
    }

    /// Whether the link is currently connected
    pub fn is_connected(&self) -> bool {
        self.inner.lock().unwrap().connected
    }

    /// Sample rate passed to `configure_output`, if it was called
    pub fn configured_hz(&self) -> Option<u32> {
        self.inner.lock().unwrap().configured_hz
    }

    /// Number of `disconnect` calls observed
    pub fn disconnect_count(&self) -> usize {
        self.inner.lock().unwrap().disconnects
    }
}

impl SensorLink for MockLink {
    fn connect(&mut self, _port: &str, _baud_rate: u32) -> Result<(), LinkError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.connected {
            return Err(LinkError::AlreadyOpen);
        }
        if inner.fail_connect {
            return Err(LinkError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Scripted connect failure",
            )));
        }
        inner.connected = true;
        Ok(())
    }

    fn configure_output(&mut self, frequency_hz: u32) -> Result<(), LinkError> {
        super::commands::rate_divisor(frequency_hz)?;
        let mut inner = self.inner.lock().unwrap();
        if !inner.connected {
            return Err(LinkError::NotOpen);
        }
        if inner.fail_configure {
            return Err(LinkError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "Scripted configure failure",
            )));
        }
        inner.configured_hz = Some(frequency_hz);
        Ok(())
    }

    fn next_frame(&mut self, _timeout: Duration) -> Result<Option<Frame>, LinkError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.connected {
            return Err(LinkError::NotOpen);
        }
        match inner.script.pop_front() {
            Some(Scripted::Frame(frame)) => Ok(Some(frame)),
            Some(Scripted::Timeout) | None => Ok(None),
            Some(Scripted::ReadError) => Err(LinkError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "Scripted read failure",
            ))),
        }
    }

    fn disconnect(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        inner.connected = false;
        inner.disconnects += 1;
    }
}
