//! Serial sensor link

use super::commands;
use super::frame::Frame;
use super::reader::FrameReader;
use super::SensorLink;
use crate::error::LinkError;
use crate::transport::{SerialTransport, Transport};
use std::thread;
use std::time::{Duration, Instant};

/// Sleep between empty reads while waiting for a frame
const POLL_SLEEP: Duration = Duration::from_millis(1);

/// Sensor link over a byte transport
///
/// Holds at most one open transport; `disconnect` drops the handle and
/// any partially-buffered frame data.
#[derive(Default)]
pub struct SerialLink {
    transport: Option<Box<dyn Transport>>,
    reader: FrameReader,
}

impl SerialLink {
    /// Create an unconnected link; `connect` opens the serial port
    pub fn new() -> Self {
        Self::default()
    }

    /// Build over an existing transport (tests, alternate byte sources)
    pub fn from_transport<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Some(Box::new(transport)),
            reader: FrameReader::new(),
        }
    }
}

impl SensorLink for SerialLink {
    fn connect(&mut self, port: &str, baud_rate: u32) -> Result<(), LinkError> {
        if self.transport.is_some() {
            return Err(LinkError::AlreadyOpen);
        }
        let transport = SerialTransport::open(port, baud_rate)?;
        self.transport = Some(Box::new(transport));
        Ok(())
    }

    fn configure_output(&mut self, frequency_hz: u32) -> Result<(), LinkError> {
        let divisor = commands::rate_divisor(frequency_hz)?;
        let transport = self.transport.as_mut().ok_or(LinkError::NotOpen)?;

        let command = commands::binary_output_command(divisor);
        let mut data = command.as_bytes();
        while !data.is_empty() {
            let written = transport.write(data)?;
            if written == 0 {
                return Err(LinkError::Io(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "Transport accepted no bytes",
                )));
            }
            data = &data[written..];
        }
        transport.flush()?;

        log::info!(
            "Configured output: {} Hz (rate divisor {})",
            frequency_hz,
            divisor
        );
        Ok(())
    }

    fn next_frame(&mut self, timeout: Duration) -> Result<Option<Frame>, LinkError> {
        let transport = self.transport.as_mut().ok_or(LinkError::NotOpen)?;
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(frame) = self.reader.read_frame(transport.as_mut())? {
                return Ok(Some(frame));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            thread::sleep(POLL_SLEEP);
        }
    }

    fn disconnect(&mut self) {
        if self.transport.take().is_some() {
            log::info!("Sensor link disconnected");
        }
        self.reader.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::frame::{encode, encode_output_payload, OUTPUT_FIELDS};
    use crate::transport::MockTransport;

    #[test]
    fn test_configure_output_writes_register_command() {
        let mock = MockTransport::new();
        let mut link = SerialLink::from_transport(mock.clone());

        link.configure_output(200).unwrap();
        assert_eq!(mock.get_written(), b"$VNWRG,75,1,4,01,0138*7A\r\n");
    }

    #[test]
    fn test_configure_output_rejects_bad_rate_before_writing() {
        let mock = MockTransport::new();
        let mut link = SerialLink::from_transport(mock.clone());

        assert!(matches!(
            link.configure_output(0),
            Err(LinkError::InvalidFrequency(0))
        ));
        assert!(mock.get_written().is_empty());
    }

    #[test]
    fn test_configure_output_requires_connection() {
        let mut link = SerialLink::new();
        assert!(matches!(
            link.configure_output(200),
            Err(LinkError::NotOpen)
        ));
    }

    #[test]
    fn test_next_frame_decodes_injected_packet() {
        let mock = MockTransport::new();
        let payload = encode_output_payload(
            [1.0, 2.0, 3.0],
            [0.0, 0.0, 0.0, 1.0],
            [0.1, 0.2, 0.3],
            [0.0, 0.0, 9.81],
        );
        mock.inject_read(&encode(OUTPUT_FIELDS, &payload));

        let mut link = SerialLink::from_transport(mock);
        let frame = link
            .next_frame(Duration::from_millis(50))
            .unwrap()
            .unwrap();
        assert_eq!(frame.ypr, Some([1.0, 2.0, 3.0]));
        assert_eq!(frame.accel, Some([0.0, 0.0, 9.81]));
    }

    #[test]
    fn test_next_frame_times_out_without_data() {
        let mut link = SerialLink::from_transport(MockTransport::new());
        let result = link.next_frame(Duration::from_millis(5)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_next_frame_requires_connection() {
        let mut link = SerialLink::new();
        assert!(matches!(
            link.next_frame(Duration::from_millis(1)),
            Err(LinkError::NotOpen)
        ));
    }

    #[test]
    fn test_disconnect_is_idempotent() {
        let mut link = SerialLink::from_transport(MockTransport::new());
        link.disconnect();
        link.disconnect();
        assert!(matches!(
            link.next_frame(Duration::from_millis(1)),
            Err(LinkError::NotOpen)
        ));
    }

    #[test]
    fn test_connect_while_open_fails() {
        let mut link = SerialLink::from_transport(MockTransport::new());
        assert!(matches!(
            link.connect("/dev/null", 115200),
            Err(LinkError::AlreadyOpen)
        ));
    }
}
