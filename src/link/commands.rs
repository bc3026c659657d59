//! ASCII register commands for configuring the sensor output
//!
//! Configuration uses the ASCII register-write form
//! `$VNWRG,<reg>,<fields...>*<checksum>\r\n` where the checksum is the
//! 8-bit XOR of every character between `$` and `*`.

use super::frame::{GROUP_COMMON, OUTPUT_FIELDS};
use crate::error::LinkError;

/// Base streaming rate of the sensor in Hz. The output register takes a
/// divisor of this rate, not a frequency.
pub const BASE_RATE_HZ: u32 = 800;

/// Binary output register
const REG_BINARY_OUTPUT_1: u8 = 75;

/// Async mode: stream on serial port 1
const ASYNC_MODE_PORT_1: u8 = 1;

/// Compute the output rate divisor for a requested sample rate
///
/// Rejects zero, rates above [`BASE_RATE_HZ`], and rates that do not
/// divide the base rate evenly (the register cannot express them, and
/// rounding would silently deliver a different rate than requested).
pub fn rate_divisor(frequency_hz: u32) -> Result<u16, LinkError> {
    if frequency_hz == 0 || frequency_hz > BASE_RATE_HZ || BASE_RATE_HZ % frequency_hz != 0 {
        return Err(LinkError::InvalidFrequency(frequency_hz));
    }
    Ok((BASE_RATE_HZ / frequency_hz) as u16)
}

/// Register write selecting the four snapshot measurement groups at the
/// given rate divisor
pub(crate) fn binary_output_command(divisor: u16) -> String {
    let body = format!(
        "VNWRG,{},{},{},{:02X},{:04X}",
        REG_BINARY_OUTPUT_1, ASYNC_MODE_PORT_1, divisor, GROUP_COMMON, OUTPUT_FIELDS
    );
    format!("${}*{:02X}\r\n", body, ascii_checksum(&body))
}

fn ascii_checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_divisor() {
        assert_eq!(rate_divisor(200).unwrap(), 4);
        assert_eq!(rate_divisor(800).unwrap(), 1);
        assert_eq!(rate_divisor(100).unwrap(), 8);
    }

    #[test]
    fn test_rate_divisor_rejects_zero() {
        assert!(matches!(rate_divisor(0), Err(LinkError::InvalidFrequency(0))));
    }

    #[test]
    fn test_rate_divisor_rejects_above_base_rate() {
        assert!(matches!(
            rate_divisor(1600),
            Err(LinkError::InvalidFrequency(1600))
        ));
    }

    #[test]
    fn test_rate_divisor_rejects_uneven_rate() {
        // 800 / 300 does not divide evenly
        assert!(matches!(
            rate_divisor(300),
            Err(LinkError::InvalidFrequency(300))
        ));
    }

    #[test]
    fn test_binary_output_command_checksum() {
        assert_eq!(binary_output_command(4), "$VNWRG,75,1,4,01,0138*7A\r\n");
    }

    #[test]
    fn test_ascii_checksum() {
        // XOR of a single character is the character itself
        assert_eq!(ascii_checksum("A"), 0x41);
        assert_eq!(ascii_checksum(""), 0);
    }
}
