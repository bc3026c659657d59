//! Connection configuration for the VN-100 driver
//!
//! The config format is a line-oriented text file fixed by existing
//! deployments (not TOML), so parsing is done by hand:
//!
//! ```text
//! vn100:
//!   port = /dev/ttyUSB0
//!   baud_rate = 115200
//!   frequency = 200
//! ```
//!
//! Sections open with either `name:` or `[name]`; keys use `=` or `:`.
//! Only keys inside the `vn100` section are read. Values may be quoted.

use crate::error::ConfigError;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Section name whose keys are retained
const SECTION: &str = "vn100";

/// Sample rate used when the `frequency` key is absent
pub const DEFAULT_FREQUENCY_HZ: u32 = 200;

/// Typed connection parameters, immutable after load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Serial device path (e.g. `/dev/ttyUSB0`)
    pub port: String,
    /// Serial baud rate
    pub baud_rate: u32,
    /// Sample rate in Hz
    pub frequency_hz: u32,
}

impl Config {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from text
    ///
    /// `port` and `baud_rate` are required; a missing `frequency` defaults
    /// to [`DEFAULT_FREQUENCY_HZ`]. The last occurrence of a duplicate key
    /// wins.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut section = String::new();
        let mut params: HashMap<String, String> = HashMap::new();

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = section_header(line) {
                section = name;
                continue;
            }

            if section != SECTION {
                continue;
            }

            // First `=` or `:` splits key from value
            let Some(idx) = line.find(['=', ':']) else {
                continue;
            };
            let key: String = line[..idx].chars().filter(|c| !c.is_whitespace()).collect();
            let value = line[idx + 1..].trim_matches(|c: char| c == '"' || c == ' ' || c == '\t');
            if key.is_empty() || value.is_empty() {
                continue;
            }
            params.insert(key, value.to_string());
        }

        let port = params
            .remove("port")
            .ok_or(ConfigError::MissingKey("port"))?;
        let baud_rate =
            parse_int(&params, "baud_rate")?.ok_or(ConfigError::MissingKey("baud_rate"))?;
        let frequency_hz = parse_int(&params, "frequency")?.unwrap_or(DEFAULT_FREQUENCY_HZ);

        Ok(Config {
            port,
            baud_rate,
            frequency_hz,
        })
    }
}

/// Recognize `name:` or `[name]` section headers; whitespace is removed
/// from the name.
fn section_header(line: &str) -> Option<String> {
    let name = if let Some(inner) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        inner
    } else if let Some(inner) = line.strip_suffix(':') {
        inner
    } else {
        return None;
    };
    Some(name.chars().filter(|c| !c.is_whitespace()).collect())
}

fn parse_int(
    params: &HashMap<String, String>,
    key: &'static str,
) -> Result<Option<u32>, ConfigError> {
    match params.get(key) {
        None => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key,
                value: value.clone(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_colon_section_equals_keys() {
        let config = Config::parse(
            "vn100:\n  port = /dev/ttyUSB0\n  baud_rate = 115200\n  frequency = 200\n",
        )
        .unwrap();
        assert_eq!(config.port, "/dev/ttyUSB0");
        assert_eq!(config.baud_rate, 115200);
        assert_eq!(config.frequency_hz, 200);
    }

    #[test]
    fn test_bracket_section_colon_keys() {
        let config =
            Config::parse("[vn100]\nport: /dev/ttyS1\nbaud_rate: 921600\nfrequency: 400\n")
                .unwrap();
        assert_eq!(config.port, "/dev/ttyS1");
        assert_eq!(config.baud_rate, 921600);
        assert_eq!(config.frequency_hz, 400);
    }

    #[test]
    fn test_separator_styles_agree() {
        let a = Config::parse("vn100:\nport=/dev/ttyUSB0\nbaud_rate=115200\nfrequency=200\n")
            .unwrap();
        let b = Config::parse(
            "[ vn100 ]\n  port : \"/dev/ttyUSB0\"\n  baud_rate:\t115200\n  frequency = \"200\"\n",
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let config = Config::parse(
            "# header comment\n\nvn100:\n  # port for the bench unit\n  port = COM3\n  baud_rate = 115200\n",
        )
        .unwrap();
        assert_eq!(config.port, "COM3");
    }

    #[test]
    fn test_keys_outside_section_ignored() {
        let text = "port = /dev/wrong\n\
                    other:\n  port = /dev/also_wrong\n  baud_rate = 9600\n\
                    vn100:\n  port = /dev/right\n  baud_rate = 115200\n";
        let config = Config::parse(text).unwrap();
        assert_eq!(config.port, "/dev/right");
        assert_eq!(config.baud_rate, 115200);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let config = Config::parse(
            "vn100:\n  port = /dev/ttyUSB0\n  port = /dev/ttyUSB1\n  baud_rate = 115200\n",
        )
        .unwrap();
        assert_eq!(config.port, "/dev/ttyUSB1");
    }

    #[test]
    fn test_missing_port_is_fatal() {
        let err = Config::parse("vn100:\n  baud_rate = 115200\n  frequency = 200\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("port")));
    }

    #[test]
    fn test_missing_baud_rate_is_fatal() {
        let err = Config::parse("vn100:\n  port = /dev/ttyUSB0\n  frequency = 200\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("baud_rate")));
    }

    #[test]
    fn test_missing_frequency_defaults() {
        let config =
            Config::parse("vn100:\n  port = /dev/ttyUSB0\n  baud_rate = 115200\n").unwrap();
        assert_eq!(config.frequency_hz, DEFAULT_FREQUENCY_HZ);
    }

    #[test]
    fn test_non_integer_baud_rate_rejected() {
        let err =
            Config::parse("vn100:\n  port = /dev/ttyUSB0\n  baud_rate = fast\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "baud_rate",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_key_or_value_discarded() {
        // "= 9600" has an empty key, "port =" an empty value; neither is stored
        let err = Config::parse("vn100:\n  = 9600\n  port =\n  baud_rate = 115200\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("port")));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "vn100:\n  port = /dev/ttyUSB0\n  baud_rate = 115200\n  frequency = 100\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.port, "/dev/ttyUSB0");
        assert_eq!(config.frequency_hz, 100);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load("/nonexistent/vn100.cfg").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
