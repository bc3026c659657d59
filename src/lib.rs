//! VN-100 IMU acquisition driver
//!
//! Polls a VectorNav VN-100 over a serial link and maintains the most
//! recent valid reading behind a freshness flag:
//!
//! - [`Config`] loads the line-oriented connection config (port, baud
//!   rate, sample rate).
//! - [`Imu`] owns the sensor link and runs the poll/validate/publish
//!   cycle; [`Imu::latest`] hands out snapshot copies decoupled from the
//!   polling cadence.
//! - The [`link`] module is the sensor boundary: frame codec, register
//!   commands, serial and mock link implementations.
//!
//! ```no_run
//! use vn100_io::{Config, Imu};
//!
//! let config = Config::load("vn100.cfg")?;
//! let mut imu = Imu::new();
//! imu.open(&config)?;
//! imu.poll_once();
//! if let Some(snapshot) = imu.latest() {
//!     println!("ypr: {:?}", snapshot.ypr);
//! }
//! imu.close();
//! # Ok::<(), vn100_io::Error>(())
//! ```

pub mod acquisition;
pub mod config;
pub mod error;
pub mod link;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use acquisition::Imu;
pub use config::Config;
pub use error::{ConfigError, Error, LinkError, Result};
pub use types::ImuSnapshot;
