//! Sample driver for the VN-100 acquisition library
//!
//! Loads the connection config, opens the sensor, then polls at the
//! configured cadence and prints each fresh snapshot until Ctrl-C. The
//! per-iteration sleep is compensated for the time spent polling so the
//! consumption cadence tracks the configured sample rate.

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use vn100_io::{Config, Error, Imu, Result};

/// Parse config path from command line arguments.
///
/// Supports:
/// - `vn100-io <path>` (positional)
/// - `vn100-io --config <path>` (flag-based)
/// - `vn100-io -c <path>` (short flag)
///
/// Defaults to `vn100.cfg` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    "vn100.cfg".to_string()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = parse_config_path();
    log::info!("Using config: {}", config_path);

    let config = Config::load(&config_path)?;
    log::info!(
        "Loaded config: port={}, baud_rate={}, frequency={} Hz",
        config.port,
        config.baud_rate,
        config.frequency_hz
    );

    let mut imu = Imu::new();
    imu.open(&config)?;

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let period = Duration::from_millis(u64::from(1000 / config.frequency_hz.max(1)));

    while running.load(Ordering::Relaxed) {
        let started = Instant::now();

        imu.poll_once();
        if let Some(s) = imu.latest() {
            println!(
                "ypr: {:?} | gyro: {:?} | accel: {:?} | quat: {:?}",
                s.ypr, s.angular_rate, s.accel, s.quaternion
            );
        }

        let elapsed = started.elapsed();
        if elapsed < period {
            thread::sleep(period - elapsed);
        }
    }

    imu.close();
    log::info!("Driver exiting");
    Ok(())
}
