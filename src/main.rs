use std::env;

use dotenv::dotenv;
use env_logger::{Builder, Target};
use log::{info, warn};

use hwmon_decode::DeviceConfig;
use hwmon_decode::capture::{CaptureDecoder, parse_capture};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the decoded samples
    Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();
    dotenv().ok();

    let capture_path = env::args()
        .nth(1)
        .or_else(|| env::var("CAPTURE_FILE").ok())
        .ok_or("usage: hwmon-decode <capture-file> (or set CAPTURE_FILE)")?;

    let config = match env::var("DEVICE_CONFIG") {
        Ok(path) => DeviceConfig::from_json_file(&path)?,
        Err(_) => DeviceConfig::from_env()?,
    };
    info!(
        "Shunts {:?} uOhm, APD {}, sense range {:?}",
        config.shunt_resistance_uohm, config.anti_parallel_diode_mode, config.sense_range
    );

    let bytes = std::fs::read(&capture_path)?;
    let records = parse_capture(&bytes)?;
    info!("Decoding {} records from {}", records.len(), capture_path);

    let mut decoder = CaptureDecoder::new(config);
    let mut failed = 0usize;
    for record in &records {
        match decoder.decode(record) {
            Ok(sample) => println!("{}", serde_json::to_string(&sample)?),
            Err(e) => {
                warn!("Skipping record: {}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        warn!("{} of {} records could not be decoded", failed, records.len());
    }
    Ok(())
}
