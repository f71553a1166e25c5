//! Captured register reads.
//!
//! A capture is a flat sequence of 4-byte records
//! `chip tag | register | high | low`, as logged by a bus sniffer or by the
//! transport itself. Decoding a capture runs the same conversions as a live
//! read, one [`Device`] per chip seen in the capture.

use std::collections::HashMap;
use std::io::Cursor;

use binrw::{BinRead, BinResult, BinWrite};
use log::debug;
use serde::Serialize;

use crate::chips::ChipFamily;
use crate::data_models::{DeviceConfig, RawRegisterPair, Unit};
use crate::decode::decode;
use crate::device::Device;
use crate::error::{DecodeError, Result};

#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(big)]
pub struct CaptureRecord {
    pub chip: ChipFamily,
    pub register: u8,
    pub raw: RawRegisterPair,
}

/// Read records until the input is exhausted.
pub fn parse_capture(bytes: &[u8]) -> BinResult<Vec<CaptureRecord>> {
    let mut reader = Cursor::new(bytes);
    let mut records = Vec::new();
    while (reader.position() as usize) < bytes.len() {
        records.push(CaptureRecord::read_be(&mut reader)?);
    }
    debug!("parsed {} capture records", records.len());
    Ok(records)
}

pub fn write_capture(records: &[CaptureRecord]) -> BinResult<Vec<u8>> {
    let mut writer = Cursor::new(Vec::new());
    for record in records {
        record.write_be(&mut writer)?;
    }
    Ok(writer.into_inner())
}

/// One decoded record, as printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedSample {
    pub chip: String,
    pub register: u8,
    pub channel: &'static str,
    pub value: i64,
    pub unit: Unit,
}

/// Decodes records, attaching a device per chip on first sight.
pub struct CaptureDecoder {
    config: DeviceConfig,
    devices: HashMap<ChipFamily, Device>,
}

impl CaptureDecoder {
    pub fn new(config: DeviceConfig) -> Self {
        Self {
            config,
            devices: HashMap::new(),
        }
    }

    fn device(&mut self, chip: ChipFamily) -> &Device {
        let config = &self.config;
        self.devices
            .entry(chip)
            .or_insert_with(|| Device::attach(chip, config.clone()))
    }

    pub fn decode(&mut self, record: &CaptureRecord) -> Result<DecodedSample> {
        let device = self.device(record.chip);
        let descriptor = device
            .channel_for_register(record.register)
            .ok_or(DecodeError::InvalidRegister {
                chip: record.chip,
                register: record.register,
            })?;
        let reading = decode(record.chip, descriptor, record.raw, device.config())?;
        Ok(DecodedSample {
            chip: record.chip.to_string(),
            register: record.register,
            channel: descriptor.name,
            value: reading.value,
            unit: reading.unit,
        })
    }
}
