//! EMC1704 temperature and voltage monitor.
//!
//! Only the high-side channels are mapped.

use super::{ChannelDescriptor, QuantityKind};
use crate::bus_voltage::{BusEncoding, EMC1704_SOURCE_WEIGHTS_UV};
use crate::sense::{SenseEncoding, SenseLayout, SenseOutput, SenseScale};

pub mod regs {
    pub const INTERNAL_TEMP: u8 = 0x38;
    pub const EXTERNAL1_TEMP: u8 = 0x3A;
    pub const EXTERNAL2_TEMP: u8 = 0x3C;
    pub const EXTERNAL3_TEMP: u8 = 0x3E;
    pub const SENSE_VOLTAGE: u8 = 0x55;
    pub const SOURCE_VOLTAGE: u8 = 0x58;
}

const SOURCE: QuantityKind =
    QuantityKind::BusVoltage(BusEncoding::Weighted(&EMC1704_SOURCE_WEIGHTS_UV));

const SENSE_ENCODING: SenseEncoding = SenseEncoding {
    layout: SenseLayout::SignMagnitude11,
    scale: SenseScale::Configured,
};

const TEMP: QuantityKind = QuantityKind::Temperature;

/// The sense register backs two channels; current is listed first so a
/// lookup by register reports milliamps.
pub static CHANNELS: [ChannelDescriptor; 7] = [
    ChannelDescriptor::byte_pair("internal_temp", regs::INTERNAL_TEMP, TEMP, 0),
    ChannelDescriptor::byte_pair("external1_temp", regs::EXTERNAL1_TEMP, TEMP, 1),
    ChannelDescriptor::byte_pair("external2_temp", regs::EXTERNAL2_TEMP, TEMP, 2),
    ChannelDescriptor::byte_pair("external3_temp", regs::EXTERNAL3_TEMP, TEMP, 3),
    ChannelDescriptor::byte_pair("source_voltage", regs::SOURCE_VOLTAGE, SOURCE, 0),
    ChannelDescriptor::byte_pair(
        "sense_current",
        regs::SENSE_VOLTAGE,
        QuantityKind::SenseVoltage {
            encoding: SENSE_ENCODING,
            output: SenseOutput::Current,
        },
        0,
    ),
    ChannelDescriptor::byte_pair(
        "sense_voltage",
        regs::SENSE_VOLTAGE,
        QuantityKind::SenseVoltage {
            encoding: SENSE_ENCODING,
            output: SenseOutput::Voltage,
        },
        0,
    ),
];
