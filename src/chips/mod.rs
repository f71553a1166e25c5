//! Per-family register maps.
//!
//! Each family exposes a static table of [`ChannelDescriptor`]s. The quantity
//! kind on a descriptor is fixed when the table is written, so a register is
//! never interpreted by guessing from its address at decode time.

use std::fmt;

use crate::bus_voltage::BusEncoding;
use crate::data_models::DeviceConfig;
use crate::sense::{SenseEncoding, SenseOutput};

pub mod emc1704;
pub mod emc181x;
pub mod pac1934;

pub use emc181x::Variant as Emc181xVariant;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ChipFamily {
    Emc1704,
    Emc181x(Emc181xVariant),
    Pac1934,
}

impl ChipFamily {
    /// Tag byte identifying the chip in a capture record
    pub const fn tag(self) -> u8 {
        match self {
            ChipFamily::Emc1704 => 0x04,
            ChipFamily::Emc181x(variant) => variant.tag(),
            ChipFamily::Pac1934 => 0x34,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x04 => Some(ChipFamily::Emc1704),
            0x34 => Some(ChipFamily::Pac1934),
            _ => Emc181xVariant::from_tag(tag).map(ChipFamily::Emc181x),
        }
    }

    /// Full descriptor table, in the order lookups by register walk it.
    pub fn register_map(self) -> &'static [ChannelDescriptor] {
        match self {
            ChipFamily::Emc1704 => &emc1704::CHANNELS,
            ChipFamily::Emc181x(_) => &emc181x::CHANNELS,
            ChipFamily::Pac1934 => &pac1934::CHANNELS,
        }
    }

    /// Number of physical temperature channels
    pub fn temperature_channels(self) -> u8 {
        self.channel_count(Measurement::Temperature)
    }

    /// Number of physical channels carrying `measurement`. Averaged and
    /// instantaneous registers of one channel count once.
    pub fn channel_count(self, measurement: Measurement) -> u8 {
        match (self, measurement) {
            (ChipFamily::Emc181x(variant), Measurement::Temperature) => variant.channel_count(),
            _ => self
                .register_map()
                .iter()
                .filter(|d| d.kind.measurement() == measurement)
                .map(|d| d.channel + 1)
                .max()
                .unwrap_or(0),
        }
    }

    /// Whether a descriptor is exposed for this chip and configuration.
    pub fn is_visible(self, descriptor: &ChannelDescriptor, config: &DeviceConfig) -> bool {
        match self {
            ChipFamily::Emc181x(variant) => {
                variant.is_visible(descriptor.channel, config.anti_parallel_diode_mode)
            }
            _ => true,
        }
    }

    /// Command the chip needs before its result registers hold fresh data,
    /// as `(register, value)`.
    pub fn refresh_command(self) -> Option<(u8, u8)> {
        match self {
            ChipFamily::Pac1934 => Some((pac1934::regs::REFRESH, pac1934::REFRESH_COMMAND)),
            _ => None,
        }
    }
}

impl fmt::Display for ChipFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChipFamily::Emc1704 => f.write_str("emc1704"),
            ChipFamily::Emc181x(variant) => f.write_str(variant.name()),
            ChipFamily::Pac1934 => f.write_str("pac1934"),
        }
    }
}

/// Decode scheme of a channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuantityKind {
    Temperature,
    BusVoltage(BusEncoding),
    SenseVoltage {
        encoding: SenseEncoding,
        output: SenseOutput,
    },
}

impl QuantityKind {
    pub fn measurement(self) -> Measurement {
        match self {
            QuantityKind::Temperature => Measurement::Temperature,
            QuantityKind::BusVoltage(_) => Measurement::BusVoltage,
            QuantityKind::SenseVoltage {
                output: SenseOutput::Voltage,
                ..
            } => Measurement::SenseVoltage,
            QuantityKind::SenseVoltage {
                output: SenseOutput::Current,
                ..
            } => Measurement::Current,
        }
    }
}

/// What a caller asks for when addressing a channel by index.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Measurement {
    Temperature,
    BusVoltage,
    SenseVoltage,
    Current,
}

/// How the transport has to fetch the two bytes of a register pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Two byte reads: the primary register, then `low`
    BytePair { low: u8 },
    /// One byte-swapped SMBus word read of the primary register
    Word,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChannelDescriptor {
    pub name: &'static str,
    pub register: u8,
    pub access: RegisterAccess,
    pub kind: QuantityKind,
    pub channel: u8,
}

impl ChannelDescriptor {
    /// Byte-pair descriptor with the low byte at `register + 1`
    pub const fn byte_pair(
        name: &'static str,
        register: u8,
        kind: QuantityKind,
        channel: u8,
    ) -> Self {
        Self {
            name,
            register,
            access: RegisterAccess::BytePair { low: register + 1 },
            kind,
            channel,
        }
    }

    pub const fn word(name: &'static str, register: u8, kind: QuantityKind, channel: u8) -> Self {
        Self {
            name,
            register,
            access: RegisterAccess::Word,
            kind,
            channel,
        }
    }
}
