use std::fmt;

use binrw::{BinRead, BinWrite};
use serde::{Deserialize, Serialize};

use crate::sense::SenseRange;

/// Number of shunt slots a device configuration carries.
pub const SHUNT_CHANNELS: usize = 4;

/// Two bytes captured from one register pair, high byte first.
///
/// The transport must capture both bytes atomically with respect to any
/// refresh/latch command on the same chip.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[brw(big)]
pub struct RawRegisterPair {
    pub high: u8,
    pub low: u8,
}

impl RawRegisterPair {
    pub const fn new(high: u8, low: u8) -> Self {
        Self { high, low }
    }

    /// Split a word as returned by a byte-swapped SMBus word read.
    pub const fn from_word(word: u16) -> Self {
        Self {
            high: (word >> 8) as u8,
            low: word as u8,
        }
    }

    /// `(high << 8) | low`
    pub const fn word(&self) -> u16 {
        ((self.high as u16) << 8) | self.low as u16
    }

    /// High byte as two's-complement whole degrees.
    pub const fn signed_high(&self) -> i8 {
        self.high as i8
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    MilliDegreeCelsius,
    MicroVolt,
    MilliAmp,
}

impl Unit {
    pub const fn suffix(self) -> &'static str {
        match self {
            Unit::MilliDegreeCelsius => "mdegC",
            Unit::MicroVolt => "uV",
            Unit::MilliAmp => "mA",
        }
    }
}

/// Result of one conversion. Never retained by the decoders.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalReading {
    pub value: i64,
    pub unit: Unit,
}

impl PhysicalReading {
    pub const fn millidegrees(value: i64) -> Self {
        Self {
            value,
            unit: Unit::MilliDegreeCelsius,
        }
    }

    pub const fn microvolts(value: i64) -> Self {
        Self {
            value,
            unit: Unit::MicroVolt,
        }
    }

    pub const fn milliamps(value: i64) -> Self {
        Self {
            value,
            unit: Unit::MilliAmp,
        }
    }
}

impl fmt::Display for PhysicalReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.suffix())
    }
}

/// Per-device configuration, supplied once at attach and read-only after.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Shunt resistor per channel in micro-ohms; 0 means no shunt fitted
    /// and current reporting is disabled for that channel.
    #[serde(default)]
    pub shunt_resistance_uohm: [u32; SHUNT_CHANNELS],
    /// EMC181x anti-parallel diode mode
    #[serde(default)]
    pub anti_parallel_diode_mode: bool,
    /// EMC1704 sense full-scale range
    #[serde(default)]
    pub sense_range: SenseRange,
}

impl DeviceConfig {
    /// Shunt value for `channel`, `None` past the configured slots.
    pub fn shunt_uohm(&self, channel: u8) -> Option<u32> {
        self.shunt_resistance_uohm.get(channel as usize).copied()
    }
}
