//! EMC181x multi-channel temperature monitors.
//!
//! Channel `n` lives at `0x60 + 2n` with its fraction byte right after it.
//! The EMC1814 pairs its external diodes in anti-parallel diode (APD) mode;
//! with APD off, channels 2 and 4 do not exist.

use bitflags::bitflags;

use super::{ChannelDescriptor, QuantityKind};

pub mod regs {
    pub const CONFIG: u8 = 0x03;
    pub const TEMP_BASE: u8 = 0x60;
}

pub const MAX_CHANNELS: u8 = 5;

bitflags! {
    /// CONFIG register (0x03)
    pub struct ConfigFlags: u8 {
        const APD_DISABLE = 0b0000_0001;
        const DAVG_DISABLE = 0b0000_0010;
        const EXTENDED_RANGE = 0b0000_0100;
        const RECD3_4 = 0b0000_1000;
        const RECD1_2 = 0b0001_0000;
        const ALERT_COMPARATOR = 0b0010_0000;
        const STANDBY = 0b0100_0000;
        const MASK_ALL = 0b1000_0000;
    }
}

/// CONFIG value to write at attach for the requested APD mode.
///
/// The chip powers up with APD enabled; only the disable bit is touched.
pub fn config_register_value(current: u8, anti_parallel_diode_mode: bool) -> u8 {
    let mut flags = ConfigFlags::from_bits_truncate(current);
    flags.set(ConfigFlags::APD_DISABLE, !anti_parallel_diode_mode);
    flags.bits()
}

pub const fn temperature_register(channel: u8) -> u8 {
    regs::TEMP_BASE + channel * 2
}

const fn temp(name: &'static str, channel: u8) -> ChannelDescriptor {
    let register = temperature_register(channel);
    ChannelDescriptor::byte_pair(name, register, QuantityKind::Temperature, channel)
}

pub static CHANNELS: [ChannelDescriptor; MAX_CHANNELS as usize] = [
    temp("internal_temp", 0),
    temp("external1_temp", 1),
    temp("external2_temp", 2),
    temp("external3_temp", 3),
    temp("external4_temp", 4),
];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Variant {
    Emc1812,
    Emc1813,
    Emc1814,
    Emc1815,
    Emc1833,
}

impl Variant {
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Emc1812 => "emc1812",
            Variant::Emc1813 => "emc1813",
            Variant::Emc1814 => "emc1814",
            Variant::Emc1815 => "emc1815",
            Variant::Emc1833 => "emc1833",
        }
    }

    pub const fn tag(self) -> u8 {
        match self {
            Variant::Emc1812 => 0x12,
            Variant::Emc1813 => 0x13,
            Variant::Emc1814 => 0x14,
            Variant::Emc1815 => 0x15,
            Variant::Emc1833 => 0x33,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x12 => Some(Variant::Emc1812),
            0x13 => Some(Variant::Emc1813),
            0x14 => Some(Variant::Emc1814),
            0x15 => Some(Variant::Emc1815),
            0x33 => Some(Variant::Emc1833),
            _ => None,
        }
    }

    /// Internal diode plus external channels
    pub const fn channel_count(self) -> u8 {
        match self {
            Variant::Emc1812 => 2,
            Variant::Emc1813 | Variant::Emc1833 => 3,
            Variant::Emc1814 | Variant::Emc1815 => 5,
        }
    }

    pub fn is_visible(self, channel: u8, anti_parallel_diode_mode: bool) -> bool {
        if channel >= self.channel_count() {
            return false;
        }
        match self {
            Variant::Emc1814 => anti_parallel_diode_mode || !matches!(channel, 2 | 4),
            _ => true,
        }
    }
}
