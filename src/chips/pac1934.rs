//! PAC1934 four-channel voltage/current monitor.
//!
//! Result registers only update after a REFRESH command; the caller writes
//! [`REFRESH_COMMAND`] to [`regs::REFRESH`] before reading. Every result is
//! a 16-bit word read.

use super::{ChannelDescriptor, QuantityKind};
use crate::bus_voltage::{BusEncoding, PAC1934_VBUS_LSB_UV};
use crate::sense::{PAC1934_VSENSE_LSB_NV, SenseEncoding, SenseLayout, SenseOutput, SenseScale};

pub mod regs {
    pub const REFRESH: u8 = 0x00;
    pub const VBUS0: u8 = 0x07;
    pub const VSENSE0: u8 = 0x0B;
    pub const VBUS0_AVG: u8 = 0x0F;
    pub const VSENSE0_AVG: u8 = 0x13;
}

pub const REFRESH_COMMAND: u8 = 0x00;

const VBUS: QuantityKind = QuantityKind::BusVoltage(BusEncoding::Linear {
    lsb_uv: PAC1934_VBUS_LSB_UV,
});

const VSENSE: SenseEncoding = SenseEncoding {
    layout: SenseLayout::Unipolar16,
    scale: SenseScale::Fixed {
        lsb_nv: PAC1934_VSENSE_LSB_NV,
    },
};

const CURRENT: QuantityKind = QuantityKind::SenseVoltage {
    encoding: VSENSE,
    output: SenseOutput::Current,
};

const SENSE_VOLTAGE: QuantityKind = QuantityKind::SenseVoltage {
    encoding: VSENSE,
    output: SenseOutput::Voltage,
};

macro_rules! quad {
    ($base:expr, $kind:expr, $n0:literal, $n1:literal, $n2:literal, $n3:literal) => {
        [
            ChannelDescriptor::word($n0, $base, $kind, 0),
            ChannelDescriptor::word($n1, $base + 1, $kind, 1),
            ChannelDescriptor::word($n2, $base + 2, $kind, 2),
            ChannelDescriptor::word($n3, $base + 3, $kind, 3),
        ]
    };
}

const VBUS_CHANNELS: [ChannelDescriptor; 4] =
    quad!(regs::VBUS0, VBUS, "vbus0", "vbus1", "vbus2", "vbus3");
const VBUS_AVG_CHANNELS: [ChannelDescriptor; 4] =
    quad!(regs::VBUS0_AVG, VBUS, "vbus0avg", "vbus1avg", "vbus2avg", "vbus3avg");
const CUR_CHANNELS: [ChannelDescriptor; 4] =
    quad!(regs::VSENSE0, CURRENT, "cur0", "cur1", "cur2", "cur3");
const CUR_AVG_CHANNELS: [ChannelDescriptor; 4] =
    quad!(regs::VSENSE0_AVG, CURRENT, "cur0avg", "cur1avg", "cur2avg", "cur3avg");
const VSENSE_CHANNELS: [ChannelDescriptor; 4] =
    quad!(regs::VSENSE0, SENSE_VOLTAGE, "vsense0", "vsense1", "vsense2", "vsense3");
const VSENSE_AVG_CHANNELS: [ChannelDescriptor; 4] = quad!(
    regs::VSENSE0_AVG,
    SENSE_VOLTAGE,
    "vsense0avg",
    "vsense1avg",
    "vsense2avg",
    "vsense3avg"
);

/// Current channels come before the raw sense voltages, so a lookup by
/// register resolves a VSENSE register to its current reading.
pub static CHANNELS: [ChannelDescriptor; 24] = [
    VBUS_CHANNELS[0],
    VBUS_CHANNELS[1],
    VBUS_CHANNELS[2],
    VBUS_CHANNELS[3],
    VBUS_AVG_CHANNELS[0],
    VBUS_AVG_CHANNELS[1],
    VBUS_AVG_CHANNELS[2],
    VBUS_AVG_CHANNELS[3],
    CUR_CHANNELS[0],
    CUR_CHANNELS[1],
    CUR_CHANNELS[2],
    CUR_CHANNELS[3],
    CUR_AVG_CHANNELS[0],
    CUR_AVG_CHANNELS[1],
    CUR_AVG_CHANNELS[2],
    CUR_AVG_CHANNELS[3],
    VSENSE_CHANNELS[0],
    VSENSE_CHANNELS[1],
    VSENSE_CHANNELS[2],
    VSENSE_CHANNELS[3],
    VSENSE_AVG_CHANNELS[0],
    VSENSE_AVG_CHANNELS[1],
    VSENSE_AVG_CHANNELS[2],
    VSENSE_AVG_CHANNELS[3],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chips::RegisterAccess;

    fn find(name: &str) -> &'static ChannelDescriptor {
        CHANNELS.iter().find(|d| d.name == name).unwrap()
    }

    #[test]
    fn register_layout() {
        assert_eq!(find("vbus0").register, 0x07);
        assert_eq!(find("vbus3").register, 0x0A);
        assert_eq!(find("vbus3avg").register, 0x12);
        assert_eq!(find("cur0").register, 0x0B);
        assert_eq!(find("cur3avg").register, 0x16);
        assert_eq!(find("vsense2").register, 0x0D);
    }

    #[test]
    fn channel_index_follows_register_offset() {
        for d in CHANNELS.iter() {
            let base = match d.register {
                0x07..=0x0A => regs::VBUS0,
                0x0B..=0x0E => regs::VSENSE0,
                0x0F..=0x12 => regs::VBUS0_AVG,
                0x13..=0x16 => regs::VSENSE0_AVG,
                other => panic!("unexpected register 0x{:02x}", other),
            };
            assert_eq!(d.channel, d.register - base, "{}", d.name);
            assert_eq!(d.access, RegisterAccess::Word);
        }
    }

    #[test]
    fn current_precedes_voltage_for_sense_registers() {
        let first = CHANNELS.iter().find(|d| d.register == regs::VSENSE0).unwrap();
        assert_eq!(first.name, "cur0");
    }
}
