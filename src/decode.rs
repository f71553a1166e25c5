use log::trace;

use crate::chips::{ChannelDescriptor, ChipFamily, QuantityKind};
use crate::data_models::{DeviceConfig, PhysicalReading, RawRegisterPair, SHUNT_CHANNELS};
use crate::error::{DecodeError, Result};
use crate::sense::{self, SenseOutput};
use crate::temperature;

/// Convert one register pair according to `descriptor`.
///
/// `chip` is only used to attribute errors. The only fallible path is a
/// current channel whose index has no shunt slot; a shunt of 0 yields a zero
/// reading.
pub fn decode(
    chip: ChipFamily,
    descriptor: &ChannelDescriptor,
    raw: RawRegisterPair,
    config: &DeviceConfig,
) -> Result<PhysicalReading> {
    let reading = match descriptor.kind {
        QuantityKind::Temperature => temperature::decode(raw),
        QuantityKind::BusVoltage(encoding) => encoding.decode(raw),
        QuantityKind::SenseVoltage { encoding, output } => {
            let lsb_nv = encoding.lsb_nv(config.sense_range);
            let sample = sense::decode_sense(raw, encoding.layout, lsb_nv);
            match output {
                SenseOutput::Voltage => sample.voltage_reading(),
                SenseOutput::Current => {
                    let shunt = config.shunt_uohm(descriptor.channel).ok_or(
                        DecodeError::UnsupportedChannel {
                            chip,
                            channel: descriptor.channel,
                            count: SHUNT_CHANNELS as u8,
                        },
                    )?;
                    if shunt == 0 {
                        trace!("{} {}: no shunt fitted, reporting 0 mA", chip, descriptor.name);
                    }
                    sample.current_reading(shunt)
                }
            }
        }
    };

    trace!(
        "{} {} (0x{:02x}) raw={:02x},{:02x} -> {}",
        chip, descriptor.name, descriptor.register, raw.high, raw.low, reading
    );
    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chips::{Emc181xVariant, emc1704, pac1934};

    fn emc1704_channel(name: &str) -> &'static ChannelDescriptor {
        emc1704::CHANNELS.iter().find(|d| d.name == name).unwrap()
    }

    fn pac1934_channel(name: &str) -> &'static ChannelDescriptor {
        pac1934::CHANNELS.iter().find(|d| d.name == name).unwrap()
    }

    #[test]
    fn temperature_end_to_end() {
        let chip = ChipFamily::Emc181x(Emc181xVariant::Emc1813);
        let descriptor = &chip.register_map()[1];
        let reading = decode(
            chip,
            descriptor,
            RawRegisterPair::new(0x19, 0x20),
            &DeviceConfig::default(),
        )
        .unwrap();
        assert_eq!(reading, PhysicalReading::millidegrees(25_125));
    }

    #[test]
    fn source_voltage_end_to_end() {
        let reading = decode(
            ChipFamily::Emc1704,
            emc1704_channel("source_voltage"),
            RawRegisterPair::new(0x80, 0x00),
            &DeviceConfig::default(),
        )
        .unwrap();
        assert_eq!(reading, PhysicalReading::microvolts(12_000_000));
    }

    #[test]
    fn pac1934_current_end_to_end() {
        let config = DeviceConfig {
            shunt_resistance_uohm: [0, 100_000, 0, 0],
            ..Default::default()
        };
        let raw = RawRegisterPair::from_word(0xFFFF);

        let cur1 = decode(ChipFamily::Pac1934, pac1934_channel("cur1"), raw, &config).unwrap();
        assert_eq!(cur1, PhysicalReading::milliamps(983));

        let cur0 = decode(ChipFamily::Pac1934, pac1934_channel("cur0avg"), raw, &config).unwrap();
        assert_eq!(cur0, PhysicalReading::milliamps(0));

        let vsense = decode(ChipFamily::Pac1934, pac1934_channel("vsense1"), raw, &config).unwrap();
        assert_eq!(vsense, PhysicalReading::microvolts(98_302));
    }

    #[test]
    fn emc1704_sense_uses_configured_range() {
        let raw = RawRegisterPair::new(0x80 | 0x3E, 0x80);
        let mut config = DeviceConfig {
            shunt_resistance_uohm: [10_000, 0, 0, 0],
            ..Default::default()
        };

        let read = |name: &str, config: &DeviceConfig| {
            decode(ChipFamily::Emc1704, emc1704_channel(name), raw, config).unwrap()
        };

        assert_eq!(read("sense_voltage", &config), PhysicalReading::microvolts(-39_063));

        config.sense_range = crate::sense::SenseRange::Mv10;
        assert_eq!(read("sense_voltage", &config), PhysicalReading::microvolts(-4_883));
        assert_eq!(read("sense_current", &config), PhysicalReading::milliamps(-488));
    }

    #[test]
    fn current_channel_without_shunt_slot_is_unsupported() {
        let descriptor = ChannelDescriptor {
            channel: 4,
            ..*pac1934_channel("cur3")
        };
        let err = decode(
            ChipFamily::Pac1934,
            &descriptor,
            RawRegisterPair::from_word(1),
            &DeviceConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnsupportedChannel {
                chip: ChipFamily::Pac1934,
                channel: 4,
                count: 4
            }
        );
    }

    #[test]
    fn decoding_twice_gives_the_same_reading() {
        let config = DeviceConfig {
            shunt_resistance_uohm: [1_000; 4],
            ..Default::default()
        };
        let raw = RawRegisterPair::new(0x12, 0x34);
        for descriptor in pac1934::CHANNELS.iter() {
            let first = decode(ChipFamily::Pac1934, descriptor, raw, &config).unwrap();
            let second = decode(ChipFamily::Pac1934, descriptor, raw, &config).unwrap();
            assert_eq!(first, second);
        }
    }
}
