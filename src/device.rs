use log::{debug, info};

use crate::chips::{ChannelDescriptor, ChipFamily, Measurement};
use crate::data_models::{DeviceConfig, PhysicalReading, RawRegisterPair};
use crate::decode::decode;
use crate::error::{DecodeError, Result};

/// One attached monitor: a chip family and its configuration.
///
/// Built once at attach and never mutated afterwards, so a `&Device` can be
/// shared freely between reader threads.
#[derive(Debug, Clone)]
pub struct Device {
    chip: ChipFamily,
    config: DeviceConfig,
    channels: Vec<ChannelDescriptor>,
}

impl Device {
    pub fn attach(chip: ChipFamily, config: DeviceConfig) -> Self {
        let channels: Vec<ChannelDescriptor> = chip
            .register_map()
            .iter()
            .filter(|d| chip.is_visible(d, &config))
            .copied()
            .collect();

        let shunts = chip.channel_count(Measurement::Current) as usize;
        if shunts > 0 {
            if config.shunt_resistance_uohm.iter().take(shunts).all(|r| *r == 0) {
                info!("{}: no shunt resistors specified", chip);
            } else {
                for (bus, shunt) in config.shunt_resistance_uohm.iter().take(shunts).enumerate() {
                    debug!("{}: bus {} shunt resistor value {} uOhms", chip, bus, shunt);
                }
            }
        }
        debug!(
            "{}: attached with {} channels (apd: {})",
            chip,
            channels.len(),
            config.anti_parallel_diode_mode
        );

        Self {
            chip,
            config,
            channels,
        }
    }

    pub fn chip(&self) -> ChipFamily {
        self.chip
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Channels exposed for this chip and configuration
    pub fn channels(&self) -> &[ChannelDescriptor] {
        &self.channels
    }

    pub fn channel(&self, name: &str) -> Option<&ChannelDescriptor> {
        self.channels.iter().find(|d| d.name == name)
    }

    /// First exposed channel reading from `register`, in table order.
    pub fn channel_for_register(&self, register: u8) -> Option<&ChannelDescriptor> {
        self.channels.iter().find(|d| d.register == register)
    }

    pub fn refresh_command(&self) -> Option<(u8, u8)> {
        self.chip.refresh_command()
    }

    pub fn decode_channel(&self, name: &str, raw: RawRegisterPair) -> Result<PhysicalReading> {
        let descriptor = self.channel(name).ok_or_else(|| DecodeError::UnknownChannel {
            chip: self.chip,
            name: name.to_string(),
        })?;
        decode(self.chip, descriptor, raw, &self.config)
    }

    pub fn decode_register(&self, register: u8, raw: RawRegisterPair) -> Result<PhysicalReading> {
        let descriptor = self
            .channel_for_register(register)
            .ok_or(DecodeError::InvalidRegister {
                chip: self.chip,
                register,
            })?;
        decode(self.chip, descriptor, raw, &self.config)
    }

    /// Read `measurement` on channel `channel`. Where a chip has both an
    /// instantaneous and an averaged register, the instantaneous one is used.
    ///
    /// Indexes past the chip's channels, or hidden by the diode mode, are
    /// unsupported.
    pub fn read(
        &self,
        measurement: Measurement,
        channel: u8,
        raw: RawRegisterPair,
    ) -> Result<PhysicalReading> {
        let descriptor = self
            .channels
            .iter()
            .find(|d| d.kind.measurement() == measurement && d.channel == channel)
            .ok_or(DecodeError::UnsupportedChannel {
                chip: self.chip,
                channel,
                count: self.chip.channel_count(measurement),
            })?;
        decode(self.chip, descriptor, raw, &self.config)
    }

    pub fn read_temperature(&self, channel: u8, raw: RawRegisterPair) -> Result<PhysicalReading> {
        self.read(Measurement::Temperature, channel, raw)
    }
}
