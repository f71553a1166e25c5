//! Register decoding for Microchip/SMSC power and thermal monitors.
//!
//! Raw register pairs read from an EMC1704, EMC181x or PAC1934 are turned
//! into millidegrees Celsius, microvolts or milliamps using integer
//! arithmetic only. Bus access is left to the caller; this crate only sees
//! the bytes.

pub mod binrw_impls;
pub mod bus_voltage;
pub mod capture;
pub mod chips;
pub mod config;
pub mod data_models;
pub mod decode;
pub mod device;
pub mod error;
pub mod sense;
pub mod temperature;
pub mod units;

pub use chips::{ChannelDescriptor, ChipFamily, Measurement, QuantityKind, RegisterAccess};
pub use data_models::{DeviceConfig, PhysicalReading, RawRegisterPair, Unit};
pub use decode::decode;
pub use device::Device;
pub use error::{ConfigError, DecodeError};
