use thiserror::Error;

use crate::chips::ChipFamily;

/// Errors produced while mapping a register read onto a decoder.
///
/// All of these are caller errors (bad register, name or channel index);
/// none of them depend on hardware state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Register is not part of the chip family's register map
    #[error("invalid register 0x{register:02x} for {chip}")]
    InvalidRegister { chip: ChipFamily, register: u8 },

    /// Symbolic channel name is not part of the register map
    #[error("unknown channel '{name}' for {chip}")]
    UnknownChannel { chip: ChipFamily, name: String },

    /// Channel index past what the chip physically provides
    #[error("channel {channel} not supported by {chip} ({count} channels)")]
    UnsupportedChannel {
        chip: ChipFamily,
        channel: u8,
        count: u8,
    },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors building a [`DeviceConfig`](crate::data_models::DeviceConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
