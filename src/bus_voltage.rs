//! Bus (source) voltage decoding.
//!
//! The EMC1704 source-voltage register is not binary fixed point: each bit
//! carries the weight of one step of the chip's resistor ladder, so the value
//! is the sum of the weights of the set bits. The PAC1934 VBUS registers are
//! plain unsigned counts of a fixed LSB.

use crate::data_models::{PhysicalReading, RawRegisterPair};

/// Weight in microvolts for each bit of a 16-bit composite register.
pub type WeightTable = [u32; 16];

/// EMC1704 source voltage weights. Full scale is 23.9883 V.
pub const EMC1704_SOURCE_WEIGHTS_UV: WeightTable = [
    0, 0, 0, 0, 0, 11_700, 23_400, 46_900, 93_800, 187_500, 375_000, 750_000, 1_500_000,
    3_000_000, 6_000_000, 12_000_000,
];

/// PAC1934 unipolar VBUS step (32 V / 65536)
pub const PAC1934_VBUS_LSB_UV: u32 = 488;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BusEncoding {
    /// Sum of per-bit weights
    Weighted(&'static WeightTable),
    /// Unsigned count times a fixed step
    Linear { lsb_uv: u32 },
}

impl BusEncoding {
    pub fn decode(self, raw: RawRegisterPair) -> PhysicalReading {
        let value = match self {
            BusEncoding::Weighted(weights) => decode_weighted(raw.word(), weights),
            BusEncoding::Linear { lsb_uv } => decode_linear(raw.word(), lsb_uv),
        };
        PhysicalReading::microvolts(value)
    }
}

/// Sum `weights[bit]` for every bit from 15 down to 1 set in `raw`.
/// Bit 0 carries no weight.
pub fn decode_weighted(raw: u16, weights: &WeightTable) -> i64 {
    (1..16)
        .rev()
        .filter(|bit| raw & (1 << bit) != 0)
        .map(|bit| weights[bit] as i64)
        .sum()
}

pub fn decode_linear(raw: u16, lsb_uv: u32) -> i64 {
    raw as i64 * lsb_uv as i64
}
