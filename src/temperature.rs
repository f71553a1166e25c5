//! Whole-degree + eighth-degree temperature encoding shared by the EMC1704
//! and EMC181x temperature registers.
//!
//! The high byte is a two's-complement whole-degree value. The top three bits
//! of the low byte count eighths of a degree and are always *added*, also
//! when the whole-degree part is negative; -1 with a fraction of 1 reads as
//! -875 millidegrees, not -1125.

use crate::data_models::{PhysicalReading, RawRegisterPair};

const MILLIDEGREES_PER_DEGREE: i64 = 1000;
/// 0.125 degC per fraction step
const MILLIDEGREES_PER_EIGHTH: i64 = 125;
const FRACTION_SHIFT: u8 = 5;
const FRACTION_MASK: u8 = 0x07;

/// Decode a temperature register pair into millidegrees Celsius.
pub fn decode_temperature(high: i8, low: u8) -> i64 {
    let fraction = (low >> FRACTION_SHIFT) & FRACTION_MASK;
    high as i64 * MILLIDEGREES_PER_DEGREE + fraction as i64 * MILLIDEGREES_PER_EIGHTH
}

pub fn decode(raw: RawRegisterPair) -> PhysicalReading {
    PhysicalReading::millidegrees(decode_temperature(raw.signed_high(), raw.low))
}
