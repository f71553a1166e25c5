//! Sense-resistor voltage and current decoding.
//!
//! A sense register is first turned into a [`SenseSample`]: the sign taken
//! from the raw sign bit and the magnitude in nanovolts. Microvolts and
//! milliamps are both derived from that sample, current by dividing the
//! nanovolt magnitude by the shunt in micro-ohms (nV / uOhm = mA).

use serde::{Deserialize, Serialize};

use crate::data_models::{PhysicalReading, RawRegisterPair};

/// PAC1934 VSENSE step, 0xFFFF ~ 100 mV
pub const PAC1934_VSENSE_LSB_NV: u32 = 1500;

const NANOVOLTS_PER_MICROVOLT: u64 = 1000;
const SIGN_BIT: u8 = 0x80;
const MAGNITUDE_MASK: u8 = 0x7F;

/// Bit layout of a sense register pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SenseLayout {
    /// Bit 7 of the high byte is the sign, the other 7 high bits plus the top
    /// nibble of the low byte are an 11-bit magnitude.
    SignMagnitude11,
    /// Full 16 bits are an unsigned magnitude.
    Unipolar16,
}

/// Where the LSB weight of a sense register comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SenseScale {
    Fixed { lsb_nv: u32 },
    /// Taken from [`DeviceConfig::sense_range`](crate::data_models::DeviceConfig)
    Configured,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SenseEncoding {
    pub layout: SenseLayout,
    pub scale: SenseScale,
}

impl SenseEncoding {
    pub fn lsb_nv(&self, range: SenseRange) -> u32 {
        match self.scale {
            SenseScale::Fixed { lsb_nv } => lsb_nv,
            SenseScale::Configured => range.lsb_nv(),
        }
    }
}

/// Which reading a sense channel reports.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SenseOutput {
    Voltage,
    Current,
}

/// EMC1704 sense full-scale range. The 11-bit magnitude spans the range, so
/// one step is `full_scale / 2048`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SenseRange {
    #[serde(rename = "10mv")]
    Mv10,
    #[serde(rename = "20mv")]
    Mv20,
    #[serde(rename = "40mv")]
    Mv40,
    #[default]
    #[serde(rename = "80mv")]
    Mv80,
}

impl SenseRange {
    pub const fn full_scale_nv(self) -> u64 {
        match self {
            SenseRange::Mv10 => 10_000_000,
            SenseRange::Mv20 => 20_000_000,
            SenseRange::Mv40 => 40_000_000,
            SenseRange::Mv80 => 80_000_000,
        }
    }

    /// Step size rounded to the nearest nanovolt
    pub const fn lsb_nv(self) -> u32 {
        ((self.full_scale_nv() + 1024) / 2048) as u32
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "10mv" | "10" => Some(SenseRange::Mv10),
            "20mv" | "20" => Some(SenseRange::Mv20),
            "40mv" | "40" => Some(SenseRange::Mv40),
            "80mv" | "80" => Some(SenseRange::Mv80),
            _ => None,
        }
    }
}

/// One decoded sense register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SenseSample {
    negative: bool,
    nanovolts: u64,
}

impl SenseSample {
    /// True when the raw sign bit was set, also for a zero magnitude.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn nanovolts(&self) -> u64 {
        self.nanovolts
    }

    pub fn microvolts(&self) -> i64 {
        self.apply_sign(self.nanovolts / NANOVOLTS_PER_MICROVOLT)
    }

    /// Current through `shunt_uohm`; 0 when no shunt is fitted.
    pub fn milliamps(&self, shunt_uohm: u32) -> i64 {
        self.apply_sign(milliamps_from_nanovolts(self.nanovolts, shunt_uohm))
    }

    fn apply_sign(&self, magnitude: u64) -> i64 {
        let magnitude = magnitude as i64;
        if self.negative { -magnitude } else { magnitude }
    }

    pub fn voltage_reading(&self) -> PhysicalReading {
        PhysicalReading::microvolts(self.microvolts())
    }

    pub fn current_reading(&self, shunt_uohm: u32) -> PhysicalReading {
        PhysicalReading::milliamps(self.milliamps(shunt_uohm))
    }
}

/// Split a raw pair into sign flag and unscaled magnitude.
pub fn sense_magnitude(raw: RawRegisterPair, layout: SenseLayout) -> (bool, u32) {
    match layout {
        SenseLayout::SignMagnitude11 => {
            let negative = raw.high & SIGN_BIT != 0;
            let magnitude = (((raw.high & MAGNITUDE_MASK) as u32) << 4) | (raw.low >> 4) as u32;
            (negative, magnitude)
        }
        SenseLayout::Unipolar16 => (false, raw.word() as u32),
    }
}

pub fn decode_sense(raw: RawRegisterPair, layout: SenseLayout, lsb_nv: u32) -> SenseSample {
    let (negative, magnitude) = sense_magnitude(raw, layout);
    SenseSample {
        negative,
        nanovolts: magnitude as u64 * lsb_nv as u64,
    }
}

pub fn milliamps_from_nanovolts(nanovolts: u64, shunt_uohm: u32) -> u64 {
    if shunt_uohm == 0 {
        return 0;
    }
    nanovolts / shunt_uohm as u64
}

/// `(microvolts * 1000) / shunt_uohm`, 0 for the no-shunt sentinel.
///
/// Register decoding divides the full nanovolt value instead, so a
/// sub-microvolt LSB (1.5 µV on the PAC1934) is not truncated first. The two
/// agree whenever the sense voltage is a whole number of microvolts.
pub fn milliamps_from_microvolts(microvolts: u32, shunt_uohm: u32) -> u64 {
    milliamps_from_nanovolts(microvolts as u64 * NANOVOLTS_PER_MICROVOLT, shunt_uohm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sign_magnitude_layout() {
        let (negative, magnitude) =
            sense_magnitude(RawRegisterPair::new(0x7F, 0xF0), SenseLayout::SignMagnitude11);
        assert!(!negative);
        assert_eq!(magnitude, 0x7FF);

        let (negative, magnitude) =
            sense_magnitude(RawRegisterPair::new(0x81, 0x2F), SenseLayout::SignMagnitude11);
        assert!(negative);
        assert_eq!(magnitude, 0x12);
    }

    #[test]
    fn negative_zero_keeps_its_sign() {
        let sample = decode_sense(
            RawRegisterPair::new(0x80, 0x0F),
            SenseLayout::SignMagnitude11,
            SenseRange::Mv80.lsb_nv(),
        );
        assert!(sample.is_negative());
        assert_eq!(sample.nanovolts(), 0);
        assert_eq!(sample.microvolts(), 0);
    }

    #[test]
    fn small_negative_magnitude_stays_negative_below_a_microvolt() {
        let raw = RawRegisterPair::new(0x80, 0x10);
        let sample = decode_sense(raw, SenseLayout::SignMagnitude11, 500);
        assert!(sample.is_negative());
        assert_eq!(sample.nanovolts(), 500);
        assert_eq!(sample.microvolts(), 0);
    }

    #[test]
    fn negative_current() {
        // magnitude 1000 counts at 39063 nV, shunt 10 mOhm
        let sample = decode_sense(
            RawRegisterPair::new(0x80 | 0x3E, 0x80),
            SenseLayout::SignMagnitude11,
            SenseRange::Mv80.lsb_nv(),
        );
        assert_eq!(sample.nanovolts(), 1000 * 39_063);
        assert_eq!(sample.microvolts(), -39_063);
        assert_eq!(sample.milliamps(10_000), -3_906);
    }

    #[test]
    fn pac1934_full_scale_current() {
        let sample = decode_sense(
            RawRegisterPair::from_word(0xFFFF),
            SenseLayout::Unipolar16,
            PAC1934_VSENSE_LSB_NV,
        );
        assert!(!sample.is_negative());
        assert_eq!(sample.microvolts(), 98_302);
        assert_eq!(sample.current_reading(100_000), PhysicalReading::milliamps(983));
    }

    #[test]
    fn zero_shunt_means_voltage_only() {
        let sample = decode_sense(
            RawRegisterPair::from_word(0xFFFF),
            SenseLayout::Unipolar16,
            PAC1934_VSENSE_LSB_NV,
        );
        assert_eq!(sample.milliamps(0), 0);
        assert_eq!(milliamps_from_microvolts(u32::MAX, 0), 0);
    }

    #[test]
    fn current_keeps_sub_microvolt_precision() {
        let sample = decode_sense(
            RawRegisterPair::from_word(1),
            SenseLayout::Unipolar16,
            PAC1934_VSENSE_LSB_NV,
        );
        assert_eq!(sample.milliamps(1), 1_500);
        assert_eq!(milliamps_from_microvolts(1, 1), 1_000);
    }

    #[test]
    fn range_steps() {
        assert_eq!(SenseRange::Mv10.lsb_nv(), 4_883);
        assert_eq!(SenseRange::Mv20.lsb_nv(), 9_766);
        assert_eq!(SenseRange::Mv40.lsb_nv(), 19_531);
        assert_eq!(SenseRange::Mv80.lsb_nv(), 39_063);
        assert_eq!(SenseRange::default(), SenseRange::Mv80);
    }

    #[test]
    fn range_names() {
        assert_eq!(SenseRange::from_name("40mV"), Some(SenseRange::Mv40));
        assert_eq!(SenseRange::from_name(" 10 "), Some(SenseRange::Mv10));
        assert_eq!(SenseRange::from_name("5mv"), None);
    }

    #[test]
    fn scale_selection() {
        let fixed = SenseEncoding {
            layout: SenseLayout::Unipolar16,
            scale: SenseScale::Fixed { lsb_nv: PAC1934_VSENSE_LSB_NV },
        };
        assert_eq!(fixed.lsb_nv(SenseRange::Mv10), 1500);

        let configured = SenseEncoding {
            layout: SenseLayout::SignMagnitude11,
            scale: SenseScale::Configured,
        };
        assert_eq!(configured.lsb_nv(SenseRange::Mv20), 9_766);
    }

    proptest! {
        #[test]
        fn sign_follows_raw_sign_bit(
            high in any::<u8>(),
            low in any::<u8>(),
            lsb in 1u32..100_000,
        ) {
            let raw = RawRegisterPair::new(high, low);
            let sample = decode_sense(raw, SenseLayout::SignMagnitude11, lsb);
            prop_assert_eq!(sample.is_negative(), high & 0x80 != 0);
            if sample.is_negative() {
                prop_assert!(sample.microvolts() <= 0);
            } else {
                prop_assert!(sample.microvolts() >= 0);
            }
        }

        #[test]
        fn current_is_truncating_division(v in any::<u32>(), r in 1u32..=u32::MAX) {
            prop_assert_eq!(milliamps_from_microvolts(v, r), (v as u64 * 1000) / r as u64);
        }

        #[test]
        fn whole_microvolt_samples_match_helper(word in any::<u16>(), r in 1u32..=u32::MAX) {
            let raw = RawRegisterPair::from_word(word);
            let sample = decode_sense(raw, SenseLayout::Unipolar16, 1_000);
            prop_assert_eq!(
                sample.milliamps(r) as u64,
                milliamps_from_microvolts(sample.microvolts() as u32, r)
            );
        }

        #[test]
        fn current_without_shunt_is_zero(v in any::<u32>()) {
            prop_assert_eq!(milliamps_from_microvolts(v, 0), 0);
        }
    }
}
