use uom::si::electric_current::milliampere;
use uom::si::electric_potential::microvolt;
use uom::si::f32::{ElectricCurrent, ElectricPotential, ThermodynamicTemperature};
use uom::si::thermodynamic_temperature::degree_celsius;

use crate::data_models::{PhysicalReading, Unit};

/// Typed view of a reading for consumers working in SI quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Temperature(ThermodynamicTemperature),
    Potential(ElectricPotential),
    Current(ElectricCurrent),
}

impl From<PhysicalReading> for Quantity {
    fn from(reading: PhysicalReading) -> Self {
        match reading.unit {
            Unit::MilliDegreeCelsius => {
                let celsius = reading.value as f32 / 1000.0;
                Quantity::Temperature(ThermodynamicTemperature::new::<degree_celsius>(celsius))
            }
            Unit::MicroVolt => {
                Quantity::Potential(ElectricPotential::new::<microvolt>(reading.value as f32))
            }
            Unit::MilliAmp => {
                Quantity::Current(ElectricCurrent::new::<milliampere>(reading.value as f32))
            }
        }
    }
}
