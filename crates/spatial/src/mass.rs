use serde::{Deserialize, Serialize};
use tickworld_common::{SimError, SimResult};

/// Units a [`Mass`] can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MassUnit {
    Milligram,
    Gram,
    Kilogram,
    /// Metric ton, 1000 kg.
    Tonne,
    Grain,
    Ounce,
    Pound,
    /// North American short ton, 2000 lb.
    ShortTon,
}

impl MassUnit {
    /// Kilograms in one of this unit.
    pub fn kilograms(self) -> f64 {
        match self {
            MassUnit::Milligram => 1e-6,
            MassUnit::Gram => 1e-3,
            MassUnit::Kilogram => 1.0,
            MassUnit::Tonne => 1000.0,
            MassUnit::Grain => 6.479_891e-5,
            MassUnit::Ounce => 0.028_349_523_125,
            MassUnit::Pound => 0.453_592_37,
            MassUnit::ShortTon => 907.184_74,
        }
    }

    /// Convert `value` expressed in `from` into this unit.
    pub fn convert(self, value: f64, from: MassUnit) -> f64 {
        if self == from {
            return value;
        }
        value * from.kilograms() / self.kilograms()
    }
}

/// A non-negative mass with its unit.
///
/// Conversions go through kilograms and are lossy at the extremes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mass {
    value: f64,
    unit: MassUnit,
}

impl Mass {
    /// Smallest positive mass. Never exactly zero, so it is always safe to
    /// divide by.
    pub const MASSLESS: Mass = Mass {
        value: f64::MIN_POSITIVE,
        unit: MassUnit::Kilogram,
    };

    /// Largest representable mass. Stored in kilograms so reading it back in
    /// kilograms stays finite.
    pub const INFINITE: Mass = Mass {
        value: f64::MAX,
        unit: MassUnit::Kilogram,
    };

    pub fn new(value: f64, unit: MassUnit) -> SimResult<Self> {
        Ok(Self {
            value: SimError::check_non_negative("mass", value)?,
            unit,
        })
    }

    pub fn kilograms(value: f64) -> SimResult<Self> {
        Self::new(value, MassUnit::Kilogram)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> MassUnit {
        self.unit
    }

    /// The value expressed in `unit`.
    pub fn value_in(&self, unit: MassUnit) -> f64 {
        unit.convert(self.value, self.unit)
    }

    pub fn to_kilograms(&self) -> f64 {
        self.value_in(MassUnit::Kilogram)
    }

    /// The same mass re-expressed in another unit.
    pub fn to(&self, unit: MassUnit) -> Self {
        Self {
            value: self.value_in(unit),
            unit,
        }
    }

    /// Add `delta` (expressed in `unit`) and keep this mass' unit.
    pub fn plus(&self, delta: f64, unit: MassUnit) -> SimResult<Self> {
        Self::new(self.value + self.unit.convert(delta, unit), self.unit)
    }

    /// Split this mass into `divisor` equal parts.
    pub fn checked_div(&self, divisor: f64) -> SimResult<Self> {
        if divisor == 0.0 {
            return Err(SimError::DivisionByZero("mass division"));
        }
        Self::new(self.value / divisor, self.unit)
    }
}

impl Default for Mass {
    fn default() -> Self {
        Self::MASSLESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pound_to_kilograms() {
        let m = Mass::new(1.0, MassUnit::Pound).unwrap();
        assert!((m.to_kilograms() - 0.453592).abs() < 1e-6);
    }

    #[test]
    fn imperial_round_trip_within_tolerance() {
        let m = Mass::kilograms(70.0).unwrap();
        let lb = m.to(MassUnit::Pound);
        assert!((lb.value() - 154.3236).abs() < 1e-3);
        assert!((lb.to_kilograms() - 70.0).abs() < 1e-9);
        assert!((Mass::new(16.0, MassUnit::Ounce).unwrap().value_in(MassUnit::Pound) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_negative_mass() {
        assert!(matches!(
            Mass::kilograms(-1.0),
            Err(SimError::Negative { quantity: "mass", .. })
        ));
        let m = Mass::kilograms(1.0).unwrap();
        assert!(m.plus(-2.0, MassUnit::Kilogram).is_err());
    }

    #[test]
    fn sentinels_are_safe_divisors() {
        assert!(Mass::MASSLESS.to_kilograms() > 0.0);
        assert!(Mass::INFINITE.to_kilograms().is_finite());
        assert_eq!(Mass::default(), Mass::MASSLESS);
    }

    #[test]
    fn plus_converts_delta_into_own_unit() {
        let m = Mass::kilograms(1.0).unwrap().plus(500.0, MassUnit::Gram).unwrap();
        assert_eq!(m.unit(), MassUnit::Kilogram);
        assert!((m.value() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn checked_div_rejects_zero() {
        let m = Mass::kilograms(10.0).unwrap();
        assert_eq!(m.checked_div(0.0), Err(SimError::DivisionByZero("mass division")));
        assert_eq!(m.checked_div(4.0).unwrap().value(), 2.5);
    }
}
