//! # Unit Types
//!
//! Lightweight newtype wrappers for the metric units used across the engine.
//! They serialize as bare numbers and exist mostly to make conversions
//! explicit at the few places where the calculators change scale.
//!
//! ## Units in Use
//!
//! - Length: meters (m), centimeters (cm), millimeters (mm)
//! - Volume: liters (L), cubic meters (m³)
//! - Power: watts (W), kilowatts (kW)
//! - Energy: megajoules (MJ), kilowatt-hours (kWh)
//!
//! ## Example
//!
//! ```rust
//! use hearth_core::units::{Centimeters, Meters, Megajoules, KilowattHours};
//!
//! let wall: Meters = Centimeters(40.0).into();
//! assert!((wall.0 - 0.40).abs() < 1e-12);
//!
//! let energy: KilowattHours = Megajoules(36.0).into();
//! assert!((energy.0 - 10.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Megajoules per kilowatt-hour
pub const MJ_PER_KWH: f64 = 3.6;

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in liters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl From<Liters> for CubicMeters {
    fn from(l: Liters) -> Self {
        CubicMeters(l.0 / 1000.0)
    }
}

// ============================================================================
// Power Units
// ============================================================================

/// Power in watts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

/// Power in kilowatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

impl From<Watts> for Kilowatts {
    fn from(w: Watts) -> Self {
        Kilowatts(w.0 / 1000.0)
    }
}

// ============================================================================
// Energy Units
// ============================================================================

/// Energy in megajoules
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megajoules(pub f64);

/// Energy in kilowatt-hours (1 kWh = 3.6 MJ)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilowattHours(pub f64);

impl From<Megajoules> for KilowattHours {
    fn from(mj: Megajoules) -> Self {
        KilowattHours(mj.0 / MJ_PER_KWH)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Liters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Watts);
impl_arithmetic!(Kilowatts);
impl_arithmetic!(Megajoules);
impl_arithmetic!(KilowattHours);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_length_conversions() {
        let m: Meters = Centimeters(15.0).into();
        assert_relative_eq!(m.0, 0.15);

        let osb: Meters = Millimeters(9.0).into();
        assert_relative_eq!(osb.0, 0.009);

        let cm: Centimeters = Meters(0.4).into();
        assert_relative_eq!(cm.0, 40.0);
    }

    #[test]
    fn test_volume_conversion() {
        let v: CubicMeters = Liters(125.0).into();
        assert_relative_eq!(v.0, 0.125);
    }

    #[test]
    fn test_energy_conversion() {
        let kwh: KilowattHours = Megajoules(595.0).into();
        assert_relative_eq!(kwh.0, 165.277_777_777_777_8, epsilon = 1e-9);
    }

    #[test]
    fn test_arithmetic() {
        let a = Watts(6000.0);
        let b = Watts(1500.0);
        assert_eq!((a + b).value(), 7500.0);
        assert_eq!((a - b).value(), 4500.0);
        assert_eq!((b * 2.0).value(), 3000.0);
        let kw: Kilowatts = (a / 2.0).into();
        assert_eq!(kw.0, 3.0);
    }

    #[test]
    fn test_serialization() {
        let kw = Kilowatts(17.55);
        let json = serde_json::to_string(&kw).unwrap();
        assert_eq!(json, "17.55");
        let roundtrip: Kilowatts = serde_json::from_str(&json).unwrap();
        assert_eq!(kw, roundtrip);
    }
}
