//! # Unit Types
//!
//! Type-safe wrappers for the quantities an estimate deals in. They are
//! plain `f64` newtypes that serialize as bare numbers.
//!
//! All quantities are metric:
//! - Length: meters (m)
//! - Volume: cubic meters (m³), liters (L) for water
//! - Mass: kilograms (kg), tonnes (t = 1000 kg), cement bags (50 kg)
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{Bags, Kilograms, Tonnes};
//!
//! let cement = Kilograms(1200.0);
//! let bags: Bags = cement.into();
//! assert_eq!(bags.0, 24.0);
//!
//! let sand: Tonnes = Kilograms(2280.0).into();
//! assert_eq!(sand.0, 2.28);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Mass of one cement bag in kilograms
pub const BAG_MASS_KG: f64 = 50.0;

/// Kilograms per tonne
pub const KG_PER_TONNE: f64 = 1000.0;

// ============================================================================
// Length and Volume
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Volume in cubic meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

/// Volume in liters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

impl CubicMeters {
    /// Volume of a rectangular block
    pub fn of_block(length: Meters, width: Meters, height: Meters) -> Self {
        CubicMeters(length.0 * width.0 * height.0)
    }
}

// ============================================================================
// Mass
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in tonnes (1 t = 1000 kg)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

/// Cement quantity in 50 kg bags (fractional)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bags(pub f64);

impl From<Kilograms> for Tonnes {
    fn from(kg: Kilograms) -> Self {
        Tonnes(kg.0 / KG_PER_TONNE)
    }
}

impl From<Tonnes> for Kilograms {
    fn from(t: Tonnes) -> Self {
        Kilograms(t.0 * KG_PER_TONNE)
    }
}

impl From<Kilograms> for Bags {
    fn from(kg: Kilograms) -> Self {
        Bags(kg.0 / BAG_MASS_KG)
    }
}

impl From<Bags> for Kilograms {
    fn from(bags: Bags) -> Self {
        Kilograms(bags.0 * BAG_MASS_KG)
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

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(CubicMeters);
impl_arithmetic!(Liters);
impl_arithmetic!(Kilograms);
impl_arithmetic!(Tonnes);
impl_arithmetic!(Bags);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kilograms_to_tonnes() {
        let t: Tonnes = Kilograms(4440.0).into();
        assert!((t.0 - 4.44).abs() < 1e-12);
        let back: Kilograms = t.into();
        assert!((back.0 - 4440.0).abs() < 1e-9);
    }

    #[test]
    fn test_kilograms_to_bags() {
        let bags: Bags = Kilograms(1200.0).into();
        assert_eq!(bags.0, 24.0);
        let kg: Kilograms = Bags(3.0).into();
        assert_eq!(kg.0, 150.0);
    }

    #[test]
    fn test_block_volume() {
        let v = CubicMeters::of_block(Meters(2.0), Meters(3.0), Meters(0.5));
        assert_eq!(v.0, 3.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Kilograms(10.0);
        let b = Kilograms(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).value(), 5.0);
    }

    #[test]
    fn test_serialization() {
        let m = Meters(12.5);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Meters = serde_json::from_str(&json).unwrap();
        assert_eq!(m, roundtrip);
    }
}
