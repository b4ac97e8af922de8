//! # Concrete Material Estimate
//!
//! Computes cement, sand, gravel and water quantities for a rectangular
//! pour, and the material cost at flat unit prices.
//!
//! ## Method
//!
//! - Volume V = L × W × H (m³)
//! - Cement = 400 kg per m³, independent of grade
//! - Sand, gravel, water = cement × grade ratio
//! - Cement is priced per 50 kg bag, sand and gravel per tonne
//! - Water is not priced
//!
//! No rounding happens here. Display rounding belongs to the report.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculations::estimate::{calculate, EstimateInput, UnitPrices};
//! use estimate_core::mix::ConcreteGrade;
//!
//! let input = EstimateInput::new("Slab", 2.0, 3.0, 0.5, ConcreteGrade::M300, UnitPrices::default());
//! let result = calculate(&input).unwrap().expect("dimensions are complete");
//!
//! assert_eq!(result.volume_m3, 3.0);
//! assert_eq!(result.cement_kg, 1200.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::mix::{mix_ratio, ConcreteGrade};
use crate::units::{Bags, CubicMeters, Kilograms, Liters, Meters, Tonnes};

/// Cement demand per cubic meter of concrete (kg/m³)
pub const CEMENT_KG_PER_M3: f64 = 400.0;

/// Unit prices for the priced materials, in the caller's currency.
///
/// ## JSON Example
///
/// ```json
/// {
///   "cement_per_bag": 450.0,
///   "sand_per_tonne": 1200.0,
///   "gravel_per_tonne": 1800.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitPrices {
    /// Price of one 50 kg bag of cement
    pub cement_per_bag: f64,
    /// Price of one tonne of sand
    pub sand_per_tonne: f64,
    /// Price of one tonne of gravel
    pub gravel_per_tonne: f64,
}

impl Default for UnitPrices {
    fn default() -> Self {
        UnitPrices {
            cement_per_bag: 450.0,
            sand_per_tonne: 1200.0,
            gravel_per_tonne: 1800.0,
        }
    }
}

impl UnitPrices {
    /// Create a price list
    pub fn new(cement_per_bag: f64, sand_per_tonne: f64, gravel_per_tonne: f64) -> Self {
        UnitPrices {
            cement_per_bag,
            sand_per_tonne,
            gravel_per_tonne,
        }
    }

    /// Every price must be a finite, non-negative number.
    pub fn validate(&self) -> CalcResult<()> {
        for (material, price) in [
            ("cement", self.cement_per_bag),
            ("sand", self.sand_per_tonne),
            ("gravel", self.gravel_per_tonne),
        ] {
            if !price.is_finite() || price < 0.0 {
                return Err(CalcError::invalid_price(material, price.to_string()));
            }
        }
        Ok(())
    }
}

/// Input parameters for an estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Garage slab",
///   "length_m": 6.0,
///   "width_m": 4.0,
///   "height_m": 0.2,
///   "grade": "M300",
///   "prices": {
///     "cement_per_bag": 450.0,
///     "sand_per_tonne": 1200.0,
///     "gravel_per_tonne": 1800.0
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateInput {
    /// User label for the structure (e.g., "Garage slab")
    #[serde(default)]
    pub label: String,

    /// Length in meters
    pub length_m: f64,

    /// Width in meters
    pub width_m: f64,

    /// Height (thickness) in meters
    pub height_m: f64,

    /// Concrete grade
    #[serde(default)]
    pub grade: ConcreteGrade,

    /// Material unit prices
    #[serde(default)]
    pub prices: UnitPrices,
}

impl EstimateInput {
    /// Create a new input
    pub fn new(
        label: impl Into<String>,
        length_m: f64,
        width_m: f64,
        height_m: f64,
        grade: ConcreteGrade,
        prices: UnitPrices,
    ) -> Self {
        EstimateInput {
            label: label.into(),
            length_m,
            width_m,
            height_m,
            grade,
            prices,
        }
    }

    /// True when all three dimensions are positive finite numbers
    pub fn has_dimensions(&self) -> bool {
        [self.length_m, self.width_m, self.height_m]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0)
    }

    /// Volume of the pour
    pub fn volume(&self) -> CubicMeters {
        CubicMeters::of_block(Meters(self.length_m), Meters(self.width_m), Meters(self.height_m))
    }
}

/// Results of an estimate.
///
/// Immutable once produced; a new calculation yields a new value.
///
/// ## JSON Example
///
/// ```json
/// {
///   "volume_m3": 3.0,
///   "cement_kg": 1200.0,
///   "sand_kg": 2280.0,
///   "gravel_kg": 4440.0,
///   "water_l": 600.0,
///   "total_cost": 21528.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Concrete volume (m³)
    pub volume_m3: f64,
    /// Cement mass (kg)
    pub cement_kg: f64,
    /// Sand mass (kg)
    pub sand_kg: f64,
    /// Gravel mass (kg)
    pub gravel_kg: f64,
    /// Water volume (L)
    pub water_l: f64,
    /// Cement + sand + gravel cost
    pub total_cost: f64,
}

impl EstimateResult {
    /// Cement in 50 kg bags
    pub fn cement_bags(&self) -> Bags {
        Kilograms(self.cement_kg).into()
    }

    /// Sand in tonnes
    pub fn sand_tonnes(&self) -> Tonnes {
        Kilograms(self.sand_kg).into()
    }

    /// Gravel in tonnes
    pub fn gravel_tonnes(&self) -> Tonnes {
        Kilograms(self.gravel_kg).into()
    }

    /// Water in liters
    pub fn water(&self) -> Liters {
        Liters(self.water_l)
    }

    /// Per-material cost breakdown at the given prices
    pub fn costs(&self, prices: &UnitPrices) -> MaterialCosts {
        MaterialCosts::compute(self, prices)
    }
}

/// Per-material cost breakdown.
///
/// Recomputed from an [`EstimateResult`] rather than stored on it. `total`
/// uses the same expression order as the calculator, so it equals
/// `EstimateResult::total_cost` exactly for the same prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialCosts {
    pub cement: f64,
    pub sand: f64,
    pub gravel: f64,
    pub total: f64,
}

impl MaterialCosts {
    /// Cost of the quantities in `result` at `prices`
    pub fn compute(result: &EstimateResult, prices: &UnitPrices) -> Self {
        Self::from_quantities(
            Kilograms(result.cement_kg),
            Kilograms(result.sand_kg),
            Kilograms(result.gravel_kg),
            prices,
        )
    }

    fn from_quantities(cement: Kilograms, sand: Kilograms, gravel: Kilograms, prices: &UnitPrices) -> Self {
        let cement = Bags::from(cement).value() * prices.cement_per_bag;
        let sand = Tonnes::from(sand).value() * prices.sand_per_tonne;
        let gravel = Tonnes::from(gravel).value() * prices.gravel_per_tonne;
        MaterialCosts {
            cement,
            sand,
            gravel,
            total: cement + sand + gravel,
        }
    }
}

/// Calculate an estimate.
///
/// # Returns
///
/// * `Ok(Some(EstimateResult))` - Quantities and cost
/// * `Ok(None)` - A dimension is missing, zero, negative or not a number;
///   nothing to calculate yet
/// * `Err(CalcError::InvalidPrice)` - A unit price is negative or not finite
pub fn calculate(input: &EstimateInput) -> CalcResult<Option<EstimateResult>> {
    if !input.has_dimensions() {
        return Ok(None);
    }
    input.prices.validate()?;
    Ok(Some(compute(input)))
}

/// Calculate without validating prices.
///
/// A non-numeric price propagates into a NaN cost instead of failing.
/// Dimensions are still checked.
pub fn calculate_unchecked_prices(input: &EstimateInput) -> Option<EstimateResult> {
    if !input.has_dimensions() {
        return None;
    }
    Some(compute(input))
}

fn compute(input: &EstimateInput) -> EstimateResult {
    let volume = input.volume();
    let ratio = mix_ratio(input.grade);

    let cement = Kilograms(volume.value() * CEMENT_KG_PER_M3);
    let sand = cement * ratio.sand;
    let gravel = cement * ratio.gravel;
    let water = Liters(cement.value() * ratio.water);

    let costs = MaterialCosts::from_quantities(cement, sand, gravel, &input.prices);

    EstimateResult {
        volume_m3: volume.value(),
        cement_kg: cement.value(),
        sand_kg: sand.value(),
        gravel_kg: gravel.value(),
        water_l: water.value(),
        total_cost: costs.total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    fn slab(grade: ConcreteGrade) -> EstimateInput {
        EstimateInput::new("Test Slab", 2.0, 3.0, 0.5, grade, UnitPrices::default())
    }

    #[test]
    fn test_m300_quantities() {
        let result = calculate(&slab(ConcreteGrade::M300)).unwrap().unwrap();
        assert!(approx(result.volume_m3, 3.0));
        assert!(approx(result.cement_kg, 1200.0));
        assert!(approx(result.sand_kg, 2280.0));
        assert!(approx(result.gravel_kg, 4440.0));
        assert!(approx(result.water_l, 600.0));
    }

    #[test]
    fn test_m300_costs() {
        let input = slab(ConcreteGrade::M300);
        let result = calculate(&input).unwrap().unwrap();
        let costs = result.costs(&input.prices);

        // 24 bags * 450
        assert!(approx(costs.cement, 10800.0));
        // 2.28 t * 1200
        assert!(approx(costs.sand, 2736.0));
        // 4.44 t * 1800
        assert!(approx(costs.gravel, 7992.0));
        assert!(approx(result.total_cost, 21528.0));
    }

    #[test]
    fn test_cost_breakdown_matches_total_exactly() {
        for grade in ConcreteGrade::ALL {
            let input = EstimateInput::new("", 3.7, 1.3, 0.17, grade, UnitPrices::new(512.5, 999.9, 1733.3));
            let result = calculate(&input).unwrap().unwrap();
            assert_eq!(result.costs(&input.prices).total, result.total_cost);
        }
    }

    #[test]
    fn test_cement_is_grade_independent() {
        let weak = calculate(&slab(ConcreteGrade::M200)).unwrap().unwrap();
        let strong = calculate(&slab(ConcreteGrade::M400)).unwrap().unwrap();
        assert_eq!(weak.cement_kg, strong.cement_kg);
        assert!(weak.sand_kg > strong.sand_kg);
    }

    #[test]
    fn test_volume_and_cement_invariants() {
        let dims = [(1.0, 1.0, 1.0), (0.3, 12.5, 0.15), (100.0, 0.01, 7.0), (2.5, 2.5, 2.5)];
        for (l, w, h) in dims {
            let input = EstimateInput::new("", l, w, h, ConcreteGrade::M250, UnitPrices::default());
            let result = calculate(&input).unwrap().unwrap();
            assert!(approx(result.volume_m3, l * w * h));
            assert!(approx(result.cement_kg, 400.0 * result.volume_m3));
        }
    }

    #[test]
    fn test_incomplete_dimensions_produce_no_result() {
        let cases = [
            (0.0, 3.0, 0.5),
            (2.0, -3.0, 0.5),
            (2.0, 3.0, f64::NAN),
            (f64::INFINITY, 3.0, 0.5),
        ];
        for (l, w, h) in cases {
            let input = EstimateInput::new("", l, w, h, ConcreteGrade::M300, UnitPrices::default());
            assert_eq!(calculate(&input).unwrap(), None);
            assert_eq!(calculate_unchecked_prices(&input), None);
        }
    }

    #[test]
    fn test_invalid_price_rejected() {
        let mut input = slab(ConcreteGrade::M300);
        input.prices.sand_per_tonne = f64::NAN;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PRICE");

        input.prices = UnitPrices::new(-1.0, 1200.0, 1800.0);
        assert!(matches!(
            calculate(&input),
            Err(CalcError::InvalidPrice { ref material, .. }) if material == "cement"
        ));
    }

    #[test]
    fn test_unchecked_prices_propagate_nan() {
        let mut input = slab(ConcreteGrade::M300);
        input.prices.gravel_per_tonne = f64::NAN;
        let result = calculate_unchecked_prices(&input).unwrap();
        assert!(result.total_cost.is_nan());
        assert!(approx(result.cement_kg, 1200.0));
    }

    #[test]
    fn test_zero_prices_allowed() {
        let input = EstimateInput::new("", 1.0, 1.0, 1.0, ConcreteGrade::M200, UnitPrices::new(0.0, 0.0, 0.0));
        let result = calculate(&input).unwrap().unwrap();
        assert_eq!(result.total_cost, 0.0);
    }

    #[test]
    fn test_unit_accessors() {
        let result = calculate(&slab(ConcreteGrade::M300)).unwrap().unwrap();
        assert!(approx(result.cement_bags().value(), 24.0));
        assert!(approx(result.sand_tonnes().value(), 2.28));
        assert!(approx(result.gravel_tonnes().value(), 4.44));
        assert!(approx(result.water().value(), 600.0));
    }

    #[test]
    fn test_serialization() {
        let input = slab(ConcreteGrade::M350);
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"grade\": \"M350\""));
        let roundtrip: EstimateInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, input);

        let result = calculate(&input).unwrap().unwrap();
        let json = serde_json::to_value(result).unwrap();
        for key in ["volume_m3", "cement_kg", "sand_kg", "gravel_kg", "water_l", "total_cost"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_input_json_defaults() {
        let input: EstimateInput =
            serde_json::from_str(r#"{"length_m": 1.0, "width_m": 2.0, "height_m": 0.1}"#).unwrap();
        assert_eq!(input.grade, ConcreteGrade::M300);
        assert_eq!(input.prices, UnitPrices::default());
        assert!(input.label.is_empty());
    }
}
