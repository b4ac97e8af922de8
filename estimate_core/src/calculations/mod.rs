//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input)` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`estimate`] - Concrete material quantities and cost

pub mod estimate;

pub use estimate::{
    calculate, calculate_unchecked_prices, EstimateInput, EstimateResult, MaterialCosts, UnitPrices,
    CEMENT_KG_PER_M3,
};
