//! # estimate_core - Concrete Material Estimation Engine
//!
//! `estimate_core` computes how much cement, sand, gravel and water a
//! rectangular concrete pour needs for a given grade, what those materials
//! cost, and formats the result as a printable estimate. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Injected side effects**: Printing goes through a [`report::ReportSink`]
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::calculations::{calculate, EstimateInput, UnitPrices};
//! use estimate_core::mix::ConcreteGrade;
//!
//! let input = EstimateInput::new("Slab", 2.0, 3.0, 0.5, ConcreteGrade::M300, UnitPrices::default());
//! let result = calculate(&input).unwrap().unwrap();
//!
//! assert!((result.total_cost - 21528.0).abs() < 1e-6);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The estimate calculation
//! - [`mix`] - Grade -> mix ratio table and curing reference data
//! - [`form`] - Text form parsing and the most-recent-result session
//! - [`report`] - Report formatting, PDF rendering and sinks
//! - [`settings`] - Default prices, grade and report labels
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic writes and settings files

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod form;
pub mod mix;
pub mod report;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, EstimateInput, EstimateResult, MaterialCosts, UnitPrices};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_settings, load_settings_or_default, save_settings};
pub use form::{EstimateForm, EstimateSession};
pub use mix::{ConcreteGrade, MixRatio};
pub use report::{format_report, EstimateReport, ReportOptions, ReportSink};
pub use settings::Settings;
