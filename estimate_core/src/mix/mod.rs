//! # Mix Design Data
//!
//! Static reference data for concrete mixes: the grade -> ratio table and
//! curing reference values.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::mix::{ConcreteGrade, lookup_ratio};
//!
//! let ratio = ConcreteGrade::M300.ratio();
//! assert_eq!(ratio.sand, 1.9);
//!
//! // String keys that are not in the table are rejected
//! assert!(lookup_ratio("M999").is_err());
//! ```

pub mod curing;
pub mod grades;

pub use curing::{CuringMilestone, CURING_MILESTONES, RECOMMENDATIONS};
pub use grades::{lookup_ratio, mix_ratio, mix_table, ConcreteGrade, MixRatio};
