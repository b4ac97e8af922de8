//! Curing timeline reference data.
//!
//! Printed in the reference section of an estimate. Strength fractions are
//! relative to the 28-day design strength of the grade.

use serde::Serialize;

/// A point on the curing timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CuringMilestone {
    pub label: &'static str,
    /// Age of the concrete, human-readable
    pub age: &'static str,
    /// Fraction of design strength reached, if the milestone is a strength one
    pub strength_fraction: Option<f64>,
}

/// Curing milestones in time order
pub const CURING_MILESTONES: [CuringMilestone; 4] = [
    CuringMilestone {
        label: "Initial set",
        age: "2-4 hours",
        strength_fraction: None,
    },
    CuringMilestone {
        label: "50% strength",
        age: "7 days",
        strength_fraction: Some(0.5),
    },
    CuringMilestone {
        label: "70% strength",
        age: "14 days",
        strength_fraction: Some(0.7),
    },
    CuringMilestone {
        label: "Full set",
        age: "28 days",
        strength_fraction: Some(1.0),
    },
];

/// Practical notes printed alongside the curing table
pub const RECOMMENDATIONS: [&str; 4] = [
    "Order materials with a 5-10% reserve",
    "Use clean water",
    "Keep to the mixing proportions",
    "Take weather conditions into account",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_is_monotonic() {
        let fractions: Vec<f64> = CURING_MILESTONES
            .iter()
            .filter_map(|m| m.strength_fraction)
            .collect();
        assert_eq!(fractions, vec![0.5, 0.7, 1.0]);
    }
}
