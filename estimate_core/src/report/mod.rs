//! # Estimate Reports
//!
//! Turns an estimate into a fixed-layout, printable document and hands it
//! to a [`ReportSink`].
//!
//! ## Architecture
//!
//! - [`format_report`] is pure: same input, result, date and options give the
//!   same string. The date is a parameter, never read from the clock here.
//! - [`EstimateReport`] bundles the text with the data it was built from and
//!   a reference number.
//! - Sinks ([`MemorySink`], [`TextFileSink`], [`PdfFileSink`]) are the
//!   print surface. Callers inject whichever one they need.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use estimate_core::calculations::{calculate, EstimateInput, UnitPrices};
//! use estimate_core::mix::ConcreteGrade;
//! use estimate_core::report::{format_report, ReportOptions};
//!
//! let input = EstimateInput::new("Slab", 2.0, 3.0, 0.5, ConcreteGrade::M300, UnitPrices::default());
//! let result = calculate(&input).unwrap().unwrap();
//! let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
//!
//! let text = format_report(&input, &result, date, &ReportOptions::default());
//! assert!(text.contains("TOTAL: 21528 ₽"));
//! ```

pub mod pdf;
pub mod sink;

pub use pdf::render_estimate_pdf;
pub use sink::{MemorySink, PdfFileSink, ReportSink, TextFileSink};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{EstimateInput, EstimateResult};
use crate::mix::{CURING_MILESTONES, RECOMMENDATIONS};

/// Date format used on printed estimates (dd.mm.yyyy)
pub const REPORT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Presentation options for a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Object line in the header; a non-empty input label takes precedence
    pub object_name: String,
    /// Currency symbol printed after amounts
    pub currency_symbol: String,
    /// Append grade application and curing reference
    pub include_reference: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            object_name: "Concreting".to_string(),
            currency_symbol: "₽".to_string(),
            include_reference: false,
        }
    }
}

impl ReportOptions {
    fn object_line<'a>(&'a self, input: &'a EstimateInput) -> &'a str {
        if !input.label.trim().is_empty() {
            input.label.trim()
        } else {
            &self.object_name
        }
    }
}

/// Format `value` with `decimals` digits after the point.
///
/// Exact ties round away from zero (`12.5` -> `13`, `0.25` -> `0.3`).
/// Everything else is correctly rounded from the exact binary value, so
/// `1.005`, stored just below the tie, prints as `1.00`.
pub fn fixed(value: f64, decimals: usize) -> String {
    let value = if is_exact_tie(value, decimals) {
        // Next float away from zero: no longer a tie, same neighbours
        f64::from_bits(value.to_bits() + 1)
    } else {
        value
    };
    format!("{:.*}", decimals, value)
}

/// True when `value * 10^decimals` is exactly an odd multiple of one half.
///
/// For `value = m * 2^e` that holds iff `2 * 10^decimals * m * 2^e` is an
/// odd integer, i.e. the power of two in it is exactly zero.
fn is_exact_tie(value: f64, decimals: usize) -> bool {
    if value == 0.0 || !value.is_finite() {
        return false;
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    if exponent >= 0 {
        return false;
    }
    mantissa.trailing_zeros() as i64 + decimals as i64 + 1 == -exponent
}

/// Format an estimate as a printable text document.
///
/// Volume is shown to 2 decimals, cement in kg (whole) and bags (1 decimal),
/// sand and gravel in tonnes (2 decimals), water in whole liters, and all
/// costs in whole currency units, each via [`fixed`]. Dimensions print in
/// the shortest form of the parsed number (`"2,50"` prints as `2.5`).
/// Per-material costs are recomputed from `result` and the input's prices.
pub fn format_report(
    input: &EstimateInput,
    result: &EstimateResult,
    date: NaiveDate,
    options: &ReportOptions,
) -> String {
    let costs = result.costs(&input.prices);
    let currency = &options.currency_symbol;

    let mut out = format!(
        "\
CONCRETE WORKS ESTIMATE
=======================

Object: {object}
Date: {date}

INPUT DATA:
- Length: {length} m
- Width: {width} m
- Height: {height} m
- Concrete grade: {grade}
- Total volume: {volume} m³

MATERIAL CONSUMPTION:
- Cement: {cement_kg} kg ({cement_bags} bags)
- Sand: {sand_t} t
- Gravel: {gravel_t} t
- Water: {water_l} L

MATERIAL COST:
- Cement: {cement_cost} {currency}
- Sand: {sand_cost} {currency}
- Gravel: {gravel_cost} {currency}

TOTAL: {total} {currency}
",
        object = options.object_line(input),
        date = date.format(REPORT_DATE_FORMAT),
        length = input.length_m,
        width = input.width_m,
        height = input.height_m,
        grade = input.grade,
        volume = fixed(result.volume_m3, 2),
        cement_kg = fixed(result.cement_kg, 0),
        cement_bags = fixed(result.cement_bags().value(), 1),
        sand_t = fixed(result.sand_tonnes().value(), 2),
        gravel_t = fixed(result.gravel_tonnes().value(), 2),
        water_l = fixed(result.water_l, 0),
        cement_cost = fixed(costs.cement, 0),
        sand_cost = fixed(costs.sand, 0),
        gravel_cost = fixed(costs.gravel, 0),
        total = fixed(result.total_cost, 0),
        currency = currency,
    );

    if options.include_reference {
        out.push_str("\nREFERENCE:\n");
        out.push_str(&format!(
            "- Grade {} ({}): {}\n",
            input.grade,
            input.grade.ratio().notation(),
            input.grade.application()
        ));
        for milestone in CURING_MILESTONES.iter() {
            out.push_str(&format!("- {}: {}\n", milestone.label, milestone.age));
        }
        for note in RECOMMENDATIONS.iter() {
            out.push_str(&format!("- {}\n", note));
        }
    }

    out.push_str("\n________________________\nSignature of responsible person\n");
    out
}

/// A formatted estimate ready for a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateReport {
    /// Reference number printed on the document
    pub id: Uuid,
    /// Date printed on the document
    pub date: NaiveDate,
    /// Inputs the estimate was calculated from
    pub input: EstimateInput,
    /// The estimate itself
    pub result: EstimateResult,
    /// Options used for formatting
    pub options: ReportOptions,
    /// Formatted text
    pub text: String,
}

impl EstimateReport {
    /// Format a new report with a fresh reference number.
    pub fn new(input: &EstimateInput, result: &EstimateResult, date: NaiveDate, options: &ReportOptions) -> Self {
        EstimateReport {
            id: Uuid::new_v4(),
            date,
            input: input.clone(),
            result: *result,
            options: options.clone(),
            text: format_report(input, result, date, options),
        }
    }

    /// Short reference number (first 8 hex digits of the id)
    pub fn reference(&self) -> String {
        self.id.simple().to_string()[..8].to_uppercase()
    }

    /// Document title
    pub fn title(&self) -> String {
        format!("Concrete works estimate {}", self.reference())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate, UnitPrices};
    use crate::mix::ConcreteGrade;

    fn sample() -> (EstimateInput, EstimateResult) {
        let input = EstimateInput::new("", 2.0, 3.0, 0.5, ConcreteGrade::M300, UnitPrices::default());
        let result = calculate(&input).unwrap().unwrap();
        (input, result)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_report_layout() {
        let (input, result) = sample();
        let text = format_report(&input, &result, date(), &ReportOptions::default());

        let expected = "\
CONCRETE WORKS ESTIMATE
=======================

Object: Concreting
Date: 14.03.2025

INPUT DATA:
- Length: 2 m
- Width: 3 m
- Height: 0.5 m
- Concrete grade: M300
- Total volume: 3.00 m³

MATERIAL CONSUMPTION:
- Cement: 1200 kg (24.0 bags)
- Sand: 2.28 t
- Gravel: 4.44 t
- Water: 600 L

MATERIAL COST:
- Cement: 10800 ₽
- Sand: 2736 ₽
- Gravel: 7992 ₽

TOTAL: 21528 ₽

________________________
Signature of responsible person
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_report_is_deterministic() {
        let (input, result) = sample();
        let options = ReportOptions {
            include_reference: true,
            ..ReportOptions::default()
        };
        let a = format_report(&input, &result, date(), &options);
        let b = format_report(&input, &result, date(), &options);
        assert_eq!(a, b);
    }

    #[test]
    fn test_report_does_not_touch_result() {
        let (input, result) = sample();
        let before = result;
        let _ = format_report(&input, &result, date(), &ReportOptions::default());
        assert_eq!(result, before);
    }

    #[test]
    fn test_label_overrides_object_name() {
        let (mut input, result) = sample();
        input.label = "Garage slab".to_string();
        let text = format_report(&input, &result, date(), &ReportOptions::default());
        assert!(text.contains("Object: Garage slab\n"));
    }

    #[test]
    fn test_reference_section() {
        let (input, result) = sample();
        let options = ReportOptions {
            currency_symbol: "EUR".to_string(),
            include_reference: true,
            ..ReportOptions::default()
        };
        let text = format_report(&input, &result, date(), &options);
        assert!(text.contains("TOTAL: 21528 EUR"));
        assert!(text.contains("REFERENCE:"));
        assert!(text.contains("Floor slabs, paths"));
        assert!(text.contains("- Full set: 28 days"));
    }

    #[test]
    fn test_fixed_rounds_exact_ties_up() {
        assert_eq!(fixed(12.5, 0), "13");
        assert_eq!(fixed(0.25, 1), "0.3");
        assert_eq!(fixed(112.5, 0), "113");
        assert_eq!(fixed(0.125, 2), "0.13");
        assert_eq!(fixed(-2.5, 0), "-3");
        assert_eq!(fixed(2.4, 0), "2");
        assert_eq!(fixed(3.0, 2), "3.00");
        assert_eq!(fixed(0.0, 1), "0.0");
    }

    #[test]
    fn test_fixed_keeps_near_ties_below() {
        // 1.005 is stored just under the tie
        assert_eq!(fixed(1.005, 2), "1.00");
        assert_eq!(fixed(2.675, 2), "2.67");
    }

    #[test]
    fn test_quarter_meter_pour_rounds_half_up() {
        let input = EstimateInput::new("", 0.5, 0.25, 0.25, ConcreteGrade::M300, UnitPrices::default());
        let result = calculate(&input).unwrap().unwrap();
        assert_eq!(result.cement_kg, 12.5);

        let text = format_report(&input, &result, date(), &ReportOptions::default());
        assert!(text.contains("- Cement: 13 kg (0.3 bags)\n"), "{}", text);
        assert!(text.contains("- Cement: 113 ₽\n"), "{}", text);
    }

    #[test]
    fn test_estimate_report_reference() {
        let (input, result) = sample();
        let report = EstimateReport::new(&input, &result, date(), &ReportOptions::default());
        assert_eq!(report.reference().len(), 8);
        assert!(report.title().ends_with(&report.reference()));
        assert_eq!(report.text, format_report(&input, &result, date(), &ReportOptions::default()));
    }
}
