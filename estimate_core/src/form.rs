//! # Estimate Form and Session
//!
//! The form holds what the user typed. Text is turned into a typed
//! [`EstimateInput`] only at [`EstimateForm::to_input`]; nothing downstream
//! sees raw strings.
//!
//! [`EstimateSession`] pairs a form with the most recent result. A new
//! result replaces the old one wholesale; a failed or incomplete
//! calculation leaves the old one in place.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::form::EstimateSession;
//! use estimate_core::mix::ConcreteGrade;
//!
//! let mut session = EstimateSession::default();
//! session.form.length = "2".into();
//! session.form.width = "3".into();
//! session.form.height = "0,5".into();
//!
//! let result = *session.calculate().unwrap().expect("complete form");
//! assert_eq!(result.volume_m3, 3.0);
//!
//! // Changing the grade does not touch the last result
//! session.select_grade(ConcreteGrade::M400);
//! assert_eq!(session.latest(), Some(&result));
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculations::{calculate, EstimateInput, EstimateResult, UnitPrices};
use crate::errors::{CalcError, CalcResult};
use crate::mix::ConcreteGrade;
use crate::report::{EstimateReport, ReportOptions, ReportSink};
use crate::settings::Settings;

/// Parse a number typed by a user. Accepts a decimal comma.
///
/// Returns `None` for empty or unparsable text.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replace(',', ".").parse::<f64>().ok()
}

/// Raw form state, as typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateForm {
    pub label: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub grade: ConcreteGrade,
    pub cement_price: String,
    pub sand_price: String,
    pub gravel_price: String,
}

impl Default for EstimateForm {
    fn default() -> Self {
        EstimateForm::preset(ConcreteGrade::default(), &UnitPrices::default())
    }
}

impl EstimateForm {
    /// Empty dimensions with grade and prices preset from settings
    pub fn from_settings(settings: &Settings) -> Self {
        EstimateForm::preset(settings.default_grade, &settings.prices)
    }

    fn preset(grade: ConcreteGrade, prices: &UnitPrices) -> Self {
        EstimateForm {
            label: String::new(),
            length: String::new(),
            width: String::new(),
            height: String::new(),
            grade,
            cement_price: prices.cement_per_bag.to_string(),
            sand_price: prices.sand_per_tonne.to_string(),
            gravel_price: prices.gravel_per_tonne.to_string(),
        }
    }

    /// Parse the form into a typed input.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(input))` - Every field parsed, dimensions positive
    /// * `Ok(None)` - A dimension is empty, unparsable, zero or negative
    /// * `Err(CalcError::InvalidPrice)` - A price is unparsable, negative or not finite
    pub fn to_input(&self) -> CalcResult<Option<EstimateInput>> {
        let dims = [&self.length, &self.width, &self.height].map(|d| parse_number(d));
        let [length_m, width_m, height_m] = match dims {
            [Some(l), Some(w), Some(h)] => [l, w, h],
            _ => return Ok(None),
        };

        let mut input = EstimateInput::new(
            self.label.trim(),
            length_m,
            width_m,
            height_m,
            self.grade,
            UnitPrices::default(),
        );
        if !input.has_dimensions() {
            return Ok(None);
        }

        input.prices = self.prices()?;
        Ok(Some(input))
    }

    /// Parse and validate the three price fields
    pub fn prices(&self) -> CalcResult<UnitPrices> {
        let parse = |material: &str, text: &str| {
            parse_number(text).ok_or_else(|| CalcError::invalid_price(material, text.trim()))
        };
        let prices = UnitPrices::new(
            parse("cement", &self.cement_price)?,
            parse("sand", &self.sand_price)?,
            parse("gravel", &self.gravel_price)?,
        );
        prices.validate()?;
        Ok(prices)
    }
}

/// A form plus the most recent estimate produced from it.
#[derive(Debug, Clone, Default)]
pub struct EstimateSession {
    pub form: EstimateForm,
    latest: Option<(EstimateInput, EstimateResult)>,
}

impl EstimateSession {
    /// New session with the form preset from settings
    pub fn new(settings: &Settings) -> Self {
        EstimateSession {
            form: EstimateForm::from_settings(settings),
            latest: None,
        }
    }

    /// Choose a grade on the form. The current result is not recalculated.
    pub fn select_grade(&mut self, grade: ConcreteGrade) {
        self.form.grade = grade;
    }

    /// Run the calculation for the current form.
    ///
    /// On success the new result replaces the previous one. When the form is
    /// incomplete (`Ok(None)`) or invalid (`Err`), the previous result stays.
    pub fn calculate(&mut self) -> CalcResult<Option<&EstimateResult>> {
        let input = match self.form.to_input()? {
            Some(input) => input,
            None => return Ok(None),
        };
        match calculate(&input)? {
            Some(result) => {
                self.latest = Some((input, result));
                Ok(self.latest.as_ref().map(|(_, result)| result))
            }
            None => Ok(None),
        }
    }

    /// Most recent result, if any
    pub fn latest(&self) -> Option<&EstimateResult> {
        self.latest.as_ref().map(|(_, result)| result)
    }

    /// Input the most recent result was calculated from
    pub fn latest_input(&self) -> Option<&EstimateInput> {
        self.latest.as_ref().map(|(input, _)| input)
    }

    /// Format the most recent result.
    ///
    /// Uses the input the result was calculated from, not the current form,
    /// so edits made after calculating do not leak into the report.
    pub fn report(&self, date: NaiveDate, options: &ReportOptions) -> Option<EstimateReport> {
        self.latest
            .as_ref()
            .map(|(input, result)| EstimateReport::new(input, result, date, options))
    }

    /// Send the most recent result to a sink.
    ///
    /// Returns `Ok(false)` without touching the sink when there is nothing
    /// to print.
    pub fn print(&self, sink: &mut dyn ReportSink, date: NaiveDate, options: &ReportOptions) -> CalcResult<bool> {
        match self.report(date, options) {
            Some(report) => {
                sink.deliver(&report)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
