//! # Estimator Settings
//!
//! Defaults the form starts from: unit prices, grade, and how reports are
//! labeled. Settings serialize to a small JSON file (see [`crate::file_io`]).
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::settings::Settings;
//!
//! let settings = Settings::default();
//! assert_eq!(settings.prices.cement_per_bag, 450.0);
//!
//! let json = serde_json::to_string_pretty(&settings).unwrap();
//! assert!(json.contains("\"default_grade\": \"M300\""));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::UnitPrices;
use crate::errors::{CalcError, CalcResult};
use crate::mix::ConcreteGrade;
use crate::report::ReportOptions;

/// Current schema version for settings files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Grade preselected on a new form
    #[serde(default)]
    pub default_grade: ConcreteGrade,

    /// Unit prices preset on a new form
    #[serde(default)]
    pub prices: UnitPrices,

    /// Report header and currency
    #[serde(default)]
    pub report: ReportOptions,

    /// When the settings were last changed
    pub modified: DateTime<Utc>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: SCHEMA_VERSION.to_string(),
            default_grade: ConcreteGrade::default(),
            prices: UnitPrices::default(),
            report: ReportOptions::default(),
            modified: Utc::now(),
        }
    }
}

impl Settings {
    /// Replace the default prices. Prices are validated before they are stored.
    pub fn set_prices(&mut self, prices: UnitPrices) -> CalcResult<()> {
        prices.validate()?;
        self.prices = prices;
        self.touch();
        Ok(())
    }

    /// Set the currency symbol printed on reports
    pub fn set_currency(&mut self, symbol: impl Into<String>) -> CalcResult<()> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(CalcError::invalid_input(
                "currency_symbol",
                symbol,
                "Currency symbol cannot be empty",
            ));
        }
        self.report.currency_symbol = symbol.trim().to_string();
        self.touch();
        Ok(())
    }

    /// Set the object name printed on reports
    pub fn set_object_name(&mut self, name: impl Into<String>) {
        self.report.object_name = name.into();
        self.touch();
    }

    /// Set the grade preselected on new forms
    pub fn set_default_grade(&mut self, grade: ConcreteGrade) {
        self.default_grade = grade;
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }
}
