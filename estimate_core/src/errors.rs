//! # Error Types
//!
//! Structured error types for estimate_core. Each variant carries enough
//! context for a caller (human or program) to see which field is wrong and
//! why, and serializes to tagged JSON.
//!
//! An incomplete form is *not* an error: [`crate::calculations::calculate`]
//! returns `Ok(None)` for missing or non-positive dimensions.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{CalcError, CalcResult};
//!
//! fn validate_price(price: f64) -> CalcResult<()> {
//!     if !price.is_finite() || price < 0.0 {
//!         return Err(CalcError::invalid_price("cement", price.to_string()));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_price(450.0).is_ok());
//! assert!(validate_price(f64::NAN).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for estimation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Concrete grade is not present in the mix table
    #[error("Unknown concrete grade: '{grade}' (expected one of M200, M250, M300, M350, M400)")]
    InvalidGrade { grade: String },

    /// A unit price is not a finite, non-negative number
    #[error("Invalid {material} price: '{value}'")]
    InvalidPrice { material: String, value: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidGrade error
    pub fn invalid_grade(grade: impl Into<String>) -> Self {
        CalcError::InvalidGrade { grade: grade.into() }
    }

    /// Create an InvalidPrice error
    pub fn invalid_price(material: impl Into<String>, value: impl Into<String>) -> Self {
        CalcError::InvalidPrice {
            material: material.into(),
            value: value.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Errors the user can fix by editing the form and recalculating
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::InvalidGrade { .. } | CalcError::InvalidPrice { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidGrade { .. } => "INVALID_GRADE",
            CalcError::InvalidPrice { .. } => "INVALID_PRICE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError { reason: e.to_string() }
    }
}
