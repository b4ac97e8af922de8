//! CLI definition using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "concrete-estimate")]
#[command(version)]
#[command(about = "Concrete material and cost estimation")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate materials and cost for a rectangular pour
    Calculate(CalculateArgs),

    /// List concrete grades with mix ratios and typical use
    Grades,

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Form fields for `calculate`. Numbers are taken as text and parsed by the
/// estimate form, so a decimal comma is accepted.
#[derive(Args, Debug, Clone, Default)]
pub struct CalculateArgs {
    /// Length in meters
    #[arg(long, short = 'l', allow_hyphen_values = true)]
    pub length: String,

    /// Width in meters
    #[arg(long, short = 'w', allow_hyphen_values = true)]
    pub width: String,

    /// Height (thickness) in meters
    #[arg(long = "height", allow_hyphen_values = true)]
    pub height: String,

    /// Concrete grade (M200, M250, M300, M350, M400). Uses settings if not specified.
    #[arg(long, short = 'g')]
    pub grade: Option<String>,

    /// Cement price per 50 kg bag
    #[arg(long, allow_hyphen_values = true)]
    pub cement_price: Option<String>,

    /// Sand price per tonne
    #[arg(long, allow_hyphen_values = true)]
    pub sand_price: Option<String>,

    /// Gravel price per tonne
    #[arg(long, allow_hyphen_values = true)]
    pub gravel_price: Option<String>,

    /// Object name printed on the report
    #[arg(long)]
    pub label: Option<String>,

    /// Write the report to this file (.pdf renders a PDF, anything else is text)
    #[arg(long, short = 'o')]
    pub report: Option<PathBuf>,

    /// Add grade application and curing reference to the report
    #[arg(long)]
    pub reference: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current settings
    Show,

    /// Reset settings to defaults
    Reset,

    /// Set default unit prices
    SetPrices {
        /// Cement price per 50 kg bag
        #[arg(long, allow_hyphen_values = true)]
        cement: Option<String>,

        /// Sand price per tonne
        #[arg(long, allow_hyphen_values = true)]
        sand: Option<String>,

        /// Gravel price per tonne
        #[arg(long, allow_hyphen_values = true)]
        gravel: Option<String>,
    },

    /// Set the currency symbol printed on reports
    SetCurrency { symbol: String },

    /// Set the default object name printed on reports
    SetObject { name: String },

    /// Set the default concrete grade
    SetGrade { grade: String },
}
