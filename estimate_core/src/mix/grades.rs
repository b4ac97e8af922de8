//! Concrete grades and their mix ratios.
//!
//! Ratios are by mass relative to cement (cement = 1). The table is
//! immutable.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Concrete strength class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ConcreteGrade {
    #[serde(rename = "M200")]
    M200,
    #[serde(rename = "M250")]
    M250,
    #[default]
    #[serde(rename = "M300")]
    M300,
    #[serde(rename = "M350")]
    M350,
    #[serde(rename = "M400")]
    M400,
}

impl ConcreteGrade {
    /// All grades, weakest first (selection order)
    pub const ALL: [ConcreteGrade; 5] = [
        ConcreteGrade::M200,
        ConcreteGrade::M250,
        ConcreteGrade::M300,
        ConcreteGrade::M350,
        ConcreteGrade::M400,
    ];

    /// Table key (e.g., "M300")
    pub fn code(&self) -> &'static str {
        match self {
            ConcreteGrade::M200 => "M200",
            ConcreteGrade::M250 => "M250",
            ConcreteGrade::M300 => "M300",
            ConcreteGrade::M350 => "M350",
            ConcreteGrade::M400 => "M400",
        }
    }

    /// Parse from common string representations ("M300", "m 300", "300")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase().replace([' ', '-', '_'], "");
        let digits = normalized.strip_prefix('M').unwrap_or(&normalized);
        match digits {
            "200" => Ok(ConcreteGrade::M200),
            "250" => Ok(ConcreteGrade::M250),
            "300" => Ok(ConcreteGrade::M300),
            "350" => Ok(ConcreteGrade::M350),
            "400" => Ok(ConcreteGrade::M400),
            _ => Err(CalcError::invalid_grade(s)),
        }
    }

    /// Typical application of the grade
    pub fn application(&self) -> &'static str {
        match self {
            ConcreteGrade::M200 => "Foundations of low-rise buildings",
            ConcreteGrade::M250 => "Monolithic foundations, fences",
            ConcreteGrade::M300 => "Floor slabs, paths",
            ConcreteGrade::M350 => "Load-bearing structures",
            ConcreteGrade::M400 => "Bridges, special structures",
        }
    }

    /// Mix ratio for this grade
    pub fn ratio(&self) -> MixRatio {
        mix_ratio(*self)
    }
}

impl std::fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for ConcreteGrade {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConcreteGrade::from_str_flexible(s)
    }
}

/// Proportions of sand, gravel and water per unit mass of cement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixRatio {
    /// Always 1.0; kept so the full proportion can be printed
    pub cement: f64,
    pub sand: f64,
    pub gravel: f64,
    pub water: f64,
}

impl MixRatio {
    const fn new(sand: f64, gravel: f64, water: f64) -> Self {
        MixRatio {
            cement: 1.0,
            sand,
            gravel,
            water,
        }
    }

    /// Proportion notation, e.g. "1 : 1.9 : 3.7 (W/C 0.5)"
    pub fn notation(&self) -> String {
        format!("{} : {} : {} (W/C {})", self.cement, self.sand, self.gravel, self.water)
    }
}

/// Ratio for a typed grade.
///
/// The table is a total match over the closed grade set, so every grade has
/// exactly one row and there is no fallback.
pub fn mix_ratio(grade: ConcreteGrade) -> MixRatio {
    match grade {
        ConcreteGrade::M200 => MixRatio::new(2.8, 4.4, 0.5),
        ConcreteGrade::M250 => MixRatio::new(2.1, 3.9, 0.5),
        ConcreteGrade::M300 => MixRatio::new(1.9, 3.7, 0.5),
        ConcreteGrade::M350 => MixRatio::new(1.5, 3.1, 0.4),
        ConcreteGrade::M400 => MixRatio::new(1.2, 2.7, 0.4),
    }
}

/// Look up a ratio by exact table key ("M300").
///
/// Returns `CalcError::InvalidGrade` for keys not in the table rather than
/// falling back to a default grade. Use [`ConcreteGrade::from_str_flexible`]
/// for user-typed text.
pub fn lookup_ratio(code: &str) -> CalcResult<MixRatio> {
    ConcreteGrade::ALL
        .iter()
        .find(|grade| grade.code() == code)
        .map(|grade| mix_ratio(*grade))
        .ok_or_else(|| CalcError::invalid_grade(code))
}

/// Every table row in grade order
pub fn mix_table() -> Vec<(ConcreteGrade, MixRatio)> {
    ConcreteGrade::ALL.iter().map(|g| (*g, mix_ratio(*g))).collect()
}
