//! Planner settings and unit/currency formatting.

use serde::{Deserialize, Serialize};

/// Conversion factor: mm to inch.
pub const CONV_MM_INCH: f64 = 25.4;

/// Default saw kerf in millimeters.
pub const DEFAULT_KERF_MM: u64 = 3;

/// Default currency symbol.
pub const DEFAULT_CURRENCY: &str = "€";

/// Display unit for lengths.
///
/// The engine always works in millimeters; the unit only affects rendered
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "inch")]
    Inches,
}

impl Unit {
    /// Parse a unit from its display label.
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mm" => Some(Unit::Millimeters),
            "inch" | "in" => Some(Unit::Inches),
            _ => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Millimeters => write!(f, "mm"),
            Unit::Inches => write!(f, "inch"),
        }
    }
}

/// Convert millimeters to inches.
pub fn to_inches(mm: u64) -> f64 {
    mm as f64 / CONV_MM_INCH
}

/// Format a length for display in the given unit.
pub fn format_length(mm: u64, unit: Unit) -> String {
    match unit {
        Unit::Millimeters => format!("{mm} mm"),
        Unit::Inches => format!("{:.1} in", to_inches(mm)),
    }
}

/// Format a minor-unit price with the currency symbol.
pub fn format_currency(cents: u64, currency: &str) -> String {
    format!("{}{}.{:02}", currency, cents / 100, cents % 100)
}

/// Global planner settings shared by every computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerSettings {
    /// Blade width consumed between adjacent pieces, in millimeters.
    pub saw_kerf_mm: u64,
    /// Display unit for exports.
    #[serde(default)]
    pub unit_system: Unit,
    /// Currency symbol for price formatting.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            saw_kerf_mm: DEFAULT_KERF_MM,
            unit_system: Unit::default(),
            currency: default_currency(),
        }
    }
}
