//! Field and record validation for planner input.
//!
//! The engine assumes validated input; this pass runs before it and turns
//! precondition violations into messages instead of panics.

use crate::config::PlannerSettings;
use crate::model::{PlankSku, RequiredPiece};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Create a failing result with an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            errors: vec![message.into()],
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate one catalog entry. `row` is 1-based for messages.
pub fn validate_sku(sku: &PlankSku, row: usize) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if sku.width_mm == 0 {
        result.add_error(format!("catalog row {row}: width must be > 0"));
    }
    if sku.length_mm == 0 {
        result.add_error(format!("catalog row {row}: length must be > 0"));
    }
    if sku.price_cents == 0 {
        result.add_warning(format!("catalog row {row}: price is zero"));
    }
    if let Some(article_nr) = &sku.article_nr {
        if article_nr.trim().is_empty() {
            result.add_warning(format!("catalog row {row}: blank article number"));
        }
    }

    result
}

/// Validate one demand row. `row` is 1-based for messages.
pub fn validate_piece(piece: &RequiredPiece, row: usize) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if piece.width_mm == 0 {
        result.add_error(format!("piece row {row}: width must be > 0"));
    }
    if piece.length_mm == 0 {
        result.add_error(format!("piece row {row}: length must be > 0"));
    }
    if piece.quantity == 0 {
        result.add_error(format!("piece row {row}: quantity must be >= 1"));
    }

    result
}

/// Validate the global settings.
pub fn validate_settings(settings: &PlannerSettings) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if settings.currency.is_empty() {
        result.add_error("settings: currency symbol required");
    }

    result
}

/// Validate the whole input set.
pub fn validate_input(
    catalog: &[PlankSku],
    required: &[RequiredPiece],
    settings: &PlannerSettings,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for (idx, sku) in catalog.iter().enumerate() {
        result.merge(validate_sku(sku, idx + 1));
    }
    for (idx, piece) in required.iter().enumerate() {
        result.merge(validate_piece(piece, idx + 1));
    }
    result.merge(validate_settings(settings));

    result
}
