//! Input validation for planner data.

mod validate;

pub use validate::{
    validate_input, validate_piece, validate_settings, validate_sku, ValidationResult,
};
