//! Error types for plan computation and project I/O.

use thiserror::Error;

/// Fatal errors: malformed input files or rejected input data.
///
/// Unsatisfiable demand is not an error at this level. The engine reports
/// it per width class as [`WidthFailure`] values inside the result, and
/// every other width still gets solved.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid input: {}", .messages.join("; "))]
    InvalidInput { messages: Vec<String> },

    #[error("unsupported project version {version} (expected {expected})")]
    UnsupportedVersion { version: u32, expected: u32 },

    #[error("row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, PlanError>;

/// Why one width class could not be satisfied.
///
/// These are data, not faults: each value covers exactly one width class
/// and never aborts the remaining classes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidthFailure {
    /// No stock of the required width exists at all.
    #[error("no stock available with width {width_mm} mm")]
    CatalogGap { width_mm: u64 },

    /// Stock of the width exists, but none is long enough.
    #[error(
        "stock with width {width_mm} mm is too short: need {required_mm} mm, longest available is {longest_mm} mm"
    )]
    LengthGap {
        width_mm: u64,
        required_mm: u64,
        longest_mm: u64,
    },

    /// Every shape fits, but quantity caps ran out before all pieces were
    /// placed.
    #[error("stock with width {width_mm} mm sold out before all pieces were placed")]
    SupplyExhausted { width_mm: u64 },
}

impl WidthFailure {
    /// The width class this failure belongs to.
    pub fn width_mm(&self) -> u64 {
        match self {
            WidthFailure::CatalogGap { width_mm }
            | WidthFailure::LengthGap { width_mm, .. }
            | WidthFailure::SupplyExhausted { width_mm } => *width_mm,
        }
    }
}
