//! Required pieces and their expansion into unit requests.

use serde::{Deserialize, Serialize};

use super::dimension::{Dimension, Dimensioned};

/// One demand row: a piece dimension requested some number of times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredPiece {
    /// Width in millimeters.
    pub width_mm: u64,
    /// Length in millimeters.
    pub length_mm: u64,
    /// How many pieces of this dimension are needed.
    pub quantity: u32,
    /// Free-form note carried through to the cut list.
    #[serde(default)]
    pub comment: Option<String>,
}

impl RequiredPiece {
    /// Create a demand row without a comment.
    pub fn new(width_mm: u64, length_mm: u64, quantity: u32) -> Self {
        Self {
            width_mm,
            length_mm,
            quantity,
            comment: None,
        }
    }

    /// Attach a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl Dimensioned for RequiredPiece {
    fn dimension(&self) -> Dimension {
        Dimension::new(self.width_mm, self.length_mm)
    }
}

/// A single unit-quantity piece request.
///
/// The search assigns one piece per transition, so demand rows are expanded
/// into units before the engine runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceUnit {
    /// Width in millimeters.
    pub width_mm: u64,
    /// Length in millimeters.
    pub length_mm: u64,
    /// Comment inherited from the demand row.
    pub comment: Option<String>,
}

impl Dimensioned for PieceUnit {
    fn dimension(&self) -> Dimension {
        Dimension::new(self.width_mm, self.length_mm)
    }
}

/// Expand demand rows into individual unit requests, preserving row order.
pub fn expand_units(required: &[RequiredPiece]) -> Vec<PieceUnit> {
    let mut units = Vec::new();
    for piece in required {
        for _ in 0..piece.quantity {
            units.push(PieceUnit {
                width_mm: piece.width_mm,
                length_mm: piece.length_mm,
                comment: piece.comment.clone(),
            });
        }
    }
    units
}
