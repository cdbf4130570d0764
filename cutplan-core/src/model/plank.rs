//! A purchased plank and the pieces assigned onto it.

use serde::{Deserialize, Serialize};

use super::dimension::{Dimension, Dimensioned};
use super::piece::PieceUnit;
use super::sku::PlankSku;

/// One piece assigned onto a purchased plank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutPiece {
    /// Width in millimeters.
    pub width_mm: u64,
    /// Length in millimeters.
    pub length_mm: u64,
    /// Blade width consumed behind this piece. Clamped to the material
    /// actually left, so the final piece on a full plank consumes less than
    /// the configured kerf.
    pub kerf_mm: u64,
    /// Distance from the start of the plank to the start of this piece.
    pub offset_mm: u64,
    /// Comment inherited from the demand row.
    #[serde(default)]
    pub comment: Option<String>,
}

impl Dimensioned for CutPiece {
    fn dimension(&self) -> Dimension {
        Dimension::new(self.width_mm, self.length_mm)
    }
}

/// A concrete plank purchased from a catalog entry.
///
/// `sku` is an index into the catalog slice the plan was computed against.
/// Pieces are stored in assignment order; offsets never overlap and the
/// assigned total never exceeds the plank length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plank {
    /// Catalog index of the entry this plank was purchased from.
    pub sku: usize,
    /// Width in millimeters.
    pub width_mm: u64,
    /// Length in millimeters.
    pub length_mm: u64,
    /// Assigned pieces in cutting order.
    pub pieces: Vec<CutPiece>,
}

impl Plank {
    /// Create an empty plank from a catalog entry.
    pub fn new(sku: usize, entry: &PlankSku) -> Self {
        Self {
            sku,
            width_mm: entry.width_mm,
            length_mm: entry.length_mm,
            pieces: Vec::new(),
        }
    }

    /// Usable length behind the last assigned piece.
    pub fn remaining_mm(&self) -> u64 {
        let used: u64 = self.pieces.iter().map(|p| p.length_mm + p.kerf_mm).sum();
        self.length_mm.saturating_sub(used)
    }

    /// Whether `piece` can be appended without overrunning the plank.
    ///
    /// Widths must match exactly; pieces are never rotated or packed across
    /// a different width.
    pub fn fits(&self, piece: &PieceUnit) -> bool {
        self.width_mm == piece.width_mm && self.remaining_mm() >= piece.length_mm
    }

    /// Append a piece at the next offset, consuming up to `kerf_mm` of
    /// blade width behind it.
    ///
    /// Panics when the piece does not fit; callers check [`Plank::fits`]
    /// first. A non-fitting append is a programming error, not an input
    /// error.
    pub fn push_piece(&mut self, piece: &PieceUnit, kerf_mm: u64) {
        let remaining = self.remaining_mm();
        assert!(
            self.width_mm == piece.width_mm && remaining >= piece.length_mm,
            "piece {} x {} does not fit on plank {} x {} (remaining {})",
            piece.length_mm,
            piece.width_mm,
            self.length_mm,
            self.width_mm,
            remaining,
        );

        let offset_mm = self.length_mm - remaining;
        let kerf = kerf_mm.min(remaining - piece.length_mm);
        self.pieces.push(CutPiece {
            width_mm: piece.width_mm,
            length_mm: piece.length_mm,
            kerf_mm: kerf,
            offset_mm,
            comment: piece.comment.clone(),
        });
    }

    /// Split this plank lengthwise into two narrower halves.
    ///
    /// Dormant capability: the search never generates halving moves, but
    /// downstream tooling can split an unused plank in two. Returns `None`
    /// once pieces are assigned, or when the plank is too narrow to lose a
    /// saw kerf between the halves.
    pub fn halve(&self, kerf_mm: u64) -> Option<(Plank, Plank)> {
        if !self.pieces.is_empty() || self.width_mm <= kerf_mm {
            return None;
        }
        let usable = self.width_mm - kerf_mm;
        let first = usable / 2;
        let second = usable - first;
        if first == 0 {
            return None;
        }
        Some((
            Plank {
                sku: self.sku,
                width_mm: first,
                length_mm: self.length_mm,
                pieces: Vec::new(),
            },
            Plank {
                sku: self.sku,
                width_mm: second,
                length_mm: self.length_mm,
                pieces: Vec::new(),
            },
        ))
    }
}

impl Dimensioned for Plank {
    fn dimension(&self) -> Dimension {
        Dimension::new(self.width_mm, self.length_mm)
    }
}
