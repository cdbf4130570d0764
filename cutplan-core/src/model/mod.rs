//! Data model: dimensions, catalog entries, planks and pieces.

mod dimension;
mod piece;
mod plank;
mod sku;

pub use dimension::{Dimension, Dimensioned};
pub use piece::{expand_units, PieceUnit, RequiredPiece};
pub use plank::{CutPiece, Plank};
pub use sku::{display_cmp, PlankSku};
