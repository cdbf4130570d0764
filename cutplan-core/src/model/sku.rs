//! Purchasable stock entries (catalog rows).

use serde::{Deserialize, Serialize};

use super::dimension::{Dimension, Dimensioned};

/// A purchasable plank in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlankSku {
    /// Width in millimeters.
    pub width_mm: u64,
    /// Length in millimeters.
    pub length_mm: u64,
    /// Unit price in minor currency units (cents).
    pub price_cents: u64,
    /// Supplier article number, if known.
    #[serde(default)]
    pub article_nr: Option<String>,
    /// Purchasable count; `None` means unlimited.
    #[serde(default)]
    pub available: Option<u32>,
}

impl PlankSku {
    /// Create an unlimited catalog entry without an article number.
    pub fn new(width_mm: u64, length_mm: u64, price_cents: u64) -> Self {
        Self {
            width_mm,
            length_mm,
            price_cents,
            article_nr: None,
            available: None,
        }
    }

    /// Set the supplier article number.
    pub fn with_article_nr(mut self, article_nr: impl Into<String>) -> Self {
        self.article_nr = Some(article_nr.into());
        self
    }

    /// Cap the purchasable count.
    pub fn with_available(mut self, count: u32) -> Self {
        self.available = Some(count);
        self
    }

    /// Key used to merge identical purchase rows.
    ///
    /// Two catalog entries with the same dimensions, price and article
    /// number are the same purchase line.
    pub fn grouping_key(&self) -> (u64, u64, u64, Option<&str>) {
        (
            self.width_mm,
            self.length_mm,
            self.price_cents,
            self.article_nr.as_deref(),
        )
    }
}

impl Dimensioned for PlankSku {
    fn dimension(&self) -> Dimension {
        Dimension::new(self.width_mm, self.length_mm)
    }
}

/// Canonical display order for catalog tables: width, then length, then
/// price, each ascending.
pub fn display_cmp(a: &PlankSku, b: &PlankSku) -> std::cmp::Ordering {
    a.width_mm
        .cmp(&b.width_mm)
        .then(a.length_mm.cmp(&b.length_mm))
        .then(a.price_cents.cmp(&b.price_cents))
}
