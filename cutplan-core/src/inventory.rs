//! Per-branch stock counts over the catalog arena.

use crate::model::PlankSku;

/// Remaining purchasable counts, index-aligned with the catalog slice.
///
/// The catalog itself is shared immutably and never mutated; each search
/// branch owns one of these count arrays. Forking a branch copies the
/// fixed-size array, nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    counts: Vec<Option<u32>>,
}

impl Inventory {
    /// Build the root inventory from the catalog's `available` caps.
    pub fn from_catalog(catalog: &[PlankSku]) -> Self {
        Self {
            counts: catalog.iter().map(|sku| sku.available).collect(),
        }
    }

    /// Independent copy for a forked search branch.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Whether at least one unit of `sku` can still be purchased.
    pub fn is_available(&self, sku: usize) -> bool {
        match self.counts[sku] {
            None => true,
            Some(n) => n > 0,
        }
    }

    /// Indices of all catalog entries with remaining stock.
    pub fn available_entries(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.counts.len()).filter(move |&i| self.is_available(i))
    }

    /// Remaining count of `sku`; `None` means unlimited.
    pub fn remaining(&self, sku: usize) -> Option<u32> {
        self.counts[sku]
    }

    /// Consume one unit of `sku`. Callers check availability first.
    pub fn decrement(&mut self, sku: usize) {
        if let Some(n) = &mut self.counts[sku] {
            debug_assert!(*n > 0, "decrement on exhausted catalog entry {sku}");
            *n = n.saturating_sub(1);
        }
    }

    /// Return one unit of `sku`.
    pub fn increment(&mut self, sku: usize) {
        if let Some(n) = &mut self.counts[sku] {
            *n += 1;
        }
    }
}
