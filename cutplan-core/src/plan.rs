//! Purchase-plan aggregation over the engine's planks.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Plank, PlankSku};
use crate::solver::SearchStats;

/// One merged purchase row: a catalog entry and how many planks of it to
/// buy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseItem {
    /// Catalog index of the entry.
    pub sku: usize,
    /// Width in millimeters.
    pub width_mm: u64,
    /// Length in millimeters.
    pub length_mm: u64,
    /// Supplier article number, if known.
    pub article_nr: Option<String>,
    /// Unit price in cents.
    pub unit_price_cents: u64,
    /// Number of planks to buy.
    pub quantity: u32,
    /// quantity x unit price, in cents.
    pub subtotal_cents: u64,
}

/// Merge purchased planks into one row per catalog grouping key, keeping
/// first-seen order.
pub fn build_purchase_plan(catalog: &[PlankSku], planks: &[Plank]) -> Vec<PurchaseItem> {
    let mut items: Vec<PurchaseItem> = Vec::new();
    let mut index: HashMap<(u64, u64, u64, Option<String>), usize> = HashMap::new();

    for plank in planks {
        let sku = &catalog[plank.sku];
        let key = (
            sku.width_mm,
            sku.length_mm,
            sku.price_cents,
            sku.article_nr.clone(),
        );
        match index.entry(key) {
            Entry::Occupied(slot) => {
                let item = &mut items[*slot.get()];
                item.quantity += 1;
                item.subtotal_cents += sku.price_cents;
            }
            Entry::Vacant(slot) => {
                slot.insert(items.len());
                items.push(PurchaseItem {
                    sku: plank.sku,
                    width_mm: sku.width_mm,
                    length_mm: sku.length_mm,
                    article_nr: sku.article_nr.clone(),
                    unit_price_cents: sku.price_cents,
                    quantity: 1,
                    subtotal_cents: sku.price_cents,
                });
            }
        }
    }

    items
}

/// Grand total over purchase rows, in cents.
pub fn total_cents(items: &[PurchaseItem]) -> u64 {
    items.iter().map(|item| item.subtotal_cents).sum()
}

/// Complete plan for presentation layers: the purchase rows, the per-plank
/// cut assignments, and the per-width failure messages.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    /// Every plank to purchase with its piece assignments.
    pub planks: Vec<Plank>,
    /// Merged purchase rows.
    pub purchase_plan: Vec<PurchaseItem>,
    /// Grand total in cents.
    pub total_cents: u64,
    /// Human-readable failure messages, one per unmet width class.
    pub errors: Vec<String>,
    /// Merged search counters.
    pub stats: SearchStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PieceUnit;

    fn plank_from(catalog: &[PlankSku], sku: usize, lengths: &[u64]) -> Plank {
        let mut plank = Plank::new(sku, &catalog[sku]);
        for &length_mm in lengths {
            plank.push_piece(
                &PieceUnit {
                    width_mm: plank.width_mm,
                    length_mm,
                    comment: None,
                },
                3,
            );
        }
        plank
    }

    #[test]
    fn test_build_purchase_plan_merges_same_entry() {
        let catalog = vec![
            PlankSku::new(100, 1000, 1000).with_article_nr("A-1"),
            PlankSku::new(200, 2000, 2500),
        ];
        let planks = vec![
            plank_from(&catalog, 0, &[400]),
            plank_from(&catalog, 0, &[400, 400]),
            plank_from(&catalog, 1, &[1800]),
        ];

        let items = build_purchase_plan(&catalog, &planks);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].article_nr.as_deref(), Some("A-1"));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].subtotal_cents, 2000);
        assert_eq!(items[1].quantity, 1);
        assert_eq!(items[1].subtotal_cents, 2500);
        assert_eq!(total_cents(&items), 4500);
    }

    #[test]
    fn test_build_purchase_plan_splits_differing_price() {
        // Same dimensions, different price: two purchase lines.
        let catalog = vec![
            PlankSku::new(100, 1000, 1000),
            PlankSku::new(100, 1000, 1200),
        ];
        let planks = vec![
            plank_from(&catalog, 0, &[400]),
            plank_from(&catalog, 1, &[400]),
        ];

        let items = build_purchase_plan(&catalog, &planks);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_build_purchase_plan_empty() {
        let catalog = vec![PlankSku::new(100, 1000, 1000)];
        assert!(build_purchase_plan(&catalog, &[]).is_empty());
    }
}
