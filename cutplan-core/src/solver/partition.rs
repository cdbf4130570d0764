//! Width decomposition, feasibility pre-checks and result merging.

use std::collections::BTreeMap;

use crate::config::PlannerSettings;
use crate::error::WidthFailure;
use crate::inventory::Inventory;
use crate::model::{expand_units, PieceUnit, Plank, PlankSku, RequiredPiece};

use super::driver::{run_search, SearchStats};

/// Outcome of one full optimization call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanResult {
    /// Every plank to purchase, in width order, each carrying its ordered
    /// piece assignments.
    pub planks: Vec<Plank>,
    /// One entry per width class that could not be satisfied.
    pub failures: Vec<WidthFailure>,
    /// Merged search counters across all width classes.
    pub stats: SearchStats,
}

impl PlanResult {
    /// Total purchase price of all planks, in cents.
    pub fn total_cents(&self, catalog: &[PlankSku]) -> u64 {
        self.planks.iter().map(|p| catalog[p.sku].price_cents).sum()
    }

    /// Failure strings in width order, for presentation layers.
    pub fn error_messages(&self) -> Vec<String> {
        self.failures.iter().map(ToString::to_string).collect()
    }

    /// Whether every required piece was assigned.
    pub fn is_satisfied(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One independent per-width subproblem.
struct WidthClass {
    width_mm: u64,
    sku_pool: Vec<usize>,
    units: Vec<PieceUnit>,
}

/// Compute the cheapest purchase covering `required` from `catalog`.
///
/// No transition ever mixes widths, so the demand splits into independent
/// width classes. Each class is checked for basic feasibility, then solved
/// by the uniform-cost driver with its own inventory snapshot. Failures are
/// collected per class and never abort the remaining classes.
///
/// Input is assumed validated (see [`crate::validation`]): dimensions and
/// quantities must be positive.
pub fn plan_purchase(
    catalog: &[PlankSku],
    required: &[RequiredPiece],
    settings: &PlannerSettings,
) -> PlanResult {
    let mut result = PlanResult::default();

    for class in split_by_width(catalog, required) {
        if let Err(failure) = check_feasible(catalog, &class) {
            tracing::debug!("width {} mm: {}", class.width_mm, failure);
            result.failures.push(failure);
            continue;
        }

        let mut stats = SearchStats::default();
        let inventory = Inventory::from_catalog(catalog);
        match run_search(
            catalog,
            &class.sku_pool,
            &class.units,
            settings.saw_kerf_mm,
            inventory,
            &mut stats,
        ) {
            Some(planks) => result.planks.extend(planks),
            None => result.failures.push(WidthFailure::SupplyExhausted {
                width_mm: class.width_mm,
            }),
        }
        result.stats.merge(&stats);
    }

    result
}

/// Split the demand into per-width subproblems, widths ascending.
fn split_by_width(catalog: &[PlankSku], required: &[RequiredPiece]) -> Vec<WidthClass> {
    let mut by_width: BTreeMap<u64, Vec<PieceUnit>> = BTreeMap::new();
    for piece in expand_units(required) {
        by_width.entry(piece.width_mm).or_default().push(piece);
    }

    by_width
        .into_iter()
        .map(|(width_mm, mut units)| {
            // Longest-first ordering is load-bearing: the dedup signature
            // measures leftovers against the shortest still-required
            // length, which must sit at the tail of the sequence.
            units.sort_by(|a, b| b.length_mm.cmp(&a.length_mm));
            let sku_pool = catalog
                .iter()
                .enumerate()
                .filter(|(_, sku)| sku.width_mm == width_mm)
                .map(|(idx, _)| idx)
                .collect();
            WidthClass {
                width_mm,
                sku_pool,
                units,
            }
        })
        .collect()
}

/// Reject a width class that cannot possibly be satisfied before paying for
/// a search: either no stock of that width exists, or none of it is long
/// enough for the longest piece.
fn check_feasible(catalog: &[PlankSku], class: &WidthClass) -> Result<(), WidthFailure> {
    if class.sku_pool.is_empty() {
        return Err(WidthFailure::CatalogGap {
            width_mm: class.width_mm,
        });
    }

    // Units are length-descending, so the longest piece is at the head.
    let required_mm = class.units[0].length_mm;
    let longest_mm = class
        .sku_pool
        .iter()
        .map(|&idx| catalog[idx].length_mm)
        .max()
        .unwrap_or(0);
    if longest_mm < required_mm {
        return Err(WidthFailure::LengthGap {
            width_mm: class.width_mm,
            required_mm,
            longest_mm,
        });
    }

    Ok(())
}
