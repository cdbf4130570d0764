//! Uniform-cost search driver with duplicate-state pruning.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::Serialize;

use crate::inventory::Inventory;
use crate::model::{PieceUnit, Plank, PlankSku};

use super::state::SearchState;

/// Search-size counters, grouped the way the engine deduplicates.
///
/// Purely observational: the counters never influence the search. Tests use
/// them to assert that duplicate-state pruning keeps the explored space
/// bounded on permutation-heavy inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States popped from the priority queue.
    pub popped: u64,
    /// Child states pushed onto the queue.
    pub pushed: u64,
    /// States discarded because their signature was already expanded.
    pub duplicates: u64,
    /// Duplicates grouped by remaining-piece signature (the cursor).
    pub duplicates_by_cursor: HashMap<usize, u64>,
}

impl SearchStats {
    /// Fold another width class's counters into this one.
    pub fn merge(&mut self, other: &SearchStats) {
        self.popped += other.popped;
        self.pushed += other.pushed;
        self.duplicates += other.duplicates;
        for (cursor, count) in &other.duplicates_by_cursor {
            *self.duplicates_by_cursor.entry(*cursor).or_default() += count;
        }
    }
}

/// Dedup key for a popped state: how far the unit sequence has progressed,
/// and which usable leftovers the committed planks still offer.
///
/// Leftovers shorter than the shortest still-required length can never
/// receive another piece, so they carry no information about the branch's
/// future and are collapsed out of the signature entirely. This relies on
/// the unit sequence being length-descending: the shortest remaining length
/// is then always the final element of the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Signature {
    cursor: usize,
    leftovers: Vec<u64>,
}

fn signature(state: &SearchState, units: &[PieceUnit]) -> Signature {
    let shortest = units
        .last()
        .expect("signature of an empty unit sequence")
        .length_mm;
    let mut leftovers: Vec<u64> = state
        .planks
        .iter()
        .map(Plank::remaining_mm)
        .filter(|&rem| rem >= shortest)
        .collect();
    leftovers.sort_unstable();
    Signature {
        cursor: state.cursor,
        leftovers,
    }
}

/// Queue entry ordered so the binary max-heap pops the cheapest state
/// first, breaking price ties toward fewer committed planks.
struct OpenNode {
    state: SearchState,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .state
            .price_cents
            .cmp(&self.state.price_cents)
            .then_with(|| other.state.planks.len().cmp(&self.state.planks.len()))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

/// Run the per-width uniform-cost search to the first completed state.
///
/// Purchase edges cost the entry price, reuse edges are free, and no edge
/// has negative weight, so the first completed state popped from the
/// cost-ordered queue is the cheapest plan; among equally cheap plans the
/// count tie-break makes it the one with the fewest planks. Returns `None`
/// when the queue drains without completing the sequence, which happens
/// when quantity caps make the class unsatisfiable.
pub(crate) fn run_search(
    catalog: &[PlankSku],
    sku_pool: &[usize],
    units: &[PieceUnit],
    kerf_mm: u64,
    inventory: Inventory,
    stats: &mut SearchStats,
) -> Option<Vec<Plank>> {
    let mut open = BinaryHeap::new();
    let mut visited: HashSet<Signature> = HashSet::new();

    open.push(OpenNode {
        state: SearchState::root(inventory),
    });
    stats.pushed += 1;

    while let Some(OpenNode { state }) = open.pop() {
        stats.popped += 1;

        if state.is_complete(units) {
            tracing::debug!(
                "search completed: {} planks, {} popped, {} duplicates",
                state.planks.len(),
                stats.popped,
                stats.duplicates
            );
            return Some(state.planks);
        }

        let sig = signature(&state, units);
        if !visited.insert(sig) {
            stats.duplicates += 1;
            *stats.duplicates_by_cursor.entry(state.cursor).or_default() += 1;
            continue;
        }

        state.expand(catalog, sku_pool, units, kerf_mm, |child| {
            open.push(OpenNode { state: child });
            stats.pushed += 1;
        });
    }

    tracing::debug!(
        "search exhausted after {} popped states without a solution",
        stats.popped
    );
    None
}
