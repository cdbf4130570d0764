//! End-to-end tests for the purchase optimizer.
//!
//! These tests exercise the full pipeline (validation, width decomposition,
//! search, aggregation) and verify the optimality guarantee against an
//! exhaustive brute-force search on small fixtures.

use cutplan_core::export::{cut_plan_markdown, purchase_plan_markdown};
use cutplan_core::{
    plan_project, plan_purchase, Plank, PlankSku, PlannerSettings, Project, RequiredPiece,
};

fn settings(kerf: u64) -> PlannerSettings {
    PlannerSettings {
        saw_kerf_mm: kerf,
        ..Default::default()
    }
}

// ==================== Brute-force reference ====================

/// Exhaustively enumerate every assignment of `lengths` (single width) onto
/// purchased planks and return the minimum achievable price. Mirrors the
/// engine's fit rule: a piece fits when the remaining length covers it, and
/// the kerf behind a piece is clamped to the material left.
fn brute_force_min(catalog: &[PlankSku], lengths: &[u64], kerf: u64) -> Option<u64> {
    let mut planks: Vec<(usize, u64)> = Vec::new();
    let mut counts: Vec<Option<u32>> = catalog.iter().map(|sku| sku.available).collect();
    let mut best = None;
    explore(
        catalog,
        lengths,
        kerf,
        &mut planks,
        &mut counts,
        0,
        &mut best,
    );
    best
}

fn explore(
    catalog: &[PlankSku],
    lengths: &[u64],
    kerf: u64,
    planks: &mut Vec<(usize, u64)>,
    counts: &mut Vec<Option<u32>>,
    price: u64,
    best: &mut Option<u64>,
) {
    if let Some(b) = *best {
        if price >= b {
            return;
        }
    }
    let Some((&piece, rest)) = lengths.split_first() else {
        *best = Some(price);
        return;
    };

    // Reuse an open plank.
    for i in 0..planks.len() {
        let (_, remaining) = planks[i];
        if remaining >= piece {
            let consumed = piece + kerf.min(remaining - piece);
            planks[i].1 = remaining - consumed;
            explore(catalog, rest, kerf, planks, counts, price, best);
            planks[i].1 = remaining;
        }
    }

    // Buy a new plank.
    for (sku, entry) in catalog.iter().enumerate() {
        let available = match counts[sku] {
            None => true,
            Some(n) => n > 0,
        };
        if !available || entry.length_mm < piece {
            continue;
        }
        if let Some(n) = &mut counts[sku] {
            *n -= 1;
        }
        let consumed = piece + kerf.min(entry.length_mm - piece);
        planks.push((sku, entry.length_mm - consumed));
        explore(
            catalog,
            rest,
            kerf,
            planks,
            counts,
            price + entry.price_cents,
            best,
        );
        planks.pop();
        if let Some(n) = &mut counts[sku] {
            *n += 1;
        }
    }
}

fn assert_plank_invariants(catalog: &[PlankSku], planks: &[Plank]) {
    for plank in planks {
        let sku = &catalog[plank.sku];
        assert_eq!(plank.width_mm, sku.width_mm);
        assert_eq!(plank.length_mm, sku.length_mm);

        let used: u64 = plank.pieces.iter().map(|p| p.length_mm + p.kerf_mm).sum();
        assert!(
            used <= sku.length_mm,
            "plank overfilled: {} mm used of {} mm",
            used,
            sku.length_mm
        );

        let mut expected_offset = 0;
        for piece in &plank.pieces {
            assert_eq!(piece.width_mm, plank.width_mm, "width mixed on one plank");
            assert_eq!(piece.offset_mm, expected_offset);
            expected_offset += piece.length_mm + piece.kerf_mm;
        }
    }
}

// ==================== Optimality vs. brute force ====================

#[test]
fn test_matches_brute_force_on_mixed_lengths() {
    let catalog = vec![
        PlankSku::new(100, 1000, 1000),
        PlankSku::new(100, 1500, 1300),
        PlankSku::new(100, 2500, 2100),
    ];
    let lengths = [900, 700, 400, 400, 300, 200];
    let required: Vec<RequiredPiece> = lengths
        .iter()
        .map(|&length_mm| RequiredPiece::new(100, length_mm, 1))
        .collect();

    let result = plan_purchase(&catalog, &required, &settings(4));
    assert!(result.is_satisfied());
    assert_plank_invariants(&catalog, &result.planks);

    let expected = brute_force_min(&catalog, &lengths, 4).expect("satisfiable");
    assert_eq!(result.total_cents(&catalog), expected);
}

#[test]
fn test_matches_brute_force_with_quantity_cap() {
    let catalog = vec![
        PlankSku::new(100, 1000, 700).with_available(1),
        PlankSku::new(100, 1200, 900),
    ];
    let lengths = [800, 800, 500];
    let required: Vec<RequiredPiece> = lengths
        .iter()
        .map(|&length_mm| RequiredPiece::new(100, length_mm, 1))
        .collect();

    let result = plan_purchase(&catalog, &required, &settings(5));
    assert!(result.is_satisfied());
    assert_plank_invariants(&catalog, &result.planks);

    let expected = brute_force_min(&catalog, &lengths, 5).expect("satisfiable");
    assert_eq!(result.total_cents(&catalog), expected);
}

#[test]
fn test_matches_brute_force_when_leftover_equals_last_piece() {
    // The 2000 mm plank leaves exactly 500 mm after the first piece, which
    // must still be recognized as usable for the final 500 mm piece.
    let catalog = vec![
        PlankSku::new(100, 1500, 1000),
        PlankSku::new(100, 2000, 1200),
    ];
    let lengths = [1500, 500];
    let required: Vec<RequiredPiece> = lengths
        .iter()
        .map(|&length_mm| RequiredPiece::new(100, length_mm, 1))
        .collect();

    let result = plan_purchase(&catalog, &required, &settings(0));
    assert_eq!(result.total_cents(&catalog), 1200);
    assert_eq!(
        brute_force_min(&catalog, &lengths, 0),
        Some(1200),
        "brute force agrees"
    );
}

// ==================== Tie-break and supply properties ====================

#[test]
fn test_equal_price_solution_uses_fewer_planks() {
    // Two 500 mm pieces: one 1000 mm plank at 1000 cents ties with two
    // 500 mm planks at 500 cents each; the single plank must win.
    let catalog = vec![
        PlankSku::new(100, 1000, 1000),
        PlankSku::new(100, 500, 500),
    ];
    let required = vec![RequiredPiece::new(100, 500, 2)];

    let result = plan_purchase(&catalog, &required, &settings(0));
    assert_eq!(result.total_cents(&catalog), 1000);
    assert_eq!(result.planks.len(), 1);
}

#[test]
fn test_unlimited_entry_covers_demand_after_cap_runs_out() {
    let catalog = vec![
        PlankSku::new(100, 1000, 1000)
            .with_article_nr("CAP")
            .with_available(1),
        PlankSku::new(100, 1000, 1000).with_article_nr("UNL"),
    ];
    let required = vec![RequiredPiece::new(100, 900, 3)];

    let result = plan_purchase(&catalog, &required, &settings(5));
    assert!(result.is_satisfied());
    assert_eq!(result.planks.len(), 3);
    assert_eq!(result.total_cents(&catalog), 3000);
}

// ==================== Full pipeline ====================

#[test]
fn test_plan_project_happy_path() {
    let project = Project::new(
        vec![
            PlankSku::new(100, 2000, 2000).with_article_nr("OAK-100"),
            PlankSku::new(100, 1000, 1100),
            PlankSku::new(200, 2000, 3000).with_article_nr("OAK-200"),
        ],
        vec![
            RequiredPiece::new(100, 800, 2).with_comment("shelf"),
            RequiredPiece::new(100, 350, 1),
            RequiredPiece::new(200, 1500, 1),
        ],
        settings(5),
    );

    let report = plan_project(&project).expect("valid input");

    assert!(report.errors.is_empty());
    assert_eq!(report.planks.len(), 2);
    assert_eq!(report.total_cents, 5000);
    assert_eq!(report.purchase_plan.len(), 2);
    assert_plank_invariants(&project.catalog, &report.planks);

    // Every piece got assigned, comments included.
    let assigned: usize = report.planks.iter().map(|p| p.pieces.len()).sum();
    assert_eq!(assigned, 4);
    assert!(report
        .planks
        .iter()
        .flat_map(|p| &p.pieces)
        .any(|piece| piece.comment.as_deref() == Some("shelf")));

    // Rendering sanity.
    let unit = project.settings.unit_system;
    let purchase = purchase_plan_markdown(&report.purchase_plan, unit, "€");
    assert!(purchase.contains("**Total: €50.00**"));
    assert!(purchase.contains("OAK-200"));
    let cuts = cut_plan_markdown(&report.planks, &project.required_pieces, unit);
    assert!(cuts.contains("Plank 1:"));
}

#[test]
fn test_plan_project_partial_failure() {
    let project = Project::new(
        vec![PlankSku::new(100, 1000, 1000)],
        vec![
            RequiredPiece::new(100, 400, 2),
            RequiredPiece::new(250, 500, 1),
        ],
        settings(5),
    );

    let report = plan_project(&project).expect("valid input");

    assert_eq!(report.planks.len(), 1);
    assert_eq!(report.planks[0].pieces.len(), 2);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("250 mm"));
}

#[test]
fn test_plan_project_rejects_invalid_input() {
    let project = Project::new(
        vec![PlankSku::new(0, 1000, 1000)],
        vec![RequiredPiece::new(100, 400, 1)],
        settings(5),
    );

    assert!(plan_project(&project).is_err());
}

#[test]
fn test_scenario_two_pieces_one_plank_offsets() {
    // Catalog 100 x 1000 at 10.00, two 400 mm pieces, 5 mm kerf: one
    // plank, offsets 0 and 405, total 10.00.
    let catalog = vec![PlankSku::new(100, 1000, 1000)];
    let required = vec![RequiredPiece::new(100, 400, 2)];

    let result = plan_purchase(&catalog, &required, &settings(5));

    assert!(result.is_satisfied());
    assert_eq!(result.planks.len(), 1);
    let offsets: Vec<u64> = result.planks[0]
        .pieces
        .iter()
        .map(|p| p.offset_mm)
        .collect();
    assert_eq!(offsets, vec![0, 405]);
    assert_eq!(result.total_cents(&catalog), 1000);
}

#[test]
fn test_larger_demand_stays_tractable() {
    // A dozen pieces across three widths; mostly a smoke test that the
    // decomposition keeps each class's search small.
    let catalog = vec![
        PlankSku::new(100, 2400, 1900),
        PlankSku::new(100, 1200, 1000),
        PlankSku::new(150, 2400, 2400),
        PlankSku::new(200, 2400, 3000),
    ];
    let required = vec![
        RequiredPiece::new(100, 600, 4),
        RequiredPiece::new(100, 450, 2),
        RequiredPiece::new(150, 1100, 3),
        RequiredPiece::new(200, 800, 3),
    ];

    let result = plan_purchase(&catalog, &required, &settings(3));

    assert!(result.is_satisfied());
    assert_plank_invariants(&catalog, &result.planks);
    let assigned: usize = result.planks.iter().map(|p| p.pieces.len()).sum();
    assert_eq!(assigned, 12);
    assert!(
        result.stats.popped < 20_000,
        "expected a bounded search, popped {} states",
        result.stats.popped
    );
}
