//! Markdown rendering of cut plans and purchase plans.

use std::collections::BTreeMap;

use crate::config::{format_currency, format_length, Unit};
use crate::model::{CutPiece, Plank, RequiredPiece};
use crate::plan::PurchaseItem;

/// A row of checkbox glyphs, grouped in fives for easy counting.
fn rects(count: u32) -> String {
    let full = (count / 5) as usize;
    let rest = (count % 5) as usize;
    let mut groups: Vec<String> = (0..full).map(|_| vec!["□"; 5].join(" ")).collect();
    if rest > 0 {
        groups.push(vec!["□"; rest].join(" "));
    }
    groups.join("  ")
}

fn fmt_piece(length_mm: u64, width_mm: u64, unit: Unit) -> String {
    format!(
        "{} x {}",
        format_length(length_mm, unit),
        format_length(width_mm, unit)
    )
}

/// Render the cut plan: each plank with its assigned pieces, then a tally
/// of unique piece sizes.
pub fn cut_plan_markdown(planks: &[Plank], required: &[RequiredPiece], unit: Unit) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Cut Plan".into());
    lines.push(String::new());

    lines.push("## Planks and assigned pieces".into());
    let mut sorted: Vec<&Plank> = planks.iter().collect();
    sorted.sort_by(|a, b| b.length_mm.cmp(&a.length_mm));
    for (idx, plank) in sorted.iter().enumerate() {
        lines.push(format!(
            "Plank {}: {}",
            idx + 1,
            fmt_piece(plank.length_mm, plank.width_mm, unit)
        ));
        let mut pieces: Vec<&CutPiece> = plank.pieces.iter().collect();
        pieces.sort_by(|a, b| {
            b.width_mm
                .cmp(&a.width_mm)
                .then(b.length_mm.cmp(&a.length_mm))
        });
        for piece in pieces {
            lines.push(format!(
                "- {} {}",
                fmt_piece(piece.length_mm, piece.width_mm, unit),
                rects(1)
            ));
        }
        lines.push(String::new());
    }

    lines.push("## Unique pieces with totals".into());
    let mut grouped: BTreeMap<(u64, u64), u32> = BTreeMap::new();
    for piece in required {
        *grouped
            .entry((piece.width_mm, piece.length_mm))
            .or_default() += piece.quantity;
    }
    // Width descending, then length descending.
    for ((width_mm, length_mm), count) in grouped.iter().rev() {
        lines.push(format!(
            "{} x {} {}",
            count,
            fmt_piece(*length_mm, *width_mm, unit),
            rects(*count)
        ));
    }

    lines.join("\n")
}

/// Render the purchase plan with per-row subtotals and a grand total.
pub fn purchase_plan_markdown(items: &[PurchaseItem], unit: Unit, currency: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Purchase Plan".into());
    lines.push(String::new());

    if items.is_empty() {
        lines.push("_No items to purchase._".into());
        return lines.join("\n");
    }

    let mut sorted: Vec<&PurchaseItem> = items.iter().collect();
    sorted.sort_by(|a, b| {
        b.width_mm
            .cmp(&a.width_mm)
            .then(b.length_mm.cmp(&a.length_mm))
    });

    let mut total = 0u64;
    for item in sorted {
        total += item.subtotal_cents;
        let article = item
            .article_nr
            .as_deref()
            .map(|nr| format!(" • {nr}"))
            .unwrap_or_default();
        lines.push(format!(
            "- {} × {} • {} each • subtotal {}{}",
            item.quantity,
            fmt_piece(item.length_mm, item.width_mm, unit),
            format_currency(item.unit_price_cents, currency),
            format_currency(item.subtotal_cents, currency),
            article
        ));
    }

    lines.push(String::new());
    lines.push(format!("**Total: {}**", format_currency(total, currency)));

    lines.join("\n")
}
