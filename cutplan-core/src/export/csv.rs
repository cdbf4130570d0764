//! CSV import and export for catalog, demand and plan tables.
//!
//! Import tolerates decimal commas ("12,5") since supplier price lists
//! frequently use them. All columns must be present; empty cells mean
//! "absent" for the optional ones.

use std::io::{Read, Write};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::Deserialize;

use crate::error::{PlanError, Result};
use crate::model::{Plank, PlankSku, RequiredPiece};
use crate::plan::PurchaseItem;

/// Parse a number that may use a decimal comma ("12,5" → 12.5).
pub fn parse_flexible_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn parse_mm(raw: &str, row: usize, field: &str) -> Result<u64> {
    let value = parse_flexible_number(raw).ok_or_else(|| PlanError::InvalidRow {
        row,
        message: format!("{field} is not a number: '{raw}'"),
    })?;
    if value < 0.0 {
        return Err(PlanError::InvalidRow {
            row,
            message: format!("{field} must not be negative"),
        });
    }
    Ok(value.round() as u64)
}

fn parse_cents(raw: &str, row: usize, field: &str) -> Result<u64> {
    let value = parse_flexible_number(raw).ok_or_else(|| PlanError::InvalidRow {
        row,
        message: format!("{field} is not a number: '{raw}'"),
    })?;
    if value < 0.0 {
        return Err(PlanError::InvalidRow {
            row,
            message: format!("{field} must not be negative"),
        });
    }
    Ok((value * 100.0).round() as u64)
}

fn parse_count(raw: &str, row: usize, field: &str) -> Result<u32> {
    let value = parse_flexible_number(raw).ok_or_else(|| PlanError::InvalidRow {
        row,
        message: format!("{field} is not a number: '{raw}'"),
    })?;
    if value < 0.0 || value.fract() != 0.0 {
        return Err(PlanError::InvalidRow {
            row,
            message: format!("{field} must be a non-negative integer"),
        });
    }
    Ok(value as u32)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    width_mm: String,
    length_mm: String,
    price: String,
    #[serde(default)]
    article_nr: String,
    #[serde(default)]
    available: String,
}

/// Read catalog rows from CSV with headers
/// `width_mm,length_mm,price,article_nr,available`.
pub fn read_catalog_csv<R: Read>(reader: R) -> Result<Vec<PlankSku>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut catalog = Vec::new();

    for (idx, record) in rdr.deserialize::<CatalogRow>().enumerate() {
        // Header occupies the first line of the file.
        let row = idx + 2;
        let record = record?;
        let mut sku = PlankSku::new(
            parse_mm(&record.width_mm, row, "width_mm")?,
            parse_mm(&record.length_mm, row, "length_mm")?,
            parse_cents(&record.price, row, "price")?,
        );
        if !record.article_nr.is_empty() {
            sku.article_nr = Some(record.article_nr);
        }
        if !record.available.is_empty() {
            sku.available = Some(parse_count(&record.available, row, "available")?);
        }
        catalog.push(sku);
    }

    Ok(catalog)
}

#[derive(Debug, Deserialize)]
struct PieceRow {
    width_mm: String,
    length_mm: String,
    quantity: String,
    #[serde(default)]
    comment: String,
}

/// Read demand rows from CSV with headers
/// `width_mm,length_mm,quantity,comment`.
pub fn read_pieces_csv<R: Read>(reader: R) -> Result<Vec<RequiredPiece>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut pieces = Vec::new();

    for (idx, record) in rdr.deserialize::<PieceRow>().enumerate() {
        let row = idx + 2;
        let record = record?;
        let mut piece = RequiredPiece::new(
            parse_mm(&record.width_mm, row, "width_mm")?,
            parse_mm(&record.length_mm, row, "length_mm")?,
            parse_count(&record.quantity, row, "quantity")?,
        );
        if !record.comment.is_empty() {
            piece.comment = Some(record.comment);
        }
        pieces.push(piece);
    }

    Ok(pieces)
}

fn price_string(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// Write purchase rows as CSV.
pub fn write_purchase_csv<W: Write>(writer: W, items: &[PurchaseItem]) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record([
        "article_nr",
        "width_mm",
        "length_mm",
        "unit_price",
        "quantity",
        "subtotal",
    ])?;
    for item in items {
        wtr.write_record([
            item.article_nr.clone().unwrap_or_default(),
            item.width_mm.to_string(),
            item.length_mm.to_string(),
            price_string(item.unit_price_cents),
            item.quantity.to_string(),
            price_string(item.subtotal_cents),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write every plank's piece assignments as CSV, one row per piece.
pub fn write_cut_list_csv<W: Write>(writer: W, planks: &[Plank]) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record([
        "plank",
        "plank_width_mm",
        "plank_length_mm",
        "piece_length_mm",
        "offset_mm",
        "kerf_mm",
        "comment",
    ])?;
    for (idx, plank) in planks.iter().enumerate() {
        for piece in &plank.pieces {
            wtr.write_record([
                (idx + 1).to_string(),
                plank.width_mm.to_string(),
                plank.length_mm.to_string(),
                piece.length_mm.to_string(),
                piece.offset_mm.to_string(),
                piece.kerf_mm.to_string(),
                piece.comment.clone().unwrap_or_default(),
            ])?;
        }
    }
    wtr.flush()?;
    Ok(())
}
