//! Row normalization: raw sheet rows into canonical catalog entries
//!
//! The sheet is the live source of truth for the second-hand inventory, but
//! it is maintained by hand: rows go stale, cells go missing, and price
//! cells carry anything from `450` to `U$D 1.050` to `Consultar`. Every rule
//! here is applied per row and a disqualified row is skipped on its own —
//! one bad row never aborts the batch.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use regex::Regex;

use crate::catalog::{CatalogEntry, RowOrigin, USED_CATEGORY};

use super::columns::ColumnMap;
use super::csv::split_line;

/// Flat markup added to every sheet price, in USD.
pub const PRICE_MARKUP_USD: f64 = 50.0;

/// Substring a status cell must contain (case-folded) for the row to count
/// as sellable.
const AVAILABLE_MARKER: &str = "disponible";

/// Rows priced with this literal are listed even without a numeric price.
const CONSULT_MARKER: &str = "Consultar";

const FALLBACK_DESCRIPTION: &str = "Usado Seleccionado";
const USED_WARRANTY: &str = "1 Mes";

/// Shared image for sheet-sourced entries; the sheet carries no per-item
/// imagery.
pub const FALLBACK_IMAGE: &str =
    "https://jecxqmertgnogjetodao.supabase.co/storage/v1/object/public/LXT2/lxtlogo.png";

/// Parse the full CSV export (header row first) into catalog entries.
///
/// Rows with a status column resolved must read as available; rows without
/// a name or a usable price are dropped. The fixed markup is applied
/// unconditionally, so a `Consultar` row with no numeric price is listed at
/// exactly the markup — the sheet owners price those by hand on pickup.
pub fn parse_catalog(csv_text: &str) -> Result<Vec<CatalogEntry>> {
    let brand_prefix =
        Regex::new(r"(?i)^iphone\s+").context("compiling brand prefix pattern")?;

    let mut lines = csv_text.lines();
    let Some(header_line) = lines.next() else {
        warn!("inventory sheet export is empty");
        return Ok(Vec::new());
    };

    let headers = split_line(header_line);
    let columns = ColumnMap::resolve(&headers);
    debug!("resolved sheet columns: {columns:?}");

    let mut entries = Vec::new();

    for (offset, line) in lines.enumerate() {
        // Header is line 0, so the first data row sits at line index 1,
        // which is also how the sheet-row write-back addresses it.
        let line_index = offset + 1;

        if line.trim().is_empty() {
            continue;
        }
        let row = split_line(line);

        // Availability gate. No status column means everything is for sale.
        if columns.status.is_some() {
            let status = columns.cell(&row, columns.status).to_lowercase();
            if !status.contains(AVAILABLE_MARKER) {
                debug!("line {line_index}: skipped, status {status:?}");
                continue;
            }
        }

        let raw_name = columns.cell(&row, columns.name);
        if raw_name.is_empty() {
            debug!("line {line_index}: skipped, no name");
            continue;
        }

        let price_text = columns.cell(&row, columns.price);
        let numeric: String = price_text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let parsed = numeric.parse::<f64>().unwrap_or(0.0);

        if parsed <= 0.0 && !price_text.contains(CONSULT_MARKER) {
            debug!("line {line_index}: skipped, unusable price {price_text:?}");
            continue;
        }
        let price_usd = parsed + PRICE_MARKUP_USD;

        let battery = columns.cell(&row, columns.battery);
        let condition = columns.cell(&row, columns.condition);
        let color = columns.cell(&row, columns.color);
        let notes = columns.cell(&row, columns.notes);
        let storage = columns.cell(&row, columns.storage);

        let origin = RowOrigin::new(line_index, raw_name);

        entries.push(CatalogEntry {
            id: origin.encode(),
            name: display_name(&brand_prefix, raw_name, storage),
            price_usd,
            category: USED_CATEGORY.to_string(),
            description: description(condition, notes),
            image: FALLBACK_IMAGE.to_string(),
            in_stock: true,
            battery_health: battery_label(battery),
            warranty: Some(USED_WARRANTY.to_string()),
            condition: (!condition.is_empty()).then(|| condition.to_string()),
            colors: if color.is_empty() {
                Vec::new()
            } else {
                vec![color.to_string()]
            },
            origin: Some(origin),
        });
    }

    info!("loaded {} used items from sheet", entries.len());
    Ok(entries)
}

/// Display name: `iPhone {model} {storage}Gb`, stripping a leading brand
/// token from the raw name and skipping the capacity suffix when the sheet
/// value already carries one.
fn display_name(brand_prefix: &Regex, raw_name: &str, storage: &str) -> String {
    let model = brand_prefix.replace(raw_name, "");
    let storage_suffix = if storage.to_lowercase().contains("gb") {
        storage.to_string()
    } else {
        format!("{storage}Gb")
    };
    format!("iPhone {} {}", model.trim(), storage_suffix)
        .trim()
        .to_string()
}

/// Condition and free-text notes joined, or the stock fallback.
fn description(condition: &str, notes: &str) -> String {
    let parts: Vec<&str> = [condition, notes]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        FALLBACK_DESCRIPTION.to_string()
    } else {
        parts.join(" - ")
    }
}

/// Battery health with a guaranteed `%` suffix, unset when the cell is
/// empty.
fn battery_label(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    Some(if raw.contains('%') {
        raw.to_string()
    } else {
        format!("{raw}%")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Modelo,Capacidad,Precio USD,Bateria,Condicion,Estado,Color,Detalles";

    fn sheet(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_sold_row_is_excluded() {
        let entries = parse_catalog(&sheet(&[
            "iPhone 13,128,450,89,Impecable,Vendido,Negro,",
            "iPhone 15,256,700,95,Impecable,Disponible,Azul,",
        ]))
        .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "iPhone 15 256Gb");
    }

    #[test]
    fn test_markup_is_applied_to_parsed_price() {
        let entries =
            parse_catalog(&sheet(&["iPhone 13,128,450,89,,Disponible,,"])).unwrap();
        assert_eq!(entries[0].price_usd, 500.0);
    }

    #[test]
    fn test_consultar_row_is_listed_at_markup_alone() {
        let entries =
            parse_catalog(&sheet(&["iPhone 13,128,Consultar,89,,Disponible,,"])).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].price_usd, PRICE_MARKUP_USD);
    }

    #[test]
    fn test_zero_price_without_consultar_is_skipped() {
        let entries = parse_catalog(&sheet(&["iPhone 13,128,0,89,,Disponible,,"])).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_price_text_is_stripped_to_digits_and_dot() {
        let entries =
            parse_catalog(&sheet(&["iPhone 13,128,U$D 450,89,,Disponible,,"])).unwrap();
        assert_eq!(entries[0].price_usd, 500.0);
    }

    #[test]
    fn test_second_data_row_decodes_to_sheet_row_two() {
        let entries = parse_catalog(&sheet(&[
            "iPhone 13,128,450,,,Disponible,,",
            "iPhone 15,256,700,,,Disponible,,",
        ]))
        .unwrap();

        let origin = RowOrigin::parse(&entries[1].id).unwrap();
        assert_eq!(origin.line_index, 2);
        assert_eq!(origin.sheet_row(), 3);

        // And the first data row is sheet row 2.
        let first = RowOrigin::parse(&entries[0].id).unwrap();
        assert_eq!(first.sheet_row(), 2);
    }

    #[test]
    fn test_blank_lines_and_nameless_rows_are_skipped() {
        let entries = parse_catalog(&sheet(&[
            "",
            ",128,450,,,Disponible,,",
            "iPhone 13,128,450,,,Disponible,,",
        ]))
        .unwrap();

        assert_eq!(entries.len(), 1);
        // Skipped lines still advance the line index.
        assert_eq!(entries[0].origin.as_ref().unwrap().line_index, 3);
    }

    #[test]
    fn test_missing_status_column_treats_all_rows_as_available() {
        let entries =
            parse_catalog("Modelo,Precio\niPhone 13,450\niPhone 15,700").unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_display_name_strips_brand_and_appends_capacity() {
        let entries =
            parse_catalog(&sheet(&["iphone 13 Pro,256,800,,,Disponible,,"])).unwrap();
        assert_eq!(entries[0].name, "iPhone 13 Pro 256Gb");
    }

    #[test]
    fn test_capacity_suffix_not_duplicated() {
        let entries =
            parse_catalog(&sheet(&["iPhone 13,128GB,450,,,Disponible,,"])).unwrap();
        assert_eq!(entries[0].name, "iPhone 13 128GB");
    }

    #[test]
    fn test_description_joins_condition_and_notes() {
        let entries = parse_catalog(&sheet(&[
            "iPhone 13,128,450,,Impecable,Disponible,,Caja original",
        ]))
        .unwrap();
        assert_eq!(entries[0].description, "Impecable - Caja original");
    }

    #[test]
    fn test_description_falls_back_when_both_empty() {
        let entries = parse_catalog(&sheet(&["iPhone 13,128,450,,,Disponible,,"])).unwrap();
        assert_eq!(entries[0].description, "Usado Seleccionado");
    }

    #[test]
    fn test_battery_gains_percent_suffix() {
        let entries = parse_catalog(&sheet(&[
            "iPhone 13,128,450,89,,Disponible,,",
            "iPhone 15,256,700,95%,,Disponible,,",
            "iPhone 12,64,300,,,Disponible,,",
        ]))
        .unwrap();

        assert_eq!(entries[0].battery_health.as_deref(), Some("89%"));
        assert_eq!(entries[1].battery_health.as_deref(), Some("95%"));
        assert_eq!(entries[2].battery_health, None);
    }

    #[test]
    fn test_quoted_name_with_comma_survives() {
        let entries = parse_catalog(&sheet(&[
            "\"iPhone 13, azul\",128,450,,,Disponible,,",
        ]))
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "iPhone 13, azul 128Gb");
    }

    #[test]
    fn test_fixed_fields_for_sheet_entries() {
        let entries = parse_catalog(&sheet(&["iPhone 13,128,450,,,Disponible,Rojo,"]))
            .unwrap();
        let entry = &entries[0];

        assert_eq!(entry.category, USED_CATEGORY);
        assert_eq!(entry.warranty.as_deref(), Some("1 Mes"));
        assert!(entry.in_stock);
        assert_eq!(entry.image, FALLBACK_IMAGE);
        assert_eq!(entry.colors, vec!["Rojo".to_string()]);
    }
}
