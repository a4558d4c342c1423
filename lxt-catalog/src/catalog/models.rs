//! Catalog and cart data model
//!
//! Entries cross the presentation boundary as plain structured records, so
//! everything here derives `Serialize`/`Deserialize`. Prices are always the
//! final customer-facing USD amount — the ingestion markup is applied before
//! an entry is constructed, never after.

use serde::{Deserialize, Serialize};

/// Category assigned to every entry sourced from the inventory sheet.
/// Distinct from all statically-defined categories so the merge step can
/// replace the sheet-sourced subset wholesale.
pub const USED_CATEGORY: &str = "Usados";

/// Identifier tag marking sheet-sourced entries.
const USED_TAG: &str = "used";

/// One item in the store catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Globally unique across the merged catalog.
    pub id: String,
    pub name: String,
    /// Final price in USD, markup included.
    pub price_usd: f64,
    pub category: String,
    pub description: String,
    pub image: String,
    pub in_stock: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_health: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    /// Present only on sheet-sourced entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<RowOrigin>,
}

/// Reference back to the spreadsheet row an entry came from.
///
/// `line_index` is the zero-based line of the CSV export, counting the
/// header as line 0 — so the first data row carries index 1 and
/// `line_index + 1` is the 1-based row number the sheet itself uses. The
/// write-back channel depends on recovering this from a bare identifier
/// string, so the string form is fixed: `used-{line_index}-{slug}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOrigin {
    pub line_index: usize,
    /// Lowercased source name with whitespace collapsed to dashes.
    pub slug: String,
}

impl RowOrigin {
    pub fn new(line_index: usize, raw_name: &str) -> Self {
        let slug = raw_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        Self { line_index, slug }
    }

    /// String form used as the catalog identifier.
    pub fn encode(&self) -> String {
        format!("{USED_TAG}-{}-{}", self.line_index, self.slug)
    }

    /// Recover an origin from an identifier, `None` for identifiers that
    /// are not sheet-sourced.
    pub fn parse(id: &str) -> Option<Self> {
        let rest = id.strip_prefix(USED_TAG)?.strip_prefix('-')?;
        let (index, slug) = rest.split_once('-')?;
        let line_index = index.parse().ok()?;
        Some(Self {
            line_index,
            slug: slug.to_string(),
        })
    }

    /// 1-based row number in the spreadsheet (row 1 is the header).
    pub fn sheet_row(&self) -> usize {
        self.line_index + 1
    }
}

/// A catalog entry plus a positive quantity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub entry: CatalogEntry,
    pub quantity: u32,
}

/// Shopping cart. At most one line per identifier — adding an item that is
/// already present increments its quantity instead of duplicating the line.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: CatalogEntry) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.entry.id == entry.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine { entry, quantity: 1 });
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.lines.retain(|l| l.entry.id != id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line prices in USD, quantities included.
    pub fn total_usd(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.entry.price_usd * l.quantity as f64)
            .sum()
    }
}

/// A physical store branch.
#[derive(Debug, Clone, Copy)]
pub struct Branch {
    pub name: &'static str,
    pub address: &'static str,
    pub hours: &'static str,
}

pub const BRANCHES: [Branch; 2] = [
    Branch {
        name: "Centro",
        address: "Corrientes 1464",
        hours: "Lun-Vie 10-19hs, Sáb/Fer 11-16hs",
    },
    Branch {
        name: "Belgrano",
        address: "Olazabal 1515",
        hours: "Lun-Vie 11-20hs, Sáb/Fer 11-16hs",
    },
];

/// Look up a branch by name.
pub fn find_branch(name: &str) -> Option<&'static Branch> {
    BRANCHES.iter().find(|b| b.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, price: f64) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            name: id.to_string(),
            price_usd: price,
            category: "iPhone".to_string(),
            description: String::new(),
            image: String::new(),
            in_stock: true,
            battery_health: None,
            warranty: None,
            condition: None,
            colors: Vec::new(),
            origin: None,
        }
    }

    #[test]
    fn test_origin_round_trip() {
        let origin = RowOrigin::new(3, "iPhone 15");
        assert_eq!(origin.encode(), "used-3-iphone-15");
        assert_eq!(RowOrigin::parse("used-3-iphone-15"), Some(origin));
    }

    #[test]
    fn test_origin_sheet_row_is_one_past_line_index() {
        // Header is row 1, so the row at line index 1 is sheet row 2.
        assert_eq!(RowOrigin::new(1, "iPhone 13").sheet_row(), 2);
    }

    #[test]
    fn test_origin_parse_rejects_static_ids() {
        assert_eq!(RowOrigin::parse("ip15-128"), None);
        assert_eq!(RowOrigin::parse("used-x-iphone"), None);
        assert_eq!(RowOrigin::parse("used-3"), None);
    }

    #[test]
    fn test_slug_collapses_whitespace() {
        let origin = RowOrigin::new(7, "  iPhone  12   Mini ");
        assert_eq!(origin.slug, "iphone-12-mini");
    }

    #[test]
    fn test_cart_add_increments_existing_line() {
        let mut cart = Cart::new();
        cart.add(entry("a", 100.0));
        cart.add(entry("a", 100.0));
        cart.add(entry("b", 50.0));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total_usd(), 250.0);
    }

    #[test]
    fn test_cart_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(entry("a", 100.0));
        cart.add(entry("b", 50.0));

        cart.remove("a");
        assert_eq!(cart.lines().len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }
}
