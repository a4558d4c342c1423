//! Live catalog store
//!
//! The static portion of the catalog is seeded once at startup; the
//! sheet-sourced portion arrives later, whenever the one-shot ingestion
//! completes. Readers take immutable snapshots and the merge publishes a
//! fully-built replacement list in a single atomic store, so no reader can
//! observe the dynamic subset half-replaced.

use std::collections::HashSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use log::{info, warn};

use super::models::{CatalogEntry, USED_CATEGORY};

/// Catalog with atomic snapshot reads and wholesale dynamic-subset merges.
#[derive(Debug)]
pub struct Catalog {
    entries: ArcSwap<Vec<CatalogEntry>>,
}

impl Catalog {
    /// Seed the catalog with the hand-authored static entries.
    pub fn with_static(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: ArcSwap::from_pointee(entries),
        }
    }

    pub fn empty() -> Self {
        Self::with_static(Vec::new())
    }

    /// Immutable snapshot of the full catalog.
    pub fn snapshot(&self) -> Arc<Vec<CatalogEntry>> {
        self.entries.load_full()
    }

    /// Replace the sheet-sourced subset with a freshly normalized batch.
    ///
    /// The replacement list is built off to the side and published in one
    /// store. An empty batch is a no-op: a failed or empty fetch must not
    /// blank out inventory that is already on display.
    pub fn merge_used(&self, fresh: Vec<CatalogEntry>) {
        if fresh.is_empty() {
            info!("empty used-items batch, keeping previous subset");
            return;
        }

        let current = self.entries.load();
        let mut next: Vec<CatalogEntry> = current
            .iter()
            .filter(|e| e.category != USED_CATEGORY)
            .cloned()
            .collect();
        next.extend(fresh);

        check_unique_ids(&next);
        info!(
            "catalog merged: {} entries ({} used)",
            next.len(),
            next.iter().filter(|e| e.category == USED_CATEGORY).count()
        );
        self.entries.store(Arc::new(next));
    }
}

/// Identifier uniqueness must hold across the merged catalog; collisions
/// are a data problem in the sources, so they are reported, not fixed.
fn check_unique_ids(entries: &[CatalogEntry]) {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry.id.as_str()) {
            warn!("duplicate catalog identifier: {}", entry.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, category: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            name: id.to_string(),
            price_usd: 100.0,
            category: category.to_string(),
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
    fn test_merge_replaces_only_used_subset() {
        let catalog = Catalog::with_static(vec![
            entry("ip15-128", "iPhone"),
            entry("used-1-old", USED_CATEGORY),
        ]);

        catalog.merge_used(vec![entry("used-1-fresh", USED_CATEGORY)]);

        let snapshot = catalog.snapshot();
        let ids: Vec<&str> = snapshot.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ip15-128", "used-1-fresh"]);
    }

    #[test]
    fn test_empty_merge_keeps_previous_subset() {
        let catalog = Catalog::empty();
        catalog.merge_used(vec![entry("used-1-a", USED_CATEGORY)]);
        catalog.merge_used(Vec::new());

        let snapshot = catalog.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "used-1-a");
    }

    #[test]
    fn test_static_entries_untouched_by_repeated_merges() {
        let catalog = Catalog::with_static(vec![entry("ip15-128", "iPhone")]);
        catalog.merge_used(vec![entry("used-1-a", USED_CATEGORY)]);
        catalog.merge_used(vec![
            entry("used-1-b", USED_CATEGORY),
            entry("used-2-c", USED_CATEGORY),
        ]);

        let snapshot = catalog.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].id, "ip15-128");
    }
}
