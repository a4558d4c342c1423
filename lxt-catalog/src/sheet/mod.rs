//! Spreadsheet ingestion pipeline
//!
//! Raw CSV export → tokenized rows → resolved columns → normalized catalog
//! entries. Runs once per process start; the catalog holds whatever the
//! last successful run produced.

pub mod client;
pub mod columns;
pub mod csv;
pub mod normalize;

pub use client::SheetClient;
pub use columns::{ColumnMap, Field};
pub use csv::split_line;
pub use normalize::{FALLBACK_IMAGE, PRICE_MARKUP_USD, parse_catalog};

use std::sync::Arc;

use anyhow::Result;
use log::{error, info};

use crate::catalog::Catalog;

/// Fetch, normalize and merge the sheet-sourced subset into the catalog.
///
/// Returns the number of entries in the fresh batch. A transport failure
/// propagates so the caller can log it and carry on with the static subset;
/// an empty batch merges as a no-op.
pub async fn refresh(catalog: &Catalog, client: &SheetClient) -> Result<usize> {
    let csv_text = client.fetch_csv().await?;
    let entries = parse_catalog(&csv_text)?;
    let count = entries.len();
    catalog.merge_used(entries);
    Ok(count)
}

/// Kick off the one-shot startup ingestion without blocking the caller.
///
/// The static subset is servable immediately; the sheet-sourced subset
/// appears whenever this completes. A failure is logged and the catalog
/// simply keeps whatever it already had — readers never see a partial
/// state either way.
pub fn spawn_refresh(catalog: Arc<Catalog>, client: SheetClient) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match refresh(&catalog, &client).await {
            Ok(count) => info!("startup ingestion done, {count} used items"),
            Err(err) => error!("startup ingestion failed, static catalog only: {err:#}"),
        }
    })
}
