//! Inventory sheet fetch
//!
//! The sheet is read through its public CSV export endpoint. This is a
//! read-only channel: nothing here authenticates, and a fetch failure just
//! means the dynamic subset stays absent for this process lifetime.

use anyhow::{Context, Result};
use log::debug;

/// CSV export endpoint for a public spreadsheet. The gviz endpoint is the
/// reliable one for anonymous reads.
fn export_url(sheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{sheet_id}/gviz/tq?tqx=out:csv&gid=0")
}

/// Read-only client for the inventory spreadsheet.
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: reqwest::Client,
    url: String,
}

impl SheetClient {
    pub fn new(client: reqwest::Client, sheet_id: &str) -> Self {
        Self {
            url: export_url(sheet_id),
            client,
        }
    }

    /// Fetch the raw CSV export, header row included.
    pub async fn fetch_csv(&self) -> Result<String> {
        debug!("fetching inventory sheet: {}", self.url);
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("requesting inventory sheet export")?
            .error_for_status()
            .context("inventory sheet export returned an error status")?
            .text()
            .await
            .context("reading inventory sheet export body")?;
        Ok(body)
    }
}
