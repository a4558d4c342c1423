//! Environment-backed configuration
//!
//! Everything has a working default except the scheduling webhook, which is
//! deployment-specific and deliberately has none: reservations must fail
//! loudly at submit time when it is missing, instead of silently going
//! nowhere.

use std::env;

use crate::pricing::QUOTE_URL;

/// Inventory spreadsheet the store reads its used stock from.
pub const DEFAULT_SHEET_ID: &str = "1RL2L2MX3cYBcVliO6XPdQErmMRinR50xeO5TtgtrvLs";

/// Placeholder left in env files by the deployment template; treated the
/// same as an unset webhook.
const WEBHOOK_PLACEHOLDER: &str = "PEGAR_TU_URL";

#[derive(Debug, Clone)]
pub struct Config {
    pub sheet_id: String,
    /// Scheduling webhook; `None` until the deployment sets it.
    pub webhook_url: Option<String>,
    pub quote_url: String,
}

impl Config {
    /// Load from the environment, `.env` included.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let webhook_url = env::var("LXT_WEBHOOK_URL")
            .ok()
            .filter(|v| !v.is_empty() && !v.contains(WEBHOOK_PLACEHOLDER));

        Self {
            sheet_id: env::var("LXT_SHEET_ID").unwrap_or_else(|_| DEFAULT_SHEET_ID.to_string()),
            webhook_url,
            quote_url: env::var("LXT_QUOTE_URL").unwrap_or_else(|_| QUOTE_URL.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_id: DEFAULT_SHEET_ID.to_string(),
            webhook_url: None,
            quote_url: QUOTE_URL.to_string(),
        }
    }
}
