//! Reservation payload construction and write-back
//!
//! A confirmed reservation becomes one outbound POST to the scheduling
//! webhook: a calendar-style event (title, human-readable summary, a fixed
//! one-hour window, a branch color code) plus the list of sheet rows to
//! flip to reserved. Delivery is best-effort, at-most-once and
//! unacknowledged — the response body is never read, nothing is retried,
//! and the caller clears the cart whether or not the request got through.

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::{Cart, RowOrigin, find_branch};
use crate::pricing::{ExchangeRate, PaymentMethod, price_for};

/// Calendar color for pickups at the Belgrano branch.
const BELGRANO_COLOR_ID: &str = "11";
/// Calendar color for every other branch.
const DEFAULT_COLOR_ID: &str = "9";

/// Location fallback when the branch name is not in the roster.
const STORE_NAME: &str = "Locos x la Tecnología";

/// Reservations block one hour in the calendar.
const PICKUP_WINDOW_HOURS: i64 = 1;

/// Filled-in checkout form.
#[derive(Debug, Clone)]
pub struct ReservationForm {
    pub customer_name: String,
    pub phone: String,
    pub branch: String,
    pub payment_method: PaymentMethod,
    /// Requested pickup moment, already resolved to an instant.
    pub pickup_at: DateTime<Utc>,
}

/// Event payload accepted by the scheduling webhook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub color_id: String,
    /// 1-based sheet rows to mark reserved.
    pub used_rows_to_update: Vec<usize>,
}

/// Build the write-back payload for the current cart.
pub fn build_event(cart: &Cart, form: &ReservationForm, rate: &ExchangeRate) -> EventPayload {
    let item_names: Vec<&str> = cart.lines().iter().map(|l| l.entry.name.as_str()).collect();
    let title = format!("{} - {}", form.customer_name, item_names.join(", "));

    let location = find_branch(&form.branch)
        .map(|b| b.address.to_string())
        .unwrap_or_else(|| STORE_NAME.to_string());

    let color_id = if form.branch == "Belgrano" {
        BELGRANO_COLOR_ID
    } else {
        DEFAULT_COLOR_ID
    };

    // Sheet-sourced cart items carry their row of origin in the identifier;
    // static items simply do not parse and drop out.
    let used_rows_to_update: Vec<usize> = cart
        .lines()
        .iter()
        .filter_map(|l| RowOrigin::parse(&l.entry.id))
        .map(|origin| origin.sheet_row())
        .collect();

    EventPayload {
        title,
        description: summary(cart, form, rate),
        location,
        start_time: form.pickup_at,
        end_time: form.pickup_at + Duration::hours(PICKUP_WINDOW_HOURS),
        color_id: color_id.to_string(),
        used_rows_to_update,
    }
}

/// Multi-line human-readable order summary, in the format the store staff
/// read straight off the calendar event.
fn summary(cart: &Cart, form: &ReservationForm, rate: &ExchangeRate) -> String {
    let items = cart
        .lines()
        .iter()
        .map(|l| format!("• {}x {}", l.quantity, l.entry.name))
        .collect::<Vec<_>>()
        .join("\n");

    let quote = price_for(cart.total_usd(), form.payment_method, rate);

    format!(
        "CLIENTE: {}\nTELÉFONO: {}\n------------------\nPEDIDO:\n{}\n------------------\nPAGO: {}\nTOTAL APROX: {} {}\n(Cotiz Ref: ${})",
        form.customer_name,
        form.phone,
        items,
        form.payment_method,
        quote.currency,
        format_grouped(quote.total),
        rate.effective(),
    )
}

/// Ceil and group thousands with dots, es-AR style.
fn format_grouped(value: f64) -> String {
    let whole = value.ceil() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Write-back failure taxonomy. A missing webhook is a configuration
/// problem surfaced before anything is sent; a transport failure is the
/// expected best-effort outcome and only warrants a warning.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("scheduling webhook URL is not configured")]
    NotConfigured,
    #[error("reservation submission failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Fire-and-forget client for the scheduling webhook.
#[derive(Debug, Clone)]
pub struct ReservationSync {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl ReservationSync {
    pub fn new(client: reqwest::Client, webhook_url: Option<String>) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    /// Submit the payload. No response contract exists: a 2xx tells us the
    /// request arrived somewhere, nothing more, and the body is discarded.
    /// Callers clear the cart regardless of the outcome.
    pub async fn submit(&self, payload: &EventPayload) -> Result<(), SyncError> {
        let url = self.webhook_url.as_deref().ok_or(SyncError::NotConfigured)?;

        match self.client.post(url).json(payload).send().await {
            Ok(_) => {
                info!("reservation submitted: {}", payload.title);
                Ok(())
            }
            Err(err) => {
                warn!("reservation write-back failed (not retried): {err}");
                Err(SyncError::Transport(err))
            }
        }
    }
}
