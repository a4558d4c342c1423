//! Blue-dollar quote fetch
//!
//! One-shot fetch against the public quote service. The quoted sell rate
//! gets a fixed surcharge before use. Failure is not an error anywhere up
//! the stack — the calculator keeps working on the fallback rate.

use log::{info, warn};
use serde::Deserialize;

use super::ExchangeRate;

/// Public blue-dollar quote endpoint.
pub const QUOTE_URL: &str = "https://dolarapi.com/v1/dolares/blue";

/// Pesos added on top of the quoted sell rate.
pub const RATE_SURCHARGE_ARS: f64 = 10.0;

#[derive(Debug, Deserialize)]
struct BlueQuote {
    venta: f64,
}

/// Fetch the current sell rate and apply the surcharge.
///
/// Any transport or decode failure is logged and collapses to an
/// unresolved rate.
pub async fn fetch_blue_rate(client: &reqwest::Client, url: &str) -> ExchangeRate {
    let quote = async {
        client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<BlueQuote>()
            .await
    }
    .await;

    match quote {
        Ok(BlueQuote { venta }) => {
            let rate = venta + RATE_SURCHARGE_ARS;
            info!("blue rate resolved: {venta} + {RATE_SURCHARGE_ARS} = {rate} ARS");
            ExchangeRate::from_quote(rate)
        }
        Err(err) => {
            warn!("blue rate fetch failed, using fallback: {err}");
            ExchangeRate::unresolved()
        }
    }
}
