//! Currency and payment-method pricing
//!
//! Catalog prices are denominated in USD; everything except cash-dollar and
//! stablecoin payments is settled in pesos at the blue-dollar rate, with a
//! per-method multiplier on top. The calculator is a pure function and
//! never fails: an unresolved exchange quote degrades to a hard-coded
//! fallback rate, and an unrecognized payment label degrades to cash USD.

mod quote;

pub use quote::{QUOTE_URL, RATE_SURCHARGE_ARS, fetch_blue_rate};

use std::fmt;

/// Rate used when the quote fetch has not completed or failed.
pub const FALLBACK_RATE_ARS: f64 = 1200.0;

/// Accepted payment methods, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    CashUsd,
    CashArs,
    Usdt,
    Transfer,
    Credit1,
    Credit3,
    Credit6,
    Credit9,
    Credit12,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 9] = [
        PaymentMethod::CashUsd,
        PaymentMethod::CashArs,
        PaymentMethod::Usdt,
        PaymentMethod::Transfer,
        PaymentMethod::Credit1,
        PaymentMethod::Credit3,
        PaymentMethod::Credit6,
        PaymentMethod::Credit9,
        PaymentMethod::Credit12,
    ];

    /// Customer-facing label, also used in the reservation write-back.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CashUsd => "Efectivo USD",
            PaymentMethod::CashArs => "Efectivo Pesos (Cotiz)",
            PaymentMethod::Usdt => "USDT",
            PaymentMethod::Transfer => "Transferencia (+5%)",
            PaymentMethod::Credit1 => "Crédito 1 Cuota (+19%)",
            PaymentMethod::Credit3 => "Crédito 3 Cuotas (+45%)",
            PaymentMethod::Credit6 => "Crédito 6 Cuotas (+70%)",
            PaymentMethod::Credit9 => "Crédito 9 Cuotas (+85%)",
            PaymentMethod::Credit12 => "Crédito 12 Cuotas (+110%)",
        }
    }

    /// Map a label back to a method. Unrecognized input falls back to cash
    /// USD rather than erroring; the selector is free-form at the boundary.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.label() == label)
            .unwrap_or(PaymentMethod::CashUsd)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    /// Strict parser for CLI keys, unlike [`PaymentMethod::from_label`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash-usd" => Ok(PaymentMethod::CashUsd),
            "cash-ars" => Ok(PaymentMethod::CashArs),
            "usdt" => Ok(PaymentMethod::Usdt),
            "transfer" => Ok(PaymentMethod::Transfer),
            "credit-1" => Ok(PaymentMethod::Credit1),
            "credit-3" => Ok(PaymentMethod::Credit3),
            "credit-6" => Ok(PaymentMethod::Credit6),
            "credit-9" => Ok(PaymentMethod::Credit9),
            "credit-12" => Ok(PaymentMethod::Credit12),
            other => Err(format!(
                "unknown payment method '{other}' (expected cash-usd, cash-ars, usdt, transfer or credit-1/3/6/9/12)"
            )),
        }
    }
}

/// Settlement currency of a computed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Usd,
    Ars,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Currency::Usd => "USD",
            Currency::Ars => "ARS",
        })
    }
}

/// Blue-dollar sell rate, surcharge already included.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExchangeRate {
    fetched: Option<f64>,
}

impl ExchangeRate {
    /// Rate resolved from a live quote.
    pub fn from_quote(rate: f64) -> Self {
        Self {
            fetched: Some(rate),
        }
    }

    /// Quote fetch failed or has not completed yet.
    pub fn unresolved() -> Self {
        Self { fetched: None }
    }

    /// Rate to price with — the fetched value, or the stale default.
    pub fn effective(&self) -> f64 {
        self.fetched.unwrap_or(FALLBACK_RATE_ARS)
    }

    pub fn is_fallback(&self) -> bool {
        self.fetched.is_none()
    }
}

/// A computed total for one payment method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub total: f64,
    pub currency: Currency,
    /// Per-installment value for credit methods. The single-installment
    /// plan reports the whole total here, undivided.
    pub installment: Option<f64>,
}

/// Price a USD total under the given payment method.
pub fn price_for(total_usd: f64, method: PaymentMethod, rate: &ExchangeRate) -> PriceQuote {
    let base_ars = total_usd * rate.effective();

    let usd = |total: f64| PriceQuote {
        total,
        currency: Currency::Usd,
        installment: None,
    };
    let ars = |total: f64, installments: Option<u32>| PriceQuote {
        total,
        currency: Currency::Ars,
        installment: installments.map(|n| total / n as f64),
    };

    match method {
        PaymentMethod::CashUsd | PaymentMethod::Usdt => usd(total_usd),
        PaymentMethod::CashArs => ars(base_ars, None),
        PaymentMethod::Transfer => ars(base_ars * 1.05, None),
        PaymentMethod::Credit1 => ars(base_ars * 1.19, Some(1)),
        PaymentMethod::Credit3 => ars(base_ars * 1.45, Some(3)),
        PaymentMethod::Credit6 => ars(base_ars * 1.70, Some(6)),
        PaymentMethod::Credit9 => ars(base_ars * 1.85, Some(9)),
        PaymentMethod::Credit12 => ars(base_ars * 2.10, Some(12)),
    }
}
