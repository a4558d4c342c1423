//! Catalog ingestion, pricing and reservation sync core for the LXT
//! storefront.
//!
//! The store sells a static, hand-authored catalog plus a second-hand
//! inventory that lives in an external spreadsheet. This crate owns the
//! pipeline around that spreadsheet: fetching and tokenizing its CSV
//! export, resolving its ever-shifting column layout, normalizing rows
//! into catalog entries under the store's business rules, swapping the
//! dynamic subset into the live catalog atomically, pricing carts per
//! payment method at the blue-dollar rate, and writing confirmed
//! reservations back out as calendar events that also flag the consumed
//! sheet rows.
//!
//! Nothing here persists: the catalog is rebuilt from the sheet on every
//! process start, and the reservation write-back is fire-and-forget.

pub mod catalog;
pub mod config;
pub mod pricing;
pub mod reservation;
pub mod sheet;

pub use catalog::{Cart, CartLine, Catalog, CatalogEntry, RowOrigin};
pub use config::Config;
pub use pricing::{ExchangeRate, PaymentMethod, PriceQuote, fetch_blue_rate, price_for};
pub use reservation::{EventPayload, ReservationForm, ReservationSync, SyncError, build_event};
pub use sheet::{SheetClient, parse_catalog};
