//! End-to-end ingestion pipeline: raw CSV export in, live catalog and
//! write-back payload out. Pure text fixtures, no network.

use chrono::{TimeZone, Utc};

use lxt_catalog::catalog::USED_CATEGORY;
use lxt_catalog::pricing::ExchangeRate;
use lxt_catalog::reservation::{ReservationForm, build_event};
use lxt_catalog::{Cart, Catalog, PaymentMethod, parse_catalog};

const EXPORT: &str = "\
\"Modelo\",\"Capacidad\",\"Precio USD\",\"Bateria\",\"Condicion\",\"Estado\",\"Detalles\"
\"iPhone 13\",\"128\",\"450\",\"89\",\"Impecable\",\"Disponible\",\"Caja, cargador original\"
\"iPhone 12\",\"64\",\"300\",\"85\",\"Detalle en marco\",\"Vendido\",\"\"";

#[test]
fn ingested_sheet_survives_an_empty_refetch() {
    let entries = parse_catalog(EXPORT).unwrap();
    assert_eq!(entries.len(), 1, "sold row must be filtered out");

    let catalog = Catalog::empty();
    catalog.merge_used(entries);

    let snapshot = catalog.snapshot();
    assert_eq!(snapshot.len(), 1);
    let entry = &snapshot[0];
    assert_eq!(entry.category, USED_CATEGORY);
    assert_eq!(entry.name, "iPhone 13 128Gb");
    assert_eq!(entry.price_usd, 500.0);
    assert_eq!(entry.description, "Impecable - Caja, cargador original");

    // A later ingestion that comes back empty must not blank out the
    // inventory already on display.
    catalog.merge_used(parse_catalog("").unwrap());
    assert_eq!(catalog.snapshot().len(), 1);
}

#[test]
fn cart_checkout_round_trips_to_the_origin_row() {
    let entries = parse_catalog(EXPORT).unwrap();
    let catalog = Catalog::empty();
    catalog.merge_used(entries);

    let mut cart = Cart::new();
    cart.add(catalog.snapshot()[0].clone());

    let form = ReservationForm {
        customer_name: "Marta Ruiz".to_string(),
        phone: "+54 11 4444-1234".to_string(),
        branch: "Belgrano".to_string(),
        payment_method: PaymentMethod::CashUsd,
        pickup_at: Utc.with_ymd_and_hms(2026, 5, 2, 14, 30, 0).unwrap(),
    };
    let event = build_event(&cart, &form, &ExchangeRate::from_quote(1200.0));

    // The only available row is the first data row: sheet row 2.
    assert_eq!(event.used_rows_to_update, vec![2]);
    assert_eq!(event.color_id, "11");
    assert_eq!(event.title, "Marta Ruiz - iPhone 13 128Gb");
    assert!(event.description.contains("TOTAL APROX: USD 500"));
}
