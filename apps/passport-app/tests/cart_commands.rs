//! End-to-end cart flows through the command layer.

use std::path::PathBuf;

use passport_app::catalog::{CatalogProvider, InMemoryCatalog};
use passport_app::commands::{
    add_to_cart, clear_cart, decrement_cart_item, get_cart, list_currencies, remove_from_cart,
    set_currency, toggle_cart, update_cart_item,
};
use passport_app::config::AppConfig;
use passport_app::error::ErrorCode;
use passport_app::shell::run_line;
use passport_app::state::CartState;
use passport_core::{Currency, Money, Product, ProductId};

fn sample_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/catalog.sample.json")
}

fn sample_catalog() -> InMemoryCatalog {
    InMemoryCatalog::load(&sample_catalog_path()).unwrap()
}

fn priced_catalog() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        Product::new(1u64, "Carnet", Money::from_cents(1000)).unwrap(),
        Product::new(2u64, "Crayon", Money::from_cents(500)).unwrap(),
    ])
}

#[test]
fn test_sample_catalog_loads() {
    let catalog = sample_catalog();
    assert_eq!(catalog.len(), 5);

    let print = catalog.get_product(&ProductId::from(3u64)).unwrap().unwrap();
    assert_eq!(print.unit_price, Money::from_cents(12000));
}

#[test]
fn test_browse_add_and_convert() {
    let catalog = priced_catalog();
    let cart = CartState::default();

    add_to_cart(&catalog, &cart, "1", Some(2)).unwrap();
    let response = add_to_cart(&catalog, &cart, "2", Some(3)).unwrap();
    assert_eq!(response.totals.subtotal_cents, 3500);
    assert_eq!(response.totals.formatted_total, "€35.00");
    assert_eq!(response.totals.total_quantity, 5);
    assert_eq!(response.totals.item_count, 2);

    let response = set_currency(&cart, "XOF").unwrap();
    assert_eq!(response.totals.formatted_total, "22958 XOF");

    let response = set_currency(&cart, "USD").unwrap();
    assert_eq!(response.totals.formatted_total, "$37.80");
}

#[test]
fn test_numeric_and_string_ids_share_a_line() {
    let catalog = priced_catalog();
    let cart = CartState::default();

    add_to_cart(&catalog, &cart, "1", None).unwrap();
    add_to_cart(&catalog, &cart, " 1 ", None).unwrap();
    cart.with_store_mut(|s| s.add_one(&Product::new(1u64, "Carnet", Money::from_cents(1000)).unwrap()))
        .unwrap();

    let response = get_cart(&cart).unwrap();
    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0].item.quantity, 3);
}

#[test]
fn test_quantity_edits_and_removal() {
    let catalog = priced_catalog();
    let cart = CartState::default();
    add_to_cart(&catalog, &cart, "1", Some(2)).unwrap();
    add_to_cart(&catalog, &cart, "2", Some(1)).unwrap();

    let response = update_cart_item(&cart, "1", 0).unwrap();
    assert_eq!(response.items.len(), 1);

    let response = decrement_cart_item(&cart, "2").unwrap();
    assert!(response.items.is_empty());

    let response = remove_from_cart(&cart, "nonexistent").unwrap();
    assert!(response.items.is_empty());

    let err = update_cart_item(&cart, "1", 1000).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}

#[test]
fn test_clear_keeps_panel_and_currency() {
    let catalog = priced_catalog();
    let cart = CartState::default();
    add_to_cart(&catalog, &cart, "1", Some(2)).unwrap();
    toggle_cart(&cart, None).unwrap();
    set_currency(&cart, "XOF").unwrap();

    let response = clear_cart(&cart).unwrap();
    assert!(response.items.is_empty());
    assert!(response.is_open);
    assert_eq!(response.display_currency, Currency::Xof);
    assert_eq!(response.totals.formatted_total, "0 XOF");
}

#[test]
fn test_rejected_add_leaves_cart_untouched() {
    let catalog = priced_catalog();
    let cart = CartState::default();
    add_to_cart(&catalog, &cart, "1", Some(1)).unwrap();
    let before = get_cart(&cart).unwrap();

    let err = add_to_cart(&catalog, &cart, "1", Some(0)).unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
    let err = add_to_cart(&catalog, &cart, "404", None).unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    assert_eq!(get_cart(&cart).unwrap(), before);
}

#[test]
fn test_config_drives_state() {
    let mut config = AppConfig::default();
    config.cart.default_currency = Currency::Usd;
    config.cart.max_line_items = 1;
    config.catalog.path = Some(sample_catalog_path());

    let app = passport_app::bootstrap(config).unwrap();
    assert_eq!(app.catalog.len(), 5);

    let response = add_to_cart(&app.catalog, &app.cart, "5", None).unwrap();
    // 25.00 × 1.08
    assert_eq!(response.totals.formatted_total, "$27.00");

    let err = add_to_cart(&app.catalog, &app.cart, "4", None).unwrap_err();
    assert_eq!(err.code, ErrorCode::CartError);

    let selected: Vec<Currency> = list_currencies(&app.cart)
        .unwrap()
        .into_iter()
        .filter(|o| o.selected)
        .map(|o| o.code)
        .collect();
    assert_eq!(selected, vec![Currency::Usd]);
}

#[test]
fn test_missing_catalog_falls_back_to_empty() {
    let mut config = AppConfig::default();
    config.catalog.path = Some(std::env::temp_dir().join("passport-no-such-catalog.json"));

    let app = passport_app::bootstrap(config).unwrap();
    assert!(app.catalog.is_empty());
}

#[test]
fn test_shell_session() {
    let catalog = sample_catalog();
    let cart = CartState::default();

    let output = run_line("add 4 3", &catalog, &cart).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["totals"]["formattedTotal"], "€44.97");

    let output = run_line("currency gbp", &catalog, &cart).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");

    let output = run_line("currencies", &catalog, &cart).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json[2]["code"], "XOF");

    assert!(run_line("help", &catalog, &cart).unwrap().contains("currency <code>"));
    assert!(run_line("", &catalog, &cart).is_none());
    assert!(run_line("quit", &catalog, &cart).is_none());
}
