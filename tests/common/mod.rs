use std::sync::{Arc, OnceLock};
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;

use fliptrack::config::AppConfig;
use fliptrack::grid::Tables;
use fliptrack::ledger::layout;
use fliptrack::store::memory::MemoryStore;
use fliptrack::store::CellValue;
use fliptrack::AppState;

#[allow(dead_code)]
pub fn text(s: &str) -> CellValue {
    CellValue::text(s)
}

#[allow(dead_code)]
pub fn num(n: f64) -> CellValue {
    CellValue::Number(n)
}

/// One order book data row in tab column order A..I (the derived P/L
/// column J is left off, like a sheet whose formula column is blank).
#[allow(clippy::too_many_arguments)]
#[allow(dead_code)]
pub fn order_row(
    order_date: &str,
    item: &str,
    buy: f64,
    retailer: &str,
    sell: f64,
    sale_date: &str,
    marketplace: &str,
    fee: f64,
    shipping: f64,
) -> Vec<CellValue> {
    vec![
        text(order_date),
        text(item),
        num(buy),
        text(retailer),
        num(sell),
        text(sale_date),
        text(marketplace),
        num(fee),
        num(shipping),
    ]
}

/// Full order book grid: title banner, header row at tab row 2, then
/// data rows from tab row 3.
#[allow(dead_code)]
pub fn order_book_grid(rows: Vec<Vec<CellValue>>) -> Vec<Vec<CellValue>> {
    let mut grid = vec![
        vec![text("Order Book")],
        vec![
            text("Order Date"),
            text("Item"),
            text("Buy Price"),
            text("Retailer"),
            text("Sell Price"),
            text("Sale Date"),
            text("Marketplace"),
            text("Fees"),
            text("Shipping"),
            text("P/L"),
        ],
    ];
    grid.extend(rows);
    grid
}

#[allow(dead_code)]
pub fn items_grid(rows: &[(&str, f64)]) -> Vec<Vec<CellValue>> {
    let mut grid = vec![vec![text("Item"), text("Market Value")]];
    grid.extend(rows.iter().map(|(name, market)| vec![text(name), num(*market)]));
    grid
}

#[allow(dead_code)]
pub fn retailers_grid(names: &[&str]) -> Vec<Vec<CellValue>> {
    let mut grid = vec![vec![text("Retailer")]];
    grid.extend(names.iter().map(|name| vec![text(name)]));
    grid
}

#[allow(dead_code)]
pub fn marketplaces_grid(rows: &[(&str, f64)]) -> Vec<Vec<CellValue>> {
    let mut grid = vec![vec![text("Marketplace"), text("Fee")]];
    grid.extend(rows.iter().map(|(name, fee)| vec![text(name), num(*fee)]));
    grid
}

/// Store seeded with a small but complete spreadsheet: two Widget
/// purchases (one sold), one open Gadget, plus the reference tabs.
#[allow(dead_code)]
pub fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.set_tab(
        layout::ORDER_BOOK_TAB,
        order_book_grid(vec![
            order_row(
                "2024-01-01",
                "Widget",
                -10.0,
                "Target",
                20.0,
                "2024-01-10",
                "eBay",
                0.1,
                2.0,
            ),
            order_row("2024-01-05", "Widget", -12.0, "Walmart", 0.0, "", "", 0.0, 0.0),
            order_row("2024-02-01", "Gadget", -30.0, "Target", 0.0, "", "", 0.0, 0.0),
        ]),
    );
    store.set_tab(
        layout::ITEMS_TAB,
        items_grid(&[("Widget", 25.0), ("Gadget", 40.0)]),
    );
    store.set_tab(layout::RETAILERS_TAB, retailers_grid(&["Target", "Walmart"]));
    store.set_tab(
        layout::MARKETPLACES_TAB,
        marketplaces_grid(&[("eBay", 0.1), ("Mercari", 0.129)]),
    );
    store
}

#[allow(dead_code)]
pub fn seeded_tables() -> Tables<MemoryStore> {
    Tables::new(seeded_store(), Duration::from_secs(30))
}

/// The Prometheus recorder is process-global; install it once for the
/// whole test binary.
#[allow(dead_code)]
pub fn metrics_handle() -> PrometheusHandle {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    HANDLE
        .get_or_init(fliptrack::metrics::init_metrics)
        .clone()
}

#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        spreadsheet_id: "test-spreadsheet".into(),
        sheets_access_token: "test-token".into(),
        sheets_base_url: None,
        cache_ttl: Duration::from_secs(30),
    }
}

#[allow(dead_code)]
pub fn test_state() -> AppState<MemoryStore> {
    AppState {
        tables: Arc::new(seeded_tables()),
        config: test_config(),
        metrics_handle: metrics_handle(),
    }
}
