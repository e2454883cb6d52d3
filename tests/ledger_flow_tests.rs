mod common;

use rust_decimal::Decimal;

use fliptrack::ledger::gateway::{self, OrderDraft, SaleDetails};
use fliptrack::ledger::inventory::valuate;
use fliptrack::ledger::layout;
use fliptrack::ledger::reconcile::reconcile;
use fliptrack::ledger::{load_entries, load_items};

#[tokio::test]
async fn test_read_reconcile_valuate_end_to_end() {
    let tables = common::seeded_tables();

    let entries = load_entries(&tables).await.unwrap();
    assert_eq!(entries.len(), 3);
    // Positions are tab rows: data starts under the header at row 3.
    assert_eq!(entries[0].row, 3);
    assert_eq!(entries[2].row, 5);

    let items = load_items(&tables).await.unwrap();
    let reconciled = reconcile(entries);
    assert_eq!(reconciled.open.len(), 2);
    assert_eq!(reconciled.closed.len(), 1);

    let report = valuate(&reconciled.tallies, &items);
    // One Widget on hand at cost -12 (the -10 unit sold), one Gadget.
    assert_eq!(report.totals.on_hand_qty, 2);
    assert_eq!(report.totals.cost.amount(), Decimal::from(-42));
    assert_eq!(report.totals.est_value, Decimal::from(65));
    assert_eq!(report.totals.unrealized, Decimal::from(23));
}

#[tokio::test]
async fn test_repeat_read_within_ttl_is_served_from_cache() {
    let tables = common::seeded_tables();

    let first = load_entries(&tables).await.unwrap();
    let second = load_entries(&tables).await.unwrap();

    assert_eq!(tables.store().reads(), 1);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_mutation_invalidates_every_cached_tab() {
    let tables = common::seeded_tables();

    load_entries(&tables).await.unwrap();
    load_items(&tables).await.unwrap();
    assert_eq!(tables.store().reads(), 2);

    gateway::append_order(
        &tables,
        &OrderDraft {
            order_date: "2024-03-01".into(),
            item: "Widget".into(),
            buy_price: Decimal::from(-9),
            retailer: "Target".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // Both tabs refetch, and the appended row is visible.
    let entries = load_entries(&tables).await.unwrap();
    load_items(&tables).await.unwrap();
    assert_eq!(tables.store().reads(), 4);
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[3].row, 6);
    assert_eq!(entries[3].buy_price.amount(), Decimal::from(-9));
}

#[tokio::test]
async fn test_mark_sold_touches_only_sale_columns() {
    let tables = common::seeded_tables();

    gateway::mark_sold(
        &tables,
        &SaleDetails {
            row: 4, // the open Widget at -12
            sell_price: Decimal::from(30),
            sale_date: "2024-02-15".into(),
            marketplace: "Mercari".into(),
            fee_fraction: Decimal::new(129, 3),
            shipping: Decimal::from(3),
        },
    )
    .await
    .unwrap();

    let entries = load_entries(&tables).await.unwrap();
    let sold = entries.iter().find(|e| e.row == 4).unwrap();
    assert!(sold.is_sold());
    assert_eq!(sold.sell_price, Decimal::from(30));
    assert_eq!(sold.marketplace, "Mercari");
    // Purchase side untouched.
    assert_eq!(sold.item, "Widget");
    assert_eq!(sold.buy_price.amount(), Decimal::from(-12));
    assert_eq!(sold.retailer, "Walmart");
}

#[tokio::test]
async fn test_bulk_delete_removes_pre_shift_positions() {
    let tables = common::seeded_tables();

    // Tab rows 3 and 5: the sold Widget and the Gadget.
    let deleted = gateway::delete_orders(&tables, &[5, 3]).await.unwrap();
    assert_eq!(deleted, 2);

    let entries = load_entries(&tables).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].item, "Widget");
    assert_eq!(entries[0].buy_price.amount(), Decimal::from(-12));
    // The survivor moved up into tab row 3.
    assert_eq!(entries[0].row, 3);
}

#[tokio::test]
async fn test_delete_with_no_rows_is_a_no_op() {
    let tables = common::seeded_tables();
    load_entries(&tables).await.unwrap();

    let deleted = gateway::delete_orders(&tables, &[]).await.unwrap();
    assert_eq!(deleted, 0);

    // No mutation happened, so the cache is still warm.
    load_entries(&tables).await.unwrap();
    assert_eq!(tables.store().reads(), 1);
}

#[tokio::test]
async fn test_update_orders_rewrites_addressed_rows() {
    let tables = common::seeded_tables();

    let updates: Vec<fliptrack::ledger::gateway::OrderRowUpdate> = serde_json::from_value(
        serde_json::json!([{
            "row": 5,
            "order_date": "2024-02-02",
            "item": "Gadget Pro",
            "buy_price": -35,
            "retailer": "Target",
        }]),
    )
    .unwrap();

    let updated = gateway::update_orders(&tables, &updates).await.unwrap();
    assert_eq!(updated, 1);

    let entries = load_entries(&tables).await.unwrap();
    let row5 = entries.iter().find(|e| e.row == 5).unwrap();
    assert_eq!(row5.item, "Gadget Pro");
    assert_eq!(row5.buy_price.amount(), Decimal::from(-35));
}

#[tokio::test]
async fn test_reference_mutations_roundtrip() {
    let tables = common::seeded_tables();

    gateway::append_item(
        &tables,
        &fliptrack::ledger::gateway::ItemDraft {
            name: "Doohickey".into(),
            market_value: Decimal::from(15),
        },
    )
    .await
    .unwrap();

    let items = load_items(&tables).await.unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[2].name, "Doohickey");
    assert_eq!(items[2].row, 4);

    gateway::delete_item(&tables, 2).await.unwrap();
    let items = load_items(&tables).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Gadget");
    assert_eq!(items[0].row, 2);
}

#[tokio::test]
async fn test_marketplace_fee_normalizes_through_the_store() {
    let tables = common::seeded_tables();

    gateway::append_marketplace(
        &tables,
        &fliptrack::ledger::gateway::MarketplaceDraft {
            name: "Whatnot".into(),
            fee_fraction: Decimal::from(8), // entered as a percent
        },
    )
    .await
    .unwrap();

    let marketplaces = fliptrack::ledger::load_marketplaces(&tables).await.unwrap();
    let whatnot = marketplaces.iter().find(|m| m.name == "Whatnot").unwrap();
    assert_eq!(whatnot.fee_fraction, Decimal::new(8, 2));
}

#[tokio::test]
async fn test_dirty_rows_normalize_instead_of_failing() {
    let tables = common::seeded_tables();

    // A row with garbage numerics, an unparsable date, and a short row;
    // plus a blank-item row that must vanish from the mapping.
    let grid = common::order_book_grid(vec![
        vec![
            common::text("soon"),
            common::text("Widget"),
            common::text("not-a-number"),
        ],
        common::order_row("", "", -5.0, "Target", 0.0, "", "", 0.0, 0.0),
    ]);
    tables.store().set_tab(layout::ORDER_BOOK_TAB, grid);
    tables.invalidate();

    let entries = load_entries(&tables).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].order_date, None);
    assert_eq!(entries[0].buy_price.amount(), Decimal::ZERO);
    assert_eq!(entries[0].sell_price, Decimal::ZERO);
}
