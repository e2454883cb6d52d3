//! Mutation gateway: every write lands on the caller-supplied 1-based
//! row position, then clears the snapshot cache wholesale.
//!
//! Positions are not validated against the current grid; there is no
//! optimistic concurrency token. Deletes shift later rows; callers must
//! re-read before issuing further row-addressed mutations.

use metrics::counter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::grid::Tables;
use crate::models::normalize_fee;
use crate::store::{CellValue, TableStore};

use super::layout::{self, ITEMS_TAB, MARKETPLACES_TAB, ORDER_BOOK_TAB, RETAILERS_TAB};

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Ledger row as submitted by a caller. Dates travel as strings and are
/// written verbatim; the store's entry parsing normalizes them on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub order_date: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub buy_price: Decimal,
    #[serde(default)]
    pub retailer: String,
    #[serde(default)]
    pub sell_price: Decimal,
    #[serde(default)]
    pub sale_date: String,
    #[serde(default)]
    pub marketplace: String,
    #[serde(default)]
    pub fee_fraction: Decimal,
    #[serde(default)]
    pub shipping: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderRowUpdate {
    pub row: u32,
    #[serde(flatten)]
    pub draft: OrderDraft,
}

/// Sale details written onto an open row by mark-as-sold.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleDetails {
    pub row: u32,
    #[serde(default)]
    pub sell_price: Decimal,
    #[serde(default)]
    pub sale_date: String,
    #[serde(default)]
    pub marketplace: String,
    #[serde(default)]
    pub fee_fraction: Decimal,
    #[serde(default)]
    pub shipping: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub market_value: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemRowUpdate {
    pub row: u32,
    #[serde(flatten)]
    pub draft: ItemDraft,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetailerDraft {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetailerRowUpdate {
    pub row: u32,
    #[serde(flatten)]
    pub draft: RetailerDraft,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketplaceDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fee_fraction: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceRowUpdate {
    pub row: u32,
    #[serde(flatten)]
    pub draft: MarketplaceDraft,
}

// ---------------------------------------------------------------------------
// Ledger mutations
// ---------------------------------------------------------------------------

pub async fn append_order<S: TableStore>(
    tables: &Tables<S>,
    draft: &OrderDraft,
) -> anyhow::Result<()> {
    tables
        .store()
        .append_row(ORDER_BOOK_TAB, &order_row_cells(draft))
        .await?;
    record_mutation(tables, "append_order");
    Ok(())
}

/// Full-row rewrites, one store call per row. Rows flagged 0 are
/// skipped.
pub async fn update_orders<S: TableStore>(
    tables: &Tables<S>,
    updates: &[OrderRowUpdate],
) -> anyhow::Result<usize> {
    let mut written = 0;
    for update in updates {
        if update.row == 0 {
            continue;
        }
        tables
            .store()
            .update_cells(ORDER_BOOK_TAB, update.row, 1, &order_row_cells(&update.draft))
            .await?;
        written += 1;
    }
    if written > 0 {
        record_mutation(tables, "update_orders");
    }
    Ok(written)
}

/// One batched structural delete of the given pre-shift positions.
pub async fn delete_orders<S: TableStore>(
    tables: &Tables<S>,
    rows: &[u32],
) -> anyhow::Result<usize> {
    let rows: Vec<u32> = rows.iter().copied().filter(|&r| r > 0).collect();
    if rows.is_empty() {
        return Ok(0);
    }
    tables.store().delete_rows(ORDER_BOOK_TAB, &rows).await?;
    record_mutation(tables, "delete_orders");
    Ok(rows.len())
}

/// Write the sale-side columns (E..I) of the addressed row, leaving the
/// purchase columns untouched.
pub async fn mark_sold<S: TableStore>(
    tables: &Tables<S>,
    sale: &SaleDetails,
) -> anyhow::Result<()> {
    let values = [
        CellValue::number(sale.sell_price),
        CellValue::text(sale.sale_date.as_str()),
        CellValue::text(sale.marketplace.as_str()),
        CellValue::number(normalize_fee(sale.fee_fraction)),
        CellValue::number(sale.shipping),
    ];
    let start_col = layout::order_book::SELL_PRICE as u32 + 1;
    tables
        .store()
        .update_cells(ORDER_BOOK_TAB, sale.row, start_col, &values)
        .await?;
    record_mutation(tables, "mark_sold");
    Ok(())
}

// ---------------------------------------------------------------------------
// Reference-table mutations
// ---------------------------------------------------------------------------

pub async fn append_item<S: TableStore>(
    tables: &Tables<S>,
    draft: &ItemDraft,
) -> anyhow::Result<()> {
    tables
        .store()
        .append_row(ITEMS_TAB, &item_row_cells(draft))
        .await?;
    record_mutation(tables, "append_item");
    Ok(())
}

pub async fn update_items<S: TableStore>(
    tables: &Tables<S>,
    updates: &[ItemRowUpdate],
) -> anyhow::Result<usize> {
    let mut written = 0;
    for update in updates {
        if update.row == 0 {
            continue;
        }
        tables
            .store()
            .update_cells(ITEMS_TAB, update.row, 1, &item_row_cells(&update.draft))
            .await?;
        written += 1;
    }
    if written > 0 {
        record_mutation(tables, "update_items");
    }
    Ok(written)
}

pub async fn delete_item<S: TableStore>(tables: &Tables<S>, row: u32) -> anyhow::Result<()> {
    tables.store().delete_rows(ITEMS_TAB, &[row]).await?;
    record_mutation(tables, "delete_item");
    Ok(())
}

pub async fn append_retailer<S: TableStore>(
    tables: &Tables<S>,
    draft: &RetailerDraft,
) -> anyhow::Result<()> {
    tables
        .store()
        .append_row(RETAILERS_TAB, &[CellValue::text(draft.name.as_str())])
        .await?;
    record_mutation(tables, "append_retailer");
    Ok(())
}

pub async fn update_retailers<S: TableStore>(
    tables: &Tables<S>,
    updates: &[RetailerRowUpdate],
) -> anyhow::Result<usize> {
    let mut written = 0;
    for update in updates {
        if update.row == 0 {
            continue;
        }
        tables
            .store()
            .update_cells(
                RETAILERS_TAB,
                update.row,
                1,
                &[CellValue::text(update.draft.name.as_str())],
            )
            .await?;
        written += 1;
    }
    if written > 0 {
        record_mutation(tables, "update_retailers");
    }
    Ok(written)
}

pub async fn delete_retailer<S: TableStore>(tables: &Tables<S>, row: u32) -> anyhow::Result<()> {
    tables.store().delete_rows(RETAILERS_TAB, &[row]).await?;
    record_mutation(tables, "delete_retailer");
    Ok(())
}

pub async fn append_marketplace<S: TableStore>(
    tables: &Tables<S>,
    draft: &MarketplaceDraft,
) -> anyhow::Result<()> {
    tables
        .store()
        .append_row(MARKETPLACES_TAB, &marketplace_row_cells(draft))
        .await?;
    record_mutation(tables, "append_marketplace");
    Ok(())
}

pub async fn update_marketplaces<S: TableStore>(
    tables: &Tables<S>,
    updates: &[MarketplaceRowUpdate],
) -> anyhow::Result<usize> {
    let mut written = 0;
    for update in updates {
        if update.row == 0 {
            continue;
        }
        tables
            .store()
            .update_cells(
                MARKETPLACES_TAB,
                update.row,
                1,
                &marketplace_row_cells(&update.draft),
            )
            .await?;
        written += 1;
    }
    if written > 0 {
        record_mutation(tables, "update_marketplaces");
    }
    Ok(written)
}

pub async fn delete_marketplace<S: TableStore>(
    tables: &Tables<S>,
    row: u32,
) -> anyhow::Result<()> {
    tables.store().delete_rows(MARKETPLACES_TAB, &[row]).await?;
    record_mutation(tables, "delete_marketplace");
    Ok(())
}

// ---------------------------------------------------------------------------
// Row assembly
// ---------------------------------------------------------------------------

fn order_row_cells(draft: &OrderDraft) -> Vec<CellValue> {
    vec![
        CellValue::text(draft.order_date.as_str()),
        CellValue::text(draft.item.as_str()),
        CellValue::number(draft.buy_price),
        CellValue::text(draft.retailer.as_str()),
        CellValue::number(draft.sell_price),
        CellValue::text(draft.sale_date.as_str()),
        CellValue::text(draft.marketplace.as_str()),
        CellValue::number(normalize_fee(draft.fee_fraction)),
        CellValue::number(draft.shipping),
        // Derived P/L column stays writer-blank.
        CellValue::text(""),
    ]
}

fn item_row_cells(draft: &ItemDraft) -> Vec<CellValue> {
    vec![
        CellValue::text(draft.name.as_str()),
        CellValue::number(draft.market_value),
    ]
}

fn marketplace_row_cells(draft: &MarketplaceDraft) -> Vec<CellValue> {
    vec![
        CellValue::text(draft.name.as_str()),
        CellValue::number(normalize_fee(draft.fee_fraction)),
    ]
}

fn record_mutation<S: TableStore>(tables: &Tables<S>, op: &'static str) {
    counter!("mutations_total").increment(1);
    tracing::debug!(op, "mutation applied; snapshot cache cleared");
    tables.invalidate();
}
