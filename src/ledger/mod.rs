pub mod filter;
pub mod gateway;
pub mod holding;
pub mod inventory;
pub mod layout;
pub mod mapper;
pub mod reconcile;
pub mod stats;

use crate::grid::Tables;
use crate::models::{Item, LedgerEntry, Marketplace, Retailer};
use crate::store::TableStore;

/// Cached read of the order book, mapped to typed entries.
pub async fn load_entries<S: TableStore>(tables: &Tables<S>) -> anyhow::Result<Vec<LedgerEntry>> {
    let snapshot = tables
        .read_table(layout::ORDER_BOOK_TAB, layout::ORDER_BOOK_HEADER_ROW)
        .await?;
    Ok(mapper::map_entries(&snapshot))
}

pub async fn load_items<S: TableStore>(tables: &Tables<S>) -> anyhow::Result<Vec<Item>> {
    let snapshot = tables
        .read_table(layout::ITEMS_TAB, layout::REFERENCE_HEADER_ROW)
        .await?;
    Ok(mapper::map_items(&snapshot))
}

pub async fn load_retailers<S: TableStore>(tables: &Tables<S>) -> anyhow::Result<Vec<Retailer>> {
    let snapshot = tables
        .read_table(layout::RETAILERS_TAB, layout::REFERENCE_HEADER_ROW)
        .await?;
    Ok(mapper::map_retailers(&snapshot))
}

pub async fn load_marketplaces<S: TableStore>(
    tables: &Tables<S>,
) -> anyhow::Result<Vec<Marketplace>> {
    let snapshot = tables
        .read_table(layout::MARKETPLACES_TAB, layout::REFERENCE_HEADER_ROW)
        .await?;
    Ok(mapper::map_marketplaces(&snapshot))
}
