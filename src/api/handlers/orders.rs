use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::errors::AppError;
use crate::ledger::gateway::{self, OrderDraft, OrderRowUpdate, SaleDetails};
use crate::ledger;
use crate::models::{LedgerEntry, SignedCost};
use crate::store::TableStore;
use crate::AppState;

/// Every ledger row with its position, for the bulk-edit screen.
pub async fn list<S: TableStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<LedgerEntry>>, AppError> {
    Ok(Json(ledger::load_entries(&state.tables).await?))
}

/// Open position with a display label for the mark-as-sold picker.
#[derive(Serialize)]
pub struct OpenPurchase {
    pub row: u32,
    pub label: String,
    pub item: String,
    pub buy_price: SignedCost,
    pub order_date: Option<NaiveDate>,
    pub retailer: String,
}

pub async fn open_positions<S: TableStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<OpenPurchase>>, AppError> {
    let entries = ledger::load_entries(&state.tables).await?;

    let open: Vec<OpenPurchase> = entries
        .into_iter()
        .filter(|e| !e.is_sold())
        .map(|e| {
            let date = e.order_date.map(|d| d.to_string()).unwrap_or_default();
            let label = format!(
                "{} • {} • ${} • {}",
                date,
                e.item,
                e.buy_price.amount(),
                e.retailer
            );
            OpenPurchase {
                row: e.row,
                label,
                item: e.item,
                buy_price: e.buy_price,
                order_date: e.order_date,
                retailer: e.retailer,
            }
        })
        .collect();

    Ok(Json(open))
}

pub async fn create<S: TableStore>(
    State(state): State<AppState<S>>,
    Json(draft): Json<OrderDraft>,
) -> Result<Json<serde_json::Value>, AppError> {
    gateway::append_order(&state.tables, &draft).await?;
    Ok(Json(json!({ "success": true, "added": 1 })))
}

pub async fn update_rows<S: TableStore>(
    State(state): State<AppState<S>>,
    Json(rows): Json<Vec<OrderRowUpdate>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = gateway::update_orders(&state.tables, &rows).await?;
    Ok(Json(json!({ "success": true, "updated": updated })))
}

#[derive(Deserialize)]
pub struct DeleteOrdersRequest {
    pub rows: Vec<u32>,
}

pub async fn delete_rows<S: TableStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<DeleteOrdersRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = gateway::delete_orders(&state.tables, &body.rows).await?;
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}

pub async fn mark_sold<S: TableStore>(
    State(state): State<AppState<S>>,
    Json(sale): Json<SaleDetails>,
) -> Result<Json<serde_json::Value>, AppError> {
    if sale.row == 0 {
        return Err(AppError::BadRequest("row must be a positive position".into()));
    }
    let row = sale.row;
    gateway::mark_sold(&state.tables, &sale).await?;
    Ok(Json(json!({ "success": true, "row": row })))
}
