use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::errors::AppError;
use crate::ledger::gateway::{
    self, ItemDraft, ItemRowUpdate, MarketplaceDraft, MarketplaceRowUpdate, RetailerDraft,
    RetailerRowUpdate,
};
use crate::ledger;
use crate::models::{Item, Marketplace, Retailer};
use crate::store::TableStore;
use crate::AppState;

/// Reference records with their row positions, for the maintenance
/// screen.
#[derive(Serialize)]
pub struct DatabaseFull {
    pub items: Vec<Item>,
    pub retailers: Vec<Retailer>,
    pub marketplaces: Vec<Marketplace>,
}

pub async fn full<S: TableStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<DatabaseFull>, AppError> {
    Ok(Json(DatabaseFull {
        items: ledger::load_items(&state.tables).await?,
        retailers: ledger::load_retailers(&state.tables).await?,
        marketplaces: ledger::load_marketplaces(&state.tables).await?,
    }))
}

// ----- Items -----

pub async fn create_item<S: TableStore>(
    State(state): State<AppState<S>>,
    Json(draft): Json<ItemDraft>,
) -> Result<Json<serde_json::Value>, AppError> {
    gateway::append_item(&state.tables, &draft).await?;
    Ok(Json(json!({ "success": true, "added": 1 })))
}

pub async fn update_items<S: TableStore>(
    State(state): State<AppState<S>>,
    Json(rows): Json<Vec<ItemRowUpdate>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = gateway::update_items(&state.tables, &rows).await?;
    Ok(Json(json!({ "success": true, "updated": updated })))
}

pub async fn remove_item<S: TableStore>(
    State(state): State<AppState<S>>,
    Path(row): Path<u32>,
) -> Result<Json<serde_json::Value>, AppError> {
    gateway::delete_item(&state.tables, row).await?;
    Ok(Json(json!({ "success": true, "deleted": 1 })))
}

// ----- Retailers -----

pub async fn create_retailer<S: TableStore>(
    State(state): State<AppState<S>>,
    Json(draft): Json<RetailerDraft>,
) -> Result<Json<serde_json::Value>, AppError> {
    gateway::append_retailer(&state.tables, &draft).await?;
    Ok(Json(json!({ "success": true, "added": 1 })))
}

pub async fn update_retailers<S: TableStore>(
    State(state): State<AppState<S>>,
    Json(rows): Json<Vec<RetailerRowUpdate>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = gateway::update_retailers(&state.tables, &rows).await?;
    Ok(Json(json!({ "success": true, "updated": updated })))
}

pub async fn remove_retailer<S: TableStore>(
    State(state): State<AppState<S>>,
    Path(row): Path<u32>,
) -> Result<Json<serde_json::Value>, AppError> {
    gateway::delete_retailer(&state.tables, row).await?;
    Ok(Json(json!({ "success": true, "deleted": 1 })))
}

// ----- Marketplaces -----

pub async fn create_marketplace<S: TableStore>(
    State(state): State<AppState<S>>,
    Json(draft): Json<MarketplaceDraft>,
) -> Result<Json<serde_json::Value>, AppError> {
    gateway::append_marketplace(&state.tables, &draft).await?;
    Ok(Json(json!({ "success": true, "added": 1 })))
}

pub async fn update_marketplaces<S: TableStore>(
    State(state): State<AppState<S>>,
    Json(rows): Json<Vec<MarketplaceRowUpdate>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = gateway::update_marketplaces(&state.tables, &rows).await?;
    Ok(Json(json!({ "success": true, "updated": updated })))
}

pub async fn remove_marketplace<S: TableStore>(
    State(state): State<AppState<S>>,
    Path(row): Path<u32>,
) -> Result<Json<serde_json::Value>, AppError> {
    gateway::delete_marketplace(&state.tables, row).await?;
    Ok(Json(json!({ "success": true, "deleted": 1 })))
}
