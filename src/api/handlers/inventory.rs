use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::ledger::inventory::{self, InventoryReport};
use crate::ledger::reconcile::reconcile;
use crate::ledger;
use crate::store::TableStore;
use crate::AppState;

pub async fn report<S: TableStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<InventoryReport>, AppError> {
    let entries = ledger::load_entries(&state.tables).await?;
    let items = ledger::load_items(&state.tables).await?;

    let reconciled = reconcile(entries);
    Ok(Json(inventory::valuate(&reconciled.tallies, &items)))
}
