use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::AppError;
use crate::ledger;
use crate::store::TableStore;
use crate::AppState;

#[derive(Serialize)]
pub struct MarketplaceFee {
    pub name: String,
    pub fee_fraction: Decimal,
}

/// Name lists for UI dropdown seeding.
#[derive(Serialize)]
pub struct InitModel {
    pub items: Vec<String>,
    pub retailers: Vec<String>,
    pub marketplaces: Vec<String>,
    pub marketplaces_with_fees: Vec<MarketplaceFee>,
}

pub async fn init<S: TableStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<InitModel>, AppError> {
    let items = ledger::load_items(&state.tables).await?;
    let retailers = ledger::load_retailers(&state.tables).await?;
    let marketplaces = ledger::load_marketplaces(&state.tables).await?;

    Ok(Json(InitModel {
        items: items.into_iter().map(|i| i.name).collect(),
        retailers: retailers.into_iter().map(|r| r.name).collect(),
        marketplaces: marketplaces.iter().map(|m| m.name.clone()).collect(),
        marketplaces_with_fees: marketplaces
            .into_iter()
            .map(|m| MarketplaceFee {
                name: m.name,
                fee_fraction: m.fee_fraction,
            })
            .collect(),
    }))
}
