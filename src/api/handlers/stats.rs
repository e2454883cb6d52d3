use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::errors::AppError;
use crate::ledger::holding::oldest_open_age_days;
use crate::ledger::reconcile::reconcile;
use crate::ledger::stats::{self, RangeKey, StatsParams, StatsResult};
use crate::ledger;
use crate::store::TableStore;
use crate::AppState;

#[derive(Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

pub async fn period_stats<S: TableStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResult>, AppError> {
    let entries = ledger::load_entries(&state.tables).await?;

    let params = StatsParams {
        range: RangeKey::from_param(query.range.as_deref().unwrap_or_default()),
        item_filter: query.item.unwrap_or_default(),
        from: query.from,
        to: query.to,
    };
    let today = Utc::now().date_naive();

    Ok(Json(stats::compute(&entries, &params, today)))
}

#[derive(Deserialize)]
pub struct HoldingQuery {
    #[serde(default)]
    pub item: Option<String>,
}

/// Age in days of the oldest unsold position matching the filter; 0 when
/// nothing matches.
pub async fn oldest_hold<S: TableStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<HoldingQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let entries = ledger::load_entries(&state.tables).await?;
    let reconciled = reconcile(entries);

    let today = Utc::now().date_naive();
    let days = oldest_open_age_days(
        &reconciled.open,
        query.item.as_deref().unwrap_or_default(),
        today,
    );

    Ok(Json(json!({ "days": days })))
}
