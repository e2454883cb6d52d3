use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::TableStore;
use crate::AppState;

use super::handlers;

pub fn create_router<S: TableStore + 'static>(state: AppState<S>) -> Router {
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render::<S>));

    let api = Router::new()
        // Reference data
        .route("/api/model/init", get(handlers::model::init::<S>))
        .route("/api/database", get(handlers::database::full::<S>))
        .route(
            "/api/database/items",
            post(handlers::database::create_item::<S>).put(handlers::database::update_items::<S>),
        )
        .route(
            "/api/database/items/:row",
            delete(handlers::database::remove_item::<S>),
        )
        .route(
            "/api/database/retailers",
            post(handlers::database::create_retailer::<S>)
                .put(handlers::database::update_retailers::<S>),
        )
        .route(
            "/api/database/retailers/:row",
            delete(handlers::database::remove_retailer::<S>),
        )
        .route(
            "/api/database/marketplaces",
            post(handlers::database::create_marketplace::<S>)
                .put(handlers::database::update_marketplaces::<S>),
        )
        .route(
            "/api/database/marketplaces/:row",
            delete(handlers::database::remove_marketplace::<S>),
        )
        // Order book
        .route(
            "/api/orders",
            get(handlers::orders::list::<S>)
                .post(handlers::orders::create::<S>)
                .put(handlers::orders::update_rows::<S>)
                .delete(handlers::orders::delete_rows::<S>),
        )
        .route("/api/orders/open", get(handlers::orders::open_positions::<S>))
        .route("/api/orders/sold", post(handlers::orders::mark_sold::<S>))
        // Aggregates
        .route("/api/inventory", get(handlers::inventory::report::<S>))
        .route("/api/stats", get(handlers::stats::period_stats::<S>))
        .route(
            "/api/stats/holding-age",
            get(handlers::stats::oldest_hold::<S>),
        );

    // CORS: the UI is served from a different origin than this backend.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
