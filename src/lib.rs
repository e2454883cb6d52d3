pub mod api;
pub mod config;
pub mod errors;
pub mod grid;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod sheets;
pub mod store;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::grid::Tables;

pub struct AppState<S> {
    pub tables: Arc<Tables<S>>,
    pub config: AppConfig,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
            config: self.config.clone(),
            metrics_handle: self.metrics_handle.clone(),
        }
    }
}
