use std::sync::Arc;

use fliptrack::api::router::create_router;
use fliptrack::config::AppConfig;
use fliptrack::grid::Tables;
use fliptrack::sheets::SheetsClient;
use fliptrack::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    let metrics_handle = fliptrack::metrics::init_metrics();

    let mut client = SheetsClient::new(
        reqwest::Client::new(),
        config.spreadsheet_id.clone(),
        config.sheets_access_token.clone(),
    );
    if let Some(base_url) = &config.sheets_base_url {
        client = client.with_base_url(base_url.clone());
    }

    let tables = Arc::new(Tables::new(client, config.cache_ttl));
    tracing::info!(
        spreadsheet = %config.spreadsheet_id,
        cache_ttl = ?config.cache_ttl,
        "Sheets client ready"
    );

    let state = AppState {
        tables,
        config,
        metrics_handle,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
