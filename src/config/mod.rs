use std::env;
use std::time::Duration;

const DEFAULT_CACHE_TTL_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    /// Identity of the backing spreadsheet.
    pub spreadsheet_id: String,
    /// Ready bearer token for the Sheets API; acquisition/refresh is the
    /// host's concern.
    pub sheets_access_token: String,
    /// Override for tests and proxies.
    pub sheets_base_url: Option<String>,

    pub cache_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            spreadsheet_id: env::var("SPREADSHEET_ID")
                .map_err(|_| anyhow::anyhow!("SPREADSHEET_ID must be set"))?,
            sheets_access_token: env::var("SHEETS_ACCESS_TOKEN")
                .map_err(|_| anyhow::anyhow!("SHEETS_ACCESS_TOKEN must be set"))?,
            sheets_base_url: env::var("SHEETS_BASE_URL").ok(),

            cache_ttl: Duration::from_secs(
                env::var("CACHE_TTL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            ),
        })
    }
}
