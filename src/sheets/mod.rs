pub mod types;

use reqwest::Client;
use thiserror::Error;

use crate::store::{CellValue, TableStore};
use types::{
    BatchRequest, BatchUpdateBody, DeleteDimension, DimensionRange, SpreadsheetMeta, ValueRange,
};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no tab named {0:?} in the spreadsheet")]
    MissingTab(String),
}

/// Google Sheets v4 adapter behind the [`TableStore`] seam.
///
/// Credential acquisition is the host's concern: the client is handed a
/// ready bearer token and never refreshes it.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: Client,
    base_url: String,
    spreadsheet_id: String,
    access_token: String,
}

impl SheetsClient {
    pub fn new(
        http: Client,
        spreadsheet_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: SHEETS_API_BASE.into(),
            spreadsheet_id: spreadsheet_id.into(),
            access_token: access_token.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/{}/values/{}",
            self.base_url, self.spreadsheet_id, range
        )
    }

    /// Dates are rendered as formatted strings so the mapper sees
    /// calendar text, not serial numbers.
    async fn get_values(&self, range: &str) -> Result<Vec<Vec<CellValue>>, SheetsError> {
        let resp = self
            .http
            .get(self.values_url(range))
            .bearer_auth(&self.access_token)
            .query(&[
                ("valueRenderOption", "UNFORMATTED_VALUE"),
                ("dateTimeRenderOption", "FORMATTED_STRING"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ValueRange = resp.json().await?;
        Ok(body.values)
    }

    async fn append_values(&self, range: &str, row: &[CellValue]) -> Result<(), SheetsError> {
        self.http
            .post(format!("{}:append", self.values_url(range)))
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&ValueRange {
                values: vec![row.to_vec()],
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update_values(&self, range: &str, row: &[CellValue]) -> Result<(), SheetsError> {
        self.http
            .put(self.values_url(range))
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", "USER_ENTERED")])
            .json(&ValueRange {
                values: vec![row.to_vec()],
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Resolve a tab title to its numeric sheetId via the metadata
    /// endpoint (needed only for structural requests).
    async fn tab_id(&self, tab: &str) -> Result<i64, SheetsError> {
        let resp = self
            .http
            .get(format!("{}/{}", self.base_url, self.spreadsheet_id))
            .bearer_auth(&self.access_token)
            .query(&[("fields", "sheets.properties")])
            .send()
            .await?
            .error_for_status()?;

        let meta: SpreadsheetMeta = resp.json().await?;
        meta.sheets
            .into_iter()
            .find(|s| s.properties.title == tab)
            .map(|s| s.properties.sheet_id)
            .ok_or_else(|| SheetsError::MissingTab(tab.to_string()))
    }

    async fn batch_delete(&self, tab: &str, rows: &[u32]) -> Result<(), SheetsError> {
        let sheet_id = self.tab_id(tab).await?;

        let mut sorted: Vec<u32> = rows.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        // batchUpdate applies requests in order, so pre-shift positions
        // are issued bottom-up: each deletion leaves the earlier
        // positions untouched.
        let requests: Vec<BatchRequest> = sorted
            .into_iter()
            .rev()
            .map(|row| BatchRequest {
                delete_dimension: DeleteDimension {
                    range: DimensionRange {
                        sheet_id,
                        dimension: "ROWS",
                        start_index: row.saturating_sub(1),
                        end_index: row,
                    },
                },
            })
            .collect();

        self.http
            .post(format!(
                "{}/{}:batchUpdate",
                self.base_url, self.spreadsheet_id
            ))
            .bearer_auth(&self.access_token)
            .json(&BatchUpdateBody { requests })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl TableStore for SheetsClient {
    async fn read_range(&self, tab: &str, range: &str) -> anyhow::Result<Vec<Vec<CellValue>>> {
        Ok(self.get_values(&quoted_range(tab, range)).await?)
    }

    async fn append_row(&self, tab: &str, row: &[CellValue]) -> anyhow::Result<()> {
        Ok(self.append_values(&quoted_range(tab, "A1"), row).await?)
    }

    async fn update_cells(
        &self,
        tab: &str,
        row: u32,
        start_col: u32,
        values: &[CellValue],
    ) -> anyhow::Result<()> {
        let end_col = start_col + values.len() as u32 - 1;
        let range = row_range(tab, row, start_col, end_col);
        Ok(self.update_values(&range, values).await?)
    }

    async fn delete_rows(&self, tab: &str, rows: &[u32]) -> anyhow::Result<()> {
        Ok(self.batch_delete(tab, rows).await?)
    }
}

/// A1 range with the tab title quoted (titles may contain spaces;
/// embedded apostrophes are doubled).
fn quoted_range(tab: &str, cells: &str) -> String {
    format!("'{}'!{}", tab.replace('\'', "''"), cells)
}

/// Single-row range between two 1-based columns, e.g. `'Order Book'!E5:I5`.
fn row_range(tab: &str, row: u32, c1: u32, c2: u32) -> String {
    quoted_range(
        tab,
        &format!("{}{}:{}{}", col_to_a1(c1), row, col_to_a1(c2), row),
    )
}

/// 1-based column number to its A1 letter form (1 → A, 27 → AA).
fn col_to_a1(mut n: u32) -> String {
    let mut s = String::new();
    while n > 0 {
        n -= 1;
        s.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    s
}
