pub mod memory;

use std::future::Future;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cell of the backing grid, as the Sheets API renders it with
/// `UNFORMATTED_VALUE` (dates arrive as formatted strings). The grid has
/// no schema: any cell can hold any of these at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> CellValue {
        CellValue::Text(s.into())
    }

    /// Decimal cells are written as JSON numbers, the way the original
    /// sheet stores prices. Out-of-range values degrade to 0 rather than
    /// failing the write.
    pub fn number(d: Decimal) -> CellValue {
        CellValue::Number(d.to_f64().unwrap_or(0.0))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Display rendering: empty cells read as "".
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }
}

/// Contract to the backing table store.
///
/// Row numbers are 1-based tab coordinates. `delete_rows` takes pre-shift
/// positions and must remove them as one structural operation, so callers
/// never compensate for the shifting of later rows mid-delete.
pub trait TableStore: Send + Sync {
    /// Fetch a cell range (A1 notation) of the named tab. Missing
    /// trailing cells may be absent from the returned rows.
    fn read_range(
        &self,
        tab: &str,
        range: &str,
    ) -> impl Future<Output = anyhow::Result<Vec<Vec<CellValue>>>> + Send;

    /// Append one row after the last data row of the tab.
    fn append_row(
        &self,
        tab: &str,
        row: &[CellValue],
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Overwrite `values.len()` cells of `row`, starting at 1-based
    /// column `start_col`.
    fn update_cells(
        &self,
        tab: &str,
        row: u32,
        start_col: u32,
        values: &[CellValue],
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Remove the given 1-based rows in one batched operation. Positions
    /// are interpreted against the pre-delete grid.
    fn delete_rows(
        &self,
        tab: &str,
        rows: &[u32],
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_deserializes_untagged() {
        let row: Vec<CellValue> =
            serde_json::from_str(r#"["2024-01-15", -12.5, "", true, null]"#).unwrap();
        assert_eq!(row[0], CellValue::Text("2024-01-15".into()));
        assert_eq!(row[1], CellValue::Number(-12.5));
        assert_eq!(row[2], CellValue::Text(String::new()));
        assert_eq!(row[3], CellValue::Bool(true));
        assert_eq!(row[4], CellValue::Empty);
    }

    #[test]
    fn test_empty_detection() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::text("").is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }
}
