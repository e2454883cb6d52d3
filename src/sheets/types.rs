use serde::{Deserialize, Serialize};

use crate::store::CellValue;

/// Body of `values.get` / `values.append` / `values.update` calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueRange {
    /// Absent entirely when the requested range is empty.
    #[serde(default)]
    pub values: Vec<Vec<CellValue>>,
}

/// Spreadsheet metadata, requested with `fields=sheets.properties`.
#[derive(Debug, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

/// `spreadsheets.batchUpdate` request envelope. Only the deleteDimension
/// request type is used here (structural row removal).
#[derive(Debug, Serialize)]
pub struct BatchUpdateBody {
    pub requests: Vec<BatchRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub delete_dimension: DeleteDimension,
}

#[derive(Debug, Serialize)]
pub struct DeleteDimension {
    pub range: DimensionRange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRange {
    pub sheet_id: i64,
    pub dimension: &'static str,
    /// 0-based, inclusive.
    pub start_index: u32,
    /// 0-based, exclusive.
    pub end_index: u32,
}
