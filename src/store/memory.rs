use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::{CellValue, TableStore};

/// In-memory [`TableStore`]: a map of tab name to grid. Backs the test
/// suite and local dry runs; no remote spreadsheet required.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tabs: Mutex<HashMap<String, Vec<Vec<CellValue>>>>,
    reads: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a tab's grid wholesale.
    pub fn set_tab(&self, name: &str, grid: Vec<Vec<CellValue>>) {
        self.tabs.lock().unwrap().insert(name.to_string(), grid);
    }

    /// Number of `read_range` calls served, for cache assertions.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }
}

impl TableStore for MemoryStore {
    /// The reader always asks for the whole tab (`A1:ZZ`), so the range
    /// argument is not interpreted here.
    async fn read_range(&self, tab: &str, _range: &str) -> anyhow::Result<Vec<Vec<CellValue>>> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        let tabs = self.tabs.lock().unwrap();
        Ok(tabs.get(tab).cloned().unwrap_or_default())
    }

    async fn append_row(&self, tab: &str, row: &[CellValue]) -> anyhow::Result<()> {
        let mut tabs = self.tabs.lock().unwrap();
        tabs.entry(tab.to_string()).or_default().push(row.to_vec());
        Ok(())
    }

    async fn update_cells(
        &self,
        tab: &str,
        row: u32,
        start_col: u32,
        values: &[CellValue],
    ) -> anyhow::Result<()> {
        let mut tabs = self.tabs.lock().unwrap();
        let grid = tabs.entry(tab.to_string()).or_default();

        let row_idx = row.saturating_sub(1) as usize;
        if grid.len() <= row_idx {
            grid.resize(row_idx + 1, Vec::new());
        }
        let cells = &mut grid[row_idx];

        let start = start_col.saturating_sub(1) as usize;
        if cells.len() < start + values.len() {
            cells.resize(start + values.len(), CellValue::Empty);
        }
        cells[start..start + values.len()].clone_from_slice(values);
        Ok(())
    }

    async fn delete_rows(&self, tab: &str, rows: &[u32]) -> anyhow::Result<()> {
        let mut tabs = self.tabs.lock().unwrap();
        let grid = tabs.entry(tab.to_string()).or_default();

        // Removing from the bottom up keeps every remaining position
        // valid against the pre-delete grid, matching the batched
        // pre-shift contract of the trait.
        let mut sorted: Vec<u32> = rows.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for row in sorted.into_iter().rev() {
            let idx = row.saturating_sub(1) as usize;
            if idx < grid.len() {
                grid.remove(idx);
            }
        }
        Ok(())
    }
}
