use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use metrics::counter;

use crate::store::{CellValue, TableStore};

/// The reader always fetches the whole tab; the fixed layouts never reach
/// column ZZ.
const FULL_RANGE: &str = "A1:ZZ";

/// Immutable read of one tab: the header row split from the data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

struct CacheEntry {
    inserted_at: Instant,
    snapshot: Arc<TableSnapshot>,
}

/// Per-tab snapshot memo with a fixed time-to-live measured from
/// insertion. A hit never revalidates against the store; any mutation
/// clears the whole map (rename-type operations can move row positions
/// in unrelated tabs). Last-writer-wins under the lock, no negative
/// caching.
pub struct SnapshotCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl SnapshotCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, tab: &str) -> Option<Arc<TableSnapshot>> {
        self.get_at(tab, Instant::now())
    }

    fn get_at(&self, tab: &str, now: Instant) -> Option<Arc<TableSnapshot>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(tab) {
            Some(entry) if now.duration_since(entry.inserted_at) < self.ttl => {
                Some(Arc::clone(&entry.snapshot))
            }
            Some(_) => {
                entries.remove(tab);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, tab: &str, snapshot: Arc<TableSnapshot>) {
        self.entries.lock().unwrap().insert(
            tab.to_string(),
            CacheEntry {
                inserted_at: Instant::now(),
                snapshot,
            },
        );
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// Read-through access to the backing grid store.
pub struct Tables<S> {
    store: S,
    cache: SnapshotCache,
}

impl<S: TableStore> Tables<S> {
    pub fn new(store: S, cache_ttl: Duration) -> Self {
        Self {
            store,
            cache: SnapshotCache::new(cache_ttl),
        }
    }

    /// Fetch a tab's snapshot, serving from cache within the TTL.
    /// `header_row` is the 1-based row holding the column titles; data
    /// rows follow it. Read failures propagate and are not cached.
    pub async fn read_table(
        &self,
        tab: &str,
        header_row: u32,
    ) -> anyhow::Result<Arc<TableSnapshot>> {
        if let Some(hit) = self.cache.get(tab) {
            counter!("cache_hits_total").increment(1);
            return Ok(hit);
        }

        let grid = self.store.read_range(tab, FULL_RANGE).await?;
        counter!("sheet_reads_total").increment(1);

        let header_idx = header_row.saturating_sub(1) as usize;
        let headers = grid
            .get(header_idx)
            .map(|row| row.iter().map(|c| c.as_text().trim().to_string()).collect())
            .unwrap_or_default();
        let rows = grid.into_iter().skip(header_idx + 1).collect();

        let snapshot = Arc::new(TableSnapshot { headers, rows });
        self.cache.insert(tab, Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Wholesale cache invalidation; called after every mutation.
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
