use serde::{Deserialize, Serialize};

/// Reference record from the Retailers tab: a store items are bought from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retailer {
    /// 1-based row number in the tab.
    pub row: u32,
    pub name: String,
}
