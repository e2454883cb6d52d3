use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Reference record from the Items tab: a product the ledger can hold,
/// with its current market value per unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// 1-based row number in the tab, the only identity used for
    /// update/delete.
    pub row: u32,
    pub name: String,
    pub market_value: Decimal,
}
