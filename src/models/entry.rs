use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cost::SignedCost;

/// One row of the Order Book tab: a purchase event, optionally carrying
/// sale details in the same row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// 1-based row number in the tab, the only identity used for
    /// update/delete.
    pub row: u32,
    pub order_date: Option<NaiveDate>,
    pub item: String,
    /// Stored negative.
    pub buy_price: SignedCost,
    pub retailer: String,
    /// 0 or absent means unsold.
    pub sell_price: Decimal,
    pub sale_date: Option<NaiveDate>,
    pub marketplace: String,
    /// Fraction of the sale price, normalized at write time.
    pub fee_fraction: Decimal,
    pub shipping: Decimal,
}

impl LedgerEntry {
    /// A recorded sale closes the position; anything else is open stock.
    pub fn is_sold(&self) -> bool {
        self.sell_price > Decimal::ZERO
    }

    /// Fee amount for the sale side: `sell_price * fee_fraction`.
    pub fn fee_amount(&self) -> Decimal {
        self.sell_price * self.fee_fraction
    }
}
