//! Open/closed partitioning of the flat ledger plus the per-item running
//! tally every aggregate builds on.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{LedgerEntry, SignedCost};

/// Per-item rollup from one pass over the ledger. Never persisted;
/// always recomputed from a full scan.
#[derive(Debug, Clone)]
pub struct ItemTally {
    pub name: String,
    pub bought_qty: u32,
    pub sold_qty: u32,
    /// Cost of every purchase of the item (negative).
    pub cost_all: SignedCost,
    /// Cost of the purchases that have since sold (negative).
    pub cost_sold: SignedCost,
}

impl ItemTally {
    fn new(name: String) -> Self {
        Self {
            name,
            bought_qty: 0,
            sold_qty: 0,
            cost_all: SignedCost::ZERO,
            cost_sold: SignedCost::ZERO,
        }
    }

    /// Floored at 0: a ledger recording more sales than purchases is a
    /// tolerated anomaly, not an error.
    pub fn on_hand_qty(&self) -> u32 {
        self.bought_qty.saturating_sub(self.sold_qty)
    }

    /// Cost basis of the unsold units (still negative).
    pub fn on_hand_cost(&self) -> SignedCost {
        self.cost_all - self.cost_sold
    }
}

#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    /// Purchase rows with no recorded sale (sell price <= 0).
    pub open: Vec<LedgerEntry>,
    /// Rows with a recorded sale (sell price > 0).
    pub closed: Vec<LedgerEntry>,
    /// Per-item tallies in first-seen order, so downstream stable sorts
    /// keep encounter order on ties.
    pub tallies: Vec<ItemTally>,
}

/// Single pass: every entry counts as bought and adds its (negative) buy
/// price to the item's cost; sold entries additionally count as sold and
/// add the buy price to the sold-cost bucket.
pub fn reconcile(entries: Vec<LedgerEntry>) -> Reconciled {
    let mut out = Reconciled::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let slot = *index.entry(entry.item.clone()).or_insert_with(|| {
            out.tallies.push(ItemTally::new(entry.item.clone()));
            out.tallies.len() - 1
        });
        let tally = &mut out.tallies[slot];

        tally.bought_qty += 1;
        tally.cost_all += entry.buy_price;

        if entry.sell_price > Decimal::ZERO {
            tally.sold_qty += 1;
            tally.cost_sold += entry.buy_price;
            out.closed.push(entry);
        } else {
            out.open.push(entry);
        }
    }

    out
}
