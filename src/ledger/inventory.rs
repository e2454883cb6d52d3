//! Point-in-time valuation of the unsold stock.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{Item, SignedCost};

use super::reconcile::ItemTally;

#[derive(Debug, Clone, Serialize)]
pub struct ItemValuation {
    pub name: String,
    pub on_hand_qty: u32,
    /// Cost basis of the unsold units, still negative.
    pub on_hand_cost: SignedCost,
    pub avg_cost: SignedCost,
    /// Market value per unit from the Items tab; 0 when the item is not
    /// listed there.
    pub market_value: Decimal,
    pub est_value: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InventoryTotals {
    pub on_hand_qty: u32,
    pub cost: SignedCost,
    pub est_value: Decimal,
    /// `est_value + cost`; cost is negative, so this is the estimated
    /// gain over the remaining basis.
    pub unrealized: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    pub items: Vec<ItemValuation>,
    pub totals: InventoryTotals,
}

/// Roll up every item with stock on hand. Monetary outputs are rounded
/// to 2 decimal places, half away from zero; the list is sorted by
/// on-hand quantity descending with ties in encounter order.
pub fn valuate(tallies: &[ItemTally], items: &[Item]) -> InventoryReport {
    let market: HashMap<&str, Decimal> = items
        .iter()
        .map(|i| (i.name.as_str(), i.market_value))
        .collect();

    let mut rows: Vec<ItemValuation> = Vec::new();
    let mut totals = InventoryTotals::default();

    for tally in tallies {
        let qty = tally.on_hand_qty();
        if qty == 0 {
            continue;
        }

        let on_hand_cost = round_cost(tally.on_hand_cost());
        let avg_cost = round_cost(SignedCost::from_raw(
            tally.on_hand_cost().amount() / Decimal::from(qty),
        ));
        let market_value = market.get(tally.name.as_str()).copied().unwrap_or_default();
        let est_value = round2(market_value * Decimal::from(qty));

        totals.on_hand_qty += qty;
        totals.cost += on_hand_cost;
        totals.est_value += est_value;

        rows.push(ItemValuation {
            name: tally.name.clone(),
            on_hand_qty: qty,
            on_hand_cost,
            avg_cost,
            market_value,
            est_value,
        });
    }

    rows.sort_by(|a, b| b.on_hand_qty.cmp(&a.on_hand_qty));
    totals.unrealized = totals.est_value + totals.cost.amount();

    InventoryReport {
        items: rows,
        totals,
    }
}

fn round2(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn round_cost(c: SignedCost) -> SignedCost {
    c.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
