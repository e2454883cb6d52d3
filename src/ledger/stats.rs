//! Period statistics over the ledger: one pass, two independent sides.
//!
//! A row's purchase side is counted when its order date falls in the
//! resolved window; its sale side is counted when it has a sale price, a
//! parseable sale date, and that date falls in the window. The same row
//! can contribute to both sides.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::{LedgerEntry, SignedCost, UNKNOWN_MARKETPLACE};

use super::filter::ItemFilter;
use super::mapper::parse_date;

// ---------------------------------------------------------------------------
// Date window
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeKey {
    Mtd,
    Last7,
    Last30,
    #[default]
    None,
}

impl RangeKey {
    /// Unknown keys fall back to `none`; dirty parameters are
    /// normalized, not rejected.
    pub fn from_param(s: &str) -> Self {
        match s {
            "mtd" => RangeKey::Mtd,
            "last7" => RangeKey::Last7,
            "last30" => RangeKey::Last30,
            _ => RangeKey::None,
        }
    }
}

/// Inclusive date window. With neither bound set, every date (and every
/// missing date) is in the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    /// The range key picks the defaults; each override independently
    /// replaces its bound when it parses.
    pub fn resolve(
        range: RangeKey,
        from_override: Option<&str>,
        to_override: Option<&str>,
        today: NaiveDate,
    ) -> Self {
        let (mut start, mut end) = match range {
            RangeKey::Mtd => (today.with_day(1), Some(today)),
            RangeKey::Last7 => (Some(today - Duration::days(7)), Some(today)),
            RangeKey::Last30 => (Some(today - Duration::days(30)), Some(today)),
            RangeKey::None => (None, None),
        };
        if let Some(from) = from_override.and_then(parse_date) {
            start = Some(from);
        }
        if let Some(to) = to_override.and_then(parse_date) {
            end = Some(to);
        }
        DateWindow { start, end }
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if !self.is_bounded() {
            return true;
        }
        match date {
            Some(d) => {
                self.start.map_or(true, |s| d >= s) && self.end.map_or(true, |e| d <= e)
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Result shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsSummary {
    pub bought_qty: u32,
    /// Purchase spend inside the window (negative).
    pub cost_bought: SignedCost,
    pub sold_qty: u32,
    pub revenue: Decimal,
    pub fees: Decimal,
    pub shipping: Decimal,
    /// Cost of the goods sold inside the window (negative).
    pub cost_sold: SignedCost,
    /// `revenue - fees - shipping + cost_sold`; the cost is negative,
    /// so the addition performs the deduction.
    pub profit: Decimal,
    /// `profit / |cost_sold|`, 0 when nothing was sold at cost.
    pub roi_pct: Decimal,
    /// `profit / revenue`, 0 when revenue is not positive.
    pub margin_pct: Decimal,
    /// Average sale price, `revenue / sold_qty`.
    pub asp: Decimal,
    /// Mean of `max(0, sale_date - order_date)` in whole days over
    /// entries where both dates parse, rounded; 0 with no such entries.
    pub avg_days_to_sell: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemRow {
    pub name: String,
    pub bought_qty: u32,
    pub cost: SignedCost,
    pub sold_qty: u32,
    pub revenue: Decimal,
    pub fees: Decimal,
    pub shipping: Decimal,
    pub cost_sold: SignedCost,
    pub profit: Decimal,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthRow {
    /// "YYYY-MM". Bought figures bucket by order month, sold figures by
    /// sale month, independently.
    pub month: String,
    pub bought_qty: u32,
    pub cost: SignedCost,
    pub sold_qty: u32,
    pub revenue: Decimal,
    pub cost_sold: SignedCost,
    pub profit: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct RetailerRow {
    pub name: String,
    pub bought_qty: u32,
    pub cost: SignedCost,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketplaceRow {
    pub name: String,
    pub sold_qty: u32,
    pub revenue: Decimal,
    pub fees: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResult {
    pub summary: StatsSummary,
    /// Sorted by profit descending, encounter order on ties.
    pub by_item: Vec<ItemRow>,
    /// Sorted ascending by month key.
    pub monthly: Vec<MonthRow>,
    /// Sorted by purchase spend magnitude descending.
    pub by_retailer: Vec<RetailerRow>,
    /// Sorted by revenue descending.
    pub by_marketplace: Vec<MarketplaceRow>,
    /// First 10 item names from the profit ordering, for charting.
    pub top_items: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsParams {
    pub range: RangeKey,
    pub item_filter: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Compute the full statistics rollup. `today` is injected by the caller
/// so the result is a pure function of its inputs.
pub fn compute(entries: &[LedgerEntry], params: &StatsParams, today: NaiveDate) -> StatsResult {
    let filter = ItemFilter::new(&params.item_filter);
    let window = DateWindow::resolve(
        params.range,
        params.from.as_deref(),
        params.to.as_deref(),
        today,
    );

    let mut summary = StatsSummary::default();
    let mut items: Vec<ItemRow> = Vec::new();
    let mut item_index: HashMap<String, usize> = HashMap::new();
    let mut months: BTreeMap<String, MonthRow> = BTreeMap::new();
    let mut retailers: Vec<RetailerRow> = Vec::new();
    let mut retailer_index: HashMap<String, usize> = HashMap::new();
    let mut marketplaces: Vec<MarketplaceRow> = Vec::new();
    let mut marketplace_index: HashMap<String, usize> = HashMap::new();

    let mut days_sum: i64 = 0;
    let mut days_count: i64 = 0;

    for entry in entries {
        if !filter.matches(&entry.item) {
            continue;
        }

        // Purchase side.
        if window.contains(entry.order_date) {
            summary.bought_qty += 1;
            summary.cost_bought += entry.buy_price;

            let row = item_row(&mut items, &mut item_index, &entry.item);
            row.bought_qty += 1;
            row.cost += entry.buy_price;

            if let Some(order_date) = entry.order_date {
                let month = months.entry(month_key(order_date)).or_default();
                month.bought_qty += 1;
                month.cost += entry.buy_price;
            }

            let retailer = retailer_row(&mut retailers, &mut retailer_index, &entry.retailer);
            retailer.bought_qty += 1;
            retailer.cost += entry.buy_price;
        }

        // Sale side.
        let Some(sale_date) = entry.sale_date else {
            continue;
        };
        if !entry.is_sold() || !window.contains(Some(sale_date)) {
            continue;
        }

        let fee = entry.fee_amount();
        let sale_profit =
            entry.sell_price - fee - entry.shipping + entry.buy_price.amount();

        summary.sold_qty += 1;
        summary.revenue += entry.sell_price;
        summary.fees += fee;
        summary.shipping += entry.shipping;
        summary.cost_sold += entry.buy_price;

        let row = item_row(&mut items, &mut item_index, &entry.item);
        row.sold_qty += 1;
        row.revenue += entry.sell_price;
        row.fees += fee;
        row.shipping += entry.shipping;
        row.cost_sold += entry.buy_price;
        row.profit += sale_profit;

        let month = months.entry(month_key(sale_date)).or_default();
        month.sold_qty += 1;
        month.revenue += entry.sell_price;
        month.cost_sold += entry.buy_price;
        month.profit += sale_profit;

        let venue = marketplace_label(&entry.marketplace);
        let marketplace = marketplace_row(&mut marketplaces, &mut marketplace_index, venue);
        marketplace.sold_qty += 1;
        marketplace.revenue += entry.sell_price;
        marketplace.fees += fee;
        marketplace.profit += sale_profit;

        if let Some(order_date) = entry.order_date {
            days_sum += (sale_date - order_date).num_days().max(0);
            days_count += 1;
        }
    }

    summary.profit =
        summary.revenue - summary.fees - summary.shipping + summary.cost_sold.amount();
    summary.roi_pct = if summary.cost_sold.is_zero() {
        Decimal::ZERO
    } else {
        summary.profit / summary.cost_sold.magnitude()
    };
    summary.margin_pct = if summary.revenue > Decimal::ZERO {
        summary.profit / summary.revenue
    } else {
        Decimal::ZERO
    };
    summary.asp = if summary.sold_qty > 0 {
        summary.revenue / Decimal::from(summary.sold_qty)
    } else {
        Decimal::ZERO
    };
    summary.avg_days_to_sell = if days_count > 0 {
        round_to_i64(Decimal::from(days_sum) / Decimal::from(days_count))
    } else {
        0
    };

    items.sort_by(|a, b| b.profit.cmp(&a.profit));
    let top_items: Vec<String> = items.iter().take(10).map(|r| r.name.clone()).collect();

    let monthly: Vec<MonthRow> = months
        .into_iter()
        .map(|(month, mut row)| {
            row.month = month;
            row
        })
        .collect();

    retailers.sort_by(|a, b| b.cost.magnitude().cmp(&a.cost.magnitude()));
    marketplaces.sort_by(|a, b| b.revenue.cmp(&a.revenue));

    StatsResult {
        summary,
        by_item: items,
        monthly,
        by_retailer: retailers,
        by_marketplace: marketplaces,
        top_items,
    }
}

fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn marketplace_label(name: &str) -> &str {
    if name.trim().is_empty() {
        UNKNOWN_MARKETPLACE
    } else {
        name
    }
}

fn round_to_i64(d: Decimal) -> i64 {
    use rust_decimal::prelude::ToPrimitive;
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

fn item_row<'a>(
    rows: &'a mut Vec<ItemRow>,
    index: &mut HashMap<String, usize>,
    name: &str,
) -> &'a mut ItemRow {
    let slot = *index.entry(name.to_string()).or_insert_with(|| {
        rows.push(ItemRow {
            name: name.to_string(),
            bought_qty: 0,
            cost: SignedCost::ZERO,
            sold_qty: 0,
            revenue: Decimal::ZERO,
            fees: Decimal::ZERO,
            shipping: Decimal::ZERO,
            cost_sold: SignedCost::ZERO,
            profit: Decimal::ZERO,
        });
        rows.len() - 1
    });
    &mut rows[slot]
}

fn retailer_row<'a>(
    rows: &'a mut Vec<RetailerRow>,
    index: &mut HashMap<String, usize>,
    name: &str,
) -> &'a mut RetailerRow {
    let slot = *index.entry(name.to_string()).or_insert_with(|| {
        rows.push(RetailerRow {
            name: name.to_string(),
            bought_qty: 0,
            cost: SignedCost::ZERO,
        });
        rows.len() - 1
    });
    &mut rows[slot]
}

fn marketplace_row<'a>(
    rows: &'a mut Vec<MarketplaceRow>,
    index: &mut HashMap<String, usize>,
    name: &str,
) -> &'a mut MarketplaceRow {
    let slot = *index.entry(name.to_string()).or_insert_with(|| {
        rows.push(MarketplaceRow {
            name: name.to_string(),
            sold_qty: 0,
            revenue: Decimal::ZERO,
            fees: Decimal::ZERO,
            profit: Decimal::ZERO,
        });
        rows.len() - 1
    });
    &mut rows[slot]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
