//! Age of the oldest unsold position.

use chrono::NaiveDate;

use crate::models::LedgerEntry;

use super::filter::ItemFilter;

/// Whole-day age of the oldest open position whose item matches the
/// filter, floored at 0. Returns 0 when nothing matches, by contract
/// indistinguishable from a position opened today.
///
/// Only open rows (no recorded sale) with a parseable order date are
/// considered.
pub fn oldest_open_age_days(
    open: &[LedgerEntry],
    item_filter: &str,
    today: NaiveDate,
) -> i64 {
    let filter = ItemFilter::new(item_filter);
    open.iter()
        .filter(|e| filter.matches(&e.item))
        .filter_map(|e| e.order_date)
        .min()
        .map(|oldest| (today - oldest).num_days().max(0))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SignedCost;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn open_entry(item: &str, order: Option<NaiveDate>) -> LedgerEntry {
        LedgerEntry {
            row: 3,
            order_date: order,
            item: item.into(),
            buy_price: SignedCost::from_raw(Decimal::from(-10)),
            retailer: String::new(),
            sell_price: Decimal::ZERO,
            sale_date: None,
            marketplace: String::new(),
            fee_fraction: Decimal::ZERO,
            shipping: Decimal::ZERO,
        }
    }

    #[test]
    fn test_oldest_matching_entry_wins() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let open = vec![
            open_entry("Widget", Some(today - Duration::days(30))),
            open_entry("Widget", Some(today - Duration::days(5))),
        ];
        assert_eq!(oldest_open_age_days(&open, "widget", today), 30);
    }

    #[test]
    fn test_non_matching_filter_returns_zero() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let open = vec![open_entry("Widget", Some(today - Duration::days(30)))];
        assert_eq!(oldest_open_age_days(&open, "gadget", today), 0);
    }

    #[test]
    fn test_undated_rows_are_ignored() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let open = vec![open_entry("Widget", None)];
        assert_eq!(oldest_open_age_days(&open, "", today), 0);
    }

    #[test]
    fn test_future_dated_row_floors_at_zero() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let open = vec![open_entry("Widget", Some(today + Duration::days(3)))];
        assert_eq!(oldest_open_age_days(&open, "", today), 0);
    }
}
