//! Raw grid rows to typed records.
//!
//! Coercion is total: the grid has no schema enforcement, so every
//! accessor normalizes dirty input to a default instead of failing:
//! numbers to 0, dates to "no date", missing cells to empty. Rows whose
//! primary name is blank after trimming are dropped entirely.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::grid::TableSnapshot;
use crate::models::{Item, LedgerEntry, Marketplace, Retailer, SignedCost};
use crate::store::CellValue;

use super::layout;

const EMPTY_CELL: &CellValue = &CellValue::Empty;

/// Safe indexed lookup: a missing cell reads as empty, never a fault.
fn cell(row: &[CellValue], idx: usize) -> &CellValue {
    row.get(idx).unwrap_or(EMPTY_CELL)
}

fn cell_text(row: &[CellValue], idx: usize) -> String {
    cell(row, idx).as_text()
}

/// Numeric coercion: empty, non-numeric, and NaN all floor to 0.
pub fn to_number(value: &CellValue) -> Decimal {
    match value {
        CellValue::Number(f) => Decimal::try_from(*f).unwrap_or(Decimal::ZERO),
        CellValue::Bool(b) => {
            if *b {
                Decimal::ONE
            } else {
                Decimal::ZERO
            }
        }
        CellValue::Text(s) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
        CellValue::Empty => Decimal::ZERO,
    }
}

/// Date coercion: empty or unparsable input is "no date", silently.
pub fn to_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Text(s) => parse_date(s),
        _ => None,
    }
}

/// Accepts `YYYY-MM-DD` (including an RFC-3339 prefix) and `M/D/YYYY`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            s.get(..10)
                .and_then(|p| NaiveDate::parse_from_str(p, "%Y-%m-%d").ok())
        })
        .or_else(|| NaiveDate::parse_from_str(s, "%m/%d/%Y").ok())
}

/// Map the order book snapshot into ledger entries. Each entry keeps its
/// 1-based tab row for later mutation targeting; rows with a blank item
/// name are excluded from every downstream aggregate.
pub fn map_entries(snapshot: &TableSnapshot) -> Vec<LedgerEntry> {
    use layout::order_book as col;

    snapshot
        .rows
        .iter()
        .enumerate()
        .filter_map(|(offset, row)| {
            let item = cell_text(row, col::ITEM);
            if item.trim().is_empty() {
                return None;
            }
            Some(LedgerEntry {
                row: layout::ORDER_BOOK_HEADER_ROW + 1 + offset as u32,
                order_date: to_date(cell(row, col::ORDER_DATE)),
                item,
                buy_price: SignedCost::from_raw(to_number(cell(row, col::BUY_PRICE))),
                retailer: cell_text(row, col::RETAILER),
                sell_price: to_number(cell(row, col::SELL_PRICE)),
                sale_date: to_date(cell(row, col::SALE_DATE)),
                marketplace: cell_text(row, col::MARKETPLACE),
                fee_fraction: to_number(cell(row, col::FEE_FRACTION)),
                shipping: to_number(cell(row, col::SHIPPING)),
            })
        })
        .collect()
}

pub fn map_items(snapshot: &TableSnapshot) -> Vec<Item> {
    use layout::items as col;

    reference_rows(snapshot, col::NAME)
        .map(|(row_number, name, row)| Item {
            row: row_number,
            name,
            market_value: to_number(cell(row, col::MARKET_VALUE)),
        })
        .collect()
}

pub fn map_retailers(snapshot: &TableSnapshot) -> Vec<Retailer> {
    use layout::retailers as col;

    reference_rows(snapshot, col::NAME)
        .map(|(row_number, name, _)| Retailer {
            row: row_number,
            name,
        })
        .collect()
}

pub fn map_marketplaces(snapshot: &TableSnapshot) -> Vec<Marketplace> {
    use layout::marketplaces as col;

    reference_rows(snapshot, col::NAME)
        .map(|(row_number, name, row)| Marketplace {
            row: row_number,
            name,
            fee_fraction: to_number(cell(row, col::FEE_FRACTION)),
        })
        .collect()
}

/// Shared walk over a reference tab: yields (1-based row, trimmed name,
/// raw cells), skipping blank-name rows.
fn reference_rows<'a>(
    snapshot: &'a TableSnapshot,
    name_col: usize,
) -> impl Iterator<Item = (u32, String, &'a [CellValue])> {
    snapshot.rows.iter().enumerate().filter_map(move |(offset, row)| {
        let name = cell_text(row, name_col).trim().to_string();
        if name.is_empty() {
            return None;
        }
        Some((
            layout::REFERENCE_HEADER_ROW + 1 + offset as u32,
            name,
            row.as_slice(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::text(s)
    }

    #[test]
    fn test_to_number_normalizes_dirty_input() {
        assert_eq!(to_number(&text("")), Decimal::ZERO);
        assert_eq!(to_number(&CellValue::Empty), Decimal::ZERO);
        assert_eq!(to_number(&text("abc")), Decimal::ZERO);
        assert_eq!(to_number(&text("3.5")), Decimal::new(35, 1));
        assert_eq!(to_number(&CellValue::Number(-12.0)), Decimal::from(-12));
        assert_eq!(to_number(&CellValue::Number(f64::NAN)), Decimal::ZERO);
    }

    #[test]
    fn test_to_date_is_silent_on_garbage() {
        assert_eq!(to_date(&text("")), None);
        assert_eq!(to_date(&text("not a date")), None);
        assert_eq!(
            to_date(&text("2024-01-15")),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            to_date(&text("2024-01-15T00:00:00")),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            to_date(&text("1/15/2024")),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(to_date(&CellValue::Number(45306.0)), None);
    }

    #[test]
    fn test_map_entries_keeps_positions_and_drops_blank_items() {
        let snapshot = TableSnapshot {
            headers: vec![],
            rows: vec![
                vec![text("2024-01-01"), text("Widget"), CellValue::Number(-10.0)],
                vec![text("2024-01-02"), text("  "), CellValue::Number(-5.0)],
                vec![text("2024-01-03"), text("Gadget"), CellValue::Number(-7.5)],
            ],
        };

        let entries = map_entries(&snapshot);
        assert_eq!(entries.len(), 2);
        // Header row is 2, so data starts at tab row 3; the blank row
        // still occupies row 4.
        assert_eq!(entries[0].row, 3);
        assert_eq!(entries[1].row, 5);
        assert_eq!(entries[1].item, "Gadget");
        assert_eq!(
            entries[1].buy_price.amount(),
            Decimal::new(-75, 1)
        );
    }

    #[test]
    fn test_map_entries_reads_short_rows_as_empty() {
        let snapshot = TableSnapshot {
            headers: vec![],
            rows: vec![vec![text(""), text("Widget")]],
        };

        let entries = map_entries(&snapshot);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].order_date, None);
        assert_eq!(entries[0].sell_price, Decimal::ZERO);
        assert!(!entries[0].is_sold());
    }

    #[test]
    fn test_map_items_trims_names() {
        let snapshot = TableSnapshot {
            headers: vec![],
            rows: vec![vec![text(" Widget "), CellValue::Number(25.0)]],
        };

        let items = map_items(&snapshot);
        assert_eq!(items[0].name, "Widget");
        assert_eq!(items[0].row, 2);
        assert_eq!(items[0].market_value, Decimal::from(25));
    }
}
