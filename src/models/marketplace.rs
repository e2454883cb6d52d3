use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Grouping label for sale rows whose marketplace cell is empty.
pub const UNKNOWN_MARKETPLACE: &str = "Unknown/Other";

/// Reference record from the Marketplaces tab: a venue items are sold on,
/// with its fee as a fraction of the sale price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marketplace {
    /// 1-based row number in the tab.
    pub row: u32,
    pub name: String,
    /// Fee stored normalized to a fraction in [0, 1].
    pub fee_fraction: Decimal,
}

/// Normalize a fee input to a fraction. Values above 1 are taken as
/// percentages and divided by 100. One-way and lossy: a genuine fee above
/// 100% cannot be represented.
pub fn normalize_fee(raw: Decimal) -> Decimal {
    if raw > Decimal::ONE {
        raw / Decimal::ONE_HUNDRED
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_passes_through() {
        assert_eq!(normalize_fee(Decimal::new(1, 1)), Decimal::new(1, 1)); // 0.1
        assert_eq!(normalize_fee(Decimal::ONE), Decimal::ONE);
        assert_eq!(normalize_fee(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_percentage_is_divided() {
        // "12.5" entered as a percent becomes 0.125
        assert_eq!(normalize_fee(Decimal::new(125, 1)), Decimal::new(125, 3));
    }

    #[test]
    fn test_over_one_hundred_percent_collapses() {
        // Documented limitation: 150 reads as 150% → 1.5, not as a fraction
        assert_eq!(normalize_fee(Decimal::from(150)), Decimal::new(15, 1));
    }
}
