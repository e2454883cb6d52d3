use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchase cost carried with its ledger polarity.
///
/// Costs are stored negative throughout the pipeline, so profit math is
/// `revenue - fees - shipping + cost`: the addition performs the
/// deduction. Callers must go through [`SignedCost::amount`] (signed) or
/// [`SignedCost::magnitude`] (absolute) so the polarity is never flipped
/// by accident at an arithmetic site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedCost(Decimal);

impl SignedCost {
    pub const ZERO: SignedCost = SignedCost(Decimal::ZERO);

    /// Wrap a raw ledger value. The value is taken as stored: a
    /// well-formed cost is negative, but dirty rows may carry anything.
    pub fn from_raw(amount: Decimal) -> Self {
        SignedCost(amount)
    }

    /// The signed amount as stored (negative for a cost).
    pub fn amount(self) -> Decimal {
        self.0
    }

    /// The absolute cost, for ratio denominators and display.
    pub fn magnitude(self) -> Decimal {
        self.0.abs()
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn round_dp_with_strategy(self, dp: u32, strategy: rust_decimal::RoundingStrategy) -> Self {
        SignedCost(self.0.round_dp_with_strategy(dp, strategy))
    }
}

impl Add for SignedCost {
    type Output = SignedCost;

    fn add(self, rhs: SignedCost) -> SignedCost {
        SignedCost(self.0 + rhs.0)
    }
}

impl AddAssign for SignedCost {
    fn add_assign(&mut self, rhs: SignedCost) {
        self.0 += rhs.0;
    }
}

impl Sub for SignedCost {
    type Output = SignedCost;

    fn sub(self, rhs: SignedCost) -> SignedCost {
        SignedCost(self.0 - rhs.0)
    }
}

impl Sum for SignedCost {
    fn sum<I: Iterator<Item = SignedCost>>(iter: I) -> SignedCost {
        iter.fold(SignedCost::ZERO, |acc, c| acc + c)
    }
}
