pub mod cost;
pub mod entry;
pub mod item;
pub mod marketplace;
pub mod retailer;

pub use cost::SignedCost;
pub use entry::LedgerEntry;
pub use item::Item;
pub use marketplace::{normalize_fee, Marketplace, UNKNOWN_MARKETPLACE};
pub use retailer::Retailer;
