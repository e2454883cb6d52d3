//! Fixed tab layouts. Header rows and column positions are compile-time
//! constants; the spreadsheet structure is not runtime-configurable.

pub const ORDER_BOOK_TAB: &str = "Order Book";
pub const ITEMS_TAB: &str = "Items";
pub const RETAILERS_TAB: &str = "Retailers";
pub const MARKETPLACES_TAB: &str = "Marketplaces";

/// The order book carries a title banner above its column headers.
pub const ORDER_BOOK_HEADER_ROW: u32 = 2;
pub const REFERENCE_HEADER_ROW: u32 = 1;

/// Order Book columns A..J as 0-based offsets into a data row.
pub mod order_book {
    pub const ORDER_DATE: usize = 0;
    pub const ITEM: usize = 1;
    pub const BUY_PRICE: usize = 2;
    pub const RETAILER: usize = 3;
    pub const SELL_PRICE: usize = 4;
    pub const SALE_DATE: usize = 5;
    pub const MARKETPLACE: usize = 6;
    pub const FEE_FRACTION: usize = 7;
    pub const SHIPPING: usize = 8;
    /// Derived P/L column, left blank by every writer.
    pub const PROFIT_LOSS: usize = 9;
    pub const WIDTH: usize = 10;
}

pub mod items {
    pub const NAME: usize = 0;
    pub const MARKET_VALUE: usize = 1;
    pub const WIDTH: usize = 2;
}

pub mod retailers {
    pub const NAME: usize = 0;
    pub const WIDTH: usize = 1;
}

pub mod marketplaces {
    pub const NAME: usize = 0;
    pub const FEE_FRACTION: usize = 1;
    pub const WIDTH: usize = 2;
}
