//! Order record
//!
//! The fixed-layout value the tables are tuned for: an order-book entry keyed
//! by its identifier.

use crate::table::Key;

/// Side of the book an order rests on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    Buy,
    Sell,
}

/// A resting order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Order {
    pub order_id: Key,
    pub price: f64,
    pub side: Side,
    pub qty: u32,
}

impl Order {
    pub fn new(order_id: Key, price: f64, side: Side, qty: u32) -> Self {
        Self {
            order_id,
            price,
            side,
            qty,
        }
    }
}
