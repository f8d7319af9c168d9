//! The resting-order record owned by an [`crate::order_book::OrderBook`].

use crate::event::CreateEvent;
use crate::side::Side;

/// An order that has been accepted into the book and is live for
/// matching. Mutable in place: `qty` shrinks as it is filled, and
/// `price`/`side` can change via amend, but `ts`/`seq` never change
/// once the order is created (time priority is never refreshed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestingOrder {
    pub price: i64,
    pub ts: i64,
    pub seq: i64,
    pub order_id: String,
    /// Remaining unfilled quantity.
    pub qty: i64,
    pub side: Side,
}

impl RestingOrder {
    pub fn from_create(order: &CreateEvent) -> Self {
        RestingOrder {
            price: order.price,
            ts: order.ts,
            seq: order.seq,
            order_id: order.order_id.clone(),
            qty: order.qty,
            side: order.side,
        }
    }

    /// Arrival-priority key: earlier `(ts, seq)` sorts first.
    pub fn priority_key(&self) -> (i64, i64) {
        (self.ts, self.seq)
    }
}
