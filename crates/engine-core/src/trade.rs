//! Trade records emitted by the matcher.

use crate::side::Side;
use crate::symbol::Symbol;

/// A single execution between a taker and a resting (maker) order.
///
/// `price` is always the maker's resting price, never the taker's
/// limit — the taker realizes price improvement when its limit was
/// better than the level it crossed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    /// Timestamp and sequence are copied from the taker (incoming) event.
    /// Multiple trades from one event therefore share the same pair.
    pub ts: i64,
    pub seq: i64,
    pub symbol: Symbol,
    pub buy_order_id: String,
    pub sell_order_id: String,
    pub qty: i64,
    pub price: i64,
    pub maker_order_id: String,
    pub taker_side: Side,
}
