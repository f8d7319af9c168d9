//! Input event types consumed by the [`crate::matcher::Matcher`].
//!
//! These are transport-agnostic: decoding JSON (or any other wire
//! format) into these types is the job of `engine-protocol`, not of
//! this crate.

use crate::side::Side;
use crate::symbol::Symbol;

/// A new limit order. Fully filled, partially filled, or resting,
/// depending on what it crosses against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEvent {
    pub ts: i64,
    pub seq: i64,
    pub symbol: Symbol,
    pub order_id: String,
    pub side: Side,
    /// Strictly positive.
    pub price: i64,
    /// Strictly positive.
    pub qty: i64,
}

/// Modify an existing resting order's side, price, and/or quantity.
///
/// At least one of the three is expected to be present; all three
/// absent is a well-formed no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmendEvent {
    pub ts: i64,
    pub seq: i64,
    pub symbol: Symbol,
    pub order_id: String,
    pub side: Option<Side>,
    pub price: Option<i64>,
    pub qty: Option<i64>,
}

/// Remove an existing resting order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelEvent {
    pub ts: i64,
    pub seq: i64,
    pub symbol: Symbol,
    pub order_id: String,
}

/// A decoded order event, dispatched on by the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Create(CreateEvent),
    Amend(AmendEvent),
    Cancel(CancelEvent),
}

impl Event {
    pub fn symbol(&self) -> Symbol {
        match self {
            Event::Create(e) => e.symbol,
            Event::Amend(e) => e.symbol,
            Event::Cancel(e) => e.symbol,
        }
    }

    pub fn order_id(&self) -> &str {
        match self {
            Event::Create(e) => &e.order_id,
            Event::Amend(e) => &e.order_id,
            Event::Cancel(e) => &e.order_id,
        }
    }
}
