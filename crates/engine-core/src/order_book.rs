//! Single-symbol order book with strict price-time priority.
//!
//! - One instance per symbol.
//! - Bids: keyed by price, best = highest.
//! - Asks: keyed by price, best = lowest.
//! - FIFO (time priority) within each price level.
//!
//! The `lookup` map does not hold a second owning copy of each
//! resting order — it holds `(side, price)`, enough to find the
//! single owning copy that lives in the side's deque. `reduce_qty`
//! and `amend` mutate that one copy in place.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::error::EngineError;
use crate::event::AmendEvent;
use crate::order::RestingOrder;
use crate::side::Side;
use crate::symbol::Symbol;

/// Single-symbol order book.
#[derive(Debug)]
pub struct OrderBook {
    symbol: Symbol,

    /// Price -> FIFO queue of resting orders at that price, ascending by price.
    bids: BTreeMap<i64, VecDeque<RestingOrder>>,
    /// Price -> FIFO queue of resting orders at that price, ascending by price.
    asks: BTreeMap<i64, VecDeque<RestingOrder>>,

    /// order_id -> (side, price); a non-owning pointer to the deque entry.
    lookup: HashMap<String, (Side, i64)>,
}

impl OrderBook {
    pub fn new(symbol: Symbol) -> Self {
        OrderBook {
            symbol,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            lookup: HashMap::new(),
        }
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Insert a resting order, preserving ascending `(ts, seq)` order
    /// within its price level. The caller guarantees `order.order_id`
    /// is not already active.
    pub fn add(&mut self, order: RestingOrder) {
        debug_assert!(
            !self.lookup.contains_key(&order.order_id),
            "add() called with an order_id already active"
        );

        let side = order.side;
        let price = order.price;
        let order_id = order.order_id.clone();

        let deque = self.side_mut(side).entry(price).or_default();
        insert_by_priority(deque, order);

        self.lookup.insert(order_id, (side, price));
        self.check_invariants();
    }

    /// Remove an order by id. Silent no-op if the id is not active.
    /// Panics if the id *is* active per the lookup but the deque it
    /// points at doesn't actually hold it — that is the lookup and
    /// the deques having diverged, not an unknown order.
    pub fn cancel(&mut self, order_id: &str) {
        let Some((side, price)) = self.lookup.remove(order_id) else {
            return;
        };

        self.remove_from_deque(side, price, order_id);
        self.check_invariants();
    }

    /// Apply an amend. Returns the mutated order, or `None` if the id
    /// is not active (silent no-op) or the amend reduced qty to zero
    /// (delegated to `cancel`).
    pub fn amend(&mut self, amend: &AmendEvent) -> Option<RestingOrder> {
        let (old_side, old_price) = *self.lookup.get(&amend.order_id)?;

        if let Some(0) = amend.qty {
            self.cancel(&amend.order_id);
            return None;
        }

        let new_side = amend.side.unwrap_or(old_side);
        let new_price = amend.price.unwrap_or(old_price);

        let mut order = self.remove_from_deque(old_side, old_price, &amend.order_id);

        order.side = new_side;
        order.price = new_price;
        if let Some(qty) = amend.qty {
            order.qty = qty;
        }

        let deque = self.side_mut(new_side).entry(new_price).or_default();
        insert_by_priority(deque, order.clone());
        self.lookup
            .insert(amend.order_id.clone(), (new_side, new_price));

        self.check_invariants();
        Some(order)
    }

    /// Decrement the remaining qty of a resting order. Removes it if
    /// the result is `<= 0`. No-op if the id is not active.
    pub fn reduce_qty(&mut self, order_id: &str, qty: i64) {
        let Some(&(side, price)) = self.lookup.get(order_id) else {
            return;
        };

        let remaining = {
            let deque = self
                .side_mut(side)
                .get_mut(&price)
                .expect("lookup entry with no matching price level");
            let order = deque
                .iter_mut()
                .find(|o| o.order_id == order_id)
                .expect("lookup entry with no matching deque entry");
            order.qty -= qty;
            order.qty
        };

        if remaining <= 0 {
            self.cancel(order_id);
        }
        self.check_invariants();
    }

    /// Head of the highest-price bid level, if any.
    pub fn best_bid(&self) -> Option<&RestingOrder> {
        self.bids.values().next_back().and_then(|dq| dq.front())
    }

    /// Head of the lowest-price ask level, if any.
    pub fn best_ask(&self) -> Option<&RestingOrder> {
        self.asks.values().next().and_then(|dq| dq.front())
    }

    pub fn is_active(&self, order_id: &str) -> bool {
        self.lookup.contains_key(order_id)
    }

    /// `(price, total remaining qty)` pairs for one side, best-first.
    /// Diagnostic / test-only; not used by matching.
    pub fn depth(&self, side: Side) -> Vec<(i64, i64)> {
        let levels = match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        };
        let iter: Box<dyn Iterator<Item = (&i64, &VecDeque<RestingOrder>)>> = match side {
            Side::Buy => Box::new(levels.iter().rev()),
            Side::Sell => Box::new(levels.iter()),
        };
        iter.map(|(price, dq)| (*price, dq.iter().map(|o| o.qty).sum()))
            .collect()
    }

    // -------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------

    fn side_mut(&mut self, side: Side) -> &mut BTreeMap<i64, VecDeque<RestingOrder>> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Remove and return the order the lookup says lives at
    /// `side`/`price`. The caller has already confirmed via `lookup`
    /// that `order_id` is active — if the deque doesn't actually hold
    /// it, the lookup and the deques have diverged, which is a fatal
    /// invariant violation, not a recoverable no-op.
    fn remove_from_deque(&mut self, side: Side, price: i64, order_id: &str) -> RestingOrder {
        let symbol = self.symbol;
        let levels = self.side_mut(side);

        let Some(deque) = levels.get_mut(&price) else {
            panic!(
                "{}",
                EngineError::InvariantViolation {
                    symbol: symbol.to_string(),
                    detail: format!(
                        "lookup has {order_id} at {side:?}/{price} but no matching price level"
                    ),
                }
            );
        };
        let Some(idx) = deque.iter().position(|o| o.order_id == order_id) else {
            panic!(
                "{}",
                EngineError::InvariantViolation {
                    symbol: symbol.to_string(),
                    detail: format!(
                        "lookup has {order_id} at {side:?}/{price} but no matching deque entry"
                    ),
                }
            );
        };
        let order = deque
            .remove(idx)
            .expect("idx was just found by position()");
        if deque.is_empty() {
            levels.remove(&price);
        }
        order
    }

    /// Defensive invariant checks (debug builds only). A violation is
    /// not recoverable: it means the lookup and the deques have
    /// diverged, so processing halts rather than returning a result
    /// built on corrupted state.
    #[cfg(debug_assertions)]
    fn check_invariants(&self) {
        for (order_id, &(side, price)) in &self.lookup {
            let levels = match side {
                Side::Buy => &self.bids,
                Side::Sell => &self.asks,
            };
            let found = levels
                .get(&price)
                .map(|dq| dq.iter().any(|o| &o.order_id == order_id))
                .unwrap_or(false);
            if !found {
                panic!(
                    "{}",
                    EngineError::InvariantViolation {
                        symbol: self.symbol.to_string(),
                        detail: format!(
                            "lookup has {order_id} at {side:?}/{price} but no matching deque entry"
                        ),
                    }
                );
            }
        }

        for levels in [&self.bids, &self.asks] {
            for (price, dq) in levels {
                if dq.is_empty() {
                    panic!(
                        "{}",
                        EngineError::InvariantViolation {
                            symbol: self.symbol.to_string(),
                            detail: format!("empty deque left in index at price {price}"),
                        }
                    );
                }
                for w in dq.iter().collect::<Vec<_>>().windows(2) {
                    if w[0].priority_key() > w[1].priority_key() {
                        panic!(
                            "{}",
                            EngineError::InvariantViolation {
                                symbol: self.symbol.to_string(),
                                detail: format!("deque at price {price} is not (ts, seq) ordered"),
                            }
                        );
                    }
                }
                for o in dq {
                    if o.qty <= 0 {
                        panic!(
                            "{}",
                            EngineError::InvariantViolation {
                                symbol: self.symbol.to_string(),
                                detail: format!("resting order {} has qty <= 0", o.order_id),
                            }
                        );
                    }
                }
            }
        }
    }

    #[cfg(not(debug_assertions))]
    fn check_invariants(&self) {}
}

/// Insert `order` into `deque` at the position that keeps it sorted
/// ascending by `(ts, seq)`.
fn insert_by_priority(deque: &mut VecDeque<RestingOrder>, order: RestingOrder) {
    let key = order.priority_key();
    let idx = deque
        .iter()
        .position(|existing| key < existing.priority_key())
        .unwrap_or(deque.len());
    deque.insert(idx, order);
}
