//! Multi-symbol matching orchestrator.
//!
//! Owns one [`OrderBook`] per symbol, each behind its own mutex, plus
//! a registry guard that serializes *creation* of a symbol's book.
//! `Arc<Mutex<OrderBook>>` plays both roles the spec calls out
//! separately (`books` and `locks`): the mutex around a book *is*
//! that symbol's exclusion guard, and cloning the `Arc` out from
//! under the registry's read lock means matching on one symbol never
//! blocks on, or is blocked by, registration of another.
//!
//! `handle_event` never suspends: the mutex is a plain blocking
//! `std::sync::Mutex`, held only across synchronous, allocation-light
//! work, and is never held across an `.await` point by callers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::event::{CreateEvent, Event};
use crate::order::RestingOrder;
use crate::order_book::OrderBook;
use crate::side::Side;
use crate::symbol::Symbol;
use crate::trade::Trade;

/// Multi-symbol matching engine.
pub struct Matcher {
    books: RwLock<HashMap<Symbol, Arc<Mutex<OrderBook>>>>,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Matcher {
            books: RwLock::new(HashMap::new()),
        }
    }

    /// Process one event, returning the (possibly empty) ordered list
    /// of trades it produced. Never blocks on another symbol's guard.
    pub fn handle_event(&self, event: Event) -> Vec<Trade> {
        let book = self.get_or_create_book(event.symbol());
        let mut book = book.lock().expect("order book mutex poisoned");

        match event {
            Event::Create(create) => Self::match_and_rest(&mut book, create),
            Event::Amend(amend) => {
                book.amend(&amend);
                Vec::new()
            }
            Event::Cancel(cancel) => {
                book.cancel(&cancel.order_id);
                Vec::new()
            }
        }
    }

    /// Immutable access to a symbol's book, if it has been created.
    /// Useful for admin/read-only queries outside the hot path.
    pub fn book_snapshot(&self, symbol: Symbol) -> Option<Arc<Mutex<OrderBook>>> {
        self.books.read().expect("registry lock poisoned").get(&symbol).cloned()
    }

    fn get_or_create_book(&self, symbol: Symbol) -> Arc<Mutex<OrderBook>> {
        if let Some(book) = self.books.read().expect("registry lock poisoned").get(&symbol) {
            return book.clone();
        }

        self.books
            .write()
            .expect("registry lock poisoned")
            .entry(symbol)
            .or_insert_with(|| Arc::new(Mutex::new(OrderBook::new(symbol))))
            .clone()
    }

    /// The crossing algorithm: walk the opposite side while the
    /// incoming order still has qty and can cross, emitting a trade
    /// per level of resting liquidity consumed, then rest whatever
    /// remains.
    fn match_and_rest(book: &mut OrderBook, create: CreateEvent) -> Vec<Trade> {
        let mut trades = Vec::new();

        // Duplicate re-delivery: idempotent no-op.
        if book.is_active(&create.order_id) {
            return trades;
        }

        let mut remaining = create.qty;

        match create.side {
            Side::Buy => loop {
                if remaining <= 0 {
                    break;
                }
                let Some(best_ask) = book.best_ask() else {
                    break;
                };
                if best_ask.price > create.price {
                    break;
                }

                let maker_id = best_ask.order_id.clone();
                let maker_price = best_ask.price;
                let trade_qty = remaining.min(best_ask.qty);

                trades.push(Trade {
                    ts: create.ts,
                    seq: create.seq,
                    symbol: create.symbol,
                    buy_order_id: create.order_id.clone(),
                    sell_order_id: maker_id.clone(),
                    qty: trade_qty,
                    price: maker_price,
                    maker_order_id: maker_id.clone(),
                    taker_side: Side::Buy,
                });

                remaining -= trade_qty;
                book.reduce_qty(&maker_id, trade_qty);
            },
            Side::Sell => loop {
                if remaining <= 0 {
                    break;
                }
                let Some(best_bid) = book.best_bid() else {
                    break;
                };
                if best_bid.price < create.price {
                    break;
                }

                let maker_id = best_bid.order_id.clone();
                let maker_price = best_bid.price;
                let trade_qty = remaining.min(best_bid.qty);

                trades.push(Trade {
                    ts: create.ts,
                    seq: create.seq,
                    symbol: create.symbol,
                    buy_order_id: maker_id.clone(),
                    sell_order_id: create.order_id.clone(),
                    qty: trade_qty,
                    price: maker_price,
                    maker_order_id: maker_id.clone(),
                    taker_side: Side::Sell,
                });

                remaining -= trade_qty;
                book.reduce_qty(&maker_id, trade_qty);
            },
        }

        if remaining > 0 {
            let mut resting = RestingOrder::from_create(&create);
            resting.qty = remaining;
            book.add(resting);
        }

        trades
    }
}
