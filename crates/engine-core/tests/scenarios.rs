//! Concrete matching scenarios and the invariants they must preserve.

use engine_core::{AmendEvent, CancelEvent, CreateEvent, Event, Matcher, Side, Symbol, Trade};

fn create(
    order_id: &str,
    symbol: Symbol,
    side: Side,
    price: i64,
    qty: i64,
    ts: i64,
    seq: i64,
) -> Event {
    Event::Create(CreateEvent {
        ts,
        seq,
        symbol,
        order_id: order_id.to_string(),
        side,
        price,
        qty,
    })
}

fn cancel(order_id: &str, symbol: Symbol, ts: i64, seq: i64) -> Event {
    Event::Cancel(CancelEvent {
        ts,
        seq,
        symbol,
        order_id: order_id.to_string(),
    })
}

fn amend(
    order_id: &str,
    symbol: Symbol,
    ts: i64,
    seq: i64,
    side: Option<Side>,
    price: Option<i64>,
    qty: Option<i64>,
) -> Event {
    Event::Amend(AmendEvent {
        ts,
        seq,
        symbol,
        order_id: order_id.to_string(),
        side,
        price,
        qty,
    })
}

#[test]
fn s1_partial_cross_with_resting_remainder() {
    let m = Matcher::new();
    assert!(m
        .handle_event(create("S1", Symbol::Abc, Side::Sell, 99, 4, 1000, 1))
        .is_empty());
    assert!(m
        .handle_event(create("S2", Symbol::Abc, Side::Sell, 100, 3, 1010, 2))
        .is_empty());

    let trades = m.handle_event(create("B1", Symbol::Abc, Side::Buy, 101, 10, 1020, 3));

    assert_eq!(
        trades,
        vec![
            Trade {
                ts: 1020,
                seq: 3,
                symbol: Symbol::Abc,
                buy_order_id: "B1".into(),
                sell_order_id: "S1".into(),
                qty: 4,
                price: 99,
                maker_order_id: "S1".into(),
                taker_side: Side::Buy,
            },
            Trade {
                ts: 1020,
                seq: 3,
                symbol: Symbol::Abc,
                buy_order_id: "B1".into(),
                sell_order_id: "S2".into(),
                qty: 3,
                price: 100,
                maker_order_id: "S2".into(),
                taker_side: Side::Buy,
            },
        ]
    );

    let book = m.book_snapshot(Symbol::Abc).unwrap();
    let book = book.lock().unwrap();
    let best_bid = book.best_bid().unwrap();
    assert_eq!(best_bid.order_id, "B1");
    assert_eq!(best_bid.qty, 3);
    assert!(!book.is_active("S1"));
    assert!(!book.is_active("S2"));
}

#[test]
fn s2_duplicate_create_ignored() {
    let m = Matcher::new();
    assert!(m
        .handle_event(create("B1", Symbol::Xyz, Side::Buy, 100, 5, 1000, 1))
        .is_empty());
    assert!(m
        .handle_event(create("B1", Symbol::Xyz, Side::Buy, 101, 7, 1010, 2))
        .is_empty());

    let book = m.book_snapshot(Symbol::Xyz).unwrap();
    let book = book.lock().unwrap();
    let best_bid = book.best_bid().unwrap();
    assert_eq!(best_bid.qty, 5);
    assert_eq!(best_bid.price, 100);
}

#[test]
fn s3_amend_qty_zero_is_cancel() {
    let m = Matcher::new();
    m.handle_event(create("S1", Symbol::Def, Side::Sell, 101, 10, 1000, 1));
    assert!(m
        .handle_event(amend("S1", Symbol::Def, 1010, 2, None, None, Some(0)))
        .is_empty());

    let book = m.book_snapshot(Symbol::Def).unwrap();
    let book = book.lock().unwrap();
    assert!(!book.is_active("S1"));
    assert!(book.best_ask().is_none());
}

#[test]
fn s4_price_time_priority_within_a_level() {
    let m = Matcher::new();
    m.handle_event(create("B1", Symbol::Abc, Side::Buy, 100, 5, 1000, 1));
    m.handle_event(create("B2", Symbol::Abc, Side::Buy, 101, 5, 1001, 2));
    m.handle_event(create("B3", Symbol::Abc, Side::Buy, 100, 5, 1002, 3));

    let book = m.book_snapshot(Symbol::Abc).unwrap();
    let book = book.lock().unwrap();
    assert_eq!(book.best_bid().unwrap().order_id, "B2");
    assert_eq!(book.depth(Side::Buy), vec![(101, 5), (100, 10)]);
}

#[test]
fn s5_amend_price_moves_levels() {
    let m = Matcher::new();
    m.handle_event(create("B1", Symbol::Abc, Side::Buy, 100, 10, 1000, 1));
    m.handle_event(amend("B1", Symbol::Abc, 1010, 2, None, Some(105), None));

    let book = m.book_snapshot(Symbol::Abc).unwrap();
    let book = book.lock().unwrap();
    assert_eq!(book.depth(Side::Buy), vec![(105, 10)]);
    let best = book.best_bid().unwrap();
    assert_eq!(best.price, 105);
    assert_eq!(best.qty, 10);
}

#[test]
fn s6_exact_fill_removes_resting_order() {
    let m = Matcher::new();
    m.handle_event(create("S1", Symbol::Abc, Side::Sell, 100, 5, 1000, 1));
    let trades = m.handle_event(create("B1", Symbol::Abc, Side::Buy, 100, 5, 1001, 2));

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].qty, 5);
    assert_eq!(trades[0].price, 100);
    assert_eq!(trades[0].maker_order_id, "S1");

    let book = m.book_snapshot(Symbol::Abc).unwrap();
    let book = book.lock().unwrap();
    assert!(!book.is_active("S1"));
    assert!(!book.is_active("B1"));
    assert!(book.best_bid().is_none());
    assert!(book.best_ask().is_none());
}

#[test]
fn cancel_then_cancel_is_a_no_op() {
    let m = Matcher::new();
    m.handle_event(create("B1", Symbol::Abc, Side::Buy, 100, 5, 1000, 1));
    assert!(m.handle_event(cancel("B1", Symbol::Abc, 1001, 2)).is_empty());
    assert!(m.handle_event(cancel("B1", Symbol::Abc, 1002, 3)).is_empty());
}

#[test]
fn amend_and_cancel_on_unknown_order_are_no_ops() {
    let m = Matcher::new();
    assert!(m
        .handle_event(amend("ghost", Symbol::Abc, 1000, 1, None, Some(10), None))
        .is_empty());
    assert!(m.handle_event(cancel("ghost", Symbol::Abc, 1001, 2)).is_empty());
}

#[test]
fn amend_never_triggers_matching_even_if_crossed() {
    let m = Matcher::new();
    m.handle_event(create("S1", Symbol::Abc, Side::Sell, 100, 5, 1000, 1));
    m.handle_event(create("B1", Symbol::Abc, Side::Buy, 90, 5, 1001, 2));

    // Amending B1's price above the resting ask must not cross it.
    let trades = m.handle_event(amend("B1", Symbol::Abc, 1002, 3, None, Some(150), None));
    assert!(trades.is_empty());

    let book = m.book_snapshot(Symbol::Abc).unwrap();
    let book = book.lock().unwrap();
    assert!(book.is_active("S1"));
    assert!(book.is_active("B1"));
}

#[test]
fn amend_across_sides_moves_order_to_new_side() {
    let m = Matcher::new();
    m.handle_event(create("O1", Symbol::Abc, Side::Buy, 100, 5, 1000, 1));
    m.handle_event(amend(
        "O1",
        Symbol::Abc,
        1001,
        2,
        Some(Side::Sell),
        Some(110),
        None,
    ));

    let book = m.book_snapshot(Symbol::Abc).unwrap();
    let book = book.lock().unwrap();
    assert!(book.best_bid().is_none());
    let best = book.best_ask().unwrap();
    assert_eq!(best.order_id, "O1");
    assert_eq!(best.price, 110);
}

#[test]
fn conservation_of_quantity_across_a_partial_fill() {
    let m = Matcher::new();
    m.handle_event(create("S1", Symbol::Abc, Side::Sell, 100, 4, 1000, 1));
    let trades = m.handle_event(create("B1", Symbol::Abc, Side::Buy, 100, 10, 1001, 2));

    let traded: i64 = trades.iter().map(|t| t.qty).sum();
    let book = m.book_snapshot(Symbol::Abc).unwrap();
    let book = book.lock().unwrap();
    let resting: i64 = book
        .depth(Side::Buy)
        .iter()
        .chain(book.depth(Side::Sell).iter())
        .map(|(_, qty)| qty)
        .sum();

    assert_eq!(traded + resting, 4 + 10);
}
