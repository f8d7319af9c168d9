//! Decode inbound order events and encode outbound trades as JSON.
//!
//! One JSON object per message, UTF-8 encoded, newline-delimited by
//! the caller (the bus or the file sink), not by this module.

use engine_core::{Event, Trade};

use crate::wire_types::{WireEvent, WireTrade};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Decode one JSON-encoded order event.
///
/// Returns `Err` for unparseable JSON or an unrecognized `type` tag;
/// callers are expected to log and drop on error, never propagate.
pub fn decode_event(bytes: &[u8]) -> Result<Event, DecodeError> {
    let wire: WireEvent = serde_json::from_slice(bytes)?;
    Ok(wire.into())
}

/// Encode one trade as a JSON object. Trade fields are always
/// serializable, so this cannot fail.
pub fn encode_trade(trade: &Trade) -> Vec<u8> {
    let wire = WireTrade::from(trade);
    serde_json::to_vec(&wire).expect("Trade always serializes to JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{Side, Symbol};

    #[test]
    fn decodes_create_event() {
        let json = br#"{"type":"create","ts":1000,"seq":1,"symbol":"ABC","order_id":"B1","side":"B","price":100,"qty":5}"#;
        let event = decode_event(json).unwrap();
        match event {
            Event::Create(c) => {
                assert_eq!(c.symbol, Symbol::Abc);
                assert_eq!(c.side, Side::Buy);
                assert_eq!(c.price, 100);
                assert_eq!(c.qty, 5);
            }
            other => panic!("expected Create, got {other:?}"),
        }
    }

    #[test]
    fn decodes_amend_with_partial_fields() {
        let json = br#"{"type":"amend","ts":1000,"seq":1,"symbol":"XYZ","order_id":"B1","qty":0}"#;
        let event = decode_event(json).unwrap();
        match event {
            Event::Amend(a) => {
                assert_eq!(a.qty, Some(0));
                assert_eq!(a.price, None);
                assert_eq!(a.side, None);
            }
            other => panic!("expected Amend, got {other:?}"),
        }
    }

    #[test]
    fn decodes_cancel_event() {
        let json = br#"{"type":"cancel","ts":1000,"seq":1,"symbol":"DEF","order_id":"S1"}"#;
        let event = decode_event(json).unwrap();
        assert!(matches!(event, Event::Cancel(_)));
    }

    #[test]
    fn rejects_unknown_type() {
        let json = br#"{"type":"replace","ts":1000,"seq":1,"symbol":"ABC","order_id":"B1"}"#;
        assert!(decode_event(json).is_err());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(decode_event(b"not json").is_err());
    }

    #[test]
    fn encodes_trade_round_trips_through_json_value() {
        let trade = Trade {
            ts: 1000,
            seq: 1,
            symbol: Symbol::Abc,
            buy_order_id: "B1".into(),
            sell_order_id: "S1".into(),
            qty: 5,
            price: 100,
            maker_order_id: "S1".into(),
            taker_side: Side::Buy,
        };
        let bytes = encode_trade(&trade);
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["symbol"], "ABC");
        assert_eq!(value["taker_side"], "B");
        assert_eq!(value["qty"], 5);
    }
}
