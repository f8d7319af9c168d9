//! JSON wire shapes for events and trades.
//!
//! These mirror the logical [`engine_core`] types field-for-field but
//! exist separately so the wire format (snake_case, single-char
//! sides, a `type` tag) can evolve independently of the in-memory
//! representation.

use engine_core::{AmendEvent, CancelEvent, CreateEvent, Event, Side, Symbol, Trade};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WireEvent {
    Create(WireCreate),
    Amend(WireAmend),
    Cancel(WireCancel),
}

#[derive(Debug, Deserialize)]
pub struct WireCreate {
    pub ts: i64,
    pub seq: i64,
    #[serde(with = "symbol_str")]
    pub symbol: Symbol,
    pub order_id: String,
    #[serde(with = "side_char")]
    pub side: Side,
    pub price: i64,
    pub qty: i64,
}

#[derive(Debug, Deserialize)]
pub struct WireAmend {
    pub ts: i64,
    pub seq: i64,
    #[serde(with = "symbol_str")]
    pub symbol: Symbol,
    pub order_id: String,
    #[serde(default, with = "side_char_opt")]
    pub side: Option<Side>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub qty: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct WireCancel {
    pub ts: i64,
    pub seq: i64,
    #[serde(with = "symbol_str")]
    pub symbol: Symbol,
    pub order_id: String,
}

impl From<WireEvent> for Event {
    fn from(wire: WireEvent) -> Self {
        match wire {
            WireEvent::Create(c) => Event::Create(CreateEvent {
                ts: c.ts,
                seq: c.seq,
                symbol: c.symbol,
                order_id: c.order_id,
                side: c.side,
                price: c.price,
                qty: c.qty,
            }),
            WireEvent::Amend(a) => Event::Amend(AmendEvent {
                ts: a.ts,
                seq: a.seq,
                symbol: a.symbol,
                order_id: a.order_id,
                side: a.side,
                price: a.price,
                qty: a.qty,
            }),
            WireEvent::Cancel(c) => Event::Cancel(CancelEvent {
                ts: c.ts,
                seq: c.seq,
                symbol: c.symbol,
                order_id: c.order_id,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WireTrade {
    pub ts: i64,
    pub seq: i64,
    #[serde(with = "symbol_str")]
    pub symbol: Symbol,
    pub buy_order_id: String,
    pub sell_order_id: String,
    pub qty: i64,
    pub price: i64,
    pub maker_order_id: String,
    #[serde(with = "side_char")]
    pub taker_side: Side,
}

impl From<&Trade> for WireTrade {
    fn from(t: &Trade) -> Self {
        WireTrade {
            ts: t.ts,
            seq: t.seq,
            symbol: t.symbol,
            buy_order_id: t.buy_order_id.clone(),
            sell_order_id: t.sell_order_id.clone(),
            qty: t.qty,
            price: t.price,
            maker_order_id: t.maker_order_id.clone(),
            taker_side: t.taker_side,
        }
    }
}

mod symbol_str {
    use engine_core::Symbol;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(symbol: &Symbol, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(symbol.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Symbol, D::Error> {
        let raw = String::deserialize(d)?;
        Symbol::from_str(&raw).ok_or_else(|| D::Error::custom(format!("unknown symbol: {raw:?}")))
    }
}

mod side_char {
    use engine_core::Side;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(side: &Side, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&side.as_char().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Side, D::Error> {
        let raw = String::deserialize(d)?;
        let c = raw
            .chars()
            .next()
            .ok_or_else(|| D::Error::custom("empty side"))?;
        Side::from_char(c).ok_or_else(|| D::Error::custom(format!("invalid side: {raw:?}")))
    }
}

mod side_char_opt {
    use engine_core::Side;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Side>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw {
            None => Ok(None),
            Some(raw) => {
                let c = raw
                    .chars()
                    .next()
                    .ok_or_else(|| serde::de::Error::custom("empty side"))?;
                Side::from_char(c)
                    .map(Some)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid side: {raw:?}")))
            }
        }
    }
}
