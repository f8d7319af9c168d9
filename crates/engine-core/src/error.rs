//! Error types for the core matching engine.
//!
//! Normal operations (unknown order id on amend/cancel, duplicate
//! create) are silent no-ops by design, not errors — see the matcher's
//! failure semantics. This type exists for the one case that is not a
//! no-op: a broken invariant, which is not recoverable and should
//! abort processing rather than return a corrupted book.

/// Internal invariant violation. Never returned to a caller in normal
/// operation; only ever surfaced via a panic message so that a broken
/// invariant halts processing instead of silently dropping or
/// reordering liquidity.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("order book invariant violated for {symbol}: {detail}")]
    InvariantViolation { symbol: String, detail: String },
}
