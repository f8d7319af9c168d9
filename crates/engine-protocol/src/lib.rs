//! engine-protocol
//!
//! JSON wire encoding/decoding for the matching engine.
//!
//! This crate turns logical `engine_core::Event`s and `Trade`s into
//! bytes and back again. It knows nothing about the bus or the file
//! sink that move those bytes around.

pub mod codec;
pub mod wire_types;

pub use codec::{decode_event, encode_trade, DecodeError};
