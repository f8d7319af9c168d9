//! engine-runtime
//!
//! Bus client, configuration, trade sink, and the central engine task
//! that glues `engine-core` and `engine-protocol` to a live NATS
//! deployment.

pub mod bus;
pub mod config;
pub mod engine_task;
pub mod error;
pub mod sink;

