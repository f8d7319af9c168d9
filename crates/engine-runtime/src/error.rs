//! Error types for the bus client and trade sink.

#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("not connected to message bus")]
    NotConnected,

    #[error("failed to connect to {url} after {attempts} attempt(s): {source}")]
    ConnectFailed {
        url: String,
        attempts: u32,
        #[source]
        source: async_nats::ConnectError,
    },

    #[error("publish to {subject} failed: {source}")]
    Publish {
        subject: String,
        #[source]
        source: async_nats::PublishError,
    },

    #[error("subscribe to {subject} failed: {source}")]
    Subscribe {
        subject: String,
        #[source]
        source: async_nats::SubscribeError,
    },

    #[error("drain timed out while closing connection")]
    DrainTimeout,
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
