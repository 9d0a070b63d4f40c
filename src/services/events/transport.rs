//! Message-bus transport interface used by the event emitter.
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("bus connection error: {0}")]
    Connection(String),
    #[error("bus command error: {0}")]
    Command(String),
}

/// One message as handed to the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub destination: String,
    pub key: String,
    pub headers: Vec<(&'static str, String)>,
    pub payload: String,
}

/// What the bus reported back for a delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub destination: String,
    pub entry_id: String,
}

#[async_trait]
pub trait EventTransport: Send + Sync {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn send(&self, message: OutboundMessage) -> Result<DeliveryReceipt, TransportError>;
}
