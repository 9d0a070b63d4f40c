use async_trait::async_trait;

use crate::services::events::transport::{
    DeliveryReceipt, EventTransport, OutboundMessage, TransportError,
};

/// Valkey/Redis Streams transport.
///
/// Each message becomes one stream entry: `XADD <destination> * key .. <headers..> payload ..`.
/// Consumers can read the header fields without parsing the payload.
#[derive(Clone, Debug)]
pub struct ValkeyStreamTransport {
    manager: redis::aio::ConnectionManager,
}

impl ValkeyStreamTransport {
    // Connect from a URL like `redis://localhost:6379`
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let client =
            redis::Client::open(url).map_err(|e| TransportError::Connection(e.to_string()))?;

        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self { manager })
    }
}

#[async_trait]
impl EventTransport for ValkeyStreamTransport {
    fn backend_name(&self) -> &'static str {
        "valkey-streams"
    }

    async fn send(&self, message: OutboundMessage) -> Result<DeliveryReceipt, TransportError> {
        let mut conn = self.manager.clone();

        let mut cmd = redis::cmd("XADD");
        cmd.arg(&message.destination)
            .arg("*")
            .arg("key")
            .arg(&message.key);
        for (name, value) in &message.headers {
            cmd.arg(*name).arg(value);
        }
        cmd.arg("payload").arg(&message.payload);

        // XADD replies with the generated entry id, e.g. `1700000000000-0`
        let entry_id: String = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| TransportError::Command(e.to_string()))?;

        Ok(DeliveryReceipt {
            destination: message.destination,
            entry_id,
        })
    }
}
