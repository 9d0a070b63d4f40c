//! Best-effort publisher of domain events.
//!
//! `publish` never blocks and never fails the caller:
//! - disabled bus: log a warning and return
//! - enabled bus: hand the send to a spawned task; its outcome only reaches the logs
use std::sync::Arc;

use crate::config::{Config, EventTopics};
use crate::services::events::model::{DomainEvent, Topic};
use crate::services::events::transport::{EventTransport, OutboundMessage};
use crate::services::events::valkey::ValkeyStreamTransport;

#[derive(Clone)]
struct Bus {
    transport: Arc<dyn EventTransport>,
    topics: EventTopics,
}

impl Bus {
    fn destination(&self, topic: Topic) -> &str {
        match topic {
            Topic::Portfolio => &self.topics.portfolio,
            Topic::Trade => &self.topics.trade,
        }
    }
}

#[derive(Clone, Default)]
pub struct EventEmitter {
    bus: Option<Bus>,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("EventEmitter");
        match &self.bus {
            Some(bus) => s
                .field("backend", &bus.transport.backend_name())
                .field("topics", &bus.topics),
            None => s.field("backend", &"disabled"),
        };
        s.finish()
    }
}

impl EventEmitter {
    pub fn new(transport: Arc<dyn EventTransport>, topics: EventTopics) -> Self {
        Self {
            bus: Some(Bus { transport, topics }),
        }
    }

    pub fn disabled() -> Self {
        Self { bus: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.bus.is_some()
    }

    /// Configured destination for `topic`; `None` while the bus is disabled.
    pub fn destination(&self, topic: Topic) -> Option<&str> {
        self.bus.as_ref().map(|bus| bus.destination(topic))
    }

    /// Publish to the variant's own topic.
    pub fn emit(&self, event: DomainEvent) {
        self.publish(event.topic(), event);
    }

    pub fn publish(&self, topic: Topic, event: DomainEvent) {
        let Some(bus) = &self.bus else {
            tracing::warn!(
                event_id = %event.id(),
                user_id = %event.user_id(),
                ?topic,
                "event bus is disabled; event not sent"
            );
            return;
        };

        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(error = %err, event_id = %event.id(), "failed to serialize event");
                return;
            }
        };

        let message = OutboundMessage {
            destination: bus.destination(topic).to_string(),
            key: event.id().to_string(),
            headers: event.headers(),
            payload,
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(event_id = %event.id(), "no async runtime; event not sent");
            return;
        };

        tracing::info!(
            event_id = %event.id(),
            user_id = %event.user_id(),
            destination = %message.destination,
            backend = bus.transport.backend_name(),
            "sending event"
        );

        // Detached: a dropped client connection does not cancel the send.
        let transport = bus.transport.clone();
        let event_id = event.id();
        runtime.spawn(async move {
            match transport.send(message).await {
                Ok(receipt) => tracing::info!(
                    %event_id,
                    destination = %receipt.destination,
                    entry_id = %receipt.entry_id,
                    "event delivered"
                ),
                Err(err) => tracing::error!(%event_id, error = %err, "failed to deliver event"),
            }
        });
    }
}

/// Factory: build the emitter from `Config`. A missing or unreachable bus disables it.
pub async fn build_event_emitter(config: &Config) -> EventEmitter {
    let Some(url) = config.event_bus_url.as_deref() else {
        tracing::warn!("EVENT_BUS_URL is not set; domain events are disabled");
        return EventEmitter::disabled();
    };

    match ValkeyStreamTransport::connect(url).await {
        Ok(transport) => EventEmitter::new(Arc::new(transport), config.event_topics.clone()),
        Err(err) => {
            tracing::warn!(error = %err, "event bus unavailable; domain events are disabled");
            EventEmitter::disabled()
        }
    }
}
