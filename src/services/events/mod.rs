pub mod emitter;
pub mod model;
pub mod transport;
pub mod valkey;

pub use emitter::{EventEmitter, build_event_emitter};
pub use model::{DomainEvent, PortfolioUpdateEvent, Topic, TradeUpdateEvent};
pub use transport::{DeliveryReceipt, EventTransport, OutboundMessage, TransportError};
pub use valkey::ValkeyStreamTransport;
