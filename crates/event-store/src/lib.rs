//! Append-only event log.
//!
//! Every order is an ordered stream of events keyed by [`AggregateId`].
//! The log is the source of truth for order state and doubles as the
//! audit history of confirmed and cancelled orders.

pub mod error;
pub mod event;
pub mod memory;
pub mod store;

pub use common::AggregateId;
pub use error::{EventStoreError, Result};
pub use event::{EventEnvelope, EventEnvelopeBuilder, EventId, Version};
pub use memory::InMemoryEventStore;
pub use store::{AppendOptions, EventStore, EventStoreExt};
