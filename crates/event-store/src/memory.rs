use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{AppendOptions, EventStore, validate_events_for_append};
use crate::{AggregateId, EventEnvelope, EventStoreError, Result, Version};

#[derive(Debug, Default)]
struct Streams {
    by_aggregate: HashMap<AggregateId, Vec<EventEnvelope>>,
    /// Stream ids in order of their first event.
    order: Vec<AggregateId>,
}

/// Event store that keeps every stream in process memory.
///
/// Cloning is cheap and clones share the same streams.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventStore {
    streams: Arc<RwLock<Streams>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored events across all streams.
    pub async fn event_count(&self) -> usize {
        self.streams
            .read()
            .await
            .by_aggregate
            .values()
            .map(Vec::len)
            .sum()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, events: Vec<EventEnvelope>, options: AppendOptions) -> Result<Version> {
        validate_events_for_append(&events)?;
        let Some(first) = events.first() else {
            return Ok(Version::initial());
        };
        let aggregate_id = first.aggregate_id;
        let first_new_version = first.version;

        let mut streams = self.streams.write().await;
        let current_version = streams
            .by_aggregate
            .get(&aggregate_id)
            .and_then(|stream| stream.last())
            .map(|e| e.version)
            .unwrap_or_else(Version::initial);

        if let Some(expected) = options.expected_version
            && current_version != expected
        {
            tracing::debug!(%aggregate_id, %expected, actual = %current_version, "append rejected");
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected,
                actual: current_version,
            });
        }

        if first_new_version != current_version.next() {
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected: options.expected_version.unwrap_or(current_version),
                actual: current_version,
            });
        }

        let last_version = events.last().map_or(current_version, |e| e.version);
        if current_version == Version::initial() {
            streams.order.push(aggregate_id);
        }
        streams
            .by_aggregate
            .entry(aggregate_id)
            .or_default()
            .extend(events);

        Ok(last_version)
    }

    async fn get_events_for_aggregate(
        &self,
        aggregate_id: AggregateId,
    ) -> Result<Vec<EventEnvelope>> {
        let streams = self.streams.read().await;
        Ok(streams
            .by_aggregate
            .get(&aggregate_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn aggregate_ids(&self, aggregate_type: &str) -> Result<Vec<AggregateId>> {
        let streams = self.streams.read().await;
        Ok(streams
            .order
            .iter()
            .filter(|id| {
                streams
                    .by_aggregate
                    .get(id)
                    .and_then(|stream| stream.first())
                    .is_some_and(|e| e.aggregate_type == aggregate_type)
            })
            .copied()
            .collect())
    }

    async fn get_aggregate_version(&self, aggregate_id: AggregateId) -> Result<Option<Version>> {
        let streams = self.streams.read().await;
        Ok(streams
            .by_aggregate
            .get(&aggregate_id)
            .and_then(|stream| stream.last())
            .map(|e| e.version))
    }
}
