use super::EventStore;
use async_trait::async_trait;
use shared_types::{CreateEventRequest, Event, UpdateEventRequest};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    next_id: i64,
    events: BTreeMap<i64, Event>,
}

/// Non-persistent store used by `--in-memory` runs and tests
#[derive(Default)]
pub struct InMemoryEventStore {
    inner: Mutex<Inner>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_start(mut events: Vec<Event>) -> Vec<Event> {
    events.sort_by_key(|e| (e.start, e.id));
    events
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn create(&self, owner_id: &str, request: CreateEventRequest) -> anyhow::Result<Event> {
        request.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let now = chrono::Utc::now().timestamp();

        let event = Event {
            id: inner.next_id,
            owner_id: owner_id.to_string(),
            title: request.title.trim().to_string(),
            start: request.start,
            end: request.end,
            event_type: request.event_type,
            description: request.description,
            created_at: now,
            updated_at: now,
        };
        inner.events.insert(event.id, event.clone());

        Ok(event)
    }

    async fn get(&self, id: i64, owner_id: &str) -> anyhow::Result<Option<Event>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .events
            .get(&id)
            .filter(|e| e.owner_id == owner_id)
            .cloned())
    }

    async fn list(&self, owner_id: &str) -> anyhow::Result<Vec<Event>> {
        let inner = self.inner.lock().await;
        let events = inner
            .events
            .values()
            .filter(|e| e.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(sorted_by_start(events))
    }

    async fn update(
        &self,
        id: i64,
        owner_id: &str,
        request: UpdateEventRequest,
    ) -> anyhow::Result<Option<Event>> {
        let mut inner = self.inner.lock().await;
        let Some(existing) = inner.events.get_mut(&id).filter(|e| e.owner_id == owner_id) else {
            return Ok(None);
        };

        let mut merged = request.apply_to(existing);
        merged.title = merged.title.trim().to_string();
        if merged.title.is_empty() {
            anyhow::bail!("Event title cannot be empty");
        }
        if merged.end <= merged.start {
            anyhow::bail!("Event end must be after its start");
        }
        merged.updated_at = chrono::Utc::now().timestamp();

        *existing = merged.clone();
        Ok(Some(merged))
    }

    async fn delete(&self, id: i64, owner_id: &str) -> anyhow::Result<Option<Event>> {
        let mut inner = self.inner.lock().await;
        let owned = inner
            .events
            .get(&id)
            .is_some_and(|e| e.owner_id == owner_id);

        Ok(if owned { inner.events.remove(&id) } else { None })
    }

    async fn list_future(&self, owner_id: &str, now: i64) -> anyhow::Result<Vec<Event>> {
        let inner = self.inner.lock().await;
        let events = inner
            .events
            .values()
            .filter(|e| e.owner_id == owner_id && e.end >= now)
            .cloned()
            .collect();
        Ok(sorted_by_start(events))
    }

    async fn list_future_all(&self, now: i64) -> anyhow::Result<Vec<Event>> {
        let inner = self.inner.lock().await;
        let events = inner
            .events
            .values()
            .filter(|e| e.end >= now)
            .cloned()
            .collect();
        Ok(sorted_by_start(events))
    }
}
