pub mod memory_storage;
pub mod sqlite_storage;

pub use memory_storage::InMemoryEventStore;
pub use sqlite_storage::SqliteEventStore;

use anyhow::Result;
use async_trait::async_trait;
use shared_types::{CreateEventRequest, Event, UpdateEventRequest};

/// Authoritative home of every event.
///
/// All lookups are scoped to the owner; an id that belongs to someone else
/// behaves exactly like an id that does not exist.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn create(&self, owner_id: &str, request: CreateEventRequest) -> Result<Event>;
    async fn get(&self, id: i64, owner_id: &str) -> Result<Option<Event>>;
    async fn list(&self, owner_id: &str) -> Result<Vec<Event>>;
    async fn update(
        &self,
        id: i64,
        owner_id: &str,
        request: UpdateEventRequest,
    ) -> Result<Option<Event>>;
    async fn delete(&self, id: i64, owner_id: &str) -> Result<Option<Event>>;

    /// Events with `end >= now`, ascending by start
    async fn list_future(&self, owner_id: &str, now: i64) -> Result<Vec<Event>>;
    /// `list_future` for every owner at once
    async fn list_future_all(&self, now: i64) -> Result<Vec<Event>>;
}
