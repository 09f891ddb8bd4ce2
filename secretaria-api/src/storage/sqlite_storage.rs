use super::EventStore;
use crate::database::events as db;
use crate::database::AsyncDbConnection;
use async_trait::async_trait;
use shared_types::{CreateEventRequest, Event, UpdateEventRequest};

pub struct SqliteEventStore {
    conn: AsyncDbConnection,
}

impl SqliteEventStore {
    pub fn new(conn: AsyncDbConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn create(&self, owner_id: &str, request: CreateEventRequest) -> anyhow::Result<Event> {
        db::insert_event(self.conn.clone(), owner_id, &request).await
    }

    async fn get(&self, id: i64, owner_id: &str) -> anyhow::Result<Option<Event>> {
        db::get_event(self.conn.clone(), id, owner_id).await
    }

    async fn list(&self, owner_id: &str) -> anyhow::Result<Vec<Event>> {
        db::list_events(self.conn.clone(), owner_id).await
    }

    async fn update(
        &self,
        id: i64,
        owner_id: &str,
        request: UpdateEventRequest,
    ) -> anyhow::Result<Option<Event>> {
        db::update_event(self.conn.clone(), id, owner_id, &request).await
    }

    async fn delete(&self, id: i64, owner_id: &str) -> anyhow::Result<Option<Event>> {
        db::delete_event(self.conn.clone(), id, owner_id).await
    }

    async fn list_future(&self, owner_id: &str, now: i64) -> anyhow::Result<Vec<Event>> {
        db::list_future_events(self.conn.clone(), owner_id, now).await
    }

    async fn list_future_all(&self, now: i64) -> anyhow::Result<Vec<Event>> {
        db::list_all_future_events(self.conn.clone(), now).await
    }
}
