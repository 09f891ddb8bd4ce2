use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use shared_types::{CreateEventRequest, Event, EventType, UpdateEventRequest};

const EVENT_COLUMNS: &str =
    "id, owner_id, title, start_ts, end_ts, event_type, description, created_at, updated_at";

fn event_from_row(row: &Row) -> rusqlite::Result<Event> {
    let event_type: String = row.get(5)?;
    Ok(Event {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        start: row.get(3)?,
        end: row.get(4)?,
        event_type: EventType::from_str_or_default(&event_type),
        description: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

pub async fn insert_event(
    conn: AsyncDbConnection,
    owner_id: &str,
    request: &CreateEventRequest,
) -> Result<Event> {
    request.validate().map_err(|e| anyhow::anyhow!(e))?;

    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let event = conn.query_row(
        &format!(
            "INSERT INTO events (owner_id, title, start_ts, end_ts, event_type, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING {EVENT_COLUMNS}"
        ),
        params![
            owner_id,
            request.title.trim(),
            request.start,
            request.end,
            request.event_type.as_str(),
            request.description.as_deref(),
            now,
            now
        ],
        event_from_row,
    )?;

    Ok(event)
}

pub async fn get_event(conn: AsyncDbConnection, id: i64, owner_id: &str) -> Result<Option<Event>> {
    let conn = conn.lock().await?;

    let event = conn
        .query_row(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1 AND owner_id = ?2"),
            params![id, owner_id],
            event_from_row,
        )
        .optional()?;

    Ok(event)
}

pub async fn list_events(conn: AsyncDbConnection, owner_id: &str) -> Result<Vec<Event>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE owner_id = ?1 ORDER BY start_ts ASC, id ASC"
    ))?;
    let events = stmt
        .query_map(params![owner_id], event_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(events)
}

/// Events that have not ended yet, soonest first
pub async fn list_future_events(
    conn: AsyncDbConnection,
    owner_id: &str,
    now: i64,
) -> Result<Vec<Event>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE owner_id = ?1 AND end_ts >= ?2
         ORDER BY start_ts ASC, id ASC"
    ))?;
    let events = stmt
        .query_map(params![owner_id, now], event_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(events)
}

pub async fn list_all_future_events(conn: AsyncDbConnection, now: i64) -> Result<Vec<Event>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE end_ts >= ?1
         ORDER BY owner_id ASC, start_ts ASC, id ASC"
    ))?;
    let events = stmt
        .query_map(params![now], event_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(events)
}

/// Applies a partial update; `None` when the event does not exist for this owner
pub async fn update_event(
    conn: AsyncDbConnection,
    id: i64,
    owner_id: &str,
    request: &UpdateEventRequest,
) -> Result<Option<Event>> {
    let Some(existing) = get_event(conn.clone(), id, owner_id).await? else {
        return Ok(None);
    };

    let merged = request.apply_to(&existing);
    if merged.title.trim().is_empty() {
        anyhow::bail!("Event title cannot be empty");
    }
    if merged.end <= merged.start {
        anyhow::bail!("Event end must be after its start");
    }

    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let event = conn
        .query_row(
            &format!(
                "UPDATE events
                 SET title = ?1, start_ts = ?2, end_ts = ?3, event_type = ?4, description = ?5, updated_at = ?6
                 WHERE id = ?7 AND owner_id = ?8
                 RETURNING {EVENT_COLUMNS}"
            ),
            params![
                merged.title.trim(),
                merged.start,
                merged.end,
                merged.event_type.as_str(),
                merged.description.as_deref(),
                now,
                id,
                owner_id
            ],
            event_from_row,
        )
        .optional()?;

    Ok(event)
}

/// Deletes and returns the removed event
pub async fn delete_event(conn: AsyncDbConnection, id: i64, owner_id: &str) -> Result<Option<Event>> {
    let conn = conn.lock().await?;

    let event = conn
        .query_row(
            &format!("DELETE FROM events WHERE id = ?1 AND owner_id = ?2 RETURNING {EVENT_COLUMNS}"),
            params![id, owner_id],
            event_from_row,
        )
        .optional()?;

    Ok(event)
}
