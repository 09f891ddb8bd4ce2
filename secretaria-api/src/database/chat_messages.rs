use crate::database::AsyncDbConnection;
use anyhow::Result;
use rusqlite::params;
use shared_types::ChatMessage;

pub async fn insert_message(
    conn: AsyncDbConnection,
    owner_id: &str,
    text: &str,
    is_user: bool,
) -> Result<ChatMessage> {
    let conn = conn.lock().await?;
    let now = chrono::Utc::now().timestamp();

    let message = conn.query_row(
        "INSERT INTO chat_messages (owner_id, text, is_user, timestamp)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING id, owner_id, text, is_user, timestamp",
        params![owner_id, text, is_user, now],
        |row| {
            Ok(ChatMessage {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                text: row.get(2)?,
                is_user: row.get(3)?,
                timestamp: row.get(4)?,
            })
        },
    )?;

    Ok(message)
}

/// Most recent `limit` messages, returned oldest first
pub async fn list_messages(
    conn: AsyncDbConnection,
    owner_id: &str,
    limit: usize,
) -> Result<Vec<ChatMessage>> {
    let conn = conn.lock().await?;

    let mut stmt = conn.prepare(
        "SELECT id, owner_id, text, is_user, timestamp
         FROM chat_messages
         WHERE owner_id = ?1
         ORDER BY timestamp DESC, id DESC
         LIMIT ?2",
    )?;

    let mut messages = stmt
        .query_map(params![owner_id, limit as i64], |row| {
            Ok(ChatMessage {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                text: row.get(2)?,
                is_user: row.get(3)?,
                timestamp: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    messages.reverse();
    Ok(messages)
}
