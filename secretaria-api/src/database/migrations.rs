use rusqlite::Connection;

/// Run all database migrations
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id VARCHAR NOT NULL,
            title VARCHAR NOT NULL,
            start_ts BIGINT NOT NULL,
            end_ts BIGINT NOT NULL,
            event_type VARCHAR NOT NULL DEFAULT 'event' CHECK (event_type IN ('meeting', 'event', 'training')),
            description VARCHAR,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL,
            CHECK (end_ts > start_ts)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_owner_start
            ON events(owner_id, start_ts)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_end
            ON events(end_ts)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS chat_messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id VARCHAR NOT NULL,
            text VARCHAR NOT NULL,
            is_user BOOLEAN NOT NULL,
            timestamp BIGINT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_chat_messages_owner_timestamp
            ON chat_messages(owner_id, timestamp)",
        [],
    )?;

    Ok(())
}
