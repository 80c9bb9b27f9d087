use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                telegram_id       INTEGER PRIMARY KEY,
                name              TEXT,
                photo_id          TEXT,
                bio               TEXT,
                onboarding_state  TEXT NOT NULL DEFAULT 'awaiting_name',
                created_at        TEXT NOT NULL DEFAULT (datetime('now'))
            );

            -- One row per ordered pair; re-deciding updates status in place.
            CREATE TABLE decisions (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                from_user   INTEGER NOT NULL REFERENCES users(telegram_id),
                to_user     INTEGER NOT NULL REFERENCES users(telegram_id),
                status      TEXT NOT NULL CHECK (status IN ('liked', 'rejected')),
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
                UNIQUE (from_user, to_user)
            );

            CREATE INDEX idx_decisions_to_user
                ON decisions(to_user, from_user);

            CREATE TABLE chats (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                match_id    INTEGER NOT NULL REFERENCES decisions(id),
                sender_id   INTEGER NOT NULL REFERENCES users(telegram_id),
                message     TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX idx_chats_match
                ON chats(match_id, id);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
