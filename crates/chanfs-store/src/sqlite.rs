//! SQLite persistence for channels and messages.
//!
//! The filesystem side only reads through [`MessageStore`]; the append
//! surface (`create_channel`, `append_message`) exists for the
//! ingestion pipeline and for seeding databases from the CLI.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::record::MessageRecord;
use crate::MessageStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS channels (
    name TEXT PRIMARY KEY,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    channel TEXT NOT NULL,
    ts REAL NOT NULL,
    user_name TEXT,
    bot_name TEXT,
    text TEXT NOT NULL,
    FOREIGN KEY (channel) REFERENCES channels(name) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_messages_channel_ts ON messages(channel, ts);
"#;

/// SQLite-backed message store.
///
/// The connection sits behind a mutex because `rusqlite::Connection`
/// is not `Sync`; every query takes the lock for its duration.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        debug!(path = %path.as_ref().display(), "opening message database");
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Create an in-memory database (for testing).
    pub fn in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a channel if it does not already exist.
    pub fn create_channel(&self, name: &str) -> StoreResult<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR IGNORE INTO channels (name, created_at) VALUES (?1, ?2)",
            params![name, unix_now()],
        )?;
        Ok(())
    }

    /// Append a record to a channel, creating the channel as needed.
    pub fn append_message(&self, channel: &str, record: &MessageRecord) -> StoreResult<()> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR IGNORE INTO channels (name, created_at) VALUES (?1, ?2)",
            params![channel, unix_now()],
        )?;
        conn.execute(
            "INSERT INTO messages (channel, ts, user_name, bot_name, text)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![channel, record.ts, record.user, record.bot, record.text],
        )?;
        Ok(())
    }

    fn channel_exists(conn: &Connection, channel: &str) -> StoreResult<bool> {
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM channels WHERE name = ?1",
                params![channel],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[async_trait]
impl MessageStore for SqliteStore {
    async fn list_channels(&self) -> StoreResult<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare("SELECT name FROM channels ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<String>, _>>()?)
    }

    async fn fetch_messages(&self, channel: &str) -> StoreResult<Vec<MessageRecord>> {
        let conn = self.conn.lock();
        if !Self::channel_exists(&conn, channel)? {
            return Err(StoreError::channel_not_found(channel));
        }

        // Equal timestamps fall back to insertion (rowid) order.
        let mut stmt = conn.prepare(
            "SELECT ts, user_name, bot_name, text FROM messages
             WHERE channel = ?1 ORDER BY ts, id",
        )?;
        let rows = stmt.query_map(params![channel], |row| {
            Ok(MessageRecord {
                ts: row.get(0)?,
                user: row.get(1)?,
                bot: row.get(2)?,
                text: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.list_channels().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_and_fetch_ordered() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .append_message("general", &MessageRecord::user(2.0, "bob", "second"))
            .unwrap();
        store
            .append_message("general", &MessageRecord::user(1.0, "alice", "first"))
            .unwrap();

        let messages = store.fetch_messages("general").await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "first");
        assert_eq!(messages[1].text, "second");
    }

    #[tokio::test]
    async fn equal_timestamps_keep_insertion_order() {
        let store = SqliteStore::in_memory().unwrap();
        for text in ["a", "b", "c"] {
            store
                .append_message("ties", &MessageRecord::user(5.0, "alice", text))
                .unwrap();
        }

        let messages = store.fetch_messages("ties").await.unwrap();
        let texts: Vec<_> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn unknown_channel_errors() {
        let store = SqliteStore::in_memory().unwrap();
        let err = store.fetch_messages("nope").await.unwrap_err();
        assert!(matches!(err, StoreError::ChannelNotFound(c) if c == "nope"));
    }

    #[tokio::test]
    async fn create_channel_is_idempotent() {
        let store = SqliteStore::in_memory().unwrap();
        store.create_channel("general").unwrap();
        store.create_channel("general").unwrap();

        let channels = store.list_channels().await.unwrap();
        assert_eq!(channels, vec!["general".to_string()]);
        assert!(store.fetch_messages("general").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .append_message("general", &MessageRecord::bot(1.5, "hookbot", "hi"))
                .unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let messages = store.fetch_messages("general").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender(), Some("hookbot"));
    }
}
