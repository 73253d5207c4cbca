//! Message store contract and backends.
//!
//! A store holds named channels, each an append-only sequence of
//! timestamped text records written by an external ingestion pipeline.
//! chanfs consumes it strictly read-only through [`MessageStore`]:
//!
//! - [`SqliteStore`] - SQLite persistence (plus the thin append surface
//!   the ingestion side uses)
//! - [`MemoryStore`] - in-memory store (for testing and demos)

mod error;
mod memory;
mod record;
mod sqlite;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use record::MessageRecord;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

/// Read-only view of a message store.
///
/// `fetch_messages` returns records in ascending timestamp order. The
/// tie-break for equal timestamps is store-defined; callers must not
/// assume it is stable across calls.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// List the names of all channels currently in the store.
    async fn list_channels(&self) -> StoreResult<Vec<String>>;

    /// Fetch all records for a channel, ordered by ascending timestamp.
    ///
    /// Fails with [`StoreError::ChannelNotFound`] if the channel does
    /// not exist.
    async fn fetch_messages(&self, channel: &str) -> StoreResult<Vec<MessageRecord>>;
}
