//! In-memory message store.
//!
//! Used for testing and demos. All data is lost when dropped.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::record::MessageRecord;
use crate::MessageStore;

/// In-memory message store.
///
/// Thread-safe via internal `RwLock`. Records are kept sorted by
/// timestamp; equal timestamps keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    channels: RwLock<BTreeMap<String, Vec<MessageRecord>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a channel if it does not already exist.
    pub fn create_channel(&self, name: &str) {
        self.channels.write().entry(name.to_string()).or_default();
    }

    /// Append a record to a channel, creating the channel as needed.
    pub fn append_message(&self, channel: &str, record: MessageRecord) {
        let mut channels = self.channels.write();
        let records = channels.entry(channel.to_string()).or_default();
        records.push(record);
        // Stable sort: ties keep insertion order.
        records.sort_by(|a, b| a.ts.total_cmp(&b.ts));
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn list_channels(&self) -> StoreResult<Vec<String>> {
        Ok(self.channels.read().keys().cloned().collect())
    }

    async fn fetch_messages(&self, channel: &str) -> StoreResult<Vec<MessageRecord>> {
        self.channels
            .read()
            .get(channel)
            .cloned()
            .ok_or_else(|| StoreError::channel_not_found(channel))
    }
}
