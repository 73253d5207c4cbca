//! On-demand channel content assembly.
//!
//! A channel file's content is the full record sequence formatted and
//! joined, recomputed from the store on every call. There is no
//! wrapping, truncation, pagination, or caching; a getattr that only
//! needs a length pays the same cost as a full read.

use chanfs_store::{MessageRecord, MessageStore};

use crate::error::{FsError, FsResult};

/// Separator between rendered records.
pub const SEPARATOR: &str = "\n----------\n";

/// Render one record as a display line.
///
/// Shape: `<ts>) <channel>/<sender>:\n<text>`. The sender is the bot
/// name when present, otherwise the user name; a record with neither
/// is surfaced as a data-integrity error, not defaulted.
pub fn render_record(channel: &str, record: &MessageRecord) -> FsResult<String> {
    let sender = record.sender().ok_or_else(|| {
        FsError::DataIntegrity(format!(
            "record at ts {} in channel {channel} has no sender",
            record.ts
        ))
    })?;
    Ok(format!(
        "{}) {}/{}:\n{}",
        record.ts, channel, sender, record.text
    ))
}

/// Materialize the full content of a channel.
///
/// Records arrive from the store in ascending timestamp order; the
/// tie-break for equal timestamps is store-defined and ties may
/// reorder across calls.
pub async fn materialize(store: &dyn MessageStore, channel: &str) -> FsResult<Vec<u8>> {
    let records = store.fetch_messages(channel).await?;

    let mut lines = Vec::with_capacity(records.len());
    for record in &records {
        lines.push(render_record(channel, record)?);
    }

    Ok(lines.join(SEPARATOR).into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanfs_store::MemoryStore;

    #[tokio::test]
    async fn formats_records_in_order() {
        let store = MemoryStore::new();
        store.append_message("general", MessageRecord::user(1.0, "alice", "hi"));
        store.append_message("general", MessageRecord::bot(2.0, "bot1", "bye"));

        let content = materialize(&store, "general").await.unwrap();
        assert_eq!(
            String::from_utf8(content).unwrap(),
            "1) general/alice:\nhi\n----------\n2) general/bot1:\nbye"
        );
    }

    #[tokio::test]
    async fn empty_channel_is_empty_content() {
        let store = MemoryStore::new();
        store.create_channel("quiet");

        let content = materialize(&store, "quiet").await.unwrap();
        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn single_record_has_no_separator() {
        let store = MemoryStore::new();
        store.append_message("solo", MessageRecord::user(7.5, "alice", "only"));

        let content = materialize(&store, "solo").await.unwrap();
        assert_eq!(String::from_utf8(content).unwrap(), "7.5) solo/alice:\nonly");
    }

    #[tokio::test]
    async fn missing_sender_is_integrity_error() {
        let store = MemoryStore::new();
        store.append_message(
            "broken",
            MessageRecord {
                ts: 1.0,
                user: None,
                bot: None,
                text: "orphan".to_string(),
            },
        );

        assert!(matches!(
            materialize(&store, "broken").await,
            Err(FsError::DataIntegrity(_))
        ));
    }

    #[tokio::test]
    async fn missing_channel_is_store_error() {
        let store = MemoryStore::new();
        assert!(matches!(
            materialize(&store, "missing").await,
            Err(FsError::Store(_))
        ));
    }

    #[tokio::test]
    async fn record_count_matches_line_count() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.append_message(
                "busy",
                MessageRecord::user(i as f64, "alice", format!("msg {i}")),
            );
        }

        let content = materialize(&store, "busy").await.unwrap();
        let text = String::from_utf8(content).unwrap();
        assert_eq!(text.split(SEPARATOR).count(), 5);
    }
}
