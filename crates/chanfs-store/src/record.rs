//! Message records.

use serde::{Deserialize, Serialize};

/// One timestamped text record in a channel.
///
/// Exactly one of `user` and `bot` is expected to be present. Records
/// with neither are a data-integrity defect the consumer surfaces
/// rather than papering over; the store carries them as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Timestamp, seconds since the epoch. Fractional part carries
    /// sub-second ordering where the ingestion pipeline provides it.
    pub ts: f64,
    /// Human sender name, if a human wrote the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Bot sender name, if an automated sender wrote the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot: Option<String>,
    /// Message body.
    pub text: String,
}

impl MessageRecord {
    /// Create a record attributed to a human sender.
    pub fn user(ts: f64, user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            ts,
            user: Some(user.into()),
            bot: None,
            text: text.into(),
        }
    }

    /// Create a record attributed to an automated sender.
    pub fn bot(ts: f64, bot: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            ts,
            user: None,
            bot: Some(bot.into()),
            text: text.into(),
        }
    }

    /// Display sender: the bot name when present, otherwise the user
    /// name. `None` means the record carries neither.
    pub fn sender(&self) -> Option<&str> {
        self.bot.as_deref().or(self.user.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_prefers_bot() {
        let mut record = MessageRecord::user(1.0, "alice", "hi");
        assert_eq!(record.sender(), Some("alice"));

        record.bot = Some("hookbot".to_string());
        assert_eq!(record.sender(), Some("hookbot"));
    }

    #[test]
    fn sender_missing_is_none() {
        let record = MessageRecord {
            ts: 1.0,
            user: None,
            bot: None,
            text: "orphan".to_string(),
        };
        assert_eq!(record.sender(), None);
    }

    #[test]
    fn json_roundtrip() {
        let record = MessageRecord::bot(1503435956.000247, "hookbot", "deploy done");
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("user"));
        let back: MessageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
