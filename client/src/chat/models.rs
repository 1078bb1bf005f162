//! Data structures for conversations and messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation between marketplace users, optionally about one cat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub participant_ids: Vec<String>,
    #[serde(default)]
    pub cat_id: Option<String>,
    #[serde(default)]
    pub last_message_at: Option<DateTime<Utc>>,
}

/// A single chat message. Messages are displayed in the order the server
/// returns them; the server is the ordering authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
