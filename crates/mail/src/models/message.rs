//! Message identifiers and fetched message metadata

use super::{Headers, ThreadId};
use serde::{Deserialize, Serialize};

/// Unique identifier for a message (Gmail message ID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Message metadata as returned by a message store
///
/// Header values are kept as opaque strings; nothing is decoded or coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: MessageId,
    pub thread_id: ThreadId,
    /// Store timestamp in milliseconds since epoch, 0 when unknown
    pub internal_date: i64,
    pub headers: Headers,
}

impl MessageRecord {
    pub fn new(id: impl Into<MessageId>, thread_id: impl Into<ThreadId>) -> Self {
        Self {
            id: id.into(),
            thread_id: thread_id.into(),
            internal_date: 0,
            headers: Headers::new(),
        }
    }

    pub fn with_internal_date(mut self, internal_date: i64) -> Self {
        self.internal_date = internal_date;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// The message's RFC 5322 Message-ID, accepting either common spelling
    pub fn rfc_message_id(&self) -> Option<&str> {
        self.headers
            .get("Message-ID")
            .or_else(|| self.headers.get("Message-Id"))
    }
}
