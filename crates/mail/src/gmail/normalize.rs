//! Gmail API response normalization
//!
//! Converts Gmail API responses to message store records.

use base64::prelude::*;

use super::api::{GmailMessage, GmailThread};
use crate::models::{Headers, MessageId, MessageRecord, ThreadId, ThreadRecord};

/// Convert a Gmail API message to a store record
///
/// A missing or unparseable internal date becomes 0 ("unknown").
pub fn normalize_message(gmail_msg: GmailMessage) -> MessageRecord {
    let internal_date = gmail_msg
        .internal_date
        .as_deref()
        .and_then(|d| d.parse().ok())
        .unwrap_or(0);

    let headers = gmail_msg
        .payload
        .and_then(|p| p.headers)
        .map(Headers::from)
        .unwrap_or_default();

    MessageRecord {
        id: MessageId::new(gmail_msg.id),
        thread_id: ThreadId::new(gmail_msg.thread_id),
        internal_date,
        headers,
    }
}

/// Convert a Gmail API thread, keeping null message slots as `None`
pub fn normalize_thread(gmail_thread: GmailThread) -> ThreadRecord {
    ThreadRecord {
        id: ThreadId::new(gmail_thread.id),
        messages: gmail_thread
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(|m| m.map(normalize_message))
            .collect(),
    }
}

/// Base64url encoding expected in the `raw` field of a send request
pub fn encode_raw_for_gmail(raw: &[u8]) -> String {
    BASE64_URL_SAFE.encode(raw)
}
