//! Gmail API integration
//!
//! This module provides:
//! - A Gmail-backed [`MessageStore`](crate::storage::MessageStore)
//! - The raw-message send call
//! - Response normalization to store records

mod client;
mod normalize;

pub use client::GmailClient;
pub use normalize::{encode_raw_for_gmail, normalize_message, normalize_thread};

/// Gmail API request and response types
pub mod api {
    use serde::{Deserialize, Serialize};

    pub use crate::models::Header;

    /// Message from Gmail API (`format=metadata`)
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GmailMessage {
        pub id: String,
        pub thread_id: String,
        pub label_ids: Option<Vec<String>>,
        pub snippet: Option<String>,
        /// Milliseconds since epoch, encoded as a string
        pub internal_date: Option<String>,
        pub payload: Option<MessagePayload>,
    }

    /// Message payload; only headers are requested
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessagePayload {
        pub headers: Option<Vec<Header>>,
        pub mime_type: Option<String>,
    }

    /// Thread from Gmail API; entries of `messages` may be null
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct GmailThread {
        pub id: String,
        pub messages: Option<Vec<Option<GmailMessage>>>,
    }

    /// Body of `users/me/messages/send`
    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SendMessageRequest {
        /// Base64url-encoded RFC 5322 message
        pub raw: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub thread_id: Option<String>,
    }

    /// Response from sending a message
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SendMessageResponse {
        pub id: String,
        pub thread_id: String,
        pub label_ids: Option<Vec<String>>,
    }
}
