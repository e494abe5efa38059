//! Gmail API HTTP client
//!
//! Fetches message metadata for reply threading and sends composed messages.
//! Uses synchronous HTTP (ureq) to be executor-agnostic. Every call is made
//! once; there is no retry.

use anyhow::{Context, Result};
use log::{debug, info};

use super::api::{GmailMessage, GmailThread, SendMessageRequest, SendMessageResponse};
use super::normalize::{encode_raw_for_gmail, normalize_message, normalize_thread};
use crate::models::{MessageId, MessageRecord, ThreadId, ThreadRecord};
use crate::storage::MessageStore;

/// Headers requested with `format=metadata`
const METADATA_HEADERS: &[&str] = &[
    "From",
    "To",
    "Cc",
    "Reply-To",
    "Subject",
    "Message-ID",
    "References",
];

/// Gmail API client authorized by a bearer token
pub struct GmailClient {
    access_token: String,
}

impl GmailClient {
    /// Gmail API base URL
    const BASE_URL: &'static str = "https://gmail.googleapis.com/gmail/v1";

    /// Create a client using an already obtained OAuth access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    fn metadata_query() -> String {
        METADATA_HEADERS
            .iter()
            .map(|h| format!("&metadataHeaders={}", h))
            .collect()
    }

    /// Get message metadata by ID
    pub fn get_message_metadata(&self, id: &MessageId) -> Result<GmailMessage> {
        let url = format!(
            "{}/users/me/messages/{}?format=metadata{}",
            Self::BASE_URL,
            urlencoding::encode(id.as_str()),
            Self::metadata_query()
        );

        let mut response = ureq::get(&url)
            .header("Authorization", &self.authorization())
            .call()
            .context("Failed to send get message request")?;

        let message: GmailMessage = response
            .body_mut()
            .read_json()
            .context("Failed to parse message response")?;

        Ok(message)
    }

    /// Get a thread with metadata for each of its messages
    pub fn get_thread_metadata(&self, id: &ThreadId) -> Result<GmailThread> {
        let url = format!(
            "{}/users/me/threads/{}?format=metadata{}",
            Self::BASE_URL,
            urlencoding::encode(id.as_str()),
            Self::metadata_query()
        );

        let mut response = ureq::get(&url)
            .header("Authorization", &self.authorization())
            .call()
            .context("Failed to send get thread request")?;

        let thread: GmailThread = response
            .body_mut()
            .read_json()
            .context("Failed to parse thread response")?;

        Ok(thread)
    }

    /// Send a composed RFC 5322 message
    ///
    /// # Arguments
    /// * `raw` - Message bytes as produced by the composer
    /// * `thread_id` - Thread to file the message in, for replies
    pub fn send_raw(&self, raw: &[u8], thread_id: Option<&ThreadId>) -> Result<SendMessageResponse> {
        let url = format!("{}/users/me/messages/send", Self::BASE_URL);
        let request = SendMessageRequest {
            raw: encode_raw_for_gmail(raw),
            thread_id: thread_id
                .filter(|t| !t.is_empty())
                .map(|t| t.as_str().to_string()),
        };

        debug!("Sending message ({} bytes)", raw.len());
        let mut response = ureq::post(&url)
            .header("Authorization", &self.authorization())
            .send_json(&request)
            .context("Failed to send message")?;

        let sent: SendMessageResponse = response
            .body_mut()
            .read_json()
            .context("Failed to parse send response")?;

        info!("Sent message {} in thread {}", sent.id, sent.thread_id);
        Ok(sent)
    }
}

impl MessageStore for GmailClient {
    fn get_message(&self, id: &MessageId) -> Result<MessageRecord> {
        Ok(normalize_message(self.get_message_metadata(id)?))
    }

    fn get_thread(&self, id: &ThreadId) -> Result<ThreadRecord> {
        Ok(normalize_thread(self.get_thread_metadata(id)?))
    }
}
