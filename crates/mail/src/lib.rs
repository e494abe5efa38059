//! Mail crate - outbound message composition and reply threading
//!
//! This crate provides the protocol-level core behind `send` and `reply`:
//! - Domain models (MailOptions, ReplyInfo, message store records)
//! - RFC 5322 / MIME composition with RFC 2047 and RFC 2231 encoding
//! - Reply threading (In-Reply-To, References) and reply-all recipients
//! - A message store abstraction with in-memory and Gmail implementations
//!
//! Composition is pure and synchronous; only the message store fetches
//! touch the network.

pub mod compose;
pub mod config;
pub mod gmail;
pub mod models;
pub mod reply;
pub mod storage;

pub use compose::{ComposeError, compose_message, encode_header_if_needed, normalize_crlf};
pub use config::AccountSettings;
pub use gmail::GmailClient;
pub use models::{
    EmailAddress, Header, Headers, MailAttachment, MailOptions, MessageId, MessageRecord,
    ReplyInfo, ThreadId, ThreadRecord, has_header, parse_address_list,
};
pub use reply::{
    ReplyHeaders, ReplyRecipients, apply_reply, build_reply_all_recipients, fetch_reply_info,
    reply_headers, select_latest_thread_message,
};
pub use storage::{InMemoryMessageStore, MessageStore};
