//! Outbound message composition
//!
//! Turns a [`MailOptions`](crate::models::MailOptions) into RFC 5322 bytes:
//! - RFC 2047 / RFC 2231 header encoding
//! - MIME tree for text, HTML and attachments
//! - Message-ID generation and CRLF canonicalization

mod composer;
mod crlf;
mod encode;
mod error;
mod message_id;
mod mime;

pub use composer::{compose_message, compose_message_at};
pub use crlf::normalize_crlf;
pub use encode::{content_disposition_filename, encode_address, encode_header_if_needed};
pub use error::ComposeError;
pub use message_id::{FALLBACK_MESSAGE_ID_DOMAIN, random_message_id};
pub use mime::{MimePart, MultipartKind, build_body};
