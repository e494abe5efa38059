//! Domain models for composing and threading mail

mod address;
mod header;
mod mail;
mod message;
mod reply;
mod thread;

pub use address::{EmailAddress, parse_address_list};
pub use header::{Header, Headers, has_header};
pub use mail::{MailAttachment, MailOptions};
pub use message::{MessageId, MessageRecord};
pub use reply::ReplyInfo;
pub use thread::{ThreadId, ThreadRecord};
