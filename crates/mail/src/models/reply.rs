//! Metadata of the message being replied to

use super::ThreadId;

/// Addressing and threading data taken from one fetched message
///
/// Built fresh for each reply and never modified afterwards. All addresses
/// are bare and lowercased. A default value means "nothing to reply to".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyInfo {
    pub thread_id: ThreadId,
    pub from_addr: String,
    pub reply_to_addr: Option<String>,
    pub to_addrs: Vec<String>,
    pub cc_addrs: Vec<String>,
    /// Message-ID of the replied-to message
    pub in_reply_to: String,
    /// References chain to send, already including `in_reply_to`
    pub references: String,
    /// Raw subject of the replied-to message
    pub subject: String,
}
