//! Message store trait definition

use crate::models::{MessageId, MessageRecord, ThreadId, ThreadRecord};
use anyhow::Result;

/// Read access to previously delivered mail
///
/// The reply resolvers only need these two lookups. Implementations make a
/// single attempt per call; failures are returned to the caller unchanged.
pub trait MessageStore: Send + Sync {
    /// Fetch one message's metadata (thread id, internal date, headers)
    fn get_message(&self, id: &MessageId) -> Result<MessageRecord>;

    /// Fetch a thread and the metadata of its messages
    fn get_thread(&self, id: &ThreadId) -> Result<ThreadRecord>;
}
