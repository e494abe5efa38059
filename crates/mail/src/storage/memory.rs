//! In-memory message store
//!
//! Used by tests and for composing replies against locally held metadata.

use anyhow::{Result, anyhow, bail};
use std::collections::HashMap;
use std::sync::RwLock;

use super::MessageStore;
use crate::models::{MessageId, MessageRecord, ThreadId, ThreadRecord};

/// In-memory implementation of MessageStore
///
/// Threads keep message ids in insertion order; a thread slot whose message
/// was never inserted comes back as `None`.
#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<HashMap<String, MessageRecord>>,
    threads: RwLock<HashMap<String, Vec<String>>>,
}

impl InMemoryMessageStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a message and append it to its thread
    pub fn insert_message(&self, message: MessageRecord) -> Result<()> {
        let id = message.id.as_str().to_string();
        let thread_id = message.thread_id.as_str().to_string();

        self.messages
            .write()
            .map_err(|_| anyhow!("message map lock poisoned"))?
            .insert(id.clone(), message);

        let mut threads = self
            .threads
            .write()
            .map_err(|_| anyhow!("thread map lock poisoned"))?;
        let ids = threads.entry(thread_id).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
        Ok(())
    }

    /// Register a thread slot pointing at a message id that may not exist
    pub fn link_message_to_thread(&self, msg_id: &MessageId, thread_id: &ThreadId) -> Result<()> {
        self.threads
            .write()
            .map_err(|_| anyhow!("thread map lock poisoned"))?
            .entry(thread_id.as_str().to_string())
            .or_default()
            .push(msg_id.as_str().to_string());
        Ok(())
    }
}

impl MessageStore for InMemoryMessageStore {
    fn get_message(&self, id: &MessageId) -> Result<MessageRecord> {
        let messages = self
            .messages
            .read()
            .map_err(|_| anyhow!("message map lock poisoned"))?;
        match messages.get(id.as_str()) {
            Some(message) => Ok(message.clone()),
            None => bail!("Message {} not found", id.as_str()),
        }
    }

    fn get_thread(&self, id: &ThreadId) -> Result<ThreadRecord> {
        let threads = self
            .threads
            .read()
            .map_err(|_| anyhow!("thread map lock poisoned"))?;
        let Some(ids) = threads.get(id.as_str()) else {
            bail!("Thread {} not found", id.as_str());
        };

        let messages = self
            .messages
            .read()
            .map_err(|_| anyhow!("message map lock poisoned"))?;
        Ok(ThreadRecord {
            id: id.clone(),
            messages: ids.iter().map(|m| messages.get(m).cloned()).collect(),
        })
    }
}
