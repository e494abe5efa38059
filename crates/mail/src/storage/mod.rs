//! Message store abstraction
//!
//! The reply resolvers read message metadata through [`MessageStore`], so
//! they work the same against the Gmail API and against local data.

mod memory;
mod traits;

pub use memory::InMemoryMessageStore;
pub use traits::MessageStore;
