//! Reply support
//!
//! Resolves who a reply goes to and how it threads:
//! - fetching the replied-to message (or a thread's latest message)
//! - In-Reply-To / References derivation
//! - reply-all recipient computation

mod draft;
mod recipients;
mod threading;

pub use draft::{apply_reply, reply_subject};
pub use recipients::{ReplyRecipients, build_reply_all_recipients};
pub use threading::{ReplyHeaders, fetch_reply_info, reply_headers, select_latest_thread_message};
