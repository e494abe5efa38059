//! Reply threading: In-Reply-To, References and thread selection

use anyhow::{Context, Result, bail};
use log::debug;

use crate::models::{MessageId, MessageRecord, ReplyInfo, ThreadId, parse_address_list};
use crate::storage::MessageStore;

/// Threading headers for a reply to one message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyHeaders {
    pub in_reply_to: String,
    pub references: String,
    pub thread_id: ThreadId,
}

/// Fetch `message_id` and derive the headers that attach a reply to it.
pub fn reply_headers<S>(store: &S, message_id: &MessageId) -> Result<ReplyHeaders>
where
    S: MessageStore + ?Sized,
{
    debug!("Fetching message {} for reply headers", message_id.as_str());
    let message = store
        .get_message(message_id)
        .with_context(|| format!("Failed to fetch message {}", message_id.as_str()))?;

    let in_reply_to = message.rfc_message_id().unwrap_or_default().to_string();
    let references = build_references(message.headers.get("References"), &in_reply_to);

    Ok(ReplyHeaders {
        in_reply_to,
        references,
        thread_id: message.thread_id,
    })
}

/// Existing References with the parent's Message-ID appended.
///
/// The chain is joined with one space as-is; repeated whitespace or ids
/// already present are left alone.
fn build_references(existing: Option<&str>, in_reply_to: &str) -> String {
    match existing {
        Some(existing) => format!("{} {}", existing, in_reply_to),
        None => in_reply_to.to_string(),
    }
}

/// Load the data needed to reply to a message or to the latest message of a
/// thread.
///
/// `message_id` wins when both are given. With neither, an empty
/// [`ReplyInfo`] is returned without touching the store.
pub fn fetch_reply_info<S>(
    store: &S,
    message_id: Option<&MessageId>,
    thread_id: Option<&ThreadId>,
) -> Result<ReplyInfo>
where
    S: MessageStore + ?Sized,
{
    let message_id = message_id.filter(|id| !id.as_str().is_empty());
    let thread_id = thread_id.filter(|id| !id.is_empty());

    if let Some(message_id) = message_id {
        debug!("Fetching message {} for reply", message_id.as_str());
        let message = store
            .get_message(message_id)
            .with_context(|| format!("Failed to fetch message {}", message_id.as_str()))?;
        return Ok(reply_info_from_message(&message));
    }

    let Some(thread_id) = thread_id else {
        return Ok(ReplyInfo::default());
    };

    debug!("Fetching thread {} for reply", thread_id.as_str());
    let thread = store
        .get_thread(thread_id)
        .with_context(|| format!("Failed to fetch thread {}", thread_id.as_str()))?;

    match select_latest_thread_message(&thread.messages) {
        Some(message) => Ok(reply_info_from_message(message)),
        None => bail!("Thread {} has no messages", thread_id.as_str()),
    }
}

/// Pick the message with the greatest internal date.
///
/// Missing entries are skipped. Ties keep the earlier message. When no
/// message carries a timestamp, the last present message is returned.
pub fn select_latest_thread_message(messages: &[Option<MessageRecord>]) -> Option<&MessageRecord> {
    let mut latest: Option<&MessageRecord> = None;
    let mut last = None;

    for message in messages.iter().flatten() {
        last = Some(message);
        if message.internal_date > 0
            && latest.is_none_or(|best| message.internal_date > best.internal_date)
        {
            latest = Some(message);
        }
    }

    latest.or(last)
}

fn reply_info_from_message(message: &MessageRecord) -> ReplyInfo {
    let headers = &message.headers;
    let first_address = |name: &str| {
        headers
            .get(name)
            .and_then(|value| parse_address_list(value).into_iter().next())
    };
    let address_list = |name: &str| {
        headers
            .get(name)
            .map(parse_address_list)
            .unwrap_or_default()
    };

    let in_reply_to = message.rfc_message_id().unwrap_or_default().to_string();
    let references = build_references(headers.get("References"), &in_reply_to);

    ReplyInfo {
        thread_id: message.thread_id.clone(),
        from_addr: first_address("From").unwrap_or_default(),
        reply_to_addr: first_address("Reply-To"),
        to_addrs: address_list("To"),
        cc_addrs: address_list("Cc"),
        in_reply_to,
        references,
        subject: headers.get("Subject").unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryMessageStore;

    fn ids(messages: &[Option<MessageRecord>]) -> Option<&str> {
        select_latest_thread_message(messages).map(|m| m.id.as_str())
    }

    #[test]
    fn test_select_latest_by_date() {
        let messages = vec![
            Some(MessageRecord::new("m1", "t1")),
            Some(MessageRecord::new("m2", "t1").with_internal_date(10)),
            Some(MessageRecord::new("m3", "t1").with_internal_date(20)),
        ];
        assert_eq!(ids(&messages), Some("m3"));
    }

    #[test]
    fn test_select_skips_missing() {
        let messages = vec![None, Some(MessageRecord::new("m1", "t1"))];
        assert_eq!(ids(&messages), Some("m1"));
    }

    #[test]
    fn test_select_without_dates_takes_last() {
        let messages = vec![
            Some(MessageRecord::new("m1", "t1")),
            Some(MessageRecord::new("m2", "t1")),
            None,
        ];
        assert_eq!(ids(&messages), Some("m2"));
    }

    #[test]
    fn test_select_out_of_order_dates() {
        let messages = vec![
            Some(MessageRecord::new("m1", "t1").with_internal_date(30)),
            Some(MessageRecord::new("m2", "t1").with_internal_date(10)),
            Some(MessageRecord::new("m3", "t1")),
        ];
        assert_eq!(ids(&messages), Some("m1"));
    }

    #[test]
    fn test_select_empty() {
        assert_eq!(ids(&[]), None);
        assert_eq!(ids(&[None, None]), None);
    }

    #[test]
    fn test_build_references() {
        assert_eq!(build_references(None, "<b@x>"), "<b@x>");
        assert_eq!(build_references(Some("<a@x>"), "<b@x>"), "<a@x> <b@x>");
        assert_eq!(build_references(Some("<a@x>  <b@x>"), "<b@x>"), "<a@x>  <b@x> <b@x>");
    }

    #[test]
    fn test_reply_headers() {
        let store = InMemoryMessageStore::new();
        store
            .insert_message(
                MessageRecord::new("m1", "t1")
                    .with_header("Message-Id", "<parent@x>")
                    .with_header("References", "<root@x>"),
            )
            .unwrap();

        let headers = reply_headers(&store, &MessageId::new("m1")).unwrap();
        assert_eq!(headers.in_reply_to, "<parent@x>");
        assert_eq!(headers.references, "<root@x> <parent@x>");
        assert_eq!(headers.thread_id, ThreadId::new("t1"));
    }

    #[test]
    fn test_reply_headers_fetch_error() {
        let store = InMemoryMessageStore::new();
        let err = reply_headers(&store, &MessageId::new("nope")).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_fetch_reply_info_neither_id() {
        let store = InMemoryMessageStore::new();
        let info = fetch_reply_info(&store, None, None).unwrap();
        assert_eq!(info, ReplyInfo::default());

        let empty = MessageId::new("");
        let info = fetch_reply_info(&store, Some(&empty), None).unwrap();
        assert_eq!(info, ReplyInfo::default());
    }

    #[test]
    fn test_fetch_reply_info_from_message() {
        let store = InMemoryMessageStore::new();
        store
            .insert_message(
                MessageRecord::new("m1", "t1")
                    .with_header("From", "Sender <Sender@Example.com>")
                    .with_header("Reply-To", "\"List\" <list@example.com>")
                    .with_header("To", "me@example.com, Alice <alice@example.com>")
                    .with_header("Cc", "bob@example.com")
                    .with_header("Subject", "Plans")
                    .with_header("Message-ID", "<m1@example.com>"),
            )
            .unwrap();

        let info = fetch_reply_info(&store, Some(&MessageId::new("m1")), None).unwrap();
        assert_eq!(info.thread_id, ThreadId::new("t1"));
        assert_eq!(info.from_addr, "sender@example.com");
        assert_eq!(info.reply_to_addr.as_deref(), Some("list@example.com"));
        assert_eq!(info.to_addrs, vec!["me@example.com", "alice@example.com"]);
        assert_eq!(info.cc_addrs, vec!["bob@example.com"]);
        assert_eq!(info.in_reply_to, "<m1@example.com>");
        assert_eq!(info.references, "<m1@example.com>");
        assert_eq!(info.subject, "Plans");
    }

    #[test]
    fn test_fetch_reply_info_from_thread() {
        let store = InMemoryMessageStore::new();
        store
            .insert_message(
                MessageRecord::new("m1", "t1")
                    .with_internal_date(100)
                    .with_header("From", "old@example.com"),
            )
            .unwrap();
        store
            .insert_message(
                MessageRecord::new("m2", "t1")
                    .with_internal_date(200)
                    .with_header("From", "new@example.com"),
            )
            .unwrap();

        let info = fetch_reply_info(&store, None, Some(&ThreadId::new("t1"))).unwrap();
        assert_eq!(info.from_addr, "new@example.com");
        assert_eq!(info.reply_to_addr, None);
    }

    #[test]
    fn test_fetch_reply_info_empty_thread() {
        let store = InMemoryMessageStore::new();
        store
            .link_message_to_thread(&MessageId::new("gone"), &ThreadId::new("t1"))
            .unwrap();
        assert!(fetch_reply_info(&store, None, Some(&ThreadId::new("t1"))).is_err());
    }
}
