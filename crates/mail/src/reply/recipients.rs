//! Reply-all recipient computation

use std::collections::HashSet;

use crate::models::ReplyInfo;

/// To/Cc lists for a reply-all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyRecipients {
    pub to: Vec<String>,
    pub cc: Vec<String>,
}

/// Compute reply-all recipients for `info`, leaving out `self_email`.
///
/// The sender is Reply-To when present, otherwise From. It goes first in To,
/// followed by the original To list. Cc keeps the original Cc minus anything
/// already in To. All comparisons ignore case and duplicates keep their
/// first position.
pub fn build_reply_all_recipients(info: &ReplyInfo, self_email: &str) -> ReplyRecipients {
    let sender = match info.reply_to_addr.as_deref() {
        Some(reply_to) if !reply_to.trim().is_empty() => reply_to,
        _ => info.from_addr.as_str(),
    };
    let self_email = self_email.trim().to_lowercase();

    let mut seen = HashSet::new();
    let to = collect_unique(
        std::iter::once(sender).chain(info.to_addrs.iter().map(String::as_str)),
        &self_email,
        &mut seen,
    );
    let cc = collect_unique(info.cc_addrs.iter().map(String::as_str), &self_email, &mut seen);

    ReplyRecipients { to, cc }
}

/// Append addresses not yet in `seen` and not equal to `self_email`
fn collect_unique<'a>(
    addrs: impl Iterator<Item = &'a str>,
    self_email: &str,
    seen: &mut HashSet<String>,
) -> Vec<String> {
    addrs
        .map(|addr| addr.trim())
        .filter(|addr| !addr.is_empty())
        .filter(|addr| {
            let key = addr.to_lowercase();
            key != self_email && seen.insert(key)
        })
        .map(str::to_string)
        .collect()
}
