//! Filling an outbound message from reply metadata

use super::recipients::build_reply_all_recipients;
use crate::models::{MailOptions, ReplyInfo};

/// Prefix added to reply subjects
const REPLY_PREFIX: &str = "Re: ";

/// Address `opts` as a reply to `info`.
///
/// Recipients are replaced: reply-all uses [`build_reply_all_recipients`],
/// a plain reply goes to Reply-To or From only. An empty subject is taken
/// from the original and prefixed with `Re: ` unless it already has one.
/// `In-Reply-To` and `References` are set when the original had a
/// Message-ID.
pub fn apply_reply(opts: &mut MailOptions, info: &ReplyInfo, self_email: &str, reply_all: bool) {
    if reply_all {
        let recipients = build_reply_all_recipients(info, self_email);
        opts.to = recipients.to;
        opts.cc = recipients.cc;
    } else {
        let sender = info
            .reply_to_addr
            .clone()
            .filter(|addr| !addr.is_empty())
            .unwrap_or_else(|| info.from_addr.clone());
        opts.to = if sender.is_empty() { Vec::new() } else { vec![sender] };
    }

    if opts.subject.is_empty() {
        opts.subject = reply_subject(&info.subject);
    }

    if !info.in_reply_to.is_empty() {
        opts.additional_headers.insert("In-Reply-To", info.in_reply_to.clone());
        opts.additional_headers.insert("References", info.references.clone());
    }
}

/// `Re: subject`, without stacking prefixes
pub fn reply_subject(subject: &str) -> String {
    let subject = subject.trim();
    let already_reply = subject
        .get(..3)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("re:"));
    if already_reply {
        subject.to_string()
    } else {
        format!("{}{}", REPLY_PREFIX, subject)
    }
}
