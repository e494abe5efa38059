//! Top-level message assembly

use chrono::{DateTime, Utc};
use log::debug;

use super::crlf::normalize_crlf;
use super::encode::{encode_address, encode_address_list, encode_header_if_needed};
use super::error::ComposeError;
use super::message_id::random_message_id;
use super::mime::build_body;
use crate::models::MailOptions;

/// Headers the composer always writes itself; caller copies are dropped
const STRUCTURAL_HEADERS: &[&str] = &["MIME-Version", "Content-Type", "Content-Transfer-Encoding"];

/// Compose `opts` into a complete RFC 5322 message dated now.
pub fn compose_message(opts: &MailOptions) -> Result<Vec<u8>, ComposeError> {
    compose_message_at(opts, Utc::now())
}

/// Compose `opts` into a complete RFC 5322 message with the given date.
///
/// Fails before producing any output if a header-bound value contains a raw
/// CR or LF. A caller-supplied `Message-ID` or `Date` in
/// `additional_headers` replaces the generated one.
pub fn compose_message_at(opts: &MailOptions, date: DateTime<Utc>) -> Result<Vec<u8>, ComposeError> {
    validate(opts)?;

    let extra = &opts.additional_headers;
    let mut out = String::new();

    push_header(&mut out, "From", &encode_address(&opts.from));
    if !opts.to.is_empty() {
        push_header(&mut out, "To", &encode_address_list(&opts.to));
    }
    if !opts.cc.is_empty() {
        push_header(&mut out, "Cc", &encode_address_list(&opts.cc));
    }
    if !opts.bcc.is_empty() {
        push_header(&mut out, "Bcc", &encode_address_list(&opts.bcc));
    }
    push_header(&mut out, "Subject", &encode_header_if_needed(&opts.subject));
    if let Some(reply_to) = opts.reply_to.as_deref().filter(|r| !r.trim().is_empty()) {
        push_header(&mut out, "Reply-To", &encode_address(reply_to));
    }
    if !extra.contains("Date") {
        push_header(&mut out, "Date", &date.to_rfc2822());
    }
    if !extra.contains("Message-ID") {
        push_header(&mut out, "Message-ID", &random_message_id(&opts.from));
    }
    for header in extra {
        if STRUCTURAL_HEADERS
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&header.name))
        {
            continue;
        }
        push_header(&mut out, &header.name, &encode_header_if_needed(&header.value));
    }

    let body = build_body(
        opts.body.as_deref(),
        opts.body_html.as_deref(),
        &opts.attachments,
    );
    push_header(&mut out, "MIME-Version", "1.0");
    body.write_headers(&mut out);
    out.push_str("\r\n");
    body.write_body(&mut out);

    let message = normalize_crlf(&out).into_bytes();
    debug!(
        "Composed message: {} bytes, {} attachment(s)",
        message.len(),
        opts.attachments.len()
    );
    Ok(message)
}

fn push_header(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push_str("\r\n");
}

/// Reject raw CR/LF in anything that ends up inside a header line
fn validate(opts: &MailOptions) -> Result<(), ComposeError> {
    check("From", &opts.from)?;
    for addr in &opts.to {
        check("To", addr)?;
    }
    for addr in &opts.cc {
        check("Cc", addr)?;
    }
    for addr in &opts.bcc {
        check("Bcc", addr)?;
    }
    if let Some(reply_to) = &opts.reply_to {
        check("Reply-To", reply_to)?;
    }
    check("Subject", &opts.subject)?;
    for header in &opts.additional_headers {
        check(&header.name, &header.name)?;
        check(&header.name, &header.value)?;
    }
    for attachment in &opts.attachments {
        check("Content-Disposition", &attachment.filename)?;
        check("Content-Type", &attachment.mime_type)?;
    }
    Ok(())
}

fn check(header: &str, value: &str) -> Result<(), ComposeError> {
    if value.contains(['\r', '\n']) {
        return Err(ComposeError::HeaderInjection {
            header: header.escape_debug().to_string(),
        });
    }
    Ok(())
}
