//! MIME part tree construction and serialization

use base64::prelude::*;

use super::crlf::normalize_crlf;
use super::encode::content_disposition_filename;
use super::message_id::random_token;
use crate::models::MailAttachment;

/// Base64 line length for attachment bodies
const BASE64_LINE_LEN: usize = 76;

/// Random characters in a boundary, after the prefix
const BOUNDARY_TOKEN_LEN: usize = 28;

/// Content type used when an attachment has none
const DEFAULT_ATTACHMENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultipartKind {
    Mixed,
    Alternative,
}

impl MultipartKind {
    fn as_str(self) -> &'static str {
        match self {
            MultipartKind::Mixed => "mixed",
            MultipartKind::Alternative => "alternative",
        }
    }
}

/// One node of the MIME tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MimePart {
    /// `text/<subtype>; charset=utf-8`, body already CRLF-normalized
    Text { subtype: &'static str, body: String },
    Attachment {
        mime_type: String,
        filename: String,
        data: Vec<u8>,
    },
    Multipart {
        kind: MultipartKind,
        boundary: String,
        parts: Vec<MimePart>,
    },
}

impl MimePart {
    fn text(subtype: &'static str, body: &str) -> Self {
        let mut body = normalize_crlf(body);
        if !body.ends_with("\r\n") {
            body.push_str("\r\n");
        }
        MimePart::Text { subtype, body }
    }

    /// Value of this part's Content-Type header
    pub fn content_type(&self) -> String {
        match self {
            MimePart::Text { subtype, .. } => format!("text/{}; charset=utf-8", subtype),
            MimePart::Attachment { mime_type, .. } => {
                if mime_type.trim().is_empty() {
                    DEFAULT_ATTACHMENT_TYPE.to_string()
                } else {
                    mime_type.clone()
                }
            }
            MimePart::Multipart { kind, boundary, .. } => {
                format!("multipart/{}; boundary=\"{}\"", kind.as_str(), boundary)
            }
        }
    }

    /// Write the part's own headers, each terminated by CRLF
    pub fn write_headers(&self, out: &mut String) {
        push_header(out, "Content-Type", &self.content_type());
        match self {
            MimePart::Text { body, .. } if !body.is_ascii() => {
                push_header(out, "Content-Transfer-Encoding", "8bit");
            }
            MimePart::Attachment { filename, .. } => {
                push_header(out, "Content-Transfer-Encoding", "base64");
                push_header(
                    out,
                    "Content-Disposition",
                    &format!("attachment; {}", content_disposition_filename(filename)),
                );
            }
            _ => {}
        }
    }

    /// Write the part's body (everything after the blank line)
    pub fn write_body(&self, out: &mut String) {
        match self {
            MimePart::Text { body, .. } => out.push_str(body),
            MimePart::Attachment { data, .. } => {
                let encoded = BASE64_STANDARD.encode(data);
                // base64 output is ASCII, so byte chunks are valid str slices
                for chunk in encoded.as_bytes().chunks(BASE64_LINE_LEN) {
                    out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
                    out.push_str("\r\n");
                }
            }
            MimePart::Multipart { boundary, parts, .. } => {
                for part in parts {
                    out.push_str("--");
                    out.push_str(boundary);
                    out.push_str("\r\n");
                    part.write_headers(out);
                    out.push_str("\r\n");
                    part.write_body(out);
                }
                out.push_str("--");
                out.push_str(boundary);
                out.push_str("--\r\n");
            }
        }
    }
}

fn push_header(out: &mut String, name: &str, value: &str) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push_str("\r\n");
}

/// Hands out boundaries that differ from each other and from the text content
struct BoundaryGenerator<'a> {
    used: Vec<String>,
    content: Vec<&'a str>,
}

impl<'a> BoundaryGenerator<'a> {
    fn new(content: Vec<&'a str>) -> Self {
        Self {
            used: Vec::new(),
            content,
        }
    }

    fn next(&mut self) -> String {
        loop {
            // '_' never occurs in standard base64, so attachments cannot collide
            let candidate = format!("gw_{}", random_token(BOUNDARY_TOKEN_LEN));
            let clashes = self.used.iter().any(|b| b == &candidate)
                || self.content.iter().any(|c| c.contains(candidate.as_str()));
            if !clashes {
                self.used.push(candidate.clone());
                return candidate;
            }
        }
    }
}

/// Build the MIME tree for a message body.
///
/// Empty strings count as absent. With neither text nor HTML an empty
/// text/plain part is produced.
pub fn build_body(
    body: Option<&str>,
    body_html: Option<&str>,
    attachments: &[MailAttachment],
) -> MimePart {
    let body = body.filter(|b| !b.is_empty());
    let body_html = body_html.filter(|b| !b.is_empty());
    let mut boundaries = BoundaryGenerator::new(body.into_iter().chain(body_html).collect());

    let mixed_boundary = (!attachments.is_empty()).then(|| boundaries.next());

    let content = match (body, body_html) {
        (Some(text), Some(html)) => MimePart::Multipart {
            kind: MultipartKind::Alternative,
            boundary: boundaries.next(),
            parts: vec![MimePart::text("plain", text), MimePart::text("html", html)],
        },
        (None, Some(html)) => MimePart::text("html", html),
        (Some(text), None) => MimePart::text("plain", text),
        (None, None) => MimePart::text("plain", ""),
    };

    match mixed_boundary {
        None => content,
        Some(boundary) => {
            let mut parts = Vec::with_capacity(attachments.len() + 1);
            parts.push(content);
            parts.extend(attachments.iter().map(|a| MimePart::Attachment {
                mime_type: a.mime_type.clone(),
                filename: a.filename.clone(),
                data: a.data.clone(),
            }));
            MimePart::Multipart {
                kind: MultipartKind::Mixed,
                boundary,
                parts,
            }
        }
    }
}
