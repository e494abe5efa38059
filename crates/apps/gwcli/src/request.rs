//! JSON compose requests read by the CLI

use anyhow::{Context, Result};
use mail::{Headers, MailAttachment, MailOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A message to compose, as written by the user
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ComposeRequest {
    pub from: String,
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub body: Option<String>,
    pub body_html: Option<String>,
    pub attachments: Vec<AttachmentRequest>,
    pub headers: Headers,
}

/// Attachment read from disk
#[derive(Debug, Deserialize)]
pub struct AttachmentRequest {
    pub path: PathBuf,
    /// Name shown to recipients; defaults to the file name of `path`
    pub filename: Option<String>,
    #[serde(default)]
    pub mime_type: String,
}

impl ComposeRequest {
    pub fn from_file(path: &Path) -> Result<Self> {
        config::read_json(path, "compose request")
    }

    /// Resolve attachments from disk and build composer options.
    /// Relative attachment paths are taken relative to `base_dir`.
    pub fn into_options(self, base_dir: &Path) -> Result<MailOptions> {
        let attachments = self
            .attachments
            .iter()
            .map(|a| a.load(base_dir))
            .collect::<Result<Vec<_>>>()?;

        Ok(MailOptions {
            from: self.from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            reply_to: self.reply_to,
            subject: self.subject,
            body: self.body,
            body_html: self.body_html,
            attachments,
            additional_headers: self.headers,
        })
    }
}

impl AttachmentRequest {
    fn load(&self, base_dir: &Path) -> Result<MailAttachment> {
        let path = base_dir.join(&self.path);
        let data = std::fs::read(&path)
            .with_context(|| format!("Failed to read attachment: {}", path.display()))?;
        let filename = match &self.filename {
            Some(name) => name.clone(),
            None => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .with_context(|| format!("Attachment path has no file name: {}", path.display()))?,
        };

        Ok(MailAttachment::new(filename, self.mime_type.clone(), data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let json = r#"{
            "from": "me@example.com",
            "to": ["a@example.com"],
            "subject": "Hi",
            "body": "Hello",
            "headers": [{"name": "X-Tag", "value": "1"}]
        }"#;
        let request: ComposeRequest = serde_json::from_str(json).unwrap();
        let opts = request.into_options(Path::new(".")).unwrap();
        assert_eq!(opts.to, vec!["a@example.com"]);
        assert_eq!(opts.body.as_deref(), Some("Hello"));
        assert_eq!(opts.additional_headers.get("x-tag"), Some("1"));
        assert!(opts.attachments.is_empty());
    }

    #[test]
    fn test_repeated_header_names_collapse() {
        let json = r#"{
            "from": "me@example.com",
            "to": ["a@example.com"],
            "headers": [
                {"name": "Message-ID", "value": "<one@id>"},
                {"name": "MESSAGE-ID", "value": "<two@id>"}
            ]
        }"#;
        let request: ComposeRequest = serde_json::from_str(json).unwrap();
        let opts = request.into_options(Path::new(".")).unwrap();
        assert_eq!(opts.additional_headers.len(), 1);

        let raw = mail::compose_message(&opts).unwrap();
        let message = String::from_utf8(raw).unwrap();
        let ids = message
            .split("\r\n")
            .filter(|l| l.to_ascii_lowercase().starts_with("message-id:"))
            .count();
        assert_eq!(ids, 1);
        assert!(message.contains("MESSAGE-ID: <two@id>\r\n"));
    }

    #[test]
    fn test_missing_attachment_fails() {
        let json = r#"{"attachments": [{"path": "/nonexistent/file.bin"}]}"#;
        let request: ComposeRequest = serde_json::from_str(json).unwrap();
        assert!(request.into_options(Path::new("/")).is_err());
    }
}
