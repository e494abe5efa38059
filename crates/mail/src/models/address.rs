//! Email address parsing and normalization

use serde::{Deserialize, Serialize};

/// An email address with optional display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    /// Display name (e.g., "John Doe")
    pub name: Option<String>,
    /// Email address (e.g., "john@example.com")
    pub email: String,
}

impl EmailAddress {
    /// Create a new email address with just the email
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    /// Create a new email address with a display name
    pub fn with_name(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }

    /// Parse a single mailbox like `John Doe <john@example.com>`,
    /// `"John Doe" <john@example.com>` or `john@example.com`.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();

        if let Some(angle_start) = s.rfind('<')
            && let Some(angle_end) = s.rfind('>')
            && angle_start < angle_end
        {
            let name = unquote(s[..angle_start].trim());
            let email = s[angle_start + 1..angle_end].trim();
            return Self {
                name: if name.is_empty() {
                    None
                } else {
                    Some(name.to_string())
                },
                email: email.to_string(),
            };
        }

        Self {
            name: None,
            email: s.to_string(),
        }
    }

    /// Domain part of the address, if the address has a usable `local@domain` shape
    pub fn domain(&self) -> Option<&str> {
        let (local, domain) = self.email.rsplit_once('@')?;
        let valid = |part: &str| {
            !part.is_empty()
                && !part
                    .chars()
                    .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '@' | ','))
        };
        if valid(local) && valid(domain) {
            Some(domain)
        } else {
            None
        }
    }

    /// Format the email address for display
    pub fn display(&self) -> String {
        match &self.name {
            Some(name) => format!("{} <{}>", name, self.email),
            None => self.email.clone(),
        }
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

/// Extract bare, lowercased addresses from a header-style list such as
/// `Name <a@b.com>, c@d.com`.
///
/// Entries are split on every comma, so a quoted display name containing a
/// comma is split too. Entries without a usable address are skipped.
/// Order and duplicates are preserved.
pub fn parse_address_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(EmailAddress::parse)
        .filter(|addr| addr.domain().is_some())
        .map(|addr| addr.email.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_email_with_name() {
        let addr = EmailAddress::parse("John Doe <john@example.com>");
        assert_eq!(addr.name, Some("John Doe".to_string()));
        assert_eq!(addr.email, "john@example.com");
    }

    #[test]
    fn test_parse_email_with_quoted_name() {
        let addr = EmailAddress::parse("\"Doe, John\" <john@example.com>");
        assert_eq!(addr.name, Some("Doe, John".to_string()));
        assert_eq!(addr.email, "john@example.com");
    }

    #[test]
    fn test_parse_email_without_name() {
        let addr = EmailAddress::parse("  john@example.com ");
        assert_eq!(addr.name, None);
        assert_eq!(addr.email, "john@example.com");
    }

    #[test]
    fn test_parse_email_with_angle_brackets_no_name() {
        let addr = EmailAddress::parse("<john@example.com>");
        assert_eq!(addr.name, None);
        assert_eq!(addr.email, "john@example.com");
    }

    #[test]
    fn test_domain() {
        assert_eq!(EmailAddress::parse("A <a@b.com>").domain(), Some("b.com"));
        assert_eq!(EmailAddress::new("nobody").domain(), None);
        assert_eq!(EmailAddress::new("@b.com").domain(), None);
        assert_eq!(EmailAddress::new("a@").domain(), None);
    }

    #[test]
    fn test_display() {
        let addr = EmailAddress::with_name("John Doe", "john@example.com");
        assert_eq!(addr.display(), "John Doe <john@example.com>");
        assert_eq!(EmailAddress::new("john@example.com").display(), "john@example.com");
    }

    #[test]
    fn test_parse_address_list() {
        let addrs = parse_address_list("Alice <Alice@Example.com>, bob@example.com,, \"Carol\" <carol@x.org>");
        assert_eq!(addrs, vec!["alice@example.com", "bob@example.com", "carol@x.org"]);
    }

    #[test]
    fn test_parse_address_list_keeps_duplicates() {
        let addrs = parse_address_list("a@x.com, A@X.COM");
        assert_eq!(addrs, vec!["a@x.com", "a@x.com"]);
    }

    #[test]
    fn test_parse_address_list_empty() {
        assert!(parse_address_list("").is_empty());
        assert!(parse_address_list(" , ").is_empty());
        assert!(parse_address_list("not an address").is_empty());
    }

    #[test]
    fn test_parse_address_list_splits_quoted_comma() {
        // Quoted commas are not special: the name half is dropped, the address survives.
        let addrs = parse_address_list("\"Doe, John\" <john@example.com>");
        assert_eq!(addrs, vec!["john@example.com"]);
    }
}
