//! Random identifiers: Message-IDs and MIME boundaries

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::models::EmailAddress;

/// Domain used when the sender address has none
pub const FALLBACK_MESSAGE_ID_DOMAIN: &str = "gwcli.local";

/// Length of the random local part of a Message-ID
const MESSAGE_ID_TOKEN_LEN: usize = 32;

/// Random alphanumeric token from the thread-local CSPRNG
pub fn random_token(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate a fresh `<token@domain>` Message-ID for a message sent by `from`.
pub fn random_message_id(from: &str) -> String {
    let sender = EmailAddress::parse(from);
    let domain = sender.domain().unwrap_or(FALLBACK_MESSAGE_ID_DOMAIN);
    format!("<{}@{}>", random_token(MESSAGE_ID_TOKEN_LEN), domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_sender_domain() {
        let id = random_message_id("Alice <alice@example.com>");
        assert!(id.starts_with('<'));
        assert!(id.ends_with("@example.com>"));

        let id = random_message_id("bob@corp.example.org");
        assert!(id.ends_with("@corp.example.org>"));
    }

    #[test]
    fn test_fallback_domain() {
        for from in ["", "not-an-address", "Alice <>"] {
            let id = random_message_id(from);
            assert!(id.ends_with(&format!("@{}>", FALLBACK_MESSAGE_ID_DOMAIN)), "{}", id);
        }
    }

    #[test]
    fn test_token_shape() {
        let id = random_message_id("a@b.com");
        let token = id.trim_start_matches('<').split('@').next().unwrap();
        assert_eq!(token.len(), MESSAGE_ID_TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_fresh_every_call() {
        let a = random_message_id("a@b.com");
        let b = random_message_id("a@b.com");
        assert_ne!(a, b);
    }
}
