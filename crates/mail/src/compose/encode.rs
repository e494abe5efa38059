//! Header value encoding (RFC 2047 encoded-words, RFC 2231 parameters)

use base64::prelude::*;

use crate::models::EmailAddress;

/// Longest encoded-word allowed by RFC 2047
const MAX_ENCODED_WORD_LEN: usize = 75;

/// `=?utf-8?B?` + `?=`
const ENCODED_WORD_OVERHEAD: usize = 12;

/// Raw bytes that fit in one encoded-word once base64-encoded
const MAX_WORD_BYTES: usize = (MAX_ENCODED_WORD_LEN - ENCODED_WORD_OVERHEAD) / 4 * 3;

/// Return `value` unchanged when it is 7-bit ASCII, otherwise as one or more
/// RFC 2047 encoded-words.
///
/// Long values are split on character boundaries into several words joined
/// by a folding CRLF + space; decoders drop the whitespace between adjacent
/// encoded-words.
pub fn encode_header_if_needed(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }

    let mut words = Vec::new();
    let mut start = 0;
    for (idx, ch) in value.char_indices() {
        if idx - start + ch.len_utf8() > MAX_WORD_BYTES {
            words.push(encoded_word(&value[start..idx]));
            start = idx;
        }
    }
    words.push(encoded_word(&value[start..]));

    words.join("\r\n ")
}

fn encoded_word(chunk: &str) -> String {
    format!("=?utf-8?B?{}?=", BASE64_STANDARD.encode(chunk.as_bytes()))
}

/// Encode the display name of a mailbox, leaving the address literal.
pub fn encode_address(addr: &str) -> String {
    if addr.is_ascii() {
        return addr.to_string();
    }

    let parsed = EmailAddress::parse(addr);
    match parsed.name {
        Some(name) => format!("{} <{}>", encode_header_if_needed(&name), parsed.email),
        None => addr.trim().to_string(),
    }
}

/// Join a recipient list into one header value
pub fn encode_address_list(addrs: &[String]) -> String {
    addrs
        .iter()
        .map(|a| encode_address(a))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `filename` parameter for a Content-Disposition header.
///
/// ASCII names use the quoted form; anything else uses only the RFC 2231
/// extended form `filename*=UTF-8''...`.
pub fn content_disposition_filename(name: &str) -> String {
    if name.is_ascii() {
        let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
        format!("filename=\"{}\"", escaped)
    } else {
        format!("filename*=UTF-8''{}", urlencoding::encode(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal RFC 2047 B-decoder for checking round trips
    fn decode_words(encoded: &str) -> String {
        let bytes: Vec<u8> = encoded
            .split_whitespace()
            .flat_map(|word| {
                let payload = word
                    .strip_prefix("=?utf-8?B?")
                    .and_then(|w| w.strip_suffix("?="))
                    .expect("not an encoded-word");
                BASE64_STANDARD.decode(payload).expect("bad base64")
            })
            .collect();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_ascii_unchanged() {
        assert_eq!(encode_header_if_needed("Hello world"), "Hello world");
        assert_eq!(encode_header_if_needed(""), "");
        assert_eq!(encode_header_if_needed("Re: [team] 50% off!"), "Re: [team] 50% off!");
    }

    #[test]
    fn test_non_ascii_encoded() {
        let encoded = encode_header_if_needed("Grüße aus Köln");
        assert!(encoded.starts_with("=?utf-8?"));
        assert!(encoded.is_ascii());
        assert_eq!(decode_words(&encoded), "Grüße aus Köln");
    }

    #[test]
    fn test_long_value_split_into_words() {
        let subject = "日本語のとても長い件名です。".repeat(6);
        let encoded = encode_header_if_needed(&subject);
        let words: Vec<&str> = encoded.split("\r\n ").collect();
        assert!(words.len() > 1);
        assert!(words.iter().all(|w| w.len() <= MAX_ENCODED_WORD_LEN));
        assert_eq!(decode_words(&encoded), subject);
    }

    #[test]
    fn test_encode_address() {
        assert_eq!(encode_address("Bob <bob@example.com>"), "Bob <bob@example.com>");
        let encoded = encode_address("José Núñez <jose@example.com>");
        assert!(encoded.starts_with("=?utf-8?B?"));
        assert!(encoded.ends_with(" <jose@example.com>"));
    }

    #[test]
    fn test_encode_address_list() {
        let list = vec!["a@x.com".to_string(), "B <b@x.com>".to_string()];
        assert_eq!(encode_address_list(&list), "a@x.com, B <b@x.com>");
    }

    #[test]
    fn test_filename_ascii() {
        assert_eq!(content_disposition_filename("x.txt"), "filename=\"x.txt\"");
        assert_eq!(
            content_disposition_filename("say \"hi\".txt"),
            "filename=\"say \\\"hi\\\".txt\""
        );
    }

    #[test]
    fn test_filename_non_ascii() {
        let param = content_disposition_filename("résumé.pdf");
        assert_eq!(param, "filename*=UTF-8''r%C3%A9sum%C3%A9.pdf");
        assert!(!param.contains("filename="));
    }
}
