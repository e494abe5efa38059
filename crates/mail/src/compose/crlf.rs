//! Line ending canonicalization

/// Rewrite every `\r\n`, bare `\n` and bare `\r` as `\r\n`.
///
/// Running it on already normalized text is a no-op.
pub fn normalize_crlf(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + s.len() / 16);
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\r\n");
            }
            '\n' => out.push_str("\r\n"),
            c => out.push(c),
        }
    }

    out
}
