//! Field syntax checks and normalisation.
//!
//! All functions are pure and operate on ASCII character classes only.

use regex_lite::Regex;
use std::sync::OnceLock;

/// Local part, `@`, domain, then a 2-3 letter lowercase suffix. `.` and `-`
/// only ever sit between two plain characters.
const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_]+(?:[.-][A-Za-z0-9_]+)*@[A-Za-z0-9]+(?:[.-][A-Za-z0-9]+)*\.[a-z]{2,3}$";

const TOKEN_PATTERN: &str = r"^[A-Za-z0-9_]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email regex"))
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token regex"))
}

/// Check an email address against the accepted format.
///
/// The local part may contain ASCII alphanumerics, `_`, `.` and `-`; the
/// domain part alphanumerics, `.` and `-`. In both parts `.` and `-` may not
/// lead, trail, or sit next to another `.` or `-`. The address ends with a
/// literal `.` followed by a two or three letter lowercase suffix.
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Check an identifier-like token: non-empty, alphanumerics and `_` only.
pub fn validate_token(token: &str) -> bool {
    token_regex().is_match(token)
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
            out
        }
    }
}
