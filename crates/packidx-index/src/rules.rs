//! Field rules for index entries.
//!
//! Each predicate inspects one field value as it appears in the raw entry
//! (`None` when the field is absent) and never fails: malformed input is a
//! rule violation, not an error.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Plain-text fields that must hold a non-blank string.
pub const TEXT_FIELDS: [&str; 5] = ["id", "tool", "version", "description", "signer"];

/// Fields that must hold a non-empty array of non-blank strings.
pub const LIST_FIELDS: [&str; 2] = ["frameworks", "mappingIds"];

/// Fields that must hold an https URL.
pub const URL_FIELDS: [&str; 2] = ["packUrl", "publicKeyUrl"];

/// Content hash field.
pub const SHA256_FIELD: &str = "sha256";

/// Provenance field.
pub const SOURCE_FIELD: &str = "source";

/// Publication date field.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// The single URL scheme accepted for pack and key locations.
pub const HTTPS_SCHEME: &str = "https";

/// A rule an entry failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rule {
    /// The entry itself is not a JSON object.
    #[error("entry must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// A plain-text field is missing, not a string, or blank.
    #[error("{field} must be a non-empty string")]
    Text { field: &'static str },

    /// A list field is not a non-empty array of non-empty strings.
    #[error("{field} must be a non-empty array of non-empty strings")]
    StringList { field: &'static str },

    /// A URL field is not a parseable https URL.
    #[error("{field} must be a valid https URL")]
    HttpsUrl { field: &'static str },

    /// The content hash is not 64 hex digits.
    #[error("sha256 must be exactly 64 hexadecimal characters")]
    Sha256,

    /// The provenance value is outside the closed set.
    #[error("source must be one of vendor, community, internal (found \"{found}\")")]
    Source { found: String },

    /// The publication date is not a real `YYYY-MM-DD` date.
    #[error("createdAt must be a calendar date in YYYY-MM-DD form")]
    CreatedAt,

    /// Another entry earlier in the index has the same `id@version`.
    #[error("duplicate id@version \"{key}\"")]
    Duplicate { key: String },
}

impl Rule {
    /// The entry field this rule concerns, if it concerns a single field.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Rule::Text { field } | Rule::StringList { field } | Rule::HttpsUrl { field } => {
                Some(*field)
            }
            Rule::Sha256 => Some(SHA256_FIELD),
            Rule::Source { .. } => Some(SOURCE_FIELD),
            Rule::CreatedAt => Some(CREATED_AT_FIELD),
            Rule::NotAnObject { .. } | Rule::Duplicate { .. } => None,
        }
    }
}

/// Where a pack comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Vendor,
    Community,
    Internal,
}

impl Source {
    /// All accepted provenance values.
    pub const ALL: [Source; 3] = [Source::Vendor, Source::Community, Source::Internal];

    /// Parse an exact, case-sensitive provenance token.
    pub fn parse(text: &str) -> Option<Self> {
        Source::ALL.into_iter().find(|s| s.as_str() == text)
    }

    /// The wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Vendor => "vendor",
            Source::Community => "community",
            Source::Internal => "internal",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that is non-empty after trimming whitespace.
pub fn is_non_blank(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

/// A non-empty array whose every element is a non-blank string.
pub fn is_string_list(value: Option<&Value>) -> bool {
    match value.and_then(Value::as_array) {
        Some(items) => !items.is_empty() && items.iter().all(|item| is_non_blank(Some(item))),
        None => false,
    }
}

/// A non-blank string that parses as a URL with the `https` scheme.
pub fn is_https_url(value: Option<&Value>) -> bool {
    let Some(text) = value.and_then(Value::as_str) else {
        return false;
    };
    if text.trim().is_empty() {
        return false;
    }
    match url::Url::parse(text) {
        Ok(parsed) => parsed.scheme() == HTTPS_SCHEME,
        Err(e) => {
            tracing::trace!(url = text, error = %e, "url did not parse");
            false
        }
    }
}

/// Exactly 64 hexadecimal digits, either case.
pub fn is_sha256_hex(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Midnight UTC on the `YYYY-MM-DD` date held by `value`, if it is one.
///
/// The text must be exactly four digits, a hyphen, two digits, a hyphen and
/// two digits, and must name a day that exists in the calendar.
pub fn created_at(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let text = value.and_then(Value::as_str)?;
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return None;
    }

    let year: i32 = text[0..4].parse().ok()?;
    let month: u32 = text[5..7].parse().ok()?;
    let day: u32 = text[8..10].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_blank_text() {
        assert!(is_non_blank(Some(&json!("codex"))));
        assert!(!is_non_blank(Some(&json!(""))));
        assert!(!is_non_blank(Some(&json!("  \t\n"))));
        assert!(!is_non_blank(Some(&json!(12))));
        assert!(!is_non_blank(Some(&json!(null))));
        assert!(!is_non_blank(None));
    }

    #[test]
    fn string_lists() {
        assert!(is_string_list(Some(&json!(["react", "vue"]))));
        assert!(!is_string_list(Some(&json!([]))));
        assert!(!is_string_list(Some(&json!(["react", ""]))));
        assert!(!is_string_list(Some(&json!(["react", 3]))));
        assert!(!is_string_list(Some(&json!("react"))));
        assert!(!is_string_list(None));
    }

    #[test]
    fn https_urls() {
        assert!(is_https_url(Some(&json!("https://example.com/pack.tgz"))));
        assert!(is_https_url(Some(&json!("HTTPS://example.com/key.pem"))));
        assert!(!is_https_url(Some(&json!("http://example.com/pack"))));
        assert!(!is_https_url(Some(&json!("ftp://example.com/pack"))));
        assert!(!is_https_url(Some(&json!("example.com/pack"))));
        assert!(!is_https_url(Some(&json!("https://"))));
        assert!(!is_https_url(Some(&json!(""))));
        assert!(!is_https_url(Some(&json!(["https://example.com"]))));
        assert!(!is_https_url(None));
    }

    #[test]
    fn sha256_digests() {
        let lower = "a".repeat(64);
        let mixed = format!("{}{}", "AbCdEf0123456789".repeat(3), "abcdef0123456789");
        assert!(is_sha256_hex(Some(&json!(lower))));
        assert!(is_sha256_hex(Some(&json!(mixed))));
        assert!(!is_sha256_hex(Some(&json!("a".repeat(63)))));
        assert!(!is_sha256_hex(Some(&json!("a".repeat(65)))));
        assert!(!is_sha256_hex(Some(&json!(format!("{}g", "a".repeat(63))))));
        assert!(!is_sha256_hex(Some(&json!(""))));
        assert!(!is_sha256_hex(None));
    }

    #[test]
    fn sources() {
        assert_eq!(Source::parse("vendor"), Some(Source::Vendor));
        assert_eq!(Source::parse("community"), Some(Source::Community));
        assert_eq!(Source::parse("internal"), Some(Source::Internal));
        assert_eq!(Source::parse("Vendor"), None);
        assert_eq!(Source::parse(" vendor"), None);
        assert_eq!(Source::Internal.to_string(), "internal");
    }

    #[test]
    fn created_at_dates() {
        let parsed = created_at(Some(&json!("2024-01-15"))).unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-01-15T00:00:00+00:00");
        assert!(created_at(Some(&json!("2024-02-29"))).is_some());

        assert!(created_at(Some(&json!("2024-02-30"))).is_none());
        assert!(created_at(Some(&json!("2023-02-29"))).is_none());
        assert!(created_at(Some(&json!("2024-13-40"))).is_none());
        assert!(created_at(Some(&json!("2024-00-10"))).is_none());
        assert!(created_at(Some(&json!("2024-1-15"))).is_none());
        assert!(created_at(Some(&json!("2024/01/15"))).is_none());
        assert!(created_at(Some(&json!("2024-01-15T00:00:00Z"))).is_none());
        assert!(created_at(Some(&json!("+024-01-15"))).is_none());
        assert!(created_at(Some(&json!(20240115))).is_none());
        assert!(created_at(None).is_none());
    }

    #[test]
    fn rule_messages_name_fields() {
        let rule = Rule::HttpsUrl { field: "packUrl" };
        assert_eq!(rule.field(), Some("packUrl"));
        assert!(rule.to_string().contains("packUrl"));
        assert_eq!(Rule::CreatedAt.field(), Some("createdAt"));
        assert_eq!(Rule::Duplicate { key: "a@1".into() }.field(), None);
    }
}
