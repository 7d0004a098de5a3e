//! Entry validation.
//!
//! Every entry is checked against every rule; a failure never stops the
//! pass. Violations are emitted in entry order and, within an entry, in
//! field-check order: text fields, list fields, URLs, `sha256`, `source`,
//! `createdAt`, then the `id@version` uniqueness check.

use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};

use crate::coerce::{kind_name, loose_text};
use crate::rules::{
    self, Rule, Source, CREATED_AT_FIELD, LIST_FIELDS, SHA256_FIELD, SOURCE_FIELD, TEXT_FIELDS,
    URL_FIELDS,
};

/// A rule failure at a given entry position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Zero-based position of the entry in the index array.
    pub position: usize,
    /// The rule that failed.
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry {}: {}", self.position, self.rule)
    }
}

/// Receives violations as the validation pass discovers them.
pub trait ViolationSink {
    /// Record one violation.
    fn report(&mut self, violation: Violation);
}

impl ViolationSink for Vec<Violation> {
    fn report(&mut self, violation: Violation) {
        self.push(violation);
    }
}

/// The `id@version` keys seen so far in one validation pass.
#[derive(Debug, Default)]
pub struct IdentitySet {
    seen: HashSet<String>,
}

impl IdentitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key`, returning `false` if it was already present.
    pub fn insert(&mut self, key: String) -> bool {
        self.seen.insert(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Identity key of an entry: loose text of `id`, `@`, loose text of `version`.
pub fn identity_key(entry: &Map<String, Value>) -> String {
    format!(
        "{}@{}",
        loose_text(entry.get("id")),
        loose_text(entry.get("version"))
    )
}

/// Validate one entry, reporting each violation to `sink`.
///
/// Returns the number of violations reported for this entry.
pub fn validate_entry(
    value: &Value,
    position: usize,
    identities: &mut IdentitySet,
    sink: &mut dyn ViolationSink,
) -> usize {
    let failed = entry_rules(value, identities);
    let count = failed.len();
    for rule in failed {
        sink.report(Violation { position, rule });
    }
    tracing::trace!(position, violations = count, "validated entry");
    count
}

fn entry_rules(value: &Value, identities: &mut IdentitySet) -> Vec<Rule> {
    let Value::Object(entry) = value else {
        return vec![Rule::NotAnObject {
            found: kind_name(value),
        }];
    };
    let mut failed = Vec::new();

    for field in TEXT_FIELDS {
        if !rules::is_non_blank(entry.get(field)) {
            failed.push(Rule::Text { field });
        }
    }

    for field in LIST_FIELDS {
        if !rules::is_string_list(entry.get(field)) {
            failed.push(Rule::StringList { field });
        }
    }

    for field in URL_FIELDS {
        if !rules::is_https_url(entry.get(field)) {
            failed.push(Rule::HttpsUrl { field });
        }
    }

    if !rules::is_sha256_hex(entry.get(SHA256_FIELD)) {
        failed.push(Rule::Sha256);
    }

    let source = loose_text(entry.get(SOURCE_FIELD));
    if Source::parse(&source).is_none() {
        failed.push(Rule::Source { found: source });
    }

    if rules::created_at(entry.get(CREATED_AT_FIELD)).is_none() {
        failed.push(Rule::CreatedAt);
    }

    // Runs even when id or version failed above.
    let key = identity_key(entry);
    if !identities.insert(key.clone()) {
        failed.push(Rule::Duplicate { key });
    }

    failed
}

/// Validate every entry of an index in document order.
///
/// Returns the total number of violations reported.
pub fn validate_index(entries: &[Value], sink: &mut dyn ViolationSink) -> usize {
    let mut identities = IdentitySet::new();
    let total: usize = entries
        .iter()
        .enumerate()
        .map(|(position, entry)| validate_entry(entry, position, &mut identities, sink))
        .sum();
    tracing::debug!(
        entries = entries.len(),
        identities = identities.len(),
        violations = total,
        "validated index"
    );
    total
}

/// Validate every entry and collect the violations.
pub fn validate_entries(entries: &[Value]) -> Vec<Violation> {
    let mut violations: Vec<Violation> = Vec::new();
    validate_index(entries, &mut violations);
    violations
}
