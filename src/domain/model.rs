use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A canonical, lowercase host name such as `example.com`.
///
/// Values only come out of the normalizer, so holding a `Domain` means the
/// string already passed shape validation. Deserialization accepts only
/// strings already in that canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Domain(String);

impl Domain {
    /// Normalizes free-form input (bare host, `www.` host or URL).
    pub fn parse(input: &str) -> Option<Self> {
        crate::core::normalizer::normalize(input)
    }

    pub(crate) fn from_canonical(host: String) -> Self {
        Self(host)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Domain {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        crate::core::normalizer::canonical(&value)
            .ok_or_else(|| format!("'{}' is not a valid domain", value))
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.0
    }
}

/// Result of one generation: emails per domain, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedBatch {
    entries: IndexMap<Domain, Vec<String>>,
}

impl GeneratedBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a domain's emails. A domain already present keeps its first
    /// position and list.
    pub fn insert(&mut self, domain: Domain, emails: Vec<String>) {
        self.entries.entry(domain).or_insert(emails);
    }

    pub fn is_empty(&self) -> bool {
        self.email_count() == 0
    }

    pub fn domain_count(&self) -> usize {
        self.entries.len()
    }

    pub fn email_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn get(&self, domain: &Domain) -> Option<&[String]> {
        self.entries.get(domain).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Domain, &[String])> {
        self.entries.iter().map(|(d, e)| (d, e.as_slice()))
    }

    /// Every email, domain order first, then catalog order within a domain.
    pub fn flattened(&self) -> impl Iterator<Item = &str> {
        self.entries.values().flatten().map(String::as_str)
    }

    /// Like [`flattened`](Self::flattened) but each address appears once.
    pub fn distinct(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.flattened().filter(|email| seen.insert(*email)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient status message shown after a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Single,
    Bulk,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(s: &str) -> Domain {
        Domain::parse(s).unwrap()
    }

    #[test]
    fn test_batch_serializes_as_ordered_object() {
        let mut batch = GeneratedBatch::new();
        batch.insert(domain("b.org"), vec!["hr@b.org".to_string()]);
        batch.insert(domain("a.com"), vec!["hr@a.com".to_string(), "jobs@a.com".to_string()]);

        let json = serde_json::to_string(&batch).unwrap();
        assert_eq!(json, r#"{"b.org":["hr@b.org"],"a.com":["hr@a.com","jobs@a.com"]}"#);

        let restored: GeneratedBatch = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, batch);
        assert_eq!(restored.iter().next().unwrap().0.as_str(), "b.org");
    }

    #[test]
    fn test_batch_round_trip_keeps_www_labels() {
        let host = domain("https://www.www.example.com");
        let mut batch = GeneratedBatch::new();
        batch.insert(host.clone(), crate::core::generator::generate(&host));

        let json = serde_json::to_string(&batch).unwrap();
        let restored: GeneratedBatch = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, batch);
        assert_eq!(restored.iter().next().unwrap().0.as_str(), "www.example.com");
    }

    #[test]
    fn test_batch_rejects_non_canonical_keys() {
        let result: Result<GeneratedBatch, _> = serde_json::from_str(r#"{"https://a.com/x":[]}"#);
        assert!(result.is_err());
        let result: Result<GeneratedBatch, _> = serde_json::from_str(r#"{"A.com":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_rejects_invalid_domain_keys() {
        let result: Result<GeneratedBatch, _> = serde_json::from_str(r#"{"localhost":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_distinct_collapses_duplicates_across_domains() {
        let mut batch = GeneratedBatch::new();
        batch.insert(domain("a.com"), vec!["hr@a.com".to_string(), "x@shared.com".to_string()]);
        batch.insert(domain("b.com"), vec!["x@shared.com".to_string(), "hr@b.com".to_string()]);

        assert_eq!(batch.flattened().count(), 4);
        assert_eq!(batch.distinct(), vec!["hr@a.com", "x@shared.com", "hr@b.com"]);
    }

    #[test]
    fn test_repeated_domain_keeps_first_entry() {
        let mut batch = GeneratedBatch::new();
        batch.insert(domain("a.com"), vec!["first@a.com".to_string()]);
        batch.insert(domain("www.a.com"), vec!["second@a.com".to_string()]);

        assert_eq!(batch.domain_count(), 1);
        assert_eq!(batch.get(&domain("a.com")).unwrap(), ["first@a.com".to_string()]);
    }

    #[test]
    fn test_empty_batch() {
        let batch = GeneratedBatch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.email_count(), 0);
        assert!(batch.distinct().is_empty());
    }
}
