//! Path-based category classification.
//!
//! Categories encode a corpus-specific folder naming convention, so the rule
//! table is configuration (`[[categories]]` in the TOML file) rather than a
//! constant baked into the crate.

use serde::Deserialize;

/// One ordered classification rule: a substring to look for in the relative
/// path, and the label assigned when it matches.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRule {
    pub pattern: String,
    pub label: String,
}

/// Classify a relative path against an ordered rule table.
///
/// First matching substring wins; rules are never reordered or ranked by
/// specificity. Returns `None` when no rule matches.
pub fn classify(rules: &[CategoryRule], relative_path: &str) -> Option<String> {
    rules
        .iter()
        .find(|rule| relative_path.contains(rule.pattern.as_str()))
        .map(|rule| rule.label.clone())
}
