//! Rule chain that maps free-text model output onto one allowed category.
//!
//! Two passes run in order and the first hit wins:
//!
//! 1. [`MatchRule::Exact`]: case-insensitive label equality over every category
//! 2. one pass over categories in input order, trying per category
//!    - [`MatchRule::InternetPhone`]: a combined "Internet & Phone" label
//!      catches any connectivity wording
//!    - [`MatchRule::Keyword`]: any significant label word appears in the output
//!
//! When both passes miss, the set's catch-all applies ([`MatchRule::Fallback`],
//! see [`CategorySet::fallback`]). An earlier category that keyword-matches
//! therefore wins over a later internet-and-phone category.

use std::fmt;

use ticketsort_core::{Category, CategorySet};

/// Words never used as label keywords.
pub const STOPWORDS: &[&str] = &["and", "the", "a", "an", "or"];

/// Output fragments that route to an internet-and-phone category.
pub const CONNECTIVITY_KEYWORDS: &[&str] =
    &["internet", "phone", "wifi", "network", "av", "a/v"];

/// Which rule selected the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact,
    InternetPhone,
    Keyword,
    Fallback,
}

impl MatchRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::InternetPhone => "internet_phone",
            Self::Keyword => "keyword",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A matching pass: normalized model output and the candidate set in,
/// category and the rule that fired out.
pub type Predicate = for<'a> fn(&str, &'a CategorySet) -> Option<(&'a Category, MatchRule)>;

/// Matching passes in priority order. [`MatchRule::Fallback`] is not listed;
/// it applies when all of these miss.
pub const RULE_CHAIN: &[Predicate] = &[exact_match as Predicate, heuristic_match as Predicate];

/// Strip surrounding whitespace, then any enclosing double quotes, then single quotes.
pub fn normalize_output(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim_matches('\'')
}

/// First category selected by [`RULE_CHAIN`], with the rule that selected it.
///
/// `output` should already be normalized.
pub fn first_match<'a>(
    output: &str,
    categories: &'a CategorySet,
) -> Option<(&'a Category, MatchRule)> {
    RULE_CHAIN
        .iter()
        .find_map(|predicate| predicate(output, categories))
}

/// Resolve `output` against `categories`, returning `fallback` when no rule fires.
pub fn select<'a>(
    output: &str,
    categories: &'a CategorySet,
    fallback: &'a Category,
) -> (&'a Category, MatchRule) {
    first_match(output, categories).unwrap_or((fallback, MatchRule::Fallback))
}

/// Significant lowercase words of a label: longer than two characters and not a stopword.
pub fn label_keywords(label: &str) -> Vec<String> {
    label
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > 2 && !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

// ── Rules ──

fn exact_match<'a>(
    output: &str,
    categories: &'a CategorySet,
) -> Option<(&'a Category, MatchRule)> {
    let output = output.to_lowercase();
    categories
        .iter()
        .find(|c| c.label.to_lowercase() == output)
        .map(|c| (c, MatchRule::Exact))
}

fn heuristic_match<'a>(
    output: &str,
    categories: &'a CategorySet,
) -> Option<(&'a Category, MatchRule)> {
    let output = output.to_lowercase();
    let connectivity = CONNECTIVITY_KEYWORDS.iter().any(|k| output.contains(k));
    categories.iter().find_map(|c| {
        if connectivity && is_internet_phone(&c.label) {
            Some((c, MatchRule::InternetPhone))
        } else if label_keywords(&c.label)
            .iter()
            .any(|w| output.contains(w.as_str()))
        {
            Some((c, MatchRule::Keyword))
        } else {
            None
        }
    })
}

fn is_internet_phone(label: &str) -> bool {
    let label = label.to_lowercase();
    label.contains("internet") && label.contains("phone")
}
