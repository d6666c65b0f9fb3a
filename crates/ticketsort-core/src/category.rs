//! Ticket categories supplied by the caller with each classification request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Labels that mark a catch-all category, compared case-insensitively.
pub const FALLBACK_LABELS: &[&str] = &["other", "others", "general"];

/// One selectable ticket category.
///
/// `id` is opaque to Ticketsort: whatever JSON value the caller sent is echoed
/// back unchanged in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Value,
    pub label: String,
}

impl Category {
    pub fn new(id: impl Into<Value>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Whether this is an "Other"/"General" style catch-all.
    pub fn is_catch_all(&self) -> bool {
        let label = self.label.to_lowercase();
        FALLBACK_LABELS.contains(&label.as_str())
    }
}

/// Ordered, non-empty list of categories.
///
/// Order is significant: every matching rule scans categories in input order
/// and the first hit wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategorySet(Vec<Category>);

impl CategorySet {
    pub fn new(categories: Vec<Category>) -> Result<Self, CoreError> {
        if categories.is_empty() {
            return Err(CoreError::EmptyCategorySet);
        }
        Ok(Self(categories))
    }

    /// The category returned when no matching rule fires.
    ///
    /// The first catch-all label (`Other`, `Others`, `General`) if present,
    /// otherwise the first category.
    pub fn fallback(&self) -> &Category {
        self.0
            .iter()
            .find(|c| c.is_catch_all())
            .unwrap_or(&self.0[0])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a CategorySet {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(labels: &[&str]) -> CategorySet {
        CategorySet::new(
            labels
                .iter()
                .enumerate()
                .map(|(i, l)| Category::new(i as u64 + 1, *l))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_set_rejected() {
        let err = CategorySet::new(vec![]).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCategorySet));
    }

    #[test]
    fn fallback_prefers_other_label() {
        let cats = set(&["Billing", "Other", "Account"]);
        assert_eq!(cats.fallback().label, "Other");
    }

    #[test]
    fn fallback_matches_case_insensitively() {
        let cats = set(&["Billing", "GENERAL"]);
        assert_eq!(cats.fallback().label, "GENERAL");

        let cats = set(&["Billing", "others"]);
        assert_eq!(cats.fallback().label, "others");
    }

    #[test]
    fn fallback_takes_first_catch_all_in_order() {
        let cats = set(&["Billing", "General", "Other"]);
        assert_eq!(cats.fallback().label, "General");
    }

    #[test]
    fn fallback_defaults_to_first_category() {
        let cats = set(&["Billing", "Other issues"]);
        assert_eq!(cats.fallback().label, "Billing");
    }

    #[test]
    fn category_id_is_opaque() {
        let parsed: Category =
            serde_json::from_str(r#"{"id": "cat-7", "label": "Billing"}"#).unwrap();
        assert_eq!(parsed.id, json!("cat-7"));

        let parsed: Category = serde_json::from_str(r#"{"id": 7, "label": "Billing"}"#).unwrap();
        assert_eq!(parsed.id, json!(7));
    }

    #[test]
    fn category_requires_label() {
        let parsed = serde_json::from_str::<Category>(r#"{"id": 7}"#);
        assert!(parsed.is_err());
    }
}
