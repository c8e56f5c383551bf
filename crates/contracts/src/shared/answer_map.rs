use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Bound;

use super::field_key::{is_monitoring_scoped, FieldKey};
use super::metadata::ValidationRules;

/// Flat key → raw string answer map, persisted as a plain JSON object.
///
/// Absent and blank values both count as unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerMap(BTreeMap<String, String>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Raw value or `""`
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn field(&self, key: FieldKey<'_>) -> Option<&str> {
        self.get(&key.key())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Drop every key under `prefix`, returning how many went away
    pub fn remove_prefix(&mut self, prefix: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|k, _| !k.starts_with(prefix));
        let removed = before - self.0.len();
        if removed > 0 {
            log::debug!("Purged {} answer(s) under '{}'", removed, prefix);
        }
        removed
    }

    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.as_str())
    }

    pub fn is_filled(&self, key: &str) -> bool {
        ValidationRules::is_filled(self.get(key))
    }

    /// Answers outside every monitoring sub-form (characterization answers)
    pub fn top_level(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .filter(|(k, _)| !is_monitoring_scoped(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
