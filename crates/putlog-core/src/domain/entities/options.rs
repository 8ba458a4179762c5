use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::DomainError;

/// Scaffold options threaded through every action.
///
/// A plain key/value map. The core never requires a key to exist; actions
/// that need one use the fallible accessors (`get_str`, `get_list`) and fail
/// with [`DomainError::MissingOption`] themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(BTreeMap<String, Value>);

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert only if the key is absent.
    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.entry(key.into()).or_insert_with(|| value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Required string option.
    pub fn get_str(&self, key: &str) -> Result<&str, DomainError> {
        match self.0.get(key) {
            None => Err(DomainError::MissingOption { key: key.into() }),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(DomainError::InvalidOption {
                key: key.into(),
                expected: "a string",
            }),
        }
    }

    /// List-of-strings option; an absent key reads as an empty list.
    pub fn get_list(&self, key: &str) -> Result<Vec<String>, DomainError> {
        let invalid = || DomainError::InvalidOption {
            key: key.into(),
            expected: "a list of strings",
        };

        match self.0.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| v.as_str().map(str::to_string).ok_or_else(invalid))
                .collect(),
            Some(_) => Err(invalid()),
        }
    }

    /// Append strings to a list option, skipping values already present.
    pub fn extend_list<I, S>(&mut self, key: &str, values: I) -> Result<(), DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = self.get_list(key)?;
        for value in values {
            let value = value.into();
            if !list.contains(&value) {
                list.push(value);
            }
        }
        self.insert(key, list);
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_mistyped_keys() {
        let opts = Options::new().with("count", 3);
        assert_eq!(
            opts.get_str("package"),
            Err(DomainError::MissingOption {
                key: "package".into()
            })
        );
        assert!(matches!(
            opts.get_str("count"),
            Err(DomainError::InvalidOption { .. })
        ));
    }

    #[test]
    fn absent_list_is_empty() {
        assert!(Options::new().get_list("requirements").unwrap().is_empty());
    }

    #[test]
    fn extend_list_deduplicates() {
        let mut opts = Options::new();
        opts.extend_list("requirements", ["pydantic", "fastapi"]).unwrap();
        opts.extend_list("requirements", ["fastapi", "uvicorn"]).unwrap();
        assert_eq!(
            opts.get_list("requirements").unwrap(),
            vec!["pydantic", "fastapi", "uvicorn"]
        );
    }

    #[test]
    fn with_default_keeps_existing() {
        let opts = Options::new()
            .with("package", "mine")
            .with_default("package", "theirs")
            .with_default("author", "anon");
        assert_eq!(opts.get_str("package").unwrap(), "mine");
        assert_eq!(opts.get_str("author").unwrap(), "anon");
    }

    #[test]
    fn serializes_as_plain_map() {
        let opts = Options::new().with("package", "app");
        assert_eq!(serde_json::to_string(&opts).unwrap(), r#"{"package":"app"}"#);
    }
}
