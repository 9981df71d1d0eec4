//! Attribute table passed to the markup engine.

use std::collections::BTreeMap;

use crate::ConfigError;

/// Value of a single attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrValue {
    /// Attribute with a textual value.
    Text(String),
    /// Attribute that is present but carries no value.
    Flag,
}

/// Named configuration values for the markup engine.
///
/// Keys are unique; later writes overwrite earlier ones. Iteration order is
/// deterministic (sorted by key) so engine input does not depend on
/// insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeTable {
    entries: BTreeMap<String, AttrValue>,
}

impl AttributeTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed default attribute set.
    ///
    /// - `at` / `slash`: escape mappings so the corresponding characters
    ///   survive markup processing when written as `{at}` / `{slash}`
    /// - `icons` (flag): icon rendering disabled
    /// - `idprefix`: empty prefix for generated heading ids
    /// - `apidoc`: marker identifying the invocation context
    /// - `notitle` (flag): title suppression
    /// - `source-highlighter` + `highlight-css`: fixed highlighter with
    ///   CSS-class output mode
    #[must_use]
    pub fn defaults() -> Self {
        let mut table = Self::new();
        table.set("at", "&#64;");
        table.set("slash", "/");
        table.set_flag("icons");
        table.set("idprefix", "");
        table.set("apidoc", "");
        table.set_flag("notitle");
        table.set("source-highlighter", "highlight");
        table.set("highlight-css", "class");
        table
    }

    /// Set a textual attribute, overwriting any previous entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(key.into(), AttrValue::Text(value.into()));
    }

    /// Set a value-less flag attribute, overwriting any previous entry.
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), AttrValue::Flag);
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    /// Textual value of an attribute, `None` for flags and absent keys.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(AttrValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Whether the attribute is present as a value-less flag.
    #[must_use]
    pub fn is_flag(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(AttrValue::Flag))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Apply user override tokens in the order given.
    ///
    /// Each token is either `key` (sets a flag) or `key=value`. Overrides
    /// may replace default keys or introduce new ones; the last write per
    /// key wins.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedOverride`] if a token has an empty
    /// key.
    pub fn apply_overrides<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<(), ConfigError> {
        for token in tokens {
            let token = token.as_ref();
            match token.split_once('=') {
                Some((key, _)) if key.is_empty() => {
                    return Err(ConfigError::MalformedOverride {
                        token: token.to_owned(),
                    });
                }
                Some((key, value)) => self.set(key, value),
                None if token.is_empty() => {
                    return Err(ConfigError::MalformedOverride {
                        token: token.to_owned(),
                    });
                }
                None => self.set_flag(token),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_present() {
        let table = AttributeTable::defaults();
        assert_eq!(table.text("at"), Some("&#64;"));
        assert_eq!(table.text("slash"), Some("/"));
        assert!(table.is_flag("icons"));
        assert_eq!(table.text("idprefix"), Some(""));
        assert_eq!(table.text("apidoc"), Some(""));
        assert!(table.is_flag("notitle"));
        assert_eq!(table.text("source-highlighter"), Some("highlight"));
        assert_eq!(table.text("highlight-css"), Some("class"));
    }

    #[test]
    fn test_override_existing_key_leaves_others_unchanged() {
        let mut table = AttributeTable::defaults();
        let before = table.len();
        table.apply_overrides(&["idprefix=api-"]).unwrap();

        assert_eq!(table.text("idprefix"), Some("api-"));
        assert_eq!(table.text("at"), Some("&#64;"));
        assert_eq!(table.len(), before);
    }

    #[test]
    fn test_override_adds_new_keys() {
        let mut table = AttributeTable::defaults();
        table
            .apply_overrides(&["project-version=1.2.3", "experimental"])
            .unwrap();

        assert_eq!(table.text("project-version"), Some("1.2.3"));
        assert!(table.is_flag("experimental"));
    }

    #[test]
    fn test_override_last_write_wins() {
        let mut table = AttributeTable::defaults();
        table
            .apply_overrides(&["idprefix=a-", "idprefix=b-"])
            .unwrap();
        assert_eq!(table.text("idprefix"), Some("b-"));
    }

    #[test]
    fn test_override_application_is_idempotent() {
        let overrides = ["idprefix=x-", "experimental", "at=AT"];

        let mut once = AttributeTable::defaults();
        once.apply_overrides(&overrides).unwrap();

        let mut twice = AttributeTable::defaults();
        twice.apply_overrides(&overrides).unwrap();
        twice.apply_overrides(&overrides).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_malformed_override_empty_token() {
        let mut table = AttributeTable::defaults();
        let err = table.apply_overrides(&[""]).unwrap_err();
        assert!(err.to_string().contains("malformed attribute override"));
    }

    #[test]
    fn test_malformed_override_empty_key() {
        let mut table = AttributeTable::defaults();
        let err = table.apply_overrides(&["=value"]).unwrap_err();
        assert!(err.to_string().contains("non-empty key"));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let mut table = AttributeTable::new();
        table.apply_overrides(&["formula=a=b"]).unwrap();
        assert_eq!(table.text("formula"), Some("a=b"));
    }

    #[test]
    fn test_flag_then_value_overwrites() {
        let mut table = AttributeTable::new();
        table.apply_overrides(&["icons", "icons=svg"]).unwrap();
        assert_eq!(table.text("icons"), Some("svg"));
        assert!(!table.is_flag("icons"));
    }

    #[test]
    fn test_iteration_is_key_ordered() {
        let mut table = AttributeTable::new();
        table.set("b", "2");
        table.set("a", "1");
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
