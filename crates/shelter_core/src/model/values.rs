//! Column/value payload passed to insert and update.
//!
//! # Invariants
//! - Keys keep insertion order, so generated SQL is deterministic.
//! - A key mapped to `Value::Null` is present; `contains_key` reports it.

use rusqlite::types::Value;

/// Ordered set of column values for a single write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentValues {
    entries: Vec<(String, Value)>,
}

impl ContentValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column` to `value`, replacing any earlier value for it.
    pub fn put(&mut self, column: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let column = column.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
        self
    }

    pub fn put_text(&mut self, column: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.put(column, Value::Text(value.into()))
    }

    pub fn put_null(&mut self, column: impl Into<String>) -> &mut Self {
        self.put(column, Value::Null)
    }

    pub fn remove(&mut self, column: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(key, _)| key == column)?;
        Some(self.entries.remove(index).1)
    }

    pub fn contains_key(&self, column: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == column)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value)
    }

    /// Reads `column` as text.
    ///
    /// Numbers are rendered in decimal; null, blob, and missing keys yield `None`.
    pub fn get_as_string(&self, column: &str) -> Option<String> {
        match self.get(column)? {
            Value::Text(text) => Some(text.clone()),
            Value::Integer(number) => Some(number.to_string()),
            Value::Real(number) => Some(number.to_string()),
            Value::Null | Value::Blob(_) => None,
        }
    }

    /// Reads `column` as an integer.
    ///
    /// Text is parsed as base-10, reals are truncated toward zero. Anything
    /// that cannot be represented yields `None`.
    pub fn get_as_integer(&self, column: &str) -> Option<i64> {
        match self.get(column)? {
            Value::Integer(number) => Some(*number),
            Value::Text(text) => text.trim().parse::<i64>().ok(),
            Value::Real(number) => {
                let truncated = number.trunc();
                if truncated.is_finite()
                    && truncated >= i64::MIN as f64
                    && truncated < i64::MAX as f64
                {
                    Some(truncated as i64)
                } else {
                    None
                }
            }
            Value::Null | Value::Blob(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::ContentValues;
    use rusqlite::types::Value;

    #[test]
    fn put_replaces_existing_key_in_place() {
        let mut values = ContentValues::new();
        values.put_text("name", "Rex").put("weight", 4_i64);
        values.put_text("name", "Max");

        let keys: Vec<_> = values.keys().collect();
        assert_eq!(keys, vec!["name", "weight"]);
        assert_eq!(values.get_as_string("name").as_deref(), Some("Max"));
    }

    #[test]
    fn null_is_present_but_has_no_value() {
        let mut values = ContentValues::new();
        values.put_null("breed");

        assert!(values.contains_key("breed"));
        assert_eq!(values.get_as_string("breed"), None);
        assert_eq!(values.get_as_integer("breed"), None);
        assert!(!values.contains_key("name"));
    }

    #[test]
    fn integer_coercion_follows_value_kind() {
        let mut values = ContentValues::new();
        values
            .put_text("a", " 12 ")
            .put_text("b", "twelve")
            .put("c", Value::Real(-3.9))
            .put("d", Value::Real(f64::NAN))
            .put("e", Value::Blob(vec![1, 2]));

        assert_eq!(values.get_as_integer("a"), Some(12));
        assert_eq!(values.get_as_integer("b"), None);
        assert_eq!(values.get_as_integer("c"), Some(-3));
        assert_eq!(values.get_as_integer("d"), None);
        assert_eq!(values.get_as_integer("e"), None);
    }

    #[test]
    fn string_coercion_renders_numbers() {
        let mut values = ContentValues::new();
        values.put("weight", 7_i64);
        assert_eq!(values.get_as_string("weight").as_deref(), Some("7"));
    }

    #[test]
    fn remove_returns_previous_value() {
        let mut values = ContentValues::new();
        values.put("weight", 7_i64);
        assert_eq!(values.remove("weight"), Some(Value::Integer(7)));
        assert!(values.is_empty());
        assert_eq!(values.remove("weight"), None);
    }
}
