//! Keyed field bundles exchanged with the content engine.
//!
//! The engine describes nodes, events and command arguments as loosely typed
//! key/value bundles. Readers never fail: an absent key, a wrong-typed value
//! or an unknown key all read as the caller's default, which keeps the wire
//! format forward compatible.

use serde_json::{Map, Number, Value};

/// A keyed field bundle (string keys, JSON-typed values).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    fields: Map<String, Value>,
}

impl Bundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret a JSON value as a bundle. Returns `None` for non-objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|fields| Self {
            fields: fields.clone(),
        })
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the bundle has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Check whether `key` is present, regardless of its value's type.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Get a string field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Get a string field, or `default` if absent or not a string.
    pub fn get_str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get_str(key).unwrap_or(default)
    }

    /// Get an integer field.
    pub fn get_i32(&self, key: &str) -> Option<i32> {
        self.fields
            .get(key)
            .and_then(Value::as_i64)
            .map(|v| v as i32)
    }

    /// Get an integer field, or `default` if absent or not an integer.
    pub fn get_i32_or(&self, key: &str, default: i32) -> i32 {
        self.get_i32(key).unwrap_or(default)
    }

    /// Get a floating-point field, or `default` if absent or not numeric.
    pub fn get_f64_or(&self, key: &str, default: f64) -> f64 {
        self.fields
            .get(key)
            .and_then(Value::as_f64)
            .unwrap_or(default)
    }

    /// Get a boolean field, or `default` if absent or not a boolean.
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.fields
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Get an integer array field.
    ///
    /// Returns `None` if the field is absent, not an array, or contains any
    /// non-integer element.
    pub fn get_i32_array(&self, key: &str) -> Option<Vec<i32>> {
        let array = self.fields.get(key)?.as_array()?;
        array
            .iter()
            .map(|v| v.as_i64().map(|i| i as i32))
            .collect()
    }

    /// Get a nested bundle field.
    pub fn get_bundle(&self, key: &str) -> Option<Bundle> {
        self.fields.get(key).and_then(Bundle::from_value)
    }

    /// Set a string field.
    pub fn put_str(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.to_string(), Value::String(value.into()));
    }

    /// Set an integer field.
    pub fn put_i32(&mut self, key: &str, value: i32) {
        self.fields.insert(key.to_string(), Value::from(value));
    }

    /// Set a boolean field.
    pub fn put_bool(&mut self, key: &str, value: bool) {
        self.fields.insert(key.to_string(), Value::Bool(value));
    }

    /// Set a floating-point field. Non-finite values are stored as null.
    pub fn put_f64(&mut self, key: &str, value: f64) {
        let value = Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null);
        self.fields.insert(key.to_string(), value);
    }

    /// Set an integer array field.
    pub fn put_i32_array(&mut self, key: &str, values: &[i32]) {
        self.fields.insert(
            key.to_string(),
            Value::Array(values.iter().map(|&v| Value::from(v)).collect()),
        );
    }

    /// Set a nested bundle field.
    pub fn put_bundle(&mut self, key: &str, value: Bundle) {
        self.fields
            .insert(key.to_string(), Value::Object(value.fields));
    }
}
