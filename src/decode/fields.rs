//! Checked field access over raw payload objects.
//!
//! Absent or null scalars take their default. Present scalars of the wrong
//! kind, and absent nested entities, are errors.

use serde_json::{Map, Value};

use crate::error::{DecodeError, Result};

/// Name of the kind of a raw value, for error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn invalid_type(field: &str, expected: &'static str, found: &Value) -> DecodeError {
    DecodeError::InvalidType {
        field: field.to_string(),
        expected,
        found: kind(found),
    }
}

/// Fields of one payload object.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// View `value` as the object stored at `field`.
    pub fn of(value: &'a Value, field: &str) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self { map }),
            Value::Null => Err(DecodeError::MissingField {
                field: field.to_string(),
            }),
            other => Err(invalid_type(field, "object", other)),
        }
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|value| !value.is_null())
    }

    /// Value at `key`, which must be present and non-null.
    pub fn required(&self, key: &str) -> Result<&'a Value> {
        self.present(key).ok_or_else(|| DecodeError::MissingField {
            field: key.to_string(),
        })
    }

    pub fn string(&self, key: &str) -> Result<String> {
        match self.present(key) {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(invalid_type(key, "string", other)),
        }
    }

    pub fn boolean(&self, key: &str) -> Result<bool> {
        match self.present(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(invalid_type(key, "boolean", other)),
        }
    }

    pub fn f64(&self, key: &str) -> Result<f64> {
        match self.present(key) {
            None => Ok(0.0),
            Some(value @ Value::Number(n)) => {
                n.as_f64().ok_or_else(|| invalid_type(key, "number", value))
            }
            Some(other) => Err(invalid_type(key, "number", other)),
        }
    }

    pub fn u64(&self, key: &str) -> Result<u64> {
        match self.present(key) {
            None => Ok(0),
            Some(value @ Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| invalid_type(key, "unsigned integer", value)),
            Some(other) => Err(invalid_type(key, "unsigned integer", other)),
        }
    }

    /// Required array at `key`.
    pub fn array(&self, key: &str) -> Result<&'a [Value]> {
        match self.required(key)? {
            Value::Array(items) => Ok(items),
            other => Err(invalid_type(key, "array", other)),
        }
    }

    /// Decode the required object at `key` with `convert`.
    ///
    /// Errors raised by `convert` are located under `key`.
    pub fn nested<T>(
        &self,
        key: &str,
        convert: impl FnOnce(&Fields<'a>) -> Result<T>,
    ) -> Result<T> {
        let fields = Fields::of(self.required(key)?, key)?;
        convert(&fields).map_err(|e| e.within(key))
    }
}
