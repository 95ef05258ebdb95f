//! Typed access to `tools/call` arguments

use serde_json::{Map, Value};

use crate::{Error, Result};

/// The argument object of one tool call.
///
/// `null` is treated the same as an absent field. Fields the tool does not
/// read are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    fields: Map<String, Value>,
}

impl ToolArguments {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build from the raw `params.arguments` value.
    ///
    /// Absent (`null`) becomes an empty object; anything other than an object
    /// is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(Error::InvalidParams(format!(
                "arguments must be an object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Field value, treating `null` as absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn required_str(&self, field: &str) -> Result<String> {
        self.optional_str(field)?
            .ok_or_else(|| Error::InvalidArgument(format!("'{field}' is required")))
    }

    pub fn optional_str(&self, field: &str) -> Result<Option<String>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(mismatch(field, "a string", other)),
        }
    }

    pub fn optional_bool(&self, field: &str) -> Result<Option<bool>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(mismatch(field, "a boolean", other)),
        }
    }

    /// Integer field. Whole-valued floats such as `5.0` are accepted.
    pub fn optional_i64(&self, field: &str) -> Result<Option<i64>> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .or_else(|| value.as_f64().and_then(whole_number))
                .map(Some)
                .ok_or_else(|| mismatch(field, "an integer", value)),
        }
    }

    pub fn optional_str_list(&self, field: &str) -> Result<Option<Vec<String>>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(mismatch(field, "an array of strings", other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Some),
            Some(other) => Err(mismatch(field, "an array of strings", other)),
        }
    }
}

fn whole_number(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn mismatch(field: &str, expected: &str, found: &Value) -> Error {
    Error::InvalidArgument(format!(
        "'{field}' must be {expected}, got {}",
        type_name(found)
    ))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
