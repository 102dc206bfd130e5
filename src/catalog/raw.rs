//! Loosely-typed views over upstream JSON.
//!
//! Upstream payloads are untrusted: any field may be missing or carry an
//! unexpected type. [`Record`] reads fields from a JSON object and reports
//! anything it cannot use as absent instead of failing.

use serde_json::{Map, Number, Value};

use crate::catalog::error::CatalogError;

/// Read-only view over a JSON object. A missing object behaves as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Record<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Record<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields: Some(fields),
        }
    }

    /// View over any value; non-objects yield an empty record.
    pub fn of(value: Option<&'a Value>) -> Self {
        Self {
            fields: value.and_then(Value::as_object),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|fields| fields.get(key))
    }

    /// Nested record; absent or non-object fields yield an empty record.
    pub fn record(&self, key: &str) -> Record<'a> {
        Record::of(self.get(key))
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_owned)
    }

    /// Like [`Record::text`], but an empty string counts as absent.
    pub fn non_empty_text(&self, key: &str) -> Option<String> {
        self.text(key).filter(|s| !s.is_empty())
    }

    /// Integral number; whole floats such as `300.0` count as integers.
    pub fn integer(&self, key: &str) -> Option<i64> {
        let number = self.get(key).and_then(Value::as_number)?;
        number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        })
    }

    /// Number as sent upstream, so `4` stays `4` and `4.5` stays `4.5`.
    pub fn number(&self, key: &str) -> Option<Number> {
        self.get(key).and_then(Value::as_number).cloned()
    }

    /// String entries of an array field, in order. Non-string entries are
    /// dropped; a missing or non-array field yields an empty list.
    pub fn strings(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// One upstream volume, borrowed from its page. Guaranteed to be a JSON object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawVolume<'a>(&'a Map<String, Value>);

impl<'a> RawVolume<'a> {
    pub fn record(&self) -> Record<'a> {
        Record::new(self.0)
    }
}

impl<'a> TryFrom<&'a Value> for RawVolume<'a> {
    type Error = CatalogError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(CatalogError::InvalidInput(format!(
                "volume must be a JSON object, got {}",
                json_kind(other)
            ))),
        }
    }
}

/// Upstream search page (`{ totalItems, items }`) with defaults applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPage {
    pub total_items: u64,
    pub items: Vec<Value>,
}

impl RawPage {
    /// Take apart a page body. `totalItems` defaults to 0 and `items` to empty.
    pub fn from_body(body: Value) -> Self {
        let total_items = Record::of(Some(&body))
            .integer("totalItems")
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);

        let items = match body {
            Value::Object(mut fields) => match fields.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        Self { total_items, items }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
