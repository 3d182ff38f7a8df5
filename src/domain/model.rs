use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::utils::error::{CalcError, Result};
use crate::utils::validation::require_number;

/// A numeric request field as the client sent it.
///
/// Browsers frequently post form values as strings, so `"1500.50"` is
/// accepted alongside `1500.5`. Decoding never fails here; the calculator
/// decides whether a missing or malformed value is an error and reports it
/// under the field's own name.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NumberField {
    #[default]
    Missing,
    Value(f64),
    Invalid(String),
}

impl NumberField {
    pub fn require(&self, field_name: &str) -> Result<f64> {
        match self {
            NumberField::Invalid(raw) => Err(CalcError::invalid_input(format!(
                "{} must be a number, got {}",
                field_name, raw
            ))),
            NumberField::Missing => require_number(field_name, None),
            NumberField::Value(v) => require_number(field_name, Some(*v)),
        }
    }

    pub fn optional(&self, field_name: &str) -> Result<Option<f64>> {
        match self {
            NumberField::Missing => Ok(None),
            _ => self.require(field_name).map(Some),
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, NumberField::Missing)
    }
}

impl From<f64> for NumberField {
    fn from(value: f64) -> Self {
        NumberField::Value(value)
    }
}

impl<'de> Deserialize<'de> for NumberField {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => NumberField::Missing,
            Value::Number(n) => match n.as_f64() {
                Some(v) => NumberField::Value(v),
                None => NumberField::Invalid(n.to_string()),
            },
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    NumberField::Missing
                } else {
                    match trimmed.parse::<f64>() {
                        Ok(v) if v.is_finite() => NumberField::Value(v),
                        _ => NumberField::Invalid(format!("\"{}\"", s)),
                    }
                }
            }
            other => NumberField::Invalid(other.to_string()),
        })
    }
}

/// Result shared by the unit converters: the input echoed back, the value in
/// the converter's canonical unit, and every supported target unit.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub value: f64,
    pub from: &'static str,
    pub canonical_unit: &'static str,
    pub canonical_value: f64,
    pub conversions: BTreeMap<&'static str, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Shape of the JSON error body returned to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<Value>,
}

impl ErrorBody {
    pub fn new(error: &CalcError, received: Option<Value>) -> Self {
        Self {
            error: error.to_string(),
            code: error.code(),
            received,
        }
    }
}
