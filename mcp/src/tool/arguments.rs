//! Validation and coercion of the raw argument bag against a tool's contract.
//!
//! The output is a normalized JSON object with canonical types and defaults applied,
//! ready for serde to deserialize into the tool's typed parameters.

use error_stack::Report;
use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::parameters::{ParameterKind, ParameterSpec};
use crate::error::{Error, Result};

/// Validate `raw` against `specs` and deserialize the normalized result into `T`.
///
/// `null` values count as absent. Keys not in `specs` are ignored.
pub fn extract_parameters<T>(specs: &[ParameterSpec], raw: Option<&JsonObject>) -> Result<T>
where
    T: DeserializeOwned,
{
    let normalized = normalize(specs, raw)?;
    serde_json::from_value(Value::Object(normalized)).map_err(|e| {
        Report::new(Error::Internal(format!("Failed to parse parameters: {e}")))
            .attach(format!("Expected type: {}", std::any::type_name::<T>()))
    })
}

fn normalize(specs: &[ParameterSpec], raw: Option<&JsonObject>) -> Result<JsonObject> {
    if let Some(raw) = raw {
        for key in raw.keys() {
            if !specs.iter().any(|spec| spec.key() == key) {
                tracing::debug!("Ignoring unknown parameter '{key}'");
            }
        }
    }

    let mut normalized = JsonObject::new();
    for spec in specs {
        let supplied = raw
            .and_then(|raw| raw.get(spec.key()))
            .filter(|value| !value.is_null());

        let value = match supplied {
            Some(value) => coerce(spec, value)?,
            None if spec.required => return Err(Report::new(Error::missing(spec.key()))),
            None => match spec.default {
                Some(default) => default.to_value(),
                None => continue,
            },
        };
        normalized.insert(spec.key().to_string(), value);
    }
    Ok(normalized)
}

fn coerce(spec: &ParameterSpec, value: &Value) -> Result<Value> {
    let key = spec.key();
    match spec.kind {
        ParameterKind::String => {
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Number(number) => number.to_string(),
                _ => return Err(Report::new(Error::invalid_type(key, "a string"))),
            };
            if spec.non_empty && text.trim().is_empty() {
                return Err(Report::new(Error::empty(key)));
            }
            Ok(Value::String(text))
        }
        ParameterKind::Boolean => match value {
            Value::Bool(flag) => Ok(Value::Bool(*flag)),
            Value::String(text) if text.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            Value::String(text) if text.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
            _ => Err(Report::new(Error::invalid_type(key, "a boolean"))),
        },
        ParameterKind::Integer { minimum } => {
            let number = as_integer(value)
                .ok_or_else(|| Report::new(Error::invalid_type(key, "an integer")))?;
            if let Some(minimum) = minimum
                && number < minimum
            {
                return Err(Report::new(Error::Validation(format!(
                    "'{key}' must be at least {minimum}"
                ))));
            }
            Ok(Value::from(number))
        }
        ParameterKind::Enum(allowed) => {
            let text = value.as_str().map(str::trim);
            text.and_then(|text| {
                allowed
                    .iter()
                    .find(|candidate| candidate.eq_ignore_ascii_case(text))
            })
            .map(|canonical| Value::from(*canonical))
            .ok_or_else(|| {
                let shown = text.map_or_else(|| value.to_string(), str::to_string);
                Report::new(Error::invalid_value(key, shown, allowed))
            })
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "only whole floats within i64 range reach the cast"
)]
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract().abs() < f64::EPSILON && float.abs() < 9.0e18)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
