//! Parameter sets supplied by the configuration collaborator.
//!
//! A [`ParameterSet`] is an immutable name → value map. It is validated
//! against the static schema of the selected operation (see [`schema`])
//! when a [`crate::Transform`] is resolved:
//!
//! - missing names take the schema default
//! - unknown names and wrong value kinds are rejected
//! - numeric values outside the declared domain are clamped

pub mod schema;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub use schema::{schema, ParamKind, ParamSpec};

/// A single parameter value.
///
/// Serialized untagged, so JSON `{"threshold": 90, "method": "Sobel"}` maps
/// directly onto a [`ParameterSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Choice(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Choice(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value as i64)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Choice(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Choice(value)
    }
}

/// Immutable mapping from parameter name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    /// Create an empty parameter set (every parameter takes its default).
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this set with `name` bound to `value`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reject names that are not declared by `specs`.
    pub(crate) fn check_names(&self, specs: &[ParamSpec]) -> Result<(), EngineError> {
        for name in self.values.keys() {
            if !specs.iter().any(|spec| spec.name == name) {
                return Err(EngineError::invalid_parameter(
                    name.as_str(),
                    "not a parameter of this operation",
                ));
            }
        }
        Ok(())
    }

    /// Resolve an integer parameter, clamping into `[min, max]`.
    pub(crate) fn int(&self, spec: &ParamSpec) -> Result<i64, EngineError> {
        let ParamKind::Int { min, max, default } = spec.kind else {
            return Err(EngineError::invalid_parameter(spec.name, "schema is not an integer"));
        };
        let value = match self.get(spec.name) {
            None => default,
            Some(ParamValue::Int(v)) => *v,
            Some(other) => {
                return Err(EngineError::invalid_parameter(
                    spec.name,
                    format!("expected an integer, got '{}'", other),
                ))
            }
        };
        let clamped = value.clamp(min, max);
        if clamped != value {
            log::debug!("clamped '{}' from {} to {}", spec.name, value, clamped);
        }
        Ok(clamped)
    }

    /// Resolve a floating parameter, clamping into `[min, max]`.
    ///
    /// Integers are widened; NaN and infinities are rejected.
    pub(crate) fn float(&self, spec: &ParamSpec) -> Result<f64, EngineError> {
        let ParamKind::Float { min, max, default } = spec.kind else {
            return Err(EngineError::invalid_parameter(spec.name, "schema is not a number"));
        };
        let value = match self.get(spec.name) {
            None => default,
            Some(ParamValue::Float(v)) => *v,
            Some(ParamValue::Int(v)) => *v as f64,
            Some(other) => {
                return Err(EngineError::invalid_parameter(
                    spec.name,
                    format!("expected a number, got '{}'", other),
                ))
            }
        };
        if !value.is_finite() {
            return Err(EngineError::invalid_parameter(
                spec.name,
                format!("expected a finite number, got {}", value),
            ));
        }
        let clamped = value.clamp(min, max);
        if clamped != value {
            log::debug!("clamped '{}' from {} to {}", spec.name, value, clamped);
        }
        Ok(clamped)
    }

    /// Resolve an enumerated parameter through `FromStr`.
    pub(crate) fn choice<T>(&self, spec: &ParamSpec) -> Result<T, EngineError>
    where
        T: std::str::FromStr,
    {
        let ParamKind::Choice { default, .. } = spec.kind else {
            return Err(EngineError::invalid_parameter(spec.name, "schema is not a choice"));
        };
        let raw = match self.get(spec.name) {
            None => default,
            Some(ParamValue::Choice(v)) => v.as_str(),
            Some(other) => {
                return Err(EngineError::invalid_parameter(
                    spec.name,
                    format!("expected one of {:?}, got '{}'", spec.options(), other),
                ))
            }
        };
        raw.parse::<T>().map_err(|_| {
            EngineError::invalid_parameter(
                spec.name,
                format!("unknown value '{}', expected one of {:?}", raw, spec.options()),
            )
        })
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Normalize a user-facing enumerated label for matching: lowercase with
/// spaces, dashes and underscores removed.
pub(crate) fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INT_SPEC: ParamSpec = ParamSpec {
        name: "threshold",
        kind: ParamKind::Int {
            min: 0,
            max: 255,
            default: 128,
        },
    };

    const FLOAT_SPEC: ParamSpec = ParamSpec {
        name: "contrast",
        kind: ParamKind::Float {
            min: 0.1,
            max: 3.0,
            default: 1.0,
        },
    };

    #[test]
    fn test_int_default_when_missing() {
        let params = ParameterSet::new();
        assert_eq!(params.int(&INT_SPEC).unwrap(), 128);
    }

    #[test]
    fn test_int_clamped() {
        let params = ParameterSet::new().with("threshold", 900);
        assert_eq!(params.int(&INT_SPEC).unwrap(), 255);

        let params = ParameterSet::new().with("threshold", -4);
        assert_eq!(params.int(&INT_SPEC).unwrap(), 0);
    }

    #[test]
    fn test_int_rejects_float() {
        let params = ParameterSet::new().with("threshold", 12.5);
        let err = params.int(&INT_SPEC).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParameter { ref name, .. } if name == "threshold"));
    }

    #[test]
    fn test_float_widens_int_and_clamps() {
        let params = ParameterSet::new().with("contrast", 2);
        assert_eq!(params.float(&FLOAT_SPEC).unwrap(), 2.0);

        let params = ParameterSet::new().with("contrast", 0.0);
        assert_eq!(params.float(&FLOAT_SPEC).unwrap(), 0.1);
    }

    #[test]
    fn test_float_rejects_nan() {
        let params = ParameterSet::new().with("contrast", f64::NAN);
        assert!(params.float(&FLOAT_SPEC).is_err());
    }

    #[test]
    fn test_check_names_rejects_unknown() {
        let params = ParameterSet::new().with("radius", 3);
        let err = params.check_names(&[INT_SPEC]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameter 'radius': not a parameter of this operation"
        );
    }

    #[test]
    fn test_normalize_label() {
        assert_eq!(normalize_label("Flip Horizontal"), "fliphorizontal");
        assert_eq!(normalize_label("rotate_90"), "rotate90");
        assert_eq!(normalize_label("XOR"), "xor");
    }

    #[test]
    fn test_json_round_trip() {
        let params: ParameterSet =
            serde_json::from_str(r#"{"threshold": 90, "contrast": 1.5, "method": "Sobel"}"#)
                .unwrap();
        assert_eq!(params.get("threshold"), Some(&ParamValue::Int(90)));
        assert_eq!(params.get("contrast"), Some(&ParamValue::Float(1.5)));
        assert_eq!(
            params.get("method"),
            Some(&ParamValue::Choice("Sobel".to_string()))
        );

        let json = serde_json::to_string(&params).unwrap();
        let back: ParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }

    #[test]
    fn test_from_iterator() {
        let params: ParameterSet = [("kernel_size", 5), ("iterations", 2)].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("iterations"), Some(&ParamValue::Int(2)));
    }
}
