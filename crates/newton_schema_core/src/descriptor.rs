//! Attribute descriptors: the typed, namespaced properties a schema declares.

use serde::{Deserialize, Serialize};

use crate::registry::{RegistryError, RegistryResult};
use crate::value::{Value, ValueType};

/// Placeholder replaced by the instance name when a multiple-apply
/// schema is applied, e.g. `limit:__INSTANCE_NAME__:physics:low`.
pub const INSTANCE_NAME_PLACEHOLDER: &str = "__INSTANCE_NAME__";

/// Numeric range metadata attached to an attribute.
///
/// Limits are descriptive: the registry and the stage never reject or
/// clamp a write because of them. Callers such as property editors use
/// [`Limits::contains`] and [`Limits::clamp`] if they want enforcement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,
}

impl Limits {
    /// Create limits from optional bounds.
    pub fn new(minimum: Option<Value>, maximum: Option<Value>) -> Self {
        Self { minimum, maximum }
    }

    /// Lower bound only.
    pub fn at_least(minimum: impl Into<Value>) -> Self {
        Self::new(Some(minimum.into()), None)
    }

    /// Upper bound only.
    pub fn at_most(maximum: impl Into<Value>) -> Self {
        Self::new(None, Some(maximum.into()))
    }

    /// Both bounds.
    pub fn between(minimum: impl Into<Value>, maximum: impl Into<Value>) -> Self {
        Self::new(Some(minimum.into()), Some(maximum.into()))
    }

    /// True when at least one bound is present.
    pub fn is_valid(&self) -> bool {
        self.minimum.is_some() || self.maximum.is_some()
    }

    pub fn minimum(&self) -> Option<&Value> {
        self.minimum.as_ref()
    }

    pub fn maximum(&self) -> Option<&Value> {
        self.maximum.as_ref()
    }

    /// True when no bound is NaN and the minimum does not exceed the maximum.
    pub fn is_ordered(&self) -> bool {
        let min = self.min_f64().unwrap_or(f64::NEG_INFINITY);
        let max = self.max_f64().unwrap_or(f64::INFINITY);
        min <= max
    }

    fn min_f64(&self) -> Option<f64> {
        self.minimum.as_ref().and_then(Value::as_f64)
    }

    fn max_f64(&self) -> Option<f64> {
        self.maximum.as_ref().and_then(Value::as_f64)
    }

    /// Returns true if `value` lies within the bounds (inclusive).
    ///
    /// Non-numeric values are always contained; NaN never is.
    pub fn contains(&self, value: &Value) -> bool {
        let Some(x) = value.as_f64() else {
            return true;
        };

        let above_min = self.min_f64().map_or(true, |min| min <= x);
        let below_max = self.max_f64().map_or(true, |max| x <= max);
        above_min && below_max && !x.is_nan()
    }

    /// Clamps `value` into the bounds, keeping its type.
    pub fn clamp(&self, value: &Value) -> Value {
        match value {
            Value::Int(v) => {
                let mut result = *v;
                if let Some(min) = self.min_f64() {
                    if (result as f64) < min {
                        result = min.ceil() as i64;
                    }
                }
                if let Some(max) = self.max_f64() {
                    if (result as f64) > max {
                        result = max.floor() as i64;
                    }
                }
                Value::Int(result)
            }
            Value::Double(v) if !v.is_nan() => {
                let mut result = *v;
                if let Some(min) = self.min_f64() {
                    result = result.max(min);
                }
                if let Some(max) = self.max_f64() {
                    result = result.min(max);
                }
                Value::Double(result)
            }
            other => other.clone(),
        }
    }
}

/// Declares one typed, namespaced attribute of a schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    /// Namespaced name, e.g. `newton:contactMargin`
    pub name: String,

    /// Declared value type
    pub value_type: ValueType,

    /// Value read when nothing has been authored
    pub fallback: Value,

    /// Advisory (UI-level) range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft_limits: Option<Limits>,

    /// Constraint-bearing range, also advisory at write time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hard_limits: Option<Limits>,

    /// Vocabulary for token attributes (advisory)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_tokens: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub documentation: String,
}

impl AttributeDescriptor {
    /// Create a descriptor whose type is taken from its fallback.
    pub fn new(name: impl Into<String>, fallback: impl Into<Value>) -> Self {
        let fallback = fallback.into();
        Self {
            name: name.into(),
            value_type: fallback.value_type(),
            fallback,
            soft_limits: None,
            hard_limits: None,
            allowed_tokens: Vec::new(),
            documentation: String::new(),
        }
    }

    pub fn with_soft_limits(mut self, limits: Limits) -> Self {
        self.soft_limits = Some(limits);
        self
    }

    pub fn with_hard_limits(mut self, limits: Limits) -> Self {
        self.hard_limits = Some(limits);
        self
    }

    pub fn with_allowed_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Everything before the last `:`, if the name is namespaced.
    pub fn namespace(&self) -> Option<&str> {
        self.name.rsplit_once(':').map(|(namespace, _)| namespace)
    }

    /// The last component of the name.
    pub fn base_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, base)| base)
    }

    /// Whether the name contains the multiple-apply instance placeholder.
    pub fn is_instance_template(&self) -> bool {
        self.name.contains(INSTANCE_NAME_PLACEHOLDER)
    }

    /// Copy of this descriptor with the instance placeholder substituted.
    pub fn instantiate(&self, instance: &str) -> AttributeDescriptor {
        AttributeDescriptor {
            name: self.name.replace(INSTANCE_NAME_PLACEHOLDER, instance),
            ..self.clone()
        }
    }

    /// Check the descriptor is internally consistent.
    ///
    /// The fallback must have the declared type and satisfy the hard limits.
    /// Limits may only be attached to numeric attributes, and their bounds
    /// must be ordered and not NaN.
    pub fn validate(&self) -> RegistryResult<()> {
        if !is_valid_property_name(&self.name) {
            return Err(RegistryError::InvalidAttributeName(self.name.clone()));
        }

        if self.fallback.value_type() != self.value_type {
            return Err(RegistryError::FallbackTypeMismatch {
                attribute: self.name.clone(),
                expected: self.value_type,
                found: self.fallback.value_type(),
            });
        }

        for limits in [&self.soft_limits, &self.hard_limits].into_iter().flatten() {
            let bounds = [&limits.minimum, &limits.maximum];
            let numeric = bounds
                .into_iter()
                .flatten()
                .all(|bound| bound.value_type().is_numeric());
            if !self.value_type.is_numeric() || !numeric {
                return Err(RegistryError::LimitTypeMismatch(self.name.clone()));
            }
            if !limits.is_ordered() {
                return Err(RegistryError::InvalidLimits(self.name.clone()));
            }
        }

        if let Some(hard) = &self.hard_limits {
            if !hard.contains(&self.fallback) {
                return Err(RegistryError::FallbackOutOfRange {
                    attribute: self.name.clone(),
                    fallback: self.fallback.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Property names are `:`-separated identifiers.
fn is_valid_property_name(name: &str) -> bool {
    !name.is_empty() && name.split(':').all(is_identifier)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
