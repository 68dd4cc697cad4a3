//! Attribute handles.

use std::collections::HashMap;

use crate::apply::{SchemaError, SchemaResult};
use crate::definition::ResolvedAttribute;
use crate::descriptor::{AttributeDescriptor, Limits};
use crate::value::{CoercionError, FromValue, Value, ValueType};

/// Read-only view of one attribute on a prim.
#[derive(Clone, Debug)]
pub struct Attribute<'a> {
    resolved: ResolvedAttribute<'a>,
    authored: Option<&'a Value>,
}

impl<'a> Attribute<'a> {
    pub(crate) fn new(resolved: ResolvedAttribute<'a>, authored: Option<&'a Value>) -> Self {
        Attribute { resolved, authored }
    }

    pub fn name(&self) -> &str {
        &self.resolved.descriptor.name
    }

    pub fn value_type(&self) -> ValueType {
        self.resolved.descriptor.value_type
    }

    pub fn descriptor(&self) -> &AttributeDescriptor {
        &self.resolved.descriptor
    }

    /// Identifier of the schema that declared this attribute.
    pub fn owner(&self) -> &'a str {
        self.resolved.owner
    }

    /// Instance name, for attributes of multiple-apply schemas.
    pub fn instance(&self) -> Option<&str> {
        self.resolved.instance.as_deref()
    }

    /// The authored value, or the fallback if nothing was authored.
    pub fn get(&self) -> Value {
        self.authored
            .unwrap_or(&self.resolved.descriptor.fallback)
            .clone()
    }

    /// The current value converted to `T`, if it has that type.
    pub fn get_as<T: FromValue>(&self) -> Option<T> {
        self.authored
            .unwrap_or(&self.resolved.descriptor.fallback)
            .get()
    }

    pub fn has_authored_value(&self) -> bool {
        self.authored.is_some()
    }

    pub fn fallback(&self) -> &Value {
        &self.resolved.descriptor.fallback
    }

    /// Soft limits; unbounded if the attribute declares none.
    pub fn soft_limits(&self) -> Limits {
        self.resolved.descriptor.soft_limits.clone().unwrap_or_default()
    }

    /// Hard limits; unbounded if the attribute declares none.
    pub fn hard_limits(&self) -> Limits {
        self.resolved.descriptor.hard_limits.clone().unwrap_or_default()
    }

    pub fn allowed_tokens(&self) -> &[String] {
        &self.resolved.descriptor.allowed_tokens
    }
}

/// Mutable handle on one attribute of a prim.
pub struct AttributeMut<'a> {
    resolved: ResolvedAttribute<'a>,
    authored: &'a mut HashMap<String, Value>,
}

impl<'a> AttributeMut<'a> {
    pub(crate) fn new(
        resolved: ResolvedAttribute<'a>,
        authored: &'a mut HashMap<String, Value>,
    ) -> Self {
        AttributeMut { resolved, authored }
    }

    pub fn as_attribute(&self) -> Attribute<'_> {
        let authored = self.authored.get(self.resolved.descriptor.name.as_str());
        Attribute::new(self.resolved.clone(), authored)
    }

    pub fn name(&self) -> &str {
        &self.resolved.descriptor.name
    }

    pub fn get(&self) -> Value {
        self.as_attribute().get()
    }

    pub fn has_authored_value(&self) -> bool {
        self.authored
            .contains_key(self.resolved.descriptor.name.as_str())
    }

    /// Author a value. Returns false, keeping the previous value, if the
    /// value cannot be converted to the attribute's type.
    pub fn set(&mut self, value: impl Into<Value>) -> bool {
        match self.try_set(value) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("{}", err);
                false
            }
        }
    }

    /// Author a value, returning what was stored.
    ///
    /// Doubles written to integer attributes are floored. Limits are not
    /// enforced here; check them with [`Limits::contains`].
    pub fn try_set(&mut self, value: impl Into<Value>) -> SchemaResult<Value> {
        let descriptor = &self.resolved.descriptor;
        let stored = descriptor
            .value_type
            .coerce(value.into())
            .map_err(|err| coercion_error(&descriptor.name, err))?;

        self.authored
            .insert(descriptor.name.clone(), stored.clone());
        Ok(stored)
    }

    /// Remove the authored value so reads return the fallback again.
    pub fn clear(&mut self) -> bool {
        self.authored
            .remove(self.resolved.descriptor.name.as_str())
            .is_some()
    }
}

fn coercion_error(attribute: &str, err: CoercionError) -> SchemaError {
    let attribute = attribute.to_string();
    match err {
        CoercionError::Mismatch { expected, found } => SchemaError::TypeMismatch {
            attribute,
            expected,
            found,
        },
        CoercionError::NonFiniteInteger(value) => SchemaError::NonFiniteInteger { attribute, value },
        CoercionError::IntegerOutOfRange(value) => {
            SchemaError::IntegerOutOfRange { attribute, value }
        }
    }
}
