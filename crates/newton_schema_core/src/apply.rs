//! Applicability and extension-chain application of API schemas.
//!
//! A prim records its applied API schemas as a list of entries: the public
//! schema name, or `name:instance` for multiple-apply schemas. Applying a
//! schema appends the entries for its whole `extends` chain, ancestors
//! first. Nothing here mutates a prim; the stage applies the returned plan.

use thiserror::Error;

use crate::descriptor::is_identifier;
use crate::registry::{SchemaRegistry, SchemaType};
use crate::schema::SchemaKind;
use crate::value::ValueType;

/// Recoverable errors raised when applying schemas or accessing attributes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("unknown schema '{0}'")]
    UnknownSchema(String),

    #[error("'{0}' is a typed schema and cannot be applied as an API")]
    NotAnApiSchema(String),

    #[error("{schema} cannot be applied to a prim of type '{prim_type}'")]
    NotApplicable { schema: String, prim_type: String },

    #[error("{schema} requires {required} to be applied first")]
    MissingRequiredApi { schema: String, required: String },

    #[error("{0} is a multiple-apply schema and needs an instance name")]
    InstanceNameRequired(String),

    #[error("{schema} is a single-apply schema, got instance name '{instance}'")]
    UnexpectedInstanceName { schema: String, instance: String },

    #[error("'{0}' is not a valid instance name")]
    InvalidInstanceName(String),

    #[error("{schema} is implied by applied schema {applied} and cannot be removed")]
    ImpliedByApplied { schema: String, applied: String },

    #[error("prim has no attribute '{0}'")]
    UnknownAttribute(String),

    #[error("cannot store a {found} value in {expected} attribute '{attribute}'")]
    TypeMismatch {
        attribute: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("{value} cannot be stored in integer attribute '{attribute}'")]
    NonFiniteInteger { attribute: String, value: f64 },

    #[error("{value} is out of range for integer attribute '{attribute}'")]
    IntegerOutOfRange { attribute: String, value: f64 },
}

/// Result type for schema application and attribute access.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Split an applied-API entry into schema name and instance name.
pub fn split_api_entry(entry: &str) -> (&str, Option<&str>) {
    match entry.split_once(':') {
        Some((name, instance)) => (name, Some(instance)),
        None => (entry, None),
    }
}

/// Build an applied-API entry.
pub fn api_entry(schema_name: &str, instance: Option<&str>) -> String {
    match instance {
        Some(instance) => format!("{}:{}", schema_name, instance),
        None => schema_name.to_string(),
    }
}

/// Applicability
impl SchemaRegistry {
    /// Check whether API schema `schema_name` may be applied to a prim of
    /// type `prim_type` that already carries the `applied` entries.
    ///
    /// Every schema in the `extends` chain must accept the prim, since
    /// applying the schema applies all of them.
    pub fn check_applicable(
        &self,
        schema_name: &str,
        instance: Option<&str>,
        prim_type: &str,
        applied: &[String],
    ) -> SchemaResult<&SchemaType> {
        let schema = self
            .find_schema(schema_name)
            .ok_or_else(|| SchemaError::UnknownSchema(schema_name.to_string()))?;

        match (schema.kind(), instance) {
            (SchemaKind::AbstractTyped | SchemaKind::Concrete, _) => {
                return Err(SchemaError::NotAnApiSchema(schema_name.to_string()));
            }
            (SchemaKind::SingleApplyApi, Some(instance)) => {
                return Err(SchemaError::UnexpectedInstanceName {
                    schema: schema_name.to_string(),
                    instance: instance.to_string(),
                });
            }
            (SchemaKind::MultipleApplyApi, None) => {
                return Err(SchemaError::InstanceNameRequired(schema_name.to_string()));
            }
            (SchemaKind::MultipleApplyApi, Some(instance)) if !is_identifier(instance) => {
                return Err(SchemaError::InvalidInstanceName(instance.to_string()));
            }
            _ => {}
        }

        let chain = self.application_chain(schema);
        for member in &chain {
            let rule = &member.definition().applies_to;

            let type_ok = rule.prim_types.is_empty()
                || rule
                    .prim_types
                    .iter()
                    .any(|base| self.is_a(prim_type, base));
            if !type_ok {
                return Err(SchemaError::NotApplicable {
                    schema: schema_name.to_string(),
                    prim_type: prim_type.to_string(),
                });
            }

            for required in &rule.required_apis {
                let satisfied = applied
                    .iter()
                    .any(|entry| split_api_entry(entry).0 == required)
                    || chain.iter().any(|other| other.schema_name() == required);
                if !satisfied {
                    return Err(SchemaError::MissingRequiredApi {
                        schema: member.schema_name().to_string(),
                        required: required.clone(),
                    });
                }
            }
        }

        Ok(schema)
    }

    /// Entries to append to a prim's applied list in order to apply
    /// `schema_name`. Entries already present are skipped, so applying an
    /// already-applied schema yields an empty plan.
    pub fn plan_application(
        &self,
        schema_name: &str,
        instance: Option<&str>,
        prim_type: &str,
        applied: &[String],
    ) -> SchemaResult<Vec<String>> {
        let schema = self.check_applicable(schema_name, instance, prim_type, applied)?;

        let mut plan = Vec::new();
        for member in self.application_chain(schema) {
            let entry = api_entry(member.schema_name(), instance);
            if !applied.contains(&entry) && !plan.contains(&entry) {
                plan.push(entry);
            }
        }
        Ok(plan)
    }

    /// The first applied entry whose `extends` chain contains `entry`.
    ///
    /// Ancestors are applied with the same instance name as their
    /// descendant, so only entries with a matching instance are considered.
    pub fn implied_by<'e>(&self, entry: &str, applied: &'e [String]) -> Option<&'e str> {
        let (schema_name, instance) = split_api_entry(entry);
        let identifier = self.identifier_for(schema_name)?;

        applied.iter().map(String::as_str).find(|other| {
            let (other_name, other_instance) = split_api_entry(other);
            other_instance == instance
                && self
                    .find_schema(other_name)
                    .is_some_and(|ty| ty.ancestors().iter().any(|id| id == identifier))
        })
    }

    /// The schema's ancestors followed by the schema itself.
    fn application_chain<'a>(&'a self, schema: &'a SchemaType) -> Vec<&'a SchemaType> {
        schema
            .ancestors()
            .iter()
            .filter_map(|id| self.find_type_by_name(id))
            .chain(std::iter::once(schema))
            .collect()
    }
}
