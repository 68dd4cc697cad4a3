//! The schema registry.
//!
//! Schemas are registered once, before any prim is touched, and are
//! read-only afterwards. Registration validates the definition, resolves
//! its `extends` chain and caches the flattened attribute set so that
//! composing a prim never has to walk the inheritance graph again.

use std::collections::HashMap;

use thiserror::Error;

use crate::descriptor::{is_identifier, AttributeDescriptor};
use crate::schema::{SchemaDefinition, SchemaKind};
use crate::value::{Value, ValueType};

/// Errors raised while registering schemas.
///
/// These all indicate an authoring bug in the catalog itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("schema '{0}' is already registered")]
    DuplicateSchema(String),

    #[error("'{0}' is not a valid schema name")]
    InvalidSchemaName(String),

    #[error("schema '{schema}' declares attribute '{attribute}' more than once")]
    DuplicateAttribute { schema: String, attribute: String },

    #[error("attribute '{attribute}' of schema '{schema}' conflicts with the one declared by '{existing}'")]
    ConflictingAttribute {
        schema: String,
        attribute: String,
        existing: String,
    },

    #[error("schema '{schema}' extends unregistered schema '{base}'")]
    UnknownBaseSchema { schema: String, base: String },

    #[error("schema '{schema}' cannot extend '{base}': {reason}")]
    InvalidExtension {
        schema: String,
        base: String,
        reason: &'static str,
    },

    #[error("schema '{schema}' applies to unknown prim type '{prim_type}'")]
    UnknownPrimType { schema: String, prim_type: String },

    #[error("schema '{schema}' requires unknown API schema '{api}'")]
    UnknownRequiredApi { schema: String, api: String },

    #[error("fallback of '{attribute}' is {found}, expected {expected}")]
    FallbackTypeMismatch {
        attribute: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("fallback {fallback} of '{attribute}' violates its hard limits")]
    FallbackOutOfRange { attribute: String, fallback: Value },

    #[error("limits on '{0}' must be numeric and on a numeric attribute")]
    LimitTypeMismatch(String),

    #[error("limits on '{0}' have a NaN bound or a minimum above the maximum")]
    InvalidLimits(String),

    #[error("'{0}' is not a valid attribute name")]
    InvalidAttributeName(String),

    #[error("attribute '{attribute}' of multiple-apply schema '{schema}' has no __INSTANCE_NAME__ component")]
    MissingInstanceTemplate { schema: String, attribute: String },
}

/// Result type for registration.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// An attribute as seen through a schema, remembering which schema in the
/// `extends` chain declared it.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaAttribute {
    pub descriptor: AttributeDescriptor,

    /// Identifier of the declaring schema
    pub owner: String,
}

/// A registered schema plus the data derived from it at registration.
#[derive(Debug)]
pub struct SchemaType {
    definition: SchemaDefinition,

    /// Every schema reachable through `extends`, ancestors before
    /// descendants, each listed once.
    ancestors: Vec<String>,

    /// Union of the ancestors' attributes and the schema's own.
    attributes: Vec<SchemaAttribute>,
}

impl SchemaType {
    /// Registered type name (what the type registry reports as `typeName`).
    pub fn identifier(&self) -> &str {
        &self.definition.identifier
    }

    /// Public name used by prim queries.
    pub fn schema_name(&self) -> &str {
        &self.definition.schema_name
    }

    pub fn kind(&self) -> SchemaKind {
        self.definition.kind
    }

    pub fn definition(&self) -> &SchemaDefinition {
        &self.definition
    }

    /// Identifiers of all ancestors, in application order.
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    /// Flattened attributes, inherited ones first.
    pub fn attributes(&self) -> &[SchemaAttribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&SchemaAttribute> {
        self.attributes
            .iter()
            .find(|attr| attr.descriptor.name == name)
    }
}

/// Owns every schema definition for the lifetime of the process (or test).
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    types: Vec<SchemaType>,
    by_identifier: HashMap<String, usize>,
    by_schema_name: HashMap<String, usize>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema.
    ///
    /// Every schema it extends must already be registered, so the
    /// `extends` graph is acyclic by construction.
    pub fn register(&mut self, definition: SchemaDefinition) -> RegistryResult<&SchemaType> {
        for name in [&definition.identifier, &definition.schema_name] {
            if !is_identifier(name) {
                return Err(RegistryError::InvalidSchemaName(name.clone()));
            }
        }

        if self.by_identifier.contains_key(&definition.identifier) {
            return Err(RegistryError::DuplicateSchema(definition.identifier));
        }
        if self.by_schema_name.contains_key(&definition.schema_name) {
            return Err(RegistryError::DuplicateSchema(definition.schema_name));
        }

        self.validate_attributes(&definition)?;
        let ancestors = self.resolve_ancestors(&definition)?;
        let attributes = self.flatten_attributes(&definition, &ancestors)?;
        self.validate_applicability(&definition)?;

        log::debug!(
            "Registered {} schema {} as {} ({} attributes)",
            definition.kind.manifest_name(),
            definition.identifier,
            definition.schema_name,
            attributes.len()
        );

        let index = self.types.len();
        self.by_identifier
            .insert(definition.identifier.clone(), index);
        self.by_schema_name
            .insert(definition.schema_name.clone(), index);
        self.types.push(SchemaType {
            definition,
            ancestors,
            attributes,
        });

        Ok(&self.types[index])
    }

    /// Register several schemas in order, stopping at the first failure.
    pub fn register_all<I>(&mut self, definitions: I) -> RegistryResult<()>
    where
        I: IntoIterator<Item = SchemaDefinition>,
    {
        for definition in definitions {
            self.register(definition)?;
        }
        Ok(())
    }

    fn validate_attributes(&self, definition: &SchemaDefinition) -> RegistryResult<()> {
        for (i, attr) in definition.attributes.iter().enumerate() {
            attr.validate()?;

            if definition.attributes[..i]
                .iter()
                .any(|other| other.name == attr.name)
            {
                return Err(RegistryError::DuplicateAttribute {
                    schema: definition.identifier.clone(),
                    attribute: attr.name.clone(),
                });
            }

            if definition.kind == SchemaKind::MultipleApplyApi && !attr.is_instance_template() {
                return Err(RegistryError::MissingInstanceTemplate {
                    schema: definition.identifier.clone(),
                    attribute: attr.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn resolve_ancestors(&self, definition: &SchemaDefinition) -> RegistryResult<Vec<String>> {
        if definition.kind.is_typed() && definition.extends.len() > 1 {
            return Err(RegistryError::InvalidExtension {
                schema: definition.identifier.clone(),
                base: definition.extends[1].clone(),
                reason: "typed schemas have a single base type",
            });
        }

        let mut ancestors: Vec<String> = Vec::new();
        for base_id in &definition.extends {
            let base = self.find_type_by_name(base_id).ok_or_else(|| {
                RegistryError::UnknownBaseSchema {
                    schema: definition.identifier.clone(),
                    base: base_id.clone(),
                }
            })?;

            let compatible = match definition.kind {
                SchemaKind::AbstractTyped | SchemaKind::Concrete => base.kind().is_typed(),
                kind => base.kind() == kind,
            };
            if !compatible {
                return Err(RegistryError::InvalidExtension {
                    schema: definition.identifier.clone(),
                    base: base_id.clone(),
                    reason: "schema kinds are incompatible",
                });
            }

            let chain = base.ancestors.iter().chain(std::iter::once(&base.definition.identifier));
            for ancestor in chain {
                if !ancestors.contains(ancestor) {
                    ancestors.push(ancestor.clone());
                }
            }
        }

        Ok(ancestors)
    }

    fn flatten_attributes(
        &self,
        definition: &SchemaDefinition,
        ancestors: &[String],
    ) -> RegistryResult<Vec<SchemaAttribute>> {
        let mut flattened: Vec<SchemaAttribute> = Vec::new();

        let inherited = ancestors
            .iter()
            .filter_map(|id| self.find_type_by_name(id))
            .flat_map(|ancestor| {
                ancestor
                    .definition
                    .attributes
                    .iter()
                    .map(move |attr| (attr, ancestor.identifier()))
            });
        let own = definition
            .attributes
            .iter()
            .map(|attr| (attr, definition.identifier.as_str()));

        for (attr, owner) in inherited.chain(own) {
            if let Some(existing) = flattened
                .iter()
                .find(|other| other.descriptor.name == attr.name)
            {
                return Err(RegistryError::ConflictingAttribute {
                    schema: definition.identifier.clone(),
                    attribute: attr.name.clone(),
                    existing: existing.owner.clone(),
                });
            }

            flattened.push(SchemaAttribute {
                descriptor: attr.clone(),
                owner: owner.to_string(),
            });
        }

        Ok(flattened)
    }

    fn validate_applicability(&self, definition: &SchemaDefinition) -> RegistryResult<()> {
        let rule = &definition.applies_to;

        for prim_type in &rule.prim_types {
            let known = self
                .find_schema(prim_type)
                .is_some_and(|ty| ty.kind().is_typed());
            if !known {
                return Err(RegistryError::UnknownPrimType {
                    schema: definition.identifier.clone(),
                    prim_type: prim_type.clone(),
                });
            }
        }

        for api in &rule.required_apis {
            let known = self.find_schema(api).is_some_and(|ty| ty.kind().is_api());
            if !known {
                return Err(RegistryError::UnknownRequiredApi {
                    schema: definition.identifier.clone(),
                    api: api.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Lookups
impl SchemaRegistry {
    /// Look up a schema by its registered identifier.
    pub fn find_type_by_name(&self, identifier: &str) -> Option<&SchemaType> {
        self.by_identifier
            .get(identifier)
            .map(|&index| &self.types[index])
    }

    /// Map a registered identifier to its public schema name.
    pub fn schema_type_name(&self, identifier: &str) -> Option<&str> {
        self.find_type_by_name(identifier)
            .map(SchemaType::schema_name)
    }

    /// Look up a schema by its public name.
    pub fn find_schema(&self, schema_name: &str) -> Option<&SchemaType> {
        self.by_schema_name
            .get(schema_name)
            .map(|&index| &self.types[index])
    }

    /// Map a public schema name back to its registered identifier.
    pub fn identifier_for(&self, schema_name: &str) -> Option<&str> {
        self.find_schema(schema_name).map(SchemaType::identifier)
    }

    /// All schemas in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns true if the prim type `type_name` is `base` or derives from it.
    pub fn is_a(&self, type_name: &str, base: &str) -> bool {
        let Some(ty) = self.find_schema(type_name).filter(|ty| ty.kind().is_typed()) else {
            return false;
        };

        ty.schema_name() == base
            || ty
                .ancestors
                .iter()
                .any(|id| self.schema_type_name(id) == Some(base))
    }

    /// Whether `type_name` names a concrete (instantiable) prim type.
    pub fn is_concrete(&self, type_name: &str) -> bool {
        self.find_schema(type_name)
            .is_some_and(|ty| ty.kind() == SchemaKind::Concrete)
    }
}
