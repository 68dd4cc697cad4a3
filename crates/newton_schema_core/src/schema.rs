//! Schema definitions: immutable catalog data describing a typed schema or
//! an applied API schema.

use serde::{Deserialize, Serialize};

use crate::descriptor::AttributeDescriptor;

/// What kind of schema a definition describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaKind {
    /// A prim type that cannot be instantiated (e.g. `Gprim`)
    #[serde(rename = "abstractTyped")]
    AbstractTyped,

    /// A prim type (e.g. `Cube`, `PhysicsScene`)
    #[serde(rename = "concreteTyped")]
    Concrete,

    /// Applied API, at most once per prim
    #[serde(rename = "singleApplyAPI")]
    SingleApplyApi,

    /// Applied API, any number of named instances per prim
    #[serde(rename = "multipleApplyAPI")]
    MultipleApplyApi,
}

impl SchemaKind {
    /// Typed schemas define what a prim *is*.
    pub fn is_typed(&self) -> bool {
        matches!(self, SchemaKind::AbstractTyped | SchemaKind::Concrete)
    }

    /// API schemas add behavior to an existing prim.
    pub fn is_api(&self) -> bool {
        !self.is_typed()
    }

    /// Name used for this kind in plugin manifests.
    pub fn manifest_name(&self) -> &'static str {
        match self {
            SchemaKind::AbstractTyped => "abstractTyped",
            SchemaKind::Concrete => "concreteTyped",
            SchemaKind::SingleApplyApi => "singleApplyAPI",
            SchemaKind::MultipleApplyApi => "multipleApplyAPI",
        }
    }
}

/// Which prims an API schema may be applied to.
///
/// `prim_types` is matched by "is-a" against the prim's type hierarchy;
/// an empty list allows any prim. Every name in `required_apis` must
/// already be applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicabilityRule {
    pub prim_types: Vec<String>,
    pub required_apis: Vec<String>,
}

impl ApplicabilityRule {
    /// No restriction.
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to prims whose type is (or derives from) one of `types`.
    pub fn only<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prim_types: types.into_iter().map(Into::into).collect(),
            required_apis: Vec::new(),
        }
    }

    /// Additionally require `api` to be applied beforehand.
    pub fn requiring(mut self, api: impl Into<String>) -> Self {
        self.required_apis.push(api.into());
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.prim_types.is_empty() && self.required_apis.is_empty()
    }
}

/// A named group of attribute descriptors.
///
/// Every schema has two names: the registered `identifier` used by the
/// type registry (e.g. `NewtonPhysicsCollisionAPI`) and the public
/// `schema_name` used by prim queries (e.g. `NewtonCollisionAPI`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinition {
    pub identifier: String,
    pub schema_name: String,
    pub kind: SchemaKind,

    /// Plugin that ships the schema
    #[serde(default)]
    pub plugin: String,

    #[serde(default)]
    pub attributes: Vec<AttributeDescriptor>,

    #[serde(default)]
    pub applies_to: ApplicabilityRule,

    /// Identifiers of the schemas this one extends. For typed schemas
    /// this is the (single) base type.
    #[serde(default)]
    pub extends: Vec<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub documentation: String,
}

impl SchemaDefinition {
    fn new(identifier: impl Into<String>, schema_name: impl Into<String>, kind: SchemaKind) -> Self {
        Self {
            identifier: identifier.into(),
            schema_name: schema_name.into(),
            kind,
            plugin: String::new(),
            attributes: Vec::new(),
            applies_to: ApplicabilityRule::any(),
            extends: Vec::new(),
            documentation: String::new(),
        }
    }

    pub fn abstract_typed(identifier: impl Into<String>, schema_name: impl Into<String>) -> Self {
        Self::new(identifier, schema_name, SchemaKind::AbstractTyped)
    }

    pub fn concrete(identifier: impl Into<String>, schema_name: impl Into<String>) -> Self {
        Self::new(identifier, schema_name, SchemaKind::Concrete)
    }

    pub fn single_apply(identifier: impl Into<String>, schema_name: impl Into<String>) -> Self {
        Self::new(identifier, schema_name, SchemaKind::SingleApplyApi)
    }

    pub fn multiple_apply(identifier: impl Into<String>, schema_name: impl Into<String>) -> Self {
        Self::new(identifier, schema_name, SchemaKind::MultipleApplyApi)
    }

    pub fn in_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugin = plugin.into();
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeDescriptor) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn extending(mut self, identifier: impl Into<String>) -> Self {
        self.extends.push(identifier.into());
        self
    }

    pub fn applies_to(mut self, rule: ApplicabilityRule) -> Self {
        self.applies_to = rule;
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Look up one of this schema's own attributes (not inherited ones).
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// Compile-time handle on a registered API schema.
pub trait ApiSchema {
    /// Registered type name, e.g. `NewtonPhysicsCollisionAPI`
    const IDENTIFIER: &'static str;

    /// Public schema name, e.g. `NewtonCollisionAPI`
    const SCHEMA_NAME: &'static str;

    /// The catalog entry for this schema.
    fn definition() -> SchemaDefinition;
}
