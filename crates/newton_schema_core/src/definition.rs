//! Composed prim definitions.
//!
//! A prim's definition is the union of its type's attributes and the
//! flattened attributes of every applied API schema. It is derived from
//! registry data on demand and never stored on the prim.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::apply::split_api_entry;
use crate::descriptor::AttributeDescriptor;
use crate::registry::{SchemaRegistry, SchemaType};

/// An attribute present on a prim because of its type or an applied API.
#[derive(Clone, Debug)]
pub struct ResolvedAttribute<'r> {
    /// Owned only for multiple-apply instances, whose names are substituted
    pub descriptor: Cow<'r, AttributeDescriptor>,

    /// Identifier of the schema that declared the attribute
    pub owner: &'r str,

    /// Instance name for attributes of multiple-apply schemas
    pub instance: Option<String>,
}

/// The built-in attributes of a prim.
#[derive(Clone, Debug, Default)]
pub struct PrimDefinition<'r> {
    type_schema: Option<&'r SchemaType>,
    api_schemas: Vec<&'r SchemaType>,
    attributes: Vec<ResolvedAttribute<'r>>,
    index: HashMap<String, usize>,
}

impl<'r> PrimDefinition<'r> {
    /// Compose the definition of a prim of type `type_name` carrying the
    /// `applied` API entries.
    ///
    /// The first contributor of an attribute name wins: the prim type,
    /// then API schemas in application order. Entries naming schemas the
    /// registry doesn't know are skipped.
    pub fn compose(registry: &'r SchemaRegistry, type_name: &str, applied: &[String]) -> Self {
        let mut definition = PrimDefinition::default();

        if !type_name.is_empty() {
            match registry.find_schema(type_name) {
                Some(ty) if ty.kind().is_typed() => {
                    definition.type_schema = Some(ty);
                    for attr in ty.attributes() {
                        definition.insert(Cow::Borrowed(&attr.descriptor), &attr.owner, None);
                    }
                }
                _ => log::debug!("Prim type '{}' has no registered schema", type_name),
            }
        }

        for entry in applied {
            let (name, instance) = split_api_entry(entry);
            let Some(schema) = registry.find_schema(name).filter(|s| s.kind().is_api()) else {
                log::debug!("Skipping unknown applied schema '{}'", entry);
                continue;
            };

            definition.api_schemas.push(schema);
            for attr in schema.attributes() {
                let descriptor = match instance {
                    Some(instance) => Cow::Owned(attr.descriptor.instantiate(instance)),
                    None => Cow::Borrowed(&attr.descriptor),
                };
                definition.insert(descriptor, &attr.owner, instance);
            }
        }

        definition
    }

    fn insert(
        &mut self,
        descriptor: Cow<'r, AttributeDescriptor>,
        owner: &'r str,
        instance: Option<&str>,
    ) {
        if self.index.contains_key(&descriptor.name) {
            return;
        }

        self.index
            .insert(descriptor.name.clone(), self.attributes.len());
        self.attributes.push(ResolvedAttribute {
            descriptor,
            owner,
            instance: instance.map(str::to_string),
        });
    }

    /// The prim's typed schema, if its type is registered.
    pub fn type_schema(&self) -> Option<&'r SchemaType> {
        self.type_schema
    }

    /// Applied API schemas in application order.
    pub fn api_schemas(&self) -> &[&'r SchemaType] {
        &self.api_schemas
    }

    pub fn attributes(&self) -> &[ResolvedAttribute<'r>] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&ResolvedAttribute<'r>> {
        self.index
            .get(name)
            .map(|&index| &self.attributes[index])
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .map(|attr| attr.descriptor.name.as_str())
    }

    /// Take one attribute out of the definition.
    pub fn into_attribute(mut self, name: &str) -> Option<ResolvedAttribute<'r>> {
        let index = self.index.get(name).copied()?;
        Some(self.attributes.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaDefinition;
    use crate::value::Value;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .register_all([
                SchemaDefinition::abstract_typed("TestGprim", "Gprim")
                    .with_attribute(AttributeDescriptor::new("doubleSided", false)),
                SchemaDefinition::concrete("TestCube", "Cube")
                    .extending("TestGprim")
                    .with_attribute(AttributeDescriptor::new("size", 2.0)),
                SchemaDefinition::single_apply("BaseCollision", "CollisionAPI")
                    .with_attribute(AttributeDescriptor::new("physics:collisionEnabled", true)),
                SchemaDefinition::single_apply("ExtCollision", "ExtCollisionAPI")
                    .extending("BaseCollision")
                    .with_attribute(AttributeDescriptor::new("ext:margin", 0.0)),
                SchemaDefinition::multiple_apply("Limit", "LimitAPI").with_attribute(
                    AttributeDescriptor::new("limit:__INSTANCE_NAME__:low", f64::NEG_INFINITY),
                ),
            ])
            .unwrap();
        registry
    }

    #[test]
    fn test_type_attributes() {
        let registry = registry();
        let definition = PrimDefinition::compose(&registry, "Cube", &[]);

        assert_eq!(definition.type_schema().map(|t| t.schema_name()), Some("Cube"));
        let names: Vec<_> = definition.attribute_names().collect();
        assert_eq!(names, ["doubleSided", "size"]);
        assert_eq!(definition.attribute("doubleSided").unwrap().owner, "TestGprim");
    }

    #[test]
    fn test_applied_attributes() {
        let registry = registry();
        let applied = vec!["CollisionAPI".to_string(), "ExtCollisionAPI".to_string()];
        let definition = PrimDefinition::compose(&registry, "Cube", &applied);

        assert!(definition.has_attribute("physics:collisionEnabled"));
        assert!(definition.has_attribute("ext:margin"));
        assert_eq!(definition.api_schemas().len(), 2);
        assert_eq!(definition.attributes().len(), 4);
    }

    #[test]
    fn test_instances_substitute_names() {
        let registry = registry();
        let applied = vec!["LimitAPI:rotX".to_string(), "LimitAPI:rotY".to_string()];
        let definition = PrimDefinition::compose(&registry, "", &applied);

        let rot_x = definition.attribute("limit:rotX:low").unwrap();
        assert_eq!(rot_x.instance.as_deref(), Some("rotX"));
        assert_eq!(rot_x.descriptor.fallback, Value::Double(f64::NEG_INFINITY));
        assert!(definition.has_attribute("limit:rotY:low"));
        assert!(!definition.has_attribute("limit:__INSTANCE_NAME__:low"));
    }

    #[test]
    fn test_unknown_entries_are_skipped() {
        let registry = registry();
        let applied = vec!["GoneAPI".to_string(), "Cube".to_string()];
        let definition = PrimDefinition::compose(&registry, "Unknown", &applied);

        assert!(definition.type_schema().is_none());
        assert!(definition.api_schemas().is_empty());
        assert!(definition.attributes().is_empty());
    }
}
