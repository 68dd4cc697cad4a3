//! Prim handles.
//!
//! [`Prim`] answers capability queries (`has_api`, `can_apply_api`,
//! `has_attribute`) and reads attributes; [`PrimMut`] additionally applies
//! and removes API schemas and authors values.

use crate::apply::{api_entry, split_api_entry, SchemaError, SchemaResult};
use crate::attribute::{Attribute, AttributeMut};
use crate::definition::PrimDefinition;
use crate::registry::SchemaRegistry;
use crate::schema::ApiSchema;
use crate::stage::PrimSpec;
use crate::value::Value;

/// Read-only view of a prim on a [`crate::Stage`].
#[derive(Clone, Copy)]
pub struct Prim<'a> {
    registry: &'a SchemaRegistry,
    path: &'a str,
    spec: &'a PrimSpec,
}

impl<'a> Prim<'a> {
    pub(crate) fn new(registry: &'a SchemaRegistry, path: &'a str, spec: &'a PrimSpec) -> Self {
        Prim {
            registry,
            path,
            spec,
        }
    }

    pub fn path(&self) -> &'a str {
        self.path
    }

    /// Concrete type name, empty for typeless prims.
    pub fn type_name(&self) -> &'a str {
        &self.spec.type_name
    }

    /// Applied-API entries in application order.
    pub fn applied_schemas(&self) -> &'a [String] {
        &self.spec.api_schemas
    }

    /// True if `schema_name` is applied (any instance, for multiple-apply schemas).
    pub fn has_api(&self, schema_name: &str) -> bool {
        self.spec
            .api_schemas
            .iter()
            .any(|entry| split_api_entry(entry).0 == schema_name)
    }

    pub fn has_api_instance(&self, schema_name: &str, instance: &str) -> bool {
        let entry = api_entry(schema_name, Some(instance));
        self.spec.api_schemas.contains(&entry)
    }

    pub fn has<S: ApiSchema>(&self) -> bool {
        self.has_api(S::SCHEMA_NAME)
    }

    pub fn can_apply_api(&self, schema_name: &str) -> bool {
        self.check_applicable(schema_name, None).is_ok()
    }

    pub fn can_apply_api_instance(&self, schema_name: &str, instance: &str) -> bool {
        self.check_applicable(schema_name, Some(instance)).is_ok()
    }

    /// Like [`Prim::can_apply_api`], but reports why not.
    pub fn check_applicable(&self, schema_name: &str, instance: Option<&str>) -> SchemaResult<()> {
        self.registry
            .check_applicable(
                schema_name,
                instance,
                &self.spec.type_name,
                &self.spec.api_schemas,
            )
            .map(|_| ())
    }

    /// The prim's composed built-in attributes.
    pub fn definition(&self) -> PrimDefinition<'a> {
        PrimDefinition::compose(self.registry, &self.spec.type_name, &self.spec.api_schemas)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.definition().has_attribute(name)
    }

    pub fn attribute(&self, name: &str) -> Option<Attribute<'a>> {
        let resolved = self.definition().into_attribute(name)?;
        Some(Attribute::new(resolved, self.spec.authored.get(name)))
    }

    pub fn try_attribute(&self, name: &str) -> SchemaResult<Attribute<'a>> {
        self.attribute(name)
            .ok_or_else(|| SchemaError::UnknownAttribute(name.to_string()))
    }

    /// All attributes, prim type first, then applied schemas.
    pub fn attributes(&self) -> Vec<Attribute<'a>> {
        self.definition()
            .attributes()
            .iter()
            .map(|resolved| {
                let authored = self.spec.authored.get(resolved.descriptor.name.as_str());
                Attribute::new(resolved.clone(), authored)
            })
            .collect()
    }
}

impl std::fmt::Debug for Prim<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prim")
            .field("path", &self.path)
            .field("type_name", &self.spec.type_name)
            .field("api_schemas", &self.spec.api_schemas)
            .finish()
    }
}

/// Mutable handle on a prim on a [`crate::Stage`].
pub struct PrimMut<'a> {
    registry: &'a SchemaRegistry,
    path: String,
    spec: &'a mut PrimSpec,
}

impl<'a> PrimMut<'a> {
    pub(crate) fn new(registry: &'a SchemaRegistry, path: String, spec: &'a mut PrimSpec) -> Self {
        PrimMut {
            registry,
            path,
            spec,
        }
    }

    /// Reborrow as a read-only handle.
    pub fn as_prim(&self) -> Prim<'_> {
        Prim::new(self.registry, &self.path, &*self.spec)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn type_name(&self) -> &str {
        &self.spec.type_name
    }

    pub fn has_api(&self, schema_name: &str) -> bool {
        self.as_prim().has_api(schema_name)
    }

    pub fn can_apply_api(&self, schema_name: &str) -> bool {
        self.as_prim().can_apply_api(schema_name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.as_prim().has_attribute(name)
    }

    pub fn attribute(&self, name: &str) -> Option<Attribute<'_>> {
        self.as_prim().attribute(name)
    }

    /// Apply a single-apply API schema and its extension chain.
    ///
    /// Returns false, leaving the prim untouched, if the schema is unknown
    /// or not applicable to this prim.
    pub fn apply_api(&mut self, schema_name: &str) -> bool {
        let result = self.try_apply(schema_name, None);
        self.report(schema_name, result)
    }

    /// Apply one named instance of a multiple-apply API schema.
    pub fn apply_api_instance(&mut self, schema_name: &str, instance: &str) -> bool {
        let result = self.try_apply(schema_name, Some(instance));
        self.report(schema_name, result)
    }

    pub fn apply<S: ApiSchema>(&mut self) -> bool {
        self.apply_api(S::SCHEMA_NAME)
    }

    /// Apply `schema_name` (and its ancestors, ancestors first).
    ///
    /// All-or-nothing: the whole chain is checked before anything is
    /// recorded. Applying an already-applied schema succeeds and changes
    /// nothing, authored values included.
    pub fn try_apply(&mut self, schema_name: &str, instance: Option<&str>) -> SchemaResult<()> {
        let plan = self.registry.plan_application(
            schema_name,
            instance,
            &self.spec.type_name,
            &self.spec.api_schemas,
        )?;

        for entry in plan {
            log::debug!("{}: applied {}", self.path, entry);
            self.spec.api_schemas.push(entry);
        }
        Ok(())
    }

    fn report(&self, schema_name: &str, result: SchemaResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{}: cannot apply {}: {}", self.path, schema_name, err);
                false
            }
        }
    }

    /// Remove one applied entry.
    ///
    /// Returns false if the schema is not applied, or if a still-applied
    /// schema extends it. Schemas that were applied as ancestors stay
    /// applied. Authored values are kept and become visible again if the
    /// schema is re-applied.
    pub fn remove_api(&mut self, schema_name: &str) -> bool {
        let result = self.try_remove(schema_name, None);
        self.report_removal(schema_name, result)
    }

    pub fn remove_api_instance(&mut self, schema_name: &str, instance: &str) -> bool {
        let result = self.try_remove(schema_name, Some(instance));
        self.report_removal(schema_name, result)
    }

    /// Remove one applied entry, reporting why it cannot be removed.
    ///
    /// `Ok(false)` means the entry was not applied.
    pub fn try_remove(&mut self, schema_name: &str, instance: Option<&str>) -> SchemaResult<bool> {
        let entry = api_entry(schema_name, instance);
        let Some(index) = self.spec.api_schemas.iter().position(|e| *e == entry) else {
            return Ok(false);
        };

        if let Some(applied) = self.registry.implied_by(&entry, &self.spec.api_schemas) {
            return Err(SchemaError::ImpliedByApplied {
                schema: entry,
                applied: applied.to_string(),
            });
        }

        self.spec.api_schemas.remove(index);
        log::debug!("{}: removed {}", self.path, entry);
        Ok(true)
    }

    fn report_removal(&self, schema_name: &str, result: SchemaResult<bool>) -> bool {
        result.unwrap_or_else(|err| {
            log::warn!("{}: cannot remove {}: {}", self.path, schema_name, err);
            false
        })
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<AttributeMut<'_>> {
        let resolved = PrimDefinition::compose(
            self.registry,
            &self.spec.type_name,
            &self.spec.api_schemas,
        )
        .into_attribute(name)?;

        Some(AttributeMut::new(resolved, &mut self.spec.authored))
    }

    /// Author a value, returning what was stored after coercion.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> SchemaResult<Value> {
        self.attribute_mut(name)
            .ok_or_else(|| SchemaError::UnknownAttribute(name.to_string()))?
            .try_set(value)
    }

    /// Remove an authored value. Returns false if nothing was authored.
    pub fn clear(&mut self, name: &str) -> bool {
        self.attribute_mut(name)
            .is_some_and(|mut attr| attr.clear())
    }
}
