//! In-memory stage: the host-side storage schemas are applied to.
//!
//! The stage only stores what a host scene graph would persist for a prim:
//! its type name, its applied-API list and its authored attribute values.
//! Everything else (which attributes exist, their fallbacks, limits) is
//! derived from the [`SchemaRegistry`] when asked.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use thiserror::Error;

use crate::descriptor::is_identifier;
use crate::prim::{Prim, PrimMut};
use crate::registry::SchemaRegistry;
use crate::value::Value;

/// Errors raised by stage edits.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    #[error("'{0}' is not a valid absolute prim path")]
    InvalidPath(String),

    #[error("'{0}' is not a registered concrete prim type")]
    UnknownPrimType(String),
}

/// Result type for stage edits.
pub type StageResult<T> = Result<T, StageError>;

/// Persistent per-prim state.
#[derive(Clone, Debug, Default)]
pub(crate) struct PrimSpec {
    pub(crate) type_name: String,
    pub(crate) api_schemas: Vec<String>,
    pub(crate) authored: HashMap<String, Value>,
}

/// A flat collection of prims keyed by absolute path.
pub struct Stage {
    registry: Arc<SchemaRegistry>,
    prims: BTreeMap<String, PrimSpec>,
}

impl Stage {
    /// Create an empty stage backed by `registry`.
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self {
            registry,
            prims: BTreeMap::new(),
        }
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Define a prim at `path` with the given concrete type.
    ///
    /// An empty `type_name` defines a typeless prim. Missing ancestors are
    /// defined as typeless prims. Redefining an existing prim changes its
    /// type and keeps its applied schemas and authored values.
    pub fn define_prim(&mut self, path: &str, type_name: &str) -> StageResult<PrimMut<'_>> {
        if !is_valid_prim_path(path) {
            return Err(StageError::InvalidPath(path.to_string()));
        }
        if !type_name.is_empty() && !self.registry.is_concrete(type_name) {
            return Err(StageError::UnknownPrimType(type_name.to_string()));
        }

        for (end, _) in path.match_indices('/').skip(1) {
            self.prims.entry(path[..end].to_string()).or_default();
        }

        let spec = self.prims.entry(path.to_string()).or_default();
        spec.type_name = type_name.to_string();
        log::debug!("Defined prim {} ({})", path, type_name);

        Ok(PrimMut::new(&self.registry, path.to_string(), spec))
    }

    pub fn prim_at_path(&self, path: &str) -> Option<Prim<'_>> {
        self.prims
            .get_key_value(path)
            .map(|(path, spec)| Prim::new(&self.registry, path, spec))
    }

    pub fn prim_at_path_mut(&mut self, path: &str) -> Option<PrimMut<'_>> {
        let registry = &*self.registry;
        self.prims
            .get_mut(path)
            .map(|spec| PrimMut::new(registry, path.to_string(), spec))
    }

    /// Remove a prim and all of its descendants.
    pub fn remove_prim(&mut self, path: &str) -> bool {
        let descendant_prefix = format!("{}/", path);
        let before = self.prims.len();
        self.prims
            .retain(|key, _| key != path && !key.starts_with(&descendant_prefix));
        self.prims.len() != before
    }

    /// All prims in path order.
    pub fn prims(&self) -> impl Iterator<Item = Prim<'_>> {
        self.prims
            .iter()
            .map(|(path, spec)| Prim::new(&self.registry, path, spec))
    }

    pub fn prim_count(&self) -> usize {
        self.prims.len()
    }
}

/// `/Name(/Name)*` with identifier components.
fn is_valid_prim_path(path: &str) -> bool {
    match path.strip_prefix('/') {
        Some(rest) => !rest.is_empty() && rest.split('/').all(is_identifier),
        None => false,
    }
}
