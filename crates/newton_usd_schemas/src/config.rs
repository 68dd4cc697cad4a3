//! Catalog configuration.
//!
//! Selects which schema families are registered and carries extra schemas
//! authored as JSON, for example:
//!
//! ```json
//! {
//!     "include_geometry": true,
//!     "extra_schemas": [
//!         {
//!             "identifier": "StudioPhysicsTagAPI",
//!             "schemaName": "StudioTagAPI",
//!             "kind": "singleApplyAPI",
//!             "attributes": [
//!                 { "name": "studio:tag", "valueType": "token", "fallback": { "token": "" } }
//!             ]
//!         }
//!     ]
//! }
//! ```

use std::path::Path;

use newton_schema_core::{RegistryError, SchemaDefinition, SchemaRegistry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{geom, newton, physics};

/// Errors raised while loading a configuration or building its registry.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which schemas go into a registry.
///
/// The families build on each other: the physics schemas need the geometry
/// types and the Newton schemas need both. Disabling a family that a later
/// one depends on makes [`CatalogConfig::build_registry`] fail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Geometry and shading prim types
    pub include_geometry: bool,

    /// Physics base schemas
    pub include_physics: bool,

    /// Newton extension schemas
    pub include_newton: bool,

    /// Registered after the built-in schemas, in order
    pub extra_schemas: Vec<SchemaDefinition>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            include_geometry: true,
            include_physics: true,
            include_newton: true,
            extra_schemas: Vec::new(),
        }
    }
}

impl CatalogConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading catalog config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Register the selected schemas into a new registry.
    pub fn build_registry(&self) -> ConfigResult<SchemaRegistry> {
        let mut registry = SchemaRegistry::new();

        if self.include_geometry {
            registry.register_all(geom::schemas())?;
            registry.register_all(geom::shade_schemas())?;
        }
        if self.include_physics {
            registry.register_all(physics::schemas())?;
        }
        if self.include_newton {
            registry.register_all(newton::schemas())?;
        }
        registry.register_all(self.extra_schemas.iter().cloned())?;

        log::info!(
            "Schema catalog ready: {} schemas ({} extra)",
            registry.len(),
            self.extra_schemas.len()
        );
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::from_json_str("{}").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert!(config.include_newton);
        assert!(config.extra_schemas.is_empty());
    }

    #[test]
    fn test_geometry_only() {
        let config = CatalogConfig::from_json_str(
            r#"{ "include_physics": false, "include_newton": false }"#,
        )
        .unwrap();
        let registry = config.build_registry().unwrap();

        assert!(registry.find_schema("Cube").is_some());
        assert!(registry.find_schema("PhysicsCollisionAPI").is_none());
    }

    #[test]
    fn test_missing_family_fails() {
        let config = CatalogConfig {
            include_physics: false,
            ..CatalogConfig::default()
        };
        assert!(matches!(
            config.build_registry(),
            Err(ConfigError::Registry(RegistryError::UnknownBaseSchema { .. }))
        ));
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            CatalogConfig::from_json_str("{ \"include_newton\": 1 }"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            CatalogConfig::from_path("/nonexistent/catalog.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = CatalogConfig {
            include_geometry: false,
            ..CatalogConfig::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(CatalogConfig::from_json_str(&json).unwrap(), config);
    }
}
