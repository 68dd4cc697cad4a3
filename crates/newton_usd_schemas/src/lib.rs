//! Newton USD Schemas - physics API schemas for the Newton simulator.
//!
//! This crate provides:
//!
//! - **Newton schemas**: articulation root, collision, mesh collision,
//!   material, scene and XPBD scene settings
//! - **Base schemas**: the geometry, shading and physics schemas they extend
//! - **Configuration**: `CatalogConfig` selects schema families and extra schemas
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use newton_schema_core::Stage;
//! use newton_usd_schemas::newton::NewtonCollisionApi;
//! use newton_usd_schemas::NEWTON_TOKENS;
//!
//! let registry = newton_usd_schemas::registry().unwrap();
//! let mut stage = Stage::new(Arc::new(registry));
//!
//! let mut cube = stage.define_prim("/World/Cube", "Cube").unwrap();
//! assert!(cube.apply::<NewtonCollisionApi>());
//! assert!(cube.has_api("PhysicsCollisionAPI"));
//!
//! let margin = cube.attribute(NEWTON_TOKENS.contact_margin).unwrap();
//! assert_eq!(margin.get_as::<f64>(), Some(0.0));
//! ```

pub mod config;
pub mod geom;
pub mod newton;
pub mod physics;
pub mod tokens;

use newton_schema_core::SchemaRegistry;

// Re-export commonly used types
pub use config::{CatalogConfig, ConfigError, ConfigResult};
pub use tokens::{GEOM_TOKENS, NEWTON_TOKENS, PHYSICS_TOKENS};

/// Plugin the Newton schemas are registered under.
pub const PLUGIN_NAME: &str = "newton_usd_schemas";

/// Build a registry holding the full catalog.
pub fn registry() -> ConfigResult<SchemaRegistry> {
    CatalogConfig::default().build_registry()
}
