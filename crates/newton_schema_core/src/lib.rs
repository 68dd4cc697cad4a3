//! Newton Schema Core - applied-API schema model for USD-style prims.
//!
//! This crate provides:
//!
//! - **Schema data**: `SchemaDefinition`, `AttributeDescriptor`, `Limits`, `Value`
//! - **Registry**: registration, extension-chain flattening, two-name identity
//! - **Application**: applicability checks and all-or-nothing API application
//! - **Stage**: an in-memory host with `Prim` and `Attribute` handles
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use newton_schema_core::{AttributeDescriptor, SchemaDefinition, SchemaRegistry, Stage, Value};
//!
//! let mut registry = SchemaRegistry::new();
//! registry.register(SchemaDefinition::concrete("TestCube", "Cube")).unwrap();
//! registry
//!     .register(
//!         SchemaDefinition::single_apply("TestCollisionAPI", "CollisionAPI")
//!             .with_attribute(AttributeDescriptor::new("physics:collisionEnabled", true)),
//!     )
//!     .unwrap();
//!
//! let mut stage = Stage::new(Arc::new(registry));
//! let mut cube = stage.define_prim("/World/Cube", "Cube").unwrap();
//! assert!(cube.apply_api("CollisionAPI"));
//! assert_eq!(cube.attribute("physics:collisionEnabled").unwrap().get(), Value::Bool(true));
//! ```

pub mod apply;
pub mod attribute;
pub mod definition;
pub mod descriptor;
pub mod plug_info;
pub mod prim;
pub mod registry;
pub mod schema;
pub mod stage;
pub mod tokens;
pub mod value;

// Re-export commonly used types
pub use apply::{api_entry, split_api_entry, SchemaError, SchemaResult};
pub use attribute::{Attribute, AttributeMut};
pub use definition::{PrimDefinition, ResolvedAttribute};
pub use descriptor::{AttributeDescriptor, Limits, INSTANCE_NAME_PLACEHOLDER};
pub use plug_info::plug_info;
pub use prim::{Prim, PrimMut};
pub use registry::{RegistryError, RegistryResult, SchemaAttribute, SchemaRegistry, SchemaType};
pub use schema::{ApiSchema, ApplicabilityRule, SchemaDefinition, SchemaKind};
pub use stage::{Stage, StageError, StageResult};
pub use value::{CoercionError, FromValue, Value, ValueType};
