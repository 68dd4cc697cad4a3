//! Physics base schemas.
//!
//! The subset of the host's physics schemas that the Newton schemas extend
//! or target. They are declared here so the catalog can be exercised
//! without the host's own plugin.

use newton_schema_core::{ApiSchema, ApplicabilityRule, AttributeDescriptor, SchemaDefinition};

use crate::tokens::PHYSICS_TOKENS;

/// Plugin the physics base schemas are registered under.
pub const PHYSICS_PLUGIN: &str = "usdPhysics";

/// Collision approximations accepted by `physics:approximation`.
pub const APPROXIMATIONS: [&str; 6] = [
    "none",
    "convexDecomposition",
    "convexHull",
    "boundingSphere",
    "boundingCube",
    "meshSimplification",
];

/// `PhysicsCollisionAPI`: the prim takes part in collisions.
pub struct CollisionApi;

impl ApiSchema for CollisionApi {
    const IDENTIFIER: &'static str = "UsdPhysicsCollisionAPI";
    const SCHEMA_NAME: &'static str = "PhysicsCollisionAPI";

    fn definition() -> SchemaDefinition {
        SchemaDefinition::single_apply(Self::IDENTIFIER, Self::SCHEMA_NAME)
            .in_plugin(PHYSICS_PLUGIN)
            .with_attribute(AttributeDescriptor::new(PHYSICS_TOKENS.collision_enabled, true))
    }
}

/// `PhysicsMeshCollisionAPI`: how a mesh is approximated for collision.
pub struct MeshCollisionApi;

impl ApiSchema for MeshCollisionApi {
    const IDENTIFIER: &'static str = "UsdPhysicsMeshCollisionAPI";
    const SCHEMA_NAME: &'static str = "PhysicsMeshCollisionAPI";

    fn definition() -> SchemaDefinition {
        SchemaDefinition::single_apply(Self::IDENTIFIER, Self::SCHEMA_NAME)
            .in_plugin(PHYSICS_PLUGIN)
            .applies_to(ApplicabilityRule::only(["Mesh"]))
            .with_attribute(
                AttributeDescriptor::new(PHYSICS_TOKENS.approximation, "none")
                    .with_allowed_tokens(APPROXIMATIONS),
            )
    }
}

/// `PhysicsMaterialAPI`: friction, restitution and density of a material.
pub struct MaterialApi;

impl ApiSchema for MaterialApi {
    const IDENTIFIER: &'static str = "UsdPhysicsMaterialAPI";
    const SCHEMA_NAME: &'static str = "PhysicsMaterialAPI";

    fn definition() -> SchemaDefinition {
        SchemaDefinition::single_apply(Self::IDENTIFIER, Self::SCHEMA_NAME)
            .in_plugin(PHYSICS_PLUGIN)
            .applies_to(ApplicabilityRule::only(["Material"]))
            .with_attribute(AttributeDescriptor::new(PHYSICS_TOKENS.dynamic_friction, 0.0))
            .with_attribute(AttributeDescriptor::new(PHYSICS_TOKENS.static_friction, 0.0))
            .with_attribute(AttributeDescriptor::new(PHYSICS_TOKENS.restitution, 0.0))
            .with_attribute(
                AttributeDescriptor::new(PHYSICS_TOKENS.density, 0.0)
                    .with_documentation("0.0 means the density is computed by the simulator"),
            )
    }
}

/// `PhysicsArticulationRootAPI`: marks the root of an articulation.
pub struct ArticulationRootApi;

impl ApiSchema for ArticulationRootApi {
    const IDENTIFIER: &'static str = "UsdPhysicsArticulationRootAPI";
    const SCHEMA_NAME: &'static str = "PhysicsArticulationRootAPI";

    fn definition() -> SchemaDefinition {
        SchemaDefinition::single_apply(Self::IDENTIFIER, Self::SCHEMA_NAME)
            .in_plugin(PHYSICS_PLUGIN)
    }
}

/// `PhysicsLimitAPI`: per-axis joint limit, applied once per axis
/// (`PhysicsLimitAPI:rotX`, `PhysicsLimitAPI:transY`, ...).
pub struct LimitApi;

impl ApiSchema for LimitApi {
    const IDENTIFIER: &'static str = "UsdPhysicsLimitAPI";
    const SCHEMA_NAME: &'static str = "PhysicsLimitAPI";

    fn definition() -> SchemaDefinition {
        SchemaDefinition::multiple_apply(Self::IDENTIFIER, Self::SCHEMA_NAME)
            .in_plugin(PHYSICS_PLUGIN)
            .applies_to(ApplicabilityRule::only(["PhysicsJoint"]))
            .with_attribute(AttributeDescriptor::new(PHYSICS_TOKENS.limit_low, f64::NEG_INFINITY))
            .with_attribute(AttributeDescriptor::new(PHYSICS_TOKENS.limit_high, f64::INFINITY))
    }
}

/// Physics base schemas, bases before the schemas that extend them.
///
/// Joints extend `UsdGeomImageable`, so the geometry types must already be
/// registered.
pub fn schemas() -> Vec<SchemaDefinition> {
    vec![
        SchemaDefinition::concrete("UsdPhysicsScene", "PhysicsScene")
            .in_plugin(PHYSICS_PLUGIN)
            .with_attribute(
                AttributeDescriptor::new(PHYSICS_TOKENS.gravity_magnitude, f64::NEG_INFINITY)
                    .with_documentation("-inf means earth gravity in stage units"),
            ),
        SchemaDefinition::concrete("UsdPhysicsJoint", "PhysicsJoint")
            .in_plugin(PHYSICS_PLUGIN)
            .extending("UsdGeomImageable")
            .with_attribute(AttributeDescriptor::new(PHYSICS_TOKENS.joint_enabled, true))
            .with_attribute(AttributeDescriptor::new(PHYSICS_TOKENS.break_force, f64::INFINITY)),
        SchemaDefinition::concrete("UsdPhysicsRevoluteJoint", "PhysicsRevoluteJoint")
            .in_plugin(PHYSICS_PLUGIN)
            .extending("UsdPhysicsJoint"),
        CollisionApi::definition(),
        MeshCollisionApi::definition(),
        MaterialApi::definition(),
        ArticulationRootApi::definition(),
        LimitApi::definition(),
    ]
}
