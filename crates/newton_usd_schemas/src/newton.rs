//! Newton extension schemas.
//!
//! Every Newton schema is a single-apply API registered as
//! `NewtonPhysics<Name>API` and addressed on prims as `Newton<Name>API`.

use newton_schema_core::{
    ApiSchema, ApplicabilityRule, AttributeDescriptor, Limits, SchemaDefinition,
};

use crate::physics::{ArticulationRootApi, CollisionApi, MaterialApi, MeshCollisionApi};
use crate::tokens::NEWTON_TOKENS;
use crate::PLUGIN_NAME;

fn newton_api<S: ApiSchema>() -> SchemaDefinition {
    SchemaDefinition::single_apply(S::IDENTIFIER, S::SCHEMA_NAME).in_plugin(PLUGIN_NAME)
}

/// Newton settings for an articulation root.
pub struct NewtonArticulationRootApi;

impl ApiSchema for NewtonArticulationRootApi {
    const IDENTIFIER: &'static str = "NewtonPhysicsArticulationRootAPI";
    const SCHEMA_NAME: &'static str = "NewtonArticulationRootAPI";

    fn definition() -> SchemaDefinition {
        newton_api::<Self>()
            .extending(ArticulationRootApi::IDENTIFIER)
            .with_attribute(
                AttributeDescriptor::new(NEWTON_TOKENS.self_collision_enabled, true)
                    .with_documentation("Whether bodies of the articulation collide with each other"),
            )
    }
}

/// Newton contact parameters for a colliding shape.
pub struct NewtonCollisionApi;

impl ApiSchema for NewtonCollisionApi {
    const IDENTIFIER: &'static str = "NewtonPhysicsCollisionAPI";
    const SCHEMA_NAME: &'static str = "NewtonCollisionAPI";

    fn definition() -> SchemaDefinition {
        newton_api::<Self>()
            .extending(CollisionApi::IDENTIFIER)
            .applies_to(ApplicabilityRule::only(["Gprim"]))
            .with_attribute(
                AttributeDescriptor::new(NEWTON_TOKENS.contact_margin, 0.0)
                    .with_soft_limits(Limits::at_least(0.0))
                    .with_documentation("Distance at which contacts start being generated"),
            )
            .with_attribute(
                AttributeDescriptor::new(NEWTON_TOKENS.contact_gap, f64::NEG_INFINITY)
                    .with_documentation("Minimum gap kept between shapes, -inf for none"),
            )
    }
}

/// Newton convex hull settings for mesh colliders.
pub struct NewtonMeshCollisionApi;

impl ApiSchema for NewtonMeshCollisionApi {
    const IDENTIFIER: &'static str = "NewtonPhysicsMeshCollisionAPI";
    const SCHEMA_NAME: &'static str = "NewtonMeshCollisionAPI";

    fn definition() -> SchemaDefinition {
        newton_api::<Self>()
            .extending(NewtonCollisionApi::IDENTIFIER)
            .extending(MeshCollisionApi::IDENTIFIER)
            .applies_to(ApplicabilityRule::only(["Mesh"]))
            .with_attribute(
                AttributeDescriptor::new(NEWTON_TOKENS.max_hull_vertices, -1)
                    .with_hard_limits(Limits::at_least(-1))
                    .with_documentation("Vertex budget for convex hulls, -1 for unlimited"),
            )
    }
}

/// Newton friction extensions for physics materials.
pub struct NewtonMaterialApi;

impl ApiSchema for NewtonMaterialApi {
    const IDENTIFIER: &'static str = "NewtonPhysicsMaterialAPI";
    const SCHEMA_NAME: &'static str = "NewtonMaterialAPI";

    fn definition() -> SchemaDefinition {
        newton_api::<Self>()
            .extending(MaterialApi::IDENTIFIER)
            .applies_to(ApplicabilityRule::only(["Material"]))
            .with_attribute(
                AttributeDescriptor::new(NEWTON_TOKENS.torsional_friction, 0.25)
                    .with_hard_limits(Limits::at_least(0.0)),
            )
            .with_attribute(
                AttributeDescriptor::new(NEWTON_TOKENS.rolling_friction, 0.0005)
                    .with_hard_limits(Limits::at_least(0.0)),
            )
    }
}

/// Solver-independent Newton scene settings.
pub struct NewtonSceneApi;

impl ApiSchema for NewtonSceneApi {
    const IDENTIFIER: &'static str = "NewtonPhysicsSceneAPI";
    const SCHEMA_NAME: &'static str = "NewtonSceneAPI";

    fn definition() -> SchemaDefinition {
        newton_api::<Self>()
            .applies_to(ApplicabilityRule::only(["PhysicsScene"]))
            .with_attribute(
                AttributeDescriptor::new(NEWTON_TOKENS.max_solver_iterations, -1)
                    .with_documentation("-1 lets the solver pick"),
            )
            .with_attribute(AttributeDescriptor::new(NEWTON_TOKENS.time_steps_per_second, 1000))
            .with_attribute(AttributeDescriptor::new(NEWTON_TOKENS.gravity_enabled, true))
    }
}

/// XPBD solver settings.
pub struct NewtonXpbdSceneApi;

impl ApiSchema for NewtonXpbdSceneApi {
    const IDENTIFIER: &'static str = "NewtonPhysicsXpbdSceneAPI";
    const SCHEMA_NAME: &'static str = "NewtonXpbdSceneAPI";

    fn definition() -> SchemaDefinition {
        let t = &NEWTON_TOKENS;
        newton_api::<Self>()
            .extending(NewtonSceneApi::IDENTIFIER)
            .applies_to(ApplicabilityRule::only(["PhysicsScene"]))
            .with_attribute(AttributeDescriptor::new(t.xpbd_soft_body_relaxation, 0.9))
            .with_attribute(AttributeDescriptor::new(t.xpbd_soft_contact_relaxation, 0.9))
            .with_attribute(AttributeDescriptor::new(t.xpbd_joint_linear_relaxation, 0.7))
            .with_attribute(AttributeDescriptor::new(t.xpbd_joint_angular_relaxation, 0.4))
            .with_attribute(AttributeDescriptor::new(t.xpbd_joint_linear_compliance, 0.0))
            .with_attribute(AttributeDescriptor::new(t.xpbd_joint_angular_compliance, 0.0))
            .with_attribute(AttributeDescriptor::new(t.xpbd_rigid_contact_relaxation, 0.8))
            .with_attribute(AttributeDescriptor::new(t.xpbd_rigid_contact_con_weighting, true))
            .with_attribute(AttributeDescriptor::new(t.xpbd_angular_damping, 0.0))
            .with_attribute(AttributeDescriptor::new(t.xpbd_restitution_enabled, false))
    }
}

/// Newton schemas, bases before the schemas that extend them.
pub fn schemas() -> Vec<SchemaDefinition> {
    vec![
        NewtonArticulationRootApi::definition(),
        NewtonCollisionApi::definition(),
        NewtonMeshCollisionApi::definition(),
        NewtonMaterialApi::definition(),
        NewtonSceneApi::definition(),
        NewtonXpbdSceneApi::definition(),
    ]
}
