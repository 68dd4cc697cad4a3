//! Geometry and shading prim types.
//!
//! These are the typed schemas the physics and Newton API schemas target.
//! Only the attributes the catalog needs are declared: a prim type's own
//! attributes matter here because they show up on the composed definition
//! of every prim of that type.

use newton_schema_core::{AttributeDescriptor, SchemaDefinition};

use crate::tokens::GEOM_TOKENS;

/// Plugin the geometry types are registered under.
pub const GEOM_PLUGIN: &str = "usdGeom";

/// Plugin the shading types are registered under.
pub const SHADE_PLUGIN: &str = "usdShade";

fn abstract_type(name: &str) -> SchemaDefinition {
    SchemaDefinition::abstract_typed(format!("UsdGeom{}", name), name).in_plugin(GEOM_PLUGIN)
}

fn concrete_type(name: &str, base: &str) -> SchemaDefinition {
    SchemaDefinition::concrete(format!("UsdGeom{}", name), name)
        .in_plugin(GEOM_PLUGIN)
        .extending(format!("UsdGeom{}", base))
}

fn radius() -> AttributeDescriptor {
    AttributeDescriptor::new(GEOM_TOKENS.radius, 1.0)
}

fn height() -> AttributeDescriptor {
    AttributeDescriptor::new(GEOM_TOKENS.height, 2.0)
}

/// Geometry types, bases before the types that extend them.
pub fn schemas() -> Vec<SchemaDefinition> {
    vec![
        abstract_type("Imageable")
            .with_attribute(
                AttributeDescriptor::new(GEOM_TOKENS.visibility, "inherited")
                    .with_allowed_tokens(["inherited", "invisible"]),
            )
            .with_attribute(
                AttributeDescriptor::new(GEOM_TOKENS.purpose, "default")
                    .with_allowed_tokens(["default", "render", "proxy", "guide"]),
            ),
        abstract_type("Xformable").extending("UsdGeomImageable"),
        concrete_type("Xform", "Xformable"),
        concrete_type("Scope", "Imageable"),
        abstract_type("Boundable").extending("UsdGeomXformable"),
        abstract_type("Gprim")
            .extending("UsdGeomBoundable")
            .with_attribute(AttributeDescriptor::new(GEOM_TOKENS.double_sided, false)),
        concrete_type("Cube", "Gprim")
            .with_attribute(AttributeDescriptor::new(GEOM_TOKENS.size, 2.0)),
        concrete_type("Sphere", "Gprim").with_attribute(radius()),
        concrete_type("Capsule", "Gprim")
            .with_attribute(height())
            .with_attribute(radius()),
        concrete_type("Cylinder", "Gprim")
            .with_attribute(height())
            .with_attribute(radius()),
        concrete_type("Cone", "Gprim")
            .with_attribute(height())
            .with_attribute(radius()),
        concrete_type("Plane", "Gprim"),
        concrete_type("Mesh", "Gprim"),
    ]
}

/// Shading types.
pub fn shade_schemas() -> Vec<SchemaDefinition> {
    vec![SchemaDefinition::concrete("UsdShadeMaterial", "Material").in_plugin(SHADE_PLUGIN)]
}
