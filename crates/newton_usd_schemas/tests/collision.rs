mod common;

use common::{assert_close, assert_registered, stage};
use newton_schema_core::Value;
use newton_usd_schemas::newton::{NewtonCollisionApi, NewtonMeshCollisionApi};
use newton_usd_schemas::physics::APPROXIMATIONS;

// NewtonCollisionAPI

#[test]
fn test_collision_api_registered() {
    let stage = stage();
    assert_registered(stage.registry(), "NewtonPhysicsCollisionAPI", "NewtonCollisionAPI");
}

#[test]
fn test_collision_api_application() {
    let mut stage = stage();
    let mut prim = stage.define_prim("/Collider", "Cube").unwrap();

    assert!(!prim.has_api("PhysicsCollisionAPI"));
    assert!(!prim.has_api("NewtonCollisionAPI"));
    assert!(prim.apply_api("NewtonCollisionAPI"));
    assert!(prim.has_api("PhysicsCollisionAPI"));
    assert!(prim.has_api("NewtonCollisionAPI"));

    assert!(prim.has_attribute("physics:collisionEnabled"));
    assert!(prim.has_attribute("newton:contactMargin"));
    assert!(prim.has_attribute("newton:contactGap"));
}

#[test]
fn test_collision_api_limitations() {
    let mut stage = stage();
    let mut xform = stage.define_prim("/InvalidType", "Xform").unwrap();

    assert!(!xform.can_apply_api("NewtonCollisionAPI"));
    assert!(!xform.apply_api("NewtonCollisionAPI"));
    assert!(!xform.has_api("PhysicsCollisionAPI"));
    assert!(!xform.has_attribute("newton:contactMargin"));
}

#[test]
fn test_collision_api_applies_to_every_gprim() {
    let mut stage = stage();
    for shape in ["Cube", "Sphere", "Capsule", "Cylinder", "Cone", "Plane", "Mesh"] {
        let path = format!("/{shape}");
        let prim = stage.define_prim(&path, shape).unwrap();
        assert!(prim.can_apply_api("NewtonCollisionAPI"), "{shape}");
    }
    let scope = stage.define_prim("/Scope", "Scope").unwrap();
    assert!(!scope.can_apply_api("NewtonCollisionAPI"));
}

#[test]
fn test_contact_margin() {
    let mut stage = stage();
    let mut prim = stage.define_prim("/Collider", "Cube").unwrap();
    assert!(!prim.has_attribute("newton:contactMargin"));

    assert!(prim.apply::<NewtonCollisionApi>());
    let mut attr = prim.attribute_mut("newton:contactMargin").unwrap();
    assert!(!attr.has_authored_value());
    assert_close(attr.get().as_f64().unwrap(), 0.0);

    assert!(attr.set(0.2));
    assert!(attr.has_authored_value());
    assert_close(attr.get().as_f64().unwrap(), 0.2);

    let soft = attr.as_attribute().soft_limits();
    assert!(soft.is_valid());
    assert_close(soft.minimum().and_then(Value::as_f64).unwrap(), 0.0);
    assert!(soft.maximum().is_none());
}

#[test]
fn test_contact_gap() {
    let mut stage = stage();
    let mut prim = stage.define_prim("/Collider", "Cube").unwrap();
    assert!(!prim.has_attribute("newton:contactGap"));

    prim.apply_api("NewtonCollisionAPI");
    let mut attr = prim.attribute_mut("newton:contactGap").unwrap();
    assert!(!attr.has_authored_value());
    assert_eq!(attr.get(), Value::Double(f64::NEG_INFINITY));

    assert!(attr.set(0.1));
    assert!(attr.has_authored_value());
    assert_close(attr.get().as_f64().unwrap(), 0.1);
}

// NewtonMeshCollisionAPI

#[test]
fn test_mesh_collision_api_registered() {
    let stage = stage();
    assert_registered(
        stage.registry(),
        "NewtonPhysicsMeshCollisionAPI",
        "NewtonMeshCollisionAPI",
    );
}

#[test]
fn test_mesh_collision_api_application() {
    let mut stage = stage();
    let mut prim = stage.define_prim("/Collider", "Mesh").unwrap();

    for api in [
        "PhysicsCollisionAPI",
        "NewtonCollisionAPI",
        "PhysicsMeshCollisionAPI",
        "NewtonMeshCollisionAPI",
    ] {
        assert!(!prim.has_api(api), "{api} applied too early");
    }

    assert!(prim.apply::<NewtonMeshCollisionApi>());
    assert_eq!(
        prim.as_prim().applied_schemas(),
        [
            "PhysicsCollisionAPI",
            "NewtonCollisionAPI",
            "PhysicsMeshCollisionAPI",
            "NewtonMeshCollisionAPI",
        ]
    );

    assert!(prim.has_attribute("physics:collisionEnabled"));
    assert!(prim.has_attribute("newton:contactMargin"));
    assert!(prim.has_attribute("newton:contactGap"));
    assert!(prim.has_attribute("physics:approximation"));
    assert!(prim.has_attribute("newton:maxHullVertices"));
}

#[test]
fn test_mesh_collision_api_limitations() {
    let mut stage = stage();
    let sphere = stage.define_prim("/Sphere", "Sphere").unwrap();
    assert!(!sphere.can_apply_api("NewtonMeshCollisionAPI"));
    // The collision half of the chain would fit, the mesh half doesn't.
    assert!(sphere.can_apply_api("NewtonCollisionAPI"));
}

#[test]
fn test_approximation_token() {
    let mut stage = stage();
    let mut prim = stage.define_prim("/Collider", "Mesh").unwrap();
    prim.apply_api("NewtonMeshCollisionAPI");

    let attr = prim.attribute("physics:approximation").unwrap();
    assert_eq!(attr.get_as::<String>().as_deref(), Some("none"));
    assert_eq!(attr.allowed_tokens(), APPROXIMATIONS);

    assert_eq!(
        prim.set("physics:approximation", "convexHull"),
        Ok(Value::from("convexHull"))
    );
    assert!(prim.set("physics:approximation", 1.0).is_err());
}

#[test]
fn test_max_hull_vertices() {
    let mut stage = stage();
    let mut prim = stage.define_prim("/Collider", "Mesh").unwrap();
    assert!(!prim.has_attribute("newton:maxHullVertices"));

    prim.apply_api("NewtonMeshCollisionAPI");
    let mut attr = prim.attribute_mut("newton:maxHullVertices").unwrap();
    assert!(!attr.has_authored_value());
    assert_eq!(attr.get(), Value::Int(-1));

    assert!(attr.set(100));
    assert!(attr.has_authored_value());
    assert_eq!(attr.get(), Value::Int(100));

    // Doubles are floored
    assert!(attr.set(0.9));
    assert_eq!(attr.get(), Value::Int(0));

    assert!(attr.set(-1));
    assert!(attr.has_authored_value());
    assert_eq!(attr.get(), Value::Int(-1));

    let hard = attr.as_attribute().hard_limits();
    assert!(hard.is_valid());
    assert_eq!(hard.minimum(), Some(&Value::Int(-1)));
    assert!(hard.maximum().is_none());
}
