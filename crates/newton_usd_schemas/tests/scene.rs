mod common;

use common::{assert_registered, stage};
use newton_schema_core::{SchemaError, Value};
use newton_usd_schemas::newton::NewtonSceneApi;

#[test]
fn test_api_registered() {
    let stage = stage();
    assert_registered(stage.registry(), "NewtonPhysicsSceneAPI", "NewtonSceneAPI");
}

#[test]
fn test_api_application() {
    let mut stage = stage();
    let mut scene = stage.define_prim("/Scene", "PhysicsScene").unwrap();
    assert!(scene.apply::<NewtonSceneApi>());
    assert!(scene.has_api("NewtonSceneAPI"));

    // The scene type's own attribute is still there.
    assert_eq!(
        scene.attribute("physics:gravityMagnitude").unwrap().get(),
        Value::Double(f64::NEG_INFINITY)
    );
}

#[test]
fn test_api_limitations() {
    let mut stage = stage();
    let mut prim = stage.define_prim("/NotScene", "Xform").unwrap();
    assert!(!prim.can_apply_api("NewtonSceneAPI"));
    assert_eq!(
        prim.try_apply("NewtonSceneAPI", None),
        Err(SchemaError::NotApplicable {
            schema: "NewtonSceneAPI".into(),
            prim_type: "Xform".into(),
        })
    );
}

#[test]
fn test_max_solver_iterations() {
    let mut stage = stage();
    let mut scene = stage.define_prim("/Scene", "PhysicsScene").unwrap();
    assert!(!scene.has_attribute("newton:maxSolverIterations"));

    scene.apply_api("NewtonSceneAPI");
    let mut attr = scene.attribute_mut("newton:maxSolverIterations").unwrap();
    assert!(!attr.has_authored_value());
    assert_eq!(attr.get(), Value::Int(-1));

    assert!(attr.set(10));
    assert!(attr.has_authored_value());
    assert_eq!(attr.get(), Value::Int(10));
}

#[test]
fn test_time_steps_per_second() {
    let mut stage = stage();
    let mut scene = stage.define_prim("/Scene", "PhysicsScene").unwrap();
    assert!(!scene.has_attribute("newton:timeStepsPerSecond"));

    scene.apply_api("NewtonSceneAPI");
    let mut attr = scene.attribute_mut("newton:timeStepsPerSecond").unwrap();
    assert!(!attr.has_authored_value());
    assert_eq!(attr.get(), Value::Int(1000));

    assert!(attr.set(10000));
    assert!(attr.has_authored_value());
    assert_eq!(attr.get(), Value::Int(10000));

    // Doubles are floored
    assert!(attr.set(0.9));
    assert!(attr.has_authored_value());
    assert_eq!(attr.get(), Value::Int(0));
}

#[test]
fn test_gravity_enabled() {
    let mut stage = stage();
    let mut scene = stage.define_prim("/Scene", "PhysicsScene").unwrap();
    assert!(!scene.has_attribute("newton:gravityEnabled"));

    scene.apply_api("NewtonSceneAPI");
    let mut attr = scene.attribute_mut("newton:gravityEnabled").unwrap();
    assert!(!attr.has_authored_value());
    assert_eq!(attr.get(), Value::Bool(true));

    assert!(attr.set(false));
    assert!(attr.has_authored_value());
    assert_eq!(attr.get(), Value::Bool(false));

    // Bools don't take numbers
    assert!(!attr.set(1));
    assert_eq!(attr.get(), Value::Bool(false));
}
