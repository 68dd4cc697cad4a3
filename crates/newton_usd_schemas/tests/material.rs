mod common;

use common::{assert_close, assert_registered, stage};
use newton_schema_core::Value;

#[test]
fn test_api_registered() {
    let stage = stage();
    assert_registered(stage.registry(), "NewtonPhysicsMaterialAPI", "NewtonMaterialAPI");
}

#[test]
fn test_api_application() {
    let mut stage = stage();
    let mut material = stage.define_prim("/Material", "Material").unwrap();

    assert!(!material.has_api("PhysicsMaterialAPI"));
    assert!(!material.has_api("NewtonMaterialAPI"));
    assert!(material.apply_api("NewtonMaterialAPI"));
    assert!(material.has_api("PhysicsMaterialAPI"));
    assert!(material.has_api("NewtonMaterialAPI"));

    assert!(material.has_attribute("physics:dynamicFriction"));
    assert!(material.has_attribute("newton:torsionalFriction"));
}

#[test]
fn test_api_limitations() {
    let mut stage = stage();
    let prim = stage.define_prim("/NotMaterial", "Xform").unwrap();
    assert!(!prim.can_apply_api("NewtonMaterialAPI"));
}

fn check_friction(name: &str, fallback: f64, authored: f64) {
    let mut stage = stage();
    let mut material = stage.define_prim("/Material", "Material").unwrap();
    assert!(!material.has_attribute(name));

    material.apply_api("NewtonMaterialAPI");
    let mut attr = material.attribute_mut(name).unwrap();
    assert!(!attr.has_authored_value());
    assert_close(attr.get().as_f64().unwrap(), fallback);

    assert!(attr.set(authored));
    assert!(attr.has_authored_value());
    assert_close(attr.get().as_f64().unwrap(), authored);

    let hard = attr.as_attribute().hard_limits();
    assert!(hard.is_valid());
    assert_eq!(hard.minimum(), Some(&Value::Double(0.0)));
    assert!(hard.maximum().is_none());
}

#[test]
fn test_torsional_friction() {
    check_friction("newton:torsionalFriction", 0.25, 0.1);
}

#[test]
fn test_rolling_friction() {
    check_friction("newton:rollingFriction", 0.0005, 0.01);
}

#[test]
fn test_negative_friction_is_advisory() {
    let mut stage = stage();
    let mut material = stage.define_prim("/Material", "Material").unwrap();
    material.apply_api("NewtonMaterialAPI");

    // Hard limits describe the range, writes outside it still succeed.
    let stored = material.set("newton:rollingFriction", -1.0).unwrap();
    assert_eq!(stored, Value::Double(-1.0));

    let attr = material.attribute("newton:rollingFriction").unwrap();
    let hard = attr.hard_limits();
    assert!(!hard.contains(&attr.get()));
    assert_eq!(hard.clamp(&attr.get()), Value::Double(0.0));
}
