//! Plugin manifest generation.
//!
//! Hosts discover schema types through a `plugInfo.json` manifest. This
//! renders one for every registered schema belonging to a plugin.

use serde_json::{json, Map, Value as JsonValue};

use crate::registry::{SchemaRegistry, SchemaType};

/// Base listed for typed schemas that extend nothing.
pub const TYPED_BASE: &str = "UsdTyped";

/// Base listed for API schemas that extend nothing.
pub const API_SCHEMA_BASE: &str = "UsdAPISchemaBase";

/// Build the manifest for the schemas registered under `plugin`.
pub fn plug_info(registry: &SchemaRegistry, plugin: &str) -> JsonValue {
    let mut types = Map::new();
    for schema in registry
        .iter()
        .filter(|schema| schema.definition().plugin == plugin)
    {
        types.insert(schema.identifier().to_string(), type_entry(schema));
    }

    json!({
        "Plugins": [
            {
                "Info": { "Types": types },
                "Name": plugin,
                "Type": "resource",
            }
        ]
    })
}

fn type_entry(schema: &SchemaType) -> JsonValue {
    let definition = schema.definition();

    let bases: Vec<&str> = if definition.extends.is_empty() {
        if schema.kind().is_typed() {
            vec![TYPED_BASE]
        } else {
            vec![API_SCHEMA_BASE]
        }
    } else {
        definition.extends.iter().map(String::as_str).collect()
    };

    let mut entry = Map::new();
    entry.insert(
        "alias".into(),
        json!({ "UsdSchemaBase": schema.schema_name() }),
    );
    entry.insert("bases".into(), json!(bases));
    entry.insert("schemaKind".into(), json!(schema.kind().manifest_name()));
    if schema.kind().is_api() && !definition.applies_to.prim_types.is_empty() {
        entry.insert(
            "apiSchemaCanOnlyApplyTo".into(),
            json!(definition.applies_to.prim_types),
        );
    }
    entry.insert("schemaIdentifier".into(), json!(schema.schema_name()));

    JsonValue::Object(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::AttributeDescriptor;
    use crate::schema::{ApplicabilityRule, SchemaDefinition};

    #[test]
    fn test_manifest() {
        let mut registry = SchemaRegistry::new();
        registry
            .register_all([
                SchemaDefinition::abstract_typed("TestGprim", "Gprim").in_plugin("base"),
                SchemaDefinition::single_apply("BaseCollision", "CollisionAPI").in_plugin("base"),
                SchemaDefinition::single_apply("ExtCollision", "ExtCollisionAPI")
                    .in_plugin("ext")
                    .extending("BaseCollision")
                    .applies_to(ApplicabilityRule::only(["Gprim"]))
                    .with_attribute(AttributeDescriptor::new("ext:margin", 0.0)),
            ])
            .unwrap();

        let manifest = plug_info(&registry, "ext");
        let plugin = &manifest["Plugins"][0];
        assert_eq!(plugin["Name"], "ext");
        assert_eq!(plugin["Type"], "resource");

        let types = plugin["Info"]["Types"].as_object().unwrap();
        assert_eq!(types.len(), 1);
        let entry = &types["ExtCollision"];
        assert_eq!(entry["alias"]["UsdSchemaBase"], "ExtCollisionAPI");
        assert_eq!(entry["bases"], json!(["BaseCollision"]));
        assert_eq!(entry["schemaKind"], "singleApplyAPI");
        assert_eq!(entry["apiSchemaCanOnlyApplyTo"], json!(["Gprim"]));

        let base = plug_info(&registry, "base");
        let types = &base["Plugins"][0]["Info"]["Types"];
        assert_eq!(types["TestGprim"]["bases"], json!([TYPED_BASE]));
        assert_eq!(types["BaseCollision"]["bases"], json!([API_SCHEMA_BASE]));
        assert!(types["BaseCollision"].get("apiSchemaCanOnlyApplyTo").is_none());
    }
}
