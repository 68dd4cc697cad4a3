//! Example: Print the schema catalog.
//!
//! Run with: cargo run --example describe_catalog -- [catalog.json] [--plug-info]

use std::env;

use anyhow::Result;
use newton_schema_core::{plug_info, SchemaKind};
use newton_usd_schemas::{CatalogConfig, PLUGIN_NAME};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let show_plug_info = args.iter().any(|arg| arg == "--plug-info");

    let config = match args.iter().find(|arg| !arg.starts_with("--")) {
        Some(path) => {
            println!("Loading catalog config: {}", path);
            CatalogConfig::from_path(path)?
        }
        None => CatalogConfig::default(),
    };
    let registry = config.build_registry()?;

    if show_plug_info {
        println!("{}", serde_json::to_string_pretty(&plug_info(&registry, PLUGIN_NAME))?);
        return Ok(());
    }

    println!("\n=== Catalog: {} schemas ===", registry.len());
    for schema in registry.iter().filter(|schema| schema.kind().is_api()) {
        let kind = match schema.kind() {
            SchemaKind::MultipleApplyApi => "multiple-apply",
            _ => "single-apply",
        };
        println!(
            "\n{} ({}, registered as {})",
            schema.schema_name(),
            kind,
            schema.identifier()
        );

        let rule = &schema.definition().applies_to;
        if !rule.prim_types.is_empty() {
            println!("  applies to: {}", rule.prim_types.join(", "));
        }
        if !schema.ancestors().is_empty() {
            println!("  extends:    {}", schema.ancestors().join(", "));
        }

        for attr in schema.attributes() {
            let descriptor = &attr.descriptor;
            print!(
                "    {:<40} {:<7} = {}",
                descriptor.name,
                descriptor.value_type.as_str(),
                descriptor.fallback
            );
            if let Some(soft) = &descriptor.soft_limits {
                print!("  soft {}", describe_limits(soft));
            }
            if let Some(hard) = &descriptor.hard_limits {
                print!("  hard {}", describe_limits(hard));
            }
            println!();
        }
    }

    Ok(())
}

fn describe_limits(limits: &newton_schema_core::Limits) -> String {
    let bound = |value: Option<&newton_schema_core::Value>| {
        value.map_or_else(|| "..".to_string(), |v| v.to_string())
    };
    format!("[{}, {}]", bound(limits.minimum()), bound(limits.maximum()))
}
