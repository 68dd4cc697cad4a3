//! Shared fixtures for the catalog integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use newton_schema_core::{SchemaRegistry, Stage};

pub const TOLERANCE: f64 = 1e-9;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fresh stage over the full catalog.
pub fn stage() -> Stage {
    init_logging();
    let registry = newton_usd_schemas::registry().expect("catalog registers");
    Stage::new(Arc::new(registry))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

/// Both names of a schema resolve and agree.
pub fn assert_registered(registry: &SchemaRegistry, identifier: &str, schema_name: &str) {
    let ty = registry
        .find_type_by_name(identifier)
        .unwrap_or_else(|| panic!("{identifier} is not registered"));
    assert_eq!(ty.identifier(), identifier);
    assert_eq!(ty.schema_name(), schema_name);
    assert_eq!(registry.schema_type_name(identifier), Some(schema_name));
    assert_eq!(registry.identifier_for(schema_name), Some(identifier));
}
