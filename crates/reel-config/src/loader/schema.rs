//! Schema validation helpers for Reel JSON5 configuration.

use super::SchemaMode;
use crate::ConfigError;
use serde_json::{Map, Value};

/// Validate a single config layer against the schema.
pub(super) fn validate_layer_schema(
    value: &Value,
    _mode: SchemaMode,
    layer: &str,
) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    ensure_allowed_keys(map, &["$schema", "publisher", "form"], layer, "")?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("publisher") {
        validate_publisher(value, layer, "publisher")?;
    }
    if let Some(value) = map.get("form") {
        validate_form(value, layer, "form")?;
    }
    Ok(())
}

/// Validate the "publisher" block.
fn validate_publisher(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["kind", "endpoint", "timeout_ms", "mock"], layer, path)?;

    if let Some(value) = map.get("kind") {
        let kind_path = join_path(path, "kind");
        match value.as_str() {
            Some("mock" | "http") => {}
            Some(_) => return Err(invalid_field(layer, &kind_path, "expected mock or http")),
            None => return Err(invalid_field(layer, &kind_path, "expected string")),
        }
    }
    if let Some(value) = map.get("endpoint") {
        expect_string(value, layer, &join_path(path, "endpoint"))?;
    }
    if let Some(value) = map.get("timeout_ms") {
        expect_u64(value, layer, &join_path(path, "timeout_ms"))?;
    }
    if let Some(value) = map.get("mock") {
        let mock_path = join_path(path, "mock");
        let mock = expect_object(value, layer, &mock_path)?;
        ensure_allowed_keys(mock, &["latency_ms", "fail"], layer, &mock_path)?;
        if let Some(value) = mock.get("latency_ms") {
            expect_u64(value, layer, &join_path(&mock_path, "latency_ms"))?;
        }
        if let Some(value) = mock.get("fail") {
            expect_bool(value, layer, &join_path(&mock_path, "fail"))?;
        }
    }
    Ok(())
}

/// Validate the "form" block.
fn validate_form(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["autosave_on_blur", "initial"], layer, path)?;

    if let Some(value) = map.get("autosave_on_blur") {
        expect_bool(value, layer, &join_path(path, "autosave_on_blur"))?;
    }
    if let Some(value) = map.get("initial") {
        validate_initial(value, layer, &join_path(path, "initial"))?;
    }
    Ok(())
}

/// Validate initial record overrides.
fn validate_initial(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(
        map,
        &["title", "rating", "year", "description", "upcoming", "cast"],
        layer,
        path,
    )?;

    for key in ["title", "description"] {
        if let Some(value) = map.get(key) {
            expect_string(value, layer, &join_path(path, key))?;
        }
    }
    if let Some(value) = map.get("rating") {
        expect_f64(value, layer, &join_path(path, "rating"))?;
    }
    if let Some(value) = map.get("year")
        && !value.is_null()
    {
        expect_u64(value, layer, &join_path(path, "year"))?;
    }
    if let Some(value) = map.get("upcoming") {
        expect_bool(value, layer, &join_path(path, "upcoming"))?;
    }
    if let Some(value) = map.get("cast") {
        let cast_path = join_path(path, "cast");
        let entries = expect_array(value, layer, &cast_path)?;
        for (idx, entry) in entries.iter().enumerate() {
            let entry_path = format!("{cast_path}[{idx}]");
            let member = expect_object(entry, layer, &entry_path)?;
            let id_path = join_path(&entry_path, "id");
            let Some(id) = member.get("id") else {
                return Err(invalid_field(layer, &id_path, "missing required field"));
            };
            if !id.is_u64() {
                return Err(invalid_field(layer, &id_path, "expected unsigned integer"));
            }
        }
    }
    Ok(())
}

/// Expect a JSON object or return a typed error.
fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(layer, path, "expected object")),
    }
}

/// Expect a JSON array or return a typed error.
fn expect_array<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Vec<Value>, ConfigError> {
    match value {
        Value::Array(arr) => Ok(arr),
        _ => Err(invalid_field(layer, path, "expected array")),
    }
}

fn expect_string(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_string() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected string"))
    }
}

fn expect_bool(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_boolean() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected bool"))
    }
}

fn expect_u64(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_u64() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected integer"))
    }
}

fn expect_f64(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_number() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected number"))
    }
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    match map.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(key) => Err(invalid_field(layer, &join_path(path, key), "unknown key")),
        None => Ok(()),
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{normalized_path}"),
        message: message.to_string(),
    }
}
