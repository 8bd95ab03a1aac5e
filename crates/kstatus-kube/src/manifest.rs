//! Manifest parsing
//!
//! Reads multi-document YAML (or JSON) into dynamic objects. `List` objects,
//! as produced by `kubectl get -o yaml`, are expanded into their items.

use kube::core::DynamicObject;
use serde::Deserialize;

use crate::error::{Result, StatusError};

/// Parse every object in a manifest
pub fn parse_manifest(content: &str) -> Result<Vec<DynamicObject>> {
    let mut objects = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = serde_yaml::Value::deserialize(document)?;
        if value.is_null() {
            continue;
        }
        push_objects(value, index, &mut objects)?;
    }

    Ok(objects)
}

fn push_objects(
    value: serde_yaml::Value,
    index: usize,
    objects: &mut Vec<DynamicObject>,
) -> Result<()> {
    let is_list = value
        .get("kind")
        .and_then(|k| k.as_str())
        .is_some_and(|k| k == "List" || k.ends_with("List"))
        && value.get("items").is_some_and(|i| i.is_sequence());

    if is_list {
        if let Some(serde_yaml::Value::Sequence(items)) = value.get("items").cloned() {
            for item in items {
                push_objects(item, index, objects)?;
            }
        }
        return Ok(());
    }

    let object: DynamicObject = serde_yaml::from_value(value).map_err(|e| {
        StatusError::InvalidManifest(format!("document {}: {}", index + 1, e))
    })?;
    objects.push(object);
    Ok(())
}
