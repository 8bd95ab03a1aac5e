//! Conversion of type-erased objects into typed schemas

use k8s_openapi::api::apps::v1::Deployment;
use kube::core::DynamicObject;
use serde::de::DeserializeOwned;

use crate::error::{Result, StatusError};

/// API versions that serve the same Deployment schema as apps/v1
const LEGACY_DEPLOYMENT_VERSIONS: &[&str] = &["extensions/v1beta1", "apps/v1beta1", "apps/v1beta2"];

/// Convert a dynamic object into an apps/v1 Deployment
///
/// Objects from the legacy API groups are decoded as apps/v1.
pub fn to_deployment(object: &DynamicObject) -> Result<Deployment> {
    if let Some(types) = &object.types
        && LEGACY_DEPLOYMENT_VERSIONS.contains(&types.api_version.as_str())
    {
        tracing::trace!(api_version = %types.api_version, "decoding legacy deployment as apps/v1");
    }

    convert(object, "apps/v1", "Deployment", "apps/v1 deployment")
}

/// Decode `object` as `K`, stamping the target apiVersion/kind first
fn convert<K: DeserializeOwned>(
    object: &DynamicObject,
    api_version: &str,
    kind: &str,
    target: &'static str,
) -> Result<K> {
    let mut value =
        serde_json::to_value(object).map_err(|source| StatusError::Conversion { target, source })?;

    if let Some(map) = value.as_object_mut() {
        map.insert("apiVersion".to_string(), api_version.into());
        map.insert("kind".to_string(), kind.into());
    }

    serde_json::from_value(value).map_err(|source| StatusError::Conversion { target, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(value: serde_json::Value) -> DynamicObject {
        serde_json::from_value(value).unwrap()
    }

    fn deployment_json(api_version: &str) -> serde_json::Value {
        serde_json::json!({
            "apiVersion": api_version,
            "kind": "Deployment",
            "metadata": { "name": "web", "namespace": "default" },
            "spec": {
                "replicas": 3,
                "strategy": { "type": "Recreate" },
                "selector": { "matchLabels": { "app": "web" } },
                "template": {
                    "metadata": { "labels": { "app": "web" } },
                    "spec": { "containers": [{ "name": "web", "image": "nginx" }] }
                }
            },
            "status": { "replicas": 3, "availableReplicas": 2, "unavailableReplicas": 1 }
        })
    }

    #[test]
    fn test_to_deployment() {
        let deployment = to_deployment(&object(deployment_json("apps/v1"))).unwrap();

        assert_eq!(deployment.metadata.name.as_deref(), Some("web"));
        let spec = deployment.spec.unwrap();
        assert_eq!(spec.replicas, Some(3));
        assert_eq!(spec.strategy.unwrap().type_.as_deref(), Some("Recreate"));

        let status = deployment.status.unwrap();
        assert_eq!(status.available_replicas, Some(2));
        assert_eq!(status.unavailable_replicas, Some(1));
    }

    #[test]
    fn test_to_deployment_legacy_group() {
        let deployment = to_deployment(&object(deployment_json("extensions/v1beta1"))).unwrap();
        assert_eq!(deployment.status.unwrap().replicas, Some(3));
    }

    #[test]
    fn test_to_deployment_wrong_field_type() {
        let mut json = deployment_json("apps/v1");
        json["spec"]["replicas"] = serde_json::json!("three");

        let err = to_deployment(&object(json)).unwrap_err();
        assert!(err.is_conversion());
        assert!(
            err.to_string()
                .starts_with("convert object to apps/v1 deployment: ")
        );
    }
}
