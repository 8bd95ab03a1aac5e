//! Deployment status classification
//!
//! A Deployment is classified from its observed replica counts, checked in
//! order:
//! - every replica unavailable (including zero replicas): error
//! - every replica available: ok
//! - anything else: warning
//!
//! A Deployment scaled to zero on purpose has `replicas == unavailable == 0`
//! and is reported as an error, same as one whose replicas all failed.

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use kstatus_core::{Component, ObjectStatus, Property};
use kube::core::DynamicObject;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::convert;
use crate::error::{Result, StatusError};
use crate::registry::StatusFn;
use crate::selector::{self, SelectorSpec};
use crate::store::{LinkResolver, ObjectStore};

pub const NO_REPLICAS_MESSAGE: &str = "No replicas exist for this deployment";
pub const OK_MESSAGE: &str = "Deployment is OK";
pub const STRATEGY_LABEL: &str = "Deployment Strategy";
pub const SELECTORS_LABEL: &str = "Selectors";

/// The replica state of a workload needed for classification
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSnapshot {
    /// Deployment strategy type (`RollingUpdate`, `Recreate`)
    pub strategy: String,

    /// Total observed replicas
    pub replicas: i32,

    /// Replicas available to serve
    pub available_replicas: i32,

    /// Replicas not yet available
    pub unavailable_replicas: i32,

    /// Label selector, if the object declares one
    pub selector: Option<SelectorSpec>,
}

impl From<&Deployment> for WorkloadSnapshot {
    fn from(deployment: &Deployment) -> Self {
        let spec = deployment.spec.as_ref();
        let status = deployment.status.as_ref();

        Self {
            strategy: spec
                .and_then(|s| s.strategy.as_ref())
                .and_then(|s| s.type_.clone())
                .unwrap_or_default(),
            replicas: status.and_then(|s| s.replicas).unwrap_or(0),
            available_replicas: status.and_then(|s| s.available_replicas).unwrap_or(0),
            unavailable_replicas: status.and_then(|s| s.unavailable_replicas).unwrap_or(0),
            selector: spec.map(|s| SelectorSpec::from(&s.selector)),
        }
    }
}

/// Classify a workload snapshot
pub fn classify(snapshot: Option<&WorkloadSnapshot>) -> Result<ObjectStatus> {
    let snapshot = snapshot.ok_or(StatusError::NilInput { kind: "deployment" })?;

    let (selectors, warnings) = selector::render(snapshot.selector.as_ref()).into_parts();
    let properties = vec![
        Property::new(STRATEGY_LABEL, Component::text(snapshot.strategy.clone())),
        Property::new(SELECTORS_LABEL, selectors),
    ];

    let status = if snapshot.replicas == snapshot.unavailable_replicas {
        ObjectStatus::error(NO_REPLICAS_MESSAGE)
    } else if snapshot.replicas == snapshot.available_replicas {
        ObjectStatus::ok(OK_MESSAGE)
    } else {
        ObjectStatus::warning(format!(
            "Expected {} replicas, but {} are available",
            snapshot.replicas, snapshot.available_replicas
        ))
    };

    Ok(status.with_properties(properties).with_warnings(warnings))
}

/// Classifier for apps/v1 Deployments
#[derive(Debug, Clone, Copy, Default)]
pub struct DeploymentStatus;

#[async_trait]
impl StatusFn for DeploymentStatus {
    async fn status(
        &self,
        _cancel: &CancellationToken,
        object: Option<&DynamicObject>,
        _store: &dyn ObjectStore,
        _link: &dyn LinkResolver,
    ) -> Result<ObjectStatus> {
        let object = object.ok_or(StatusError::NilInput { kind: "deployment" })?;
        let deployment = convert::to_deployment(object)?;
        classify(Some(&WorkloadSnapshot::from(&deployment)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::SelectorExpression;
    use crate::store::{MemoryStore, PathLinks};
    use kstatus_core::{NodeStatus, RenderedSelector};
    use std::collections::BTreeMap;

    fn snapshot(replicas: i32, available: i32, unavailable: i32) -> WorkloadSnapshot {
        WorkloadSnapshot {
            strategy: "RollingUpdate".to_string(),
            replicas,
            available_replicas: available,
            unavailable_replicas: unavailable,
            selector: None,
        }
    }

    fn verdict(replicas: i32, available: i32, unavailable: i32) -> NodeStatus {
        classify(Some(&snapshot(replicas, available, unavailable)))
            .unwrap()
            .status
    }

    #[test]
    fn test_all_available() {
        let status = classify(Some(&snapshot(3, 3, 0))).unwrap();
        assert_eq!(status.status, NodeStatus::Ok);
        assert_eq!(status.details, vec![Component::text("Deployment is OK")]);
    }

    #[test]
    fn test_all_unavailable() {
        let status = classify(Some(&snapshot(3, 0, 3))).unwrap();
        assert_eq!(status.status, NodeStatus::Error);
        assert_eq!(
            status.details,
            vec![Component::text("No replicas exist for this deployment")]
        );
    }

    #[test]
    fn test_partially_available() {
        let status = classify(Some(&snapshot(3, 2, 1))).unwrap();
        assert_eq!(status.status, NodeStatus::Warning);
        assert_eq!(
            status.details,
            vec![Component::text("Expected 3 replicas, but 2 are available")]
        );
    }

    #[test]
    fn test_scaled_to_zero_is_error() {
        let status = classify(Some(&snapshot(0, 0, 0))).unwrap();
        assert_eq!(status.status, NodeStatus::Error);
        assert_eq!(status.summary(), NO_REPLICAS_MESSAGE);
    }

    #[test]
    fn test_nil_input() {
        let err = classify(None).unwrap_err();
        assert!(err.is_nil_input());
        assert_eq!(err.to_string(), "deployment is nil");
    }

    #[test]
    fn test_verdict_over_small_grid() {
        for t in 0..5 {
            for a in 0..5 {
                for u in 0..5 {
                    let got = verdict(t, a, u);
                    if t == u {
                        assert_eq!(got, NodeStatus::Error, "t={t} a={a} u={u}");
                    } else if t == a {
                        assert_eq!(got, NodeStatus::Ok, "t={t} a={a} u={u}");
                    } else {
                        assert_eq!(got, NodeStatus::Warning, "t={t} a={a} u={u}");
                        let summary = classify(Some(&snapshot(t, a, u))).unwrap().summary();
                        assert!(summary.contains(&t.to_string()));
                        assert!(summary.contains(&a.to_string()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_verdict_is_never_unknown() {
        for t in 0..6 {
            for a in 0..6 {
                for u in 0..6 {
                    let status = classify(Some(&snapshot(t, a, u))).unwrap();
                    assert_ne!(status.status, NodeStatus::Unknown, "t={t} a={a} u={u}");
                    assert!(!status.details.is_empty(), "t={t} a={a} u={u}");
                }
            }
        }
    }

    #[test]
    fn test_inconsistent_counts_are_not_rejected() {
        // available + unavailable > replicas
        assert_eq!(verdict(2, 2, 5), NodeStatus::Ok);
        assert_eq!(verdict(2, 7, 5), NodeStatus::Warning);
    }

    #[test]
    fn test_properties_order() {
        let mut snap = snapshot(3, 3, 0);
        snap.selector = Some(SelectorSpec {
            expressions: vec![SelectorExpression::new("env", "In", &["prod"])],
            match_labels: BTreeMap::from([
                ("tier".to_string(), "backend".to_string()),
                ("app".to_string(), "web".to_string()),
            ]),
        });

        let status = classify(Some(&snap)).unwrap();
        let labels: Vec<&str> = status.properties.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Deployment Strategy", "Selectors"]);
        assert_eq!(
            status.property(STRATEGY_LABEL),
            Some(&Component::text("RollingUpdate"))
        );
        assert_eq!(
            status.property(SELECTORS_LABEL).unwrap().to_string(),
            "env in (prod), app=web, tier=backend"
        );
    }

    #[test]
    fn test_properties_without_selector() {
        let status = classify(Some(&snapshot(1, 0, 1))).unwrap();
        assert_eq!(
            status.property(SELECTORS_LABEL),
            Some(&Component::selectors(vec![RenderedSelector::None]))
        );
    }

    #[test]
    fn test_selector_warnings_propagate() {
        let mut snap = snapshot(3, 3, 0);
        snap.selector = Some(SelectorSpec {
            expressions: vec![SelectorExpression::new("env", "Like", &["prod"])],
            match_labels: BTreeMap::new(),
        });

        let status = classify(Some(&snap)).unwrap();
        assert_eq!(status.status, NodeStatus::Ok);
        assert_eq!(status.warnings.len(), 1);
        assert!(status.warnings[0].contains("Like"));
    }

    #[test]
    fn test_serialized_shape() {
        let mut snap = snapshot(3, 2, 1);
        snap.selector = Some(SelectorSpec {
            expressions: vec![],
            match_labels: BTreeMap::from([("app".to_string(), "web".to_string())]),
        });

        let status = classify(Some(&snap)).unwrap();
        insta::assert_json_snapshot!(status, @r#"
        {
          "status": "warning",
          "details": [
            {
              "type": "text",
              "config": {
                "value": "Expected 3 replicas, but 2 are available"
              }
            }
          ],
          "properties": [
            {
              "label": "Deployment Strategy",
              "value": {
                "type": "text",
                "config": {
                  "value": "RollingUpdate"
                }
              }
            },
            {
              "label": "Selectors",
              "value": {
                "type": "selectors",
                "config": {
                  "selectors": [
                    {
                      "type": "label",
                      "key": "app",
                      "value": "web"
                    }
                  ]
                }
              }
            }
          ]
        }
        "#);
    }

    #[test]
    fn test_snapshot_from_deployment() {
        let deployment: Deployment = serde_json::from_value(serde_json::json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": { "name": "web" },
            "spec": {
                "strategy": { "type": "Recreate" },
                "selector": { "matchLabels": { "app": "web" } },
                "template": {
                    "spec": { "containers": [{ "name": "web", "image": "nginx" }] }
                }
            },
            "status": { "replicas": 4, "availableReplicas": 1 }
        }))
        .unwrap();

        let snap = WorkloadSnapshot::from(&deployment);
        assert_eq!(snap.strategy, "Recreate");
        assert_eq!(snap.replicas, 4);
        assert_eq!(snap.available_replicas, 1);
        assert_eq!(snap.unavailable_replicas, 0);
        assert_eq!(
            snap.selector.unwrap().match_labels.get("app"),
            Some(&"web".to_string())
        );
    }

    #[test]
    fn test_snapshot_from_empty_deployment() {
        let snap = WorkloadSnapshot::from(&Deployment::default());
        assert_eq!(snap, WorkloadSnapshot::default());
        assert_eq!(classify(Some(&snap)).unwrap().status, NodeStatus::Error);
    }

    #[tokio::test]
    async fn test_status_fn_nil_object() {
        let err = DeploymentStatus
            .status(
                &CancellationToken::new(),
                None,
                &MemoryStore::default(),
                &PathLinks::default(),
            )
            .await
            .unwrap_err();
        assert!(err.is_nil_input());
    }

    #[tokio::test]
    async fn test_status_fn_conversion_error() {
        let object: DynamicObject = serde_json::from_value(serde_json::json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": { "name": "web" },
            "status": { "replicas": "lots" }
        }))
        .unwrap();

        let err = DeploymentStatus
            .status(
                &CancellationToken::new(),
                Some(&object),
                &MemoryStore::default(),
                &PathLinks::default(),
            )
            .await
            .unwrap_err();
        assert!(err.is_conversion());
    }
}
