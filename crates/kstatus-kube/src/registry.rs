//! Classifier dispatch
//!
//! Every resource kind with a dedicated classifier is registered under its
//! apiVersion and kind when the registry is built. Kinds without one are
//! reported as OK.

use async_trait::async_trait;
use futures::future::join_all;
use kstatus_core::ObjectStatus;
use kube::core::DynamicObject;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::deployment::DeploymentStatus;
use crate::error::{Result, StatusError};
use crate::store::{LinkResolver, ObjectStore};

/// Lookup key for a classifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusKey {
    pub api_version: String,
    pub kind: String,
}

impl StatusKey {
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
        }
    }

    /// Key for a dynamic object, if it declares apiVersion and kind
    pub fn for_object(object: &DynamicObject) -> Option<Self> {
        object
            .types
            .as_ref()
            .filter(|t| !t.api_version.is_empty() && !t.kind.is_empty())
            .map(|t| Self::new(t.api_version.clone(), t.kind.clone()))
    }
}

impl std::fmt::Display for StatusKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.api_version, self.kind)
    }
}

/// A classifier for one resource kind
#[async_trait]
pub trait StatusFn: Send + Sync {
    async fn status(
        &self,
        cancel: &CancellationToken,
        object: Option<&DynamicObject>,
        store: &dyn ObjectStore,
        link: &dyn LinkResolver,
    ) -> Result<ObjectStatus>;
}

/// Maps apiVersion/kind to a classifier
#[derive(Clone, Default)]
pub struct StatusRegistry {
    lookup: HashMap<StatusKey, Arc<dyn StatusFn>>,
}

impl StatusRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in classifier
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        let deployment: Arc<dyn StatusFn> = Arc::new(DeploymentStatus);
        for api_version in ["apps/v1", "apps/v1beta1", "apps/v1beta2", "extensions/v1beta1"] {
            registry.register_arc(StatusKey::new(api_version, "Deployment"), deployment.clone());
        }
        registry
    }

    /// Register a classifier, replacing any previous one for the key
    pub fn register(&mut self, key: StatusKey, status_fn: impl StatusFn + 'static) {
        self.register_arc(key, Arc::new(status_fn));
    }

    fn register_arc(&mut self, key: StatusKey, status_fn: Arc<dyn StatusFn>) {
        self.lookup.insert(key, status_fn);
    }

    pub fn contains(&self, key: &StatusKey) -> bool {
        self.lookup.contains_key(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<StatusKey> {
        let mut keys: Vec<_> = self.lookup.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Classify a single object
    pub async fn status(
        &self,
        cancel: &CancellationToken,
        object: Option<&DynamicObject>,
        store: &dyn ObjectStore,
        link: &dyn LinkResolver,
    ) -> Result<ObjectStatus> {
        let object = object.ok_or(StatusError::NilInput { kind: "object" })?;
        let name = object.metadata.name.clone().unwrap_or_default();

        let key = StatusKey::for_object(object)
            .ok_or_else(|| StatusError::MissingTypeMeta { name: name.clone() })?;

        if cancel.is_cancelled() {
            return Err(StatusError::Cancelled);
        }

        let Some(status_fn) = self.lookup.get(&key) else {
            tracing::debug!(%key, %name, "no classifier registered");
            return Ok(ObjectStatus::ok(format!("{} is OK", key)));
        };

        tracing::debug!(%key, %name, "classifying object");
        let status = status_fn.status(cancel, Some(object), store, link).await?;

        for warning in &status.warnings {
            tracing::warn!(%key, %name, "{}", warning);
        }

        Ok(status)
    }

    /// Classify many objects concurrently, in input order
    pub async fn status_all(
        &self,
        cancel: &CancellationToken,
        objects: &[DynamicObject],
        store: &dyn ObjectStore,
        link: &dyn LinkResolver,
    ) -> Vec<Result<ObjectStatus>> {
        join_all(
            objects
                .iter()
                .map(|object| self.status(cancel, Some(object), store, link)),
        )
        .await
    }
}

impl std::fmt::Debug for StatusRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
