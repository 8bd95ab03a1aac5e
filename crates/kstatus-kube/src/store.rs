//! Collaborators handed to every classifier
//!
//! Some classifiers need to look up related objects or build references to
//! them. Both concerns sit behind traits so the dispatch contract stays the
//! same whether objects come from a live cluster cache or a manifest file.

use async_trait::async_trait;
use kstatus_core::Component;
use kube::core::DynamicObject;

use crate::error::{Result, StatusError};

/// Identifies an object, or a set of objects when `name` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey {
    pub namespace: Option<String>,
    pub api_version: String,
    pub kind: String,
    pub name: Option<String>,
}

impl ObjectKey {
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            namespace: None,
            api_version: api_version.into(),
            kind: kind.into(),
            name: None,
        }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn matches(&self, object: &DynamicObject) -> bool {
        let Some(types) = &object.types else {
            return false;
        };
        if types.api_version != self.api_version || types.kind != self.kind {
            return false;
        }
        if let Some(ns) = &self.namespace
            && object.metadata.namespace.as_deref() != Some(ns.as_str())
        {
            return false;
        }
        match &self.name {
            Some(name) => object.metadata.name.as_deref() == Some(name.as_str()),
            None => true,
        }
    }
}

/// Read access to stored objects
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Get a single object. `key.name` must be set.
    async fn get(&self, key: &ObjectKey) -> Result<Option<DynamicObject>>;

    /// List every object matching the key
    async fn list(&self, key: &ObjectKey) -> Result<Vec<DynamicObject>>;
}

/// Object store backed by an in-memory list
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Vec<DynamicObject>,
}

impl MemoryStore {
    pub fn new(objects: Vec<DynamicObject>) -> Self {
        Self { objects }
    }

    pub fn insert(&mut self, object: DynamicObject) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[DynamicObject] {
        &self.objects
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get(&self, key: &ObjectKey) -> Result<Option<DynamicObject>> {
        if key.name.is_none() {
            return Err(StatusError::Store(format!(
                "get {} {} requires a name",
                key.api_version, key.kind
            )));
        }
        Ok(self.objects.iter().find(|o| key.matches(o)).cloned())
    }

    async fn list(&self, key: &ObjectKey) -> Result<Vec<DynamicObject>> {
        Ok(self
            .objects
            .iter()
            .filter(|o| key.matches(o))
            .cloned()
            .collect())
    }
}

/// Builds references to related objects
pub trait LinkResolver: Send + Sync {
    fn for_object(
        &self,
        api_version: &str,
        kind: &str,
        namespace: &str,
        name: &str,
        text: &str,
    ) -> Component;
}

/// Link resolver producing `<prefix>/<namespace>/<kind>/<name>` paths
#[derive(Debug, Clone, Default)]
pub struct PathLinks {
    prefix: String,
}

impl PathLinks {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into().trim_end_matches('/').to_string(),
        }
    }
}

impl LinkResolver for PathLinks {
    fn for_object(
        &self,
        _api_version: &str,
        kind: &str,
        namespace: &str,
        name: &str,
        text: &str,
    ) -> Component {
        let reference = format!(
            "{}/{}/{}/{}",
            self.prefix,
            namespace,
            kind.to_lowercase(),
            name
        );
        Component::link(text, reference)
    }
}
