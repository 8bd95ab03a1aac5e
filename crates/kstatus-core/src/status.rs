//! Object status - the result of classifying one object

use serde::{Deserialize, Serialize};

use crate::component::{Component, NodeStatus, Property};

/// Classified status of a single Kubernetes object
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectStatus {
    /// Health verdict
    pub status: NodeStatus,

    /// Human-readable explanation, in order
    pub details: Vec<Component>,

    /// Auxiliary facts, in display order
    #[serde(default)]
    pub properties: Vec<Property>,

    /// Recoverable problems found while classifying
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ObjectStatus {
    /// Create a status with a verdict and a single text detail
    pub fn new(status: NodeStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            details: vec![Component::text(detail)],
            properties: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn ok(detail: impl Into<String>) -> Self {
        Self::new(NodeStatus::Ok, detail)
    }

    pub fn warning(detail: impl Into<String>) -> Self {
        Self::new(NodeStatus::Warning, detail)
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self::new(NodeStatus::Error, detail)
    }

    /// Replace the properties
    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        self.properties = properties;
        self
    }

    /// Replace the warnings
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Append a text detail
    pub fn add_detail(&mut self, detail: impl Into<String>) {
        self.details.push(Component::text(detail));
    }

    /// Mark as warning unless the object is already in error
    pub fn set_warning(&mut self) {
        if self.status != NodeStatus::Error {
            self.status = NodeStatus::Warning;
        }
    }

    /// Mark as error
    pub fn set_error(&mut self) {
        self.status = NodeStatus::Error;
    }

    /// The verdict. An unclassified status reads as ok.
    pub fn status(&self) -> NodeStatus {
        match self.status {
            NodeStatus::Unknown => NodeStatus::Ok,
            status => status,
        }
    }

    /// Look up a property value by label
    pub fn property(&self, label: &str) -> Option<&Component> {
        self.properties
            .iter()
            .find(|p| p.label == label)
            .map(|p| &p.value)
    }

    /// Details joined into one line
    pub fn summary(&self) -> String {
        self.details
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}
