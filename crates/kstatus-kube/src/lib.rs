//! kstatus Kube - Kubernetes object status classification
//!
//! This crate provides:
//! - **Classifiers**: Derive a health verdict from an object's desired and observed state
//! - **Selector Rendering**: Turn label selectors into ordered, displayable entries
//! - **Conversion**: Decode type-erased objects into their typed schema
//! - **Dispatch**: A registry mapping apiVersion/kind to a classifier
//! - **Collaborators**: Object store and link resolver interfaces shared by classifiers

pub mod convert;
pub mod deployment;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod selector;
pub mod store;

pub use deployment::{DeploymentStatus, WorkloadSnapshot, classify};
pub use error::{Result, StatusError};
pub use manifest::parse_manifest;
pub use registry::{StatusFn, StatusKey, StatusRegistry};
pub use selector::{RenderedSelectors, SelectorExpression, SelectorSpec, render};
pub use store::{LinkResolver, MemoryStore, ObjectKey, ObjectStore, PathLinks};

pub use kstatus_core::{Component, NodeStatus, ObjectStatus, Property, RenderedSelector};
pub use kube::core::DynamicObject;
pub use tokio_util::sync::CancellationToken;
