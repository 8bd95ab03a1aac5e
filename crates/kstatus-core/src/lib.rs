//! kstatus Core - Core types for Kubernetes object status classification
//!
//! This crate provides the value types shared by every status classifier:
//! - `NodeStatus`: The health verdict (ok, warning, error)
//! - `Component`: Text-bearing display elements
//! - `RenderedSelector`: Displayable label selector entries
//! - `ObjectStatus`: The result of classifying a single object

pub mod component;
pub mod error;
pub mod status;

pub use component::{Component, NodeStatus, Property, RenderedSelector, SelectorOperator};
pub use error::{CoreError, Result};
pub use status::ObjectStatus;
