//! Display components produced by status classifiers
//!
//! Classifiers never render anything themselves. They describe their findings
//! with a small set of text-bearing components that a presentation layer can
//! lay out however it likes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// Health verdict of a classified object
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// Not classified yet. Never returned by a classifier.
    #[default]
    Unknown,
    Ok,
    Warning,
    Error,
}

impl NodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A displayable element
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "config", rename_all = "camelCase")]
pub enum Component {
    /// Plain text
    Text { value: String },

    /// Rendered label selector entries
    Selectors { selectors: Vec<RenderedSelector> },

    /// Text that refers to another object
    Link { text: String, reference: String },
}

impl Component {
    /// Create a text component
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Create a selectors component
    pub fn selectors(selectors: Vec<RenderedSelector>) -> Self {
        Self::Selectors { selectors }
    }

    /// Create a link component
    pub fn link(text: impl Into<String>, reference: impl Into<String>) -> Self {
        Self::Link {
            text: text.into(),
            reference: reference.into(),
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text { value } => write!(f, "{}", value),
            Self::Selectors { selectors } => {
                let parts: Vec<String> = selectors.iter().map(|s| s.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
            Self::Link { text, .. } => write!(f, "{}", text),
        }
    }
}

/// A labelled auxiliary fact about an object
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Property {
    pub label: String,
    pub value: Component,
}

impl Property {
    pub fn new(label: impl Into<String>, value: Component) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Label selector requirement operator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SelectorOperator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

impl SelectorOperator {
    /// The Kubernetes spelling of this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "In",
            Self::NotIn => "NotIn",
            Self::Exists => "Exists",
            Self::DoesNotExist => "DoesNotExist",
        }
    }
}

impl FromStr for SelectorOperator {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "In" => Ok(Self::In),
            "NotIn" => Ok(Self::NotIn),
            "Exists" => Ok(Self::Exists),
            "DoesNotExist" => Ok(Self::DoesNotExist),
            other => Err(CoreError::UnknownOperator {
                operator: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for SelectorOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single displayable selector entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderedSelector {
    /// Expression requirement. `operator` is `None` when the declared
    /// operator could not be resolved.
    Expression {
        key: String,
        operator: Option<SelectorOperator>,
        values: Vec<String>,
    },

    /// Exact key/value match
    Label { key: String, value: String },

    /// The object has no selector
    None,
}

impl RenderedSelector {
    pub fn expression(
        key: impl Into<String>,
        operator: Option<SelectorOperator>,
        values: Vec<String>,
    ) -> Self {
        Self::Expression {
            key: key.into(),
            operator,
            values,
        }
    }

    pub fn label(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Label {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl std::fmt::Display for RenderedSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expression {
                key,
                operator,
                values,
            } => match operator {
                Some(SelectorOperator::In) => write!(f, "{} in ({})", key, values.join(", ")),
                Some(SelectorOperator::NotIn) => {
                    write!(f, "{} notin ({})", key, values.join(", "))
                }
                Some(SelectorOperator::Exists) => write!(f, "{}", key),
                Some(SelectorOperator::DoesNotExist) => write!(f, "!{}", key),
                None => write!(f, "{} <unspecified> ({})", key, values.join(", ")),
            },
            Self::Label { key, value } => write!(f, "{}={}", key, value),
            Self::None => write!(f, "None"),
        }
    }
}
