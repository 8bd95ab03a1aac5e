//! Label selector rendering
//!
//! Turns a workload's label selector into an ordered list of displayable
//! entries: expressions first in declaration order, then exact label matches
//! ordered by key. Rendering never fails. An operator that cannot be resolved
//! is kept as an unspecified entry and reported as a warning.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kstatus_core::{Component, RenderedSelector, SelectorOperator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single match expression as declared on the object
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectorExpression {
    pub key: String,
    pub operator: String,
    #[serde(default)]
    pub values: Vec<String>,
}

impl SelectorExpression {
    pub fn new(key: impl Into<String>, operator: impl Into<String>, values: &[&str]) -> Self {
        Self {
            key: key.into(),
            operator: operator.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Scheduling-match criteria of a workload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SelectorSpec {
    /// Match expressions, in declaration order
    #[serde(default)]
    pub expressions: Vec<SelectorExpression>,

    /// Exact label matches, ordered by key
    #[serde(default)]
    pub match_labels: BTreeMap<String, String>,
}

impl SelectorSpec {
    /// Whether the selector declares no criteria at all
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty() && self.match_labels.is_empty()
    }
}

impl From<&LabelSelector> for SelectorSpec {
    fn from(selector: &LabelSelector) -> Self {
        let expressions = selector
            .match_expressions
            .iter()
            .flatten()
            .map(|req| SelectorExpression {
                key: req.key.clone(),
                operator: req.operator.clone(),
                values: req.values.clone().unwrap_or_default(),
            })
            .collect();

        Self {
            expressions,
            match_labels: selector.match_labels.clone().unwrap_or_default(),
        }
    }
}

/// Rendered selector entries plus any operators that could not be resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSelectors {
    pub selectors: Vec<RenderedSelector>,
    pub warnings: Vec<String>,
}

impl RenderedSelectors {
    /// Split into a display component and the warnings
    pub fn into_parts(self) -> (Component, Vec<String>) {
        (Component::selectors(self.selectors), self.warnings)
    }
}

/// Render a selector into displayable entries
pub fn render(selector: Option<&SelectorSpec>) -> RenderedSelectors {
    let Some(selector) = selector else {
        return none();
    };

    let mut selectors = Vec::with_capacity(selector.expressions.len() + selector.match_labels.len());
    let mut warnings = Vec::new();

    for expr in &selector.expressions {
        let operator = match expr.operator.parse::<SelectorOperator>() {
            Ok(op) => Some(op),
            Err(_) => {
                warnings.push(format!(
                    "unknown selector operator \"{}\" for key \"{}\"",
                    expr.operator, expr.key
                ));
                None
            }
        };
        selectors.push(RenderedSelector::expression(
            expr.key.clone(),
            operator,
            expr.values.clone(),
        ));
    }

    for (key, value) in &selector.match_labels {
        selectors.push(RenderedSelector::label(key.clone(), value.clone()));
    }

    if selectors.is_empty() {
        return none();
    }

    RenderedSelectors {
        selectors,
        warnings,
    }
}

fn none() -> RenderedSelectors {
    RenderedSelectors {
        selectors: vec![RenderedSelector::None],
        warnings: Vec::new(),
    }
}
