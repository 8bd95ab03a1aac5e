//! Display formatting for classification results

use console::{StyledObject, style};
use kstatus_core::{NodeStatus, ObjectStatus};
use serde::Serialize;

/// Classification outcome for one object in a manifest
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub source: String,
    pub api_version: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ObjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusReport {
    /// Display name: `namespace/name` or `name`
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}/{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    /// Whether this object counts as unhealthy
    pub fn is_unhealthy(&self) -> bool {
        match &self.result {
            Some(status) => status.status() == NodeStatus::Error,
            None => true,
        }
    }
}

fn status_icon(status: NodeStatus) -> StyledObject<&'static str> {
    match status {
        NodeStatus::Ok => style("✓").green(),
        NodeStatus::Warning => style("⚠").yellow(),
        NodeStatus::Error => style("✗").red(),
        NodeStatus::Unknown => style("?").dim(),
    }
}

fn status_word(status: NodeStatus) -> StyledObject<String> {
    let word = format!("{:<7}", status.as_str());
    match status {
        NodeStatus::Ok => style(word).green(),
        NodeStatus::Warning => style(word).yellow(),
        NodeStatus::Error => style(word).red().bold(),
        NodeStatus::Unknown => style(word).dim(),
    }
}

/// Render reports as a human-readable table
pub fn render_table(reports: &[StatusReport], show_properties: bool) -> String {
    let width = reports
        .iter()
        .map(|r| r.kind.len() + r.qualified_name().len() + 1)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for report in reports {
        let object = format!("{} {}", report.kind, report.qualified_name());

        match (&report.result, &report.error) {
            (Some(status), _) => {
                let verdict = status.status();
                out.push_str(&format!(
                    "{} {:<width$}  {}  {}\n",
                    status_icon(verdict),
                    object,
                    status_word(verdict),
                    status.summary(),
                    width = width
                ));

                if show_properties {
                    for property in &status.properties {
                        out.push_str(&format!(
                            "    {} {}\n",
                            style(format!("{}:", property.label)).dim(),
                            property.value
                        ));
                    }
                }

                for warning in &status.warnings {
                    out.push_str(&format!("    {} {}\n", style("warning:").yellow(), warning));
                }
            }
            (None, error) => {
                out.push_str(&format!(
                    "{} {:<width$}  {}  {}\n",
                    style("✗").red(),
                    object,
                    style(format!("{:<7}", "failed")).red().bold(),
                    error.as_deref().unwrap_or("classification failed"),
                    width = width
                ));
            }
        }
    }
    out
}

/// Counts per verdict, plus failed classifications
pub fn summary_line(reports: &[StatusReport]) -> String {
    let count = |v: NodeStatus| {
        reports
            .iter()
            .filter(|r| r.result.as_ref().map(|s| s.status()) == Some(v))
            .count()
    };
    let failed = reports.iter().filter(|r| r.result.is_none()).count();

    let mut line = format!(
        "{} objects: {} ok, {} warning, {} error",
        reports.len(),
        count(NodeStatus::Ok),
        count(NodeStatus::Warning),
        count(NodeStatus::Error)
    );
    if failed > 0 {
        line.push_str(&format!(", {} failed", failed));
    }
    line
}
