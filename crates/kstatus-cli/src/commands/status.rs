//! Status command - classify every object in one or more manifests

use console::style;
use kstatus_kube::{
    CancellationToken, DynamicObject, MemoryStore, PathLinks, StatusRegistry, parse_manifest,
};
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;
use crate::display::{self, StatusReport};
use crate::error::{CliError, Result};

/// Options for the status command, after config and flags are merged
#[derive(Debug, Clone)]
pub struct StatusOptions {
    pub output: OutputFormat,
    pub show_properties: bool,
    pub link_prefix: String,
    pub strict: bool,
}

/// Run the status command
pub async fn run(files: &[PathBuf], options: &StatusOptions) -> Result<()> {
    let mut objects = Vec::new();
    let mut sources = Vec::new();

    for file in files {
        let loaded = load_file(file)?;
        tracing::debug!(file = %file.display(), objects = loaded.len(), "loaded manifest");
        sources.extend(std::iter::repeat_n(file.display().to_string(), loaded.len()));
        objects.extend(loaded);
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let registry = StatusRegistry::builtin();
    let store = MemoryStore::new(objects);
    let links = PathLinks::new(options.link_prefix.clone());

    let results = registry
        .status_all(&cancel, store.objects(), &store, &links)
        .await;

    let reports: Vec<StatusReport> = store
        .objects()
        .iter()
        .zip(sources)
        .zip(results)
        .map(|((object, source), result)| report(object, source, result))
        .collect();

    match options.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&reports)?),
        OutputFormat::Table => {
            if reports.is_empty() {
                println!("{}", style("No objects found").dim());
            } else {
                print!("{}", display::render_table(&reports, options.show_properties));
                println!("\n{}", style(display::summary_line(&reports)).bold());
            }
        }
    }

    let unhealthy = reports.iter().filter(|r| r.is_unhealthy()).count();
    if options.strict && unhealthy > 0 {
        return Err(CliError::Unhealthy { count: unhealthy });
    }

    Ok(())
}

fn load_file(path: &Path) -> Result<Vec<DynamicObject>> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        message: format!("{}: {}", path.display(), e),
    })?;

    parse_manifest(&content)
        .map_err(|e| CliError::manifest(path.display().to_string(), e.to_string()))
}

fn report(
    object: &DynamicObject,
    source: String,
    result: kstatus_kube::Result<kstatus_core::ObjectStatus>,
) -> StatusReport {
    let (api_version, kind) = object
        .types
        .as_ref()
        .map(|t| (t.api_version.clone(), t.kind.clone()))
        .unwrap_or_default();

    let (result, error) = match result {
        Ok(status) => (Some(status), None),
        Err(e) => (None, Some(e.to_string())),
    };

    StatusReport {
        source,
        api_version,
        kind,
        namespace: object.metadata.namespace.clone(),
        name: object.metadata.name.clone().unwrap_or_default(),
        result,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "apiVersion: v1\nkind: Service\nmetadata:\n  name: web\n---\napiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: config"
        )
        .unwrap();

        let objects = load_file(file.path()).unwrap();
        assert_eq!(objects.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file(Path::new("/nonexistent/manifest.yaml")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "key: [unclosed").unwrap();

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Manifest { .. }));
    }

    #[test]
    fn test_report_from_error() {
        let object: DynamicObject = serde_json::from_value(serde_json::json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": { "name": "web", "namespace": "prod" }
        }))
        .unwrap();

        let report = report(
            &object,
            "a.yaml".to_string(),
            Err(kstatus_kube::StatusError::Cancelled),
        );
        assert_eq!(report.qualified_name(), "prod/web");
        assert_eq!(report.kind, "Deployment");
        assert_eq!(report.error.as_deref(), Some("status classification cancelled"));
        assert!(report.is_unhealthy());
    }
}
