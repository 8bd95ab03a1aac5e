//! Kinds command - list object kinds with a dedicated classifier

use console::style;
use kstatus_kube::StatusRegistry;

use crate::config::OutputFormat;
use crate::error::Result;

/// Run the kinds command
pub fn run(output: OutputFormat) -> Result<()> {
    let registry = StatusRegistry::builtin();
    let keys: Vec<String> = registry.keys().iter().map(|k| k.to_string()).collect();

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&keys)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&keys)?),
        OutputFormat::Table => {
            println!("{}", style("CLASSIFIED KINDS").bold().underlined());
            for key in &keys {
                println!("  {}", key);
            }
            println!(
                "\n{}",
                style("Other kinds are reported as OK without inspection").dim()
            );
        }
    }

    Ok(())
}
