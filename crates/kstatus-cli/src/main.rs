//! kstatus CLI - Classify the health of Kubernetes objects from manifests

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod display;
mod error;
mod exit_codes;

use config::{CliConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "kstatus")]
#[command(author = "kstatus Contributors")]
#[command(version)]
#[command(about = "Classify the health of Kubernetes objects from manifests", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,

    /// Configuration file
    #[arg(long, global = true, env = "KSTATUS_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every object in the given manifests
    Status {
        /// Manifest files (YAML or JSON, multi-document)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Hide properties in table output
        #[arg(long)]
        no_properties: bool,

        /// Disable colors
        #[arg(long)]
        no_color: bool,

        /// Exit with an error when any object is unhealthy
        #[arg(long)]
        strict: bool,
    },

    /// List kinds with a dedicated classifier
    Kinds {
        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },
}

fn init_tracing(debug: bool) {
    let default = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .with_env_var("KSTATUS_LOG")
                .from_env_lossy(),
        )
        .init();
}

async fn run(cli: Cli) -> error::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Status {
            files,
            output,
            no_properties,
            no_color,
            strict,
        } => {
            // Never force colors on; console already disables them off a tty
            if !config.color || no_color {
                console::set_colors_enabled(false);
            }

            let options = commands::status::StatusOptions {
                output: output.unwrap_or(config.output),
                show_properties: config.show_properties && !no_properties,
                link_prefix: config.link_prefix.clone(),
                strict,
            };
            commands::status::run(&files, &options).await
        }

        Commands::Kinds { output } => commands::kinds::run(output.unwrap_or(config.output)),
    }
}

#[tokio::main]
async fn main() {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    if let Err(e) = run(cli).await {
        let code = e.exit_code();
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(code);
    }
}
