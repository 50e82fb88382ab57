//! Catalog CRD Storage CLI
//!
//! Registers the service catalog resource types with a cluster and inspects
//! the objects stored in them.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use catalog_crd_storage::{
    CatalogClients, Error, Installer, KindClient, KindRegistry, KubeHost, PollConfig, Result,
    StorageConfig,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Service catalog storage on Kubernetes custom resources
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Namespace for cluster-scoped kinds and objects without one
    #[arg(long, env = "CATALOG_NAMESPACE", default_value = "default", global = true)]
    default_namespace: String,

    /// Seconds to wait for each resource type to become ready
    #[arg(long, env = "POLL_TIMEOUT_SECS", default_value = "60", global = true)]
    poll_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register the catalog resource types
    Install,

    /// Print the stored objects of one kind
    List {
        #[arg(value_enum)]
        kind: ListKind,

        /// Namespace to list (instances only)
        #[arg(long, short = 'n', default_value = "")]
        namespace: String,

        #[arg(long, short = 'o', value_enum, default_value_t = Output::Json)]
        output: Output,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ListKind {
    Broker,
    Instance,
    ServiceClass,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Output {
    Json,
    Yaml,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting catalog CRD storage");
    info!("  Version: {}", catalog_crd_storage::VERSION);
    info!("  Default namespace: {}", args.default_namespace);

    let config = StorageConfig {
        default_namespace: args.default_namespace.clone(),
        poll: PollConfig {
            timeout: Duration::from_secs(args.poll_timeout_secs),
            ..Default::default()
        },
    };
    let registry = Arc::new(KindRegistry::service_catalog());
    let host = Arc::new(KubeHost::try_default().await?);

    match args.command {
        Command::Install => {
            let installer =
                Installer::with_poll_config(host.clone(), registry.clone(), config.poll.clone());
            installer.install_types().await?;
            info!("All resource types installed");
        }
        Command::List {
            kind,
            namespace,
            output,
        } => {
            let clients = CatalogClients::new(host.clone(), registry.clone(), &config)?;
            let rendered = match kind {
                ListKind::Broker => render(&clients.brokers.list(&namespace).await?, output)?,
                ListKind::Instance => render(&clients.instances.list(&namespace).await?, output)?,
                ListKind::ServiceClass => {
                    render(&clients.service_classes.list(&namespace).await?, output)?
                }
            };
            println!("{}", rendered);
        }
    }

    Ok(())
}

fn render<T: Serialize>(items: &[T], output: Output) -> Result<String> {
    match output {
        Output::Json => serde_json::to_string_pretty(items)
            .map_err(|e| Error::Internal(format!("Failed to render JSON: {}", e))),
        Output::Yaml => serde_yaml::to_string(items)
            .map_err(|e| Error::Internal(format!("Failed to render YAML: {}", e))),
    }
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = ["hyper=warn", "kube=info", "tower=warn"]
        .iter()
        .filter_map(|directive| directive.parse().ok())
        .fold(
            EnvFilter::from_default_env().add_directive(level.into()),
            EnvFilter::add_directive,
        );

    // logs go to stderr so list output stays machine readable
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
