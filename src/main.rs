//! Peeper Exporter CLI
//!
//! Runs either the simulated client exporter or the host uptime exporter.

use clap::{Parser, Subcommand};
use peeper_exporter::{
    config::ExporterConfig,
    http::{shutdown_signal, MetricsServer, MetricsServerConfig, ServerError},
};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "peeper-exporter", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the simulated client counter and random gauge.
    Client {
        /// Listen port (default 9191).
        #[arg(long)]
        port: Option<u16>,
    },
    /// Serve host uptime read from a mounted /proc/uptime.
    Server {
        /// Listen port (default 9393).
        #[arg(long)]
        port: Option<u16>,
        /// Uptime source file (default /host/proc/uptime).
        #[arg(long)]
        uptime_path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match ExporterConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ExporterConfig::default(),
    };

    info!("Peeper Exporter v{}", peeper_exporter::VERSION);

    let server = match cli.command {
        Command::Client { port } => {
            if let Some(port) = port {
                config.client.port = port;
            }
            validate_or_exit(&config);
            info!(
                host = %config.client.host_label,
                app = %config.client.app_label,
                "Starting client exporter"
            );
            MetricsServer::new(
                MetricsServerConfig::with_port(config.client.port),
                config.client.collector(),
            )
        }
        Command::Server { port, uptime_path } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(path) = uptime_path {
                config.server.uptime_path = path;
            }
            validate_or_exit(&config);
            info!(
                uptime_path = %config.server.uptime_path.display(),
                "Starting uptime exporter"
            );
            MetricsServer::new(
                MetricsServerConfig::with_port(config.server.port),
                config.server.collector(),
            )
        }
    };

    let shutdown = match shutdown_signal() {
        Ok(shutdown) => shutdown,
        Err(e) => {
            eprintln!("Failed to install signal handlers: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run_until(shutdown).await {
        match e {
            ServerError::Bind(_) => eprintln!("Failed to start metrics server: {}", e),
            ServerError::Server(_) => eprintln!("Metrics server failed: {}", e),
        }
        std::process::exit(1);
    }
}

fn validate_or_exit(config: &ExporterConfig) {
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }
}
