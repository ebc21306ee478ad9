use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

use keel_core::kernel::bootstrap::Application;
use keel_core::kernel::constants;

/// Keel: an application bootstrap engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Application base directory; root aliases resolve against it
    #[arg(long, default_value = ".")]
    base_path: PathBuf,

    /// Configuration file (.json, .toml, .yaml); defaults to app.json in
    /// the base directory
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging() {
    // Bridge the `log` facade keel-core speaks onto tracing.
    if LogTracer::init().is_err() {
        eprintln!("Warning: logging already initialized");
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: tracing subscriber already set");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args = CliArgs::parse();
    let base_path = args.base_path.to_string_lossy().into_owned();
    let config_path = args
        .config
        .unwrap_or_else(|| args.base_path.join(constants::DEFAULT_CONFIG_FILE));

    info!("Loading configuration from {}", config_path.display());
    let mut app = match Application::from_file(&base_path, &config_path).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Any failure in the validation pipeline is a fatal startup failure.
    if let Err(e) = app.bootstrap().await {
        error!("Bootstrap failed: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Application bootstrapped; components are available on demand");

    if let Err(e) = app.shutdown().await {
        error!("Shutdown failed: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
