use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use kiosk::{util, App, BackendCommand, Config, MockBackend, ProcessBackend, SubmitBackend};

#[derive(Debug, Parser)]
#[command(name = "kiosk", about = "Touchscreen check-in wizard for TUBRIC study visits")]
struct Cli {
    /// Config file path (defaults to <data-dir>/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend command line, e.g. "python3 kiosk_backend_cli.py"
    #[arg(long)]
    backend: Option<String>,

    /// Run against a scripted in-process backend (no child processes)
    #[arg(long)]
    mock_backend: bool,

    /// Override the data directory (default ~/.checkin-kiosk)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    util::paths::init_data_dir(cli.data_dir.clone());

    // Log to a file; the terminal belongs to the wizard.
    fs::create_dir_all(util::paths::logs_dir())?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::paths::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    config.apply_env();
    if let Some(spec) = &cli.backend {
        match BackendCommand::parse(spec) {
            Some(command) => config.backend = command,
            None => anyhow::bail!("--backend requires a non-empty command line"),
        }
    }

    let backend: Arc<dyn SubmitBackend> = if cli.mock_backend {
        tracing::info!("using mock backend");
        Arc::new(MockBackend::new())
    } else {
        tracing::info!(program = %config.backend.program.display(), "using process backend");
        Arc::new(ProcessBackend::new(config.backend.clone()))
    };

    let mut app = App::new(backend);
    app.run().await
}
