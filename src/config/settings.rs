use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::util::paths::config_path;

/// How to invoke the backend executable for a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl BackendCommand {
    /// Parse a whitespace-separated command line, e.g.
    /// `"python3 kiosk_backend_cli.py"`. Returns `None` for empty input.
    pub fn parse(spec: &str) -> Option<Self> {
        let mut parts = spec.split_whitespace();
        let program = PathBuf::from(parts.next()?);
        Some(Self {
            program,
            args: parts.map(str::to_string).collect(),
        })
    }
}

impl Default for BackendCommand {
    fn default() -> Self {
        // Prefer a resolved path so the spawn error names the real problem
        // when the backend is missing from PATH.
        let program = which::which("kiosk-backend").unwrap_or_else(|_| PathBuf::from("kiosk-backend"));
        Self {
            program,
            args: vec![],
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Backend invocation for the submission gateway
    pub backend: BackendCommand,
}

#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    backend: Option<TomlBackendConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlBackendConfig {
    program: Option<PathBuf>,
    args: Option<Vec<String>>,
}

impl Config {
    /// Load from the config file under the data dir, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load from a specific path. Parse failures keep the defaults and warn;
    /// a kiosk that cannot read its config should still boot.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Config::default();

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(_) => return config,
        };

        match toml::from_str::<TomlConfig>(&raw) {
            Ok(parsed) => {
                if let Some(backend) = parsed.backend {
                    if let Some(program) = backend.program {
                        config.backend.program = program;
                    }
                    if let Some(args) = backend.args {
                        config.backend.args = args;
                    }
                }
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Failed to parse config file, using defaults"
                );
            }
        }

        config
    }

    /// Apply the `KIOSK_BACKEND` environment override, mirroring the CLI
    /// flag for deployments that configure the kiosk via its unit file.
    pub fn apply_env(&mut self) {
        if let Ok(spec) = std::env::var("KIOSK_BACKEND") {
            if let Some(command) = BackendCommand::parse(&spec) {
                self.backend = command;
            }
        }
    }
}
