//! Configuration system for the `todolist` client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/todolist/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use todolist_proto::task::{Category, Priority};
use todolist_proto::wire;
use url::Url;

use crate::service::http::ApiConfig;
use crate::view::FilterKind;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The API base URL is not an absolute http(s) URL.
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The configured value.
        url: String,
        /// What is wrong with it.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiFileConfig,
    store: StoreFileConfig,
    view: ViewFileConfig,
}

/// `[api]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ApiFileConfig {
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
}

/// `[store]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StoreFileConfig {
    seed_demo_tasks: Option<bool>,
}

/// `[view]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ViewFileConfig {
    date_format: Option<String>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Task API base URL; `None` runs the offline demo.
    pub base_url: Option<String>,
    /// Whole-request timeout for API calls.
    pub request_timeout: Duration,
    /// Connect timeout for API calls.
    pub connect_timeout: Duration,
    /// Whether the offline demo starts with the seed tasks.
    pub seed_demo_tasks: bool,
    /// Due date display format (chrono format string).
    pub date_format: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout: ApiConfig::DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: ApiConfig::DEFAULT_CONNECT_TIMEOUT,
            seed_demo_tasks: true,
            date_format: "%d/%m/%Y".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// Otherwise the default path (`~/.config/todolist/config.toml`) is
    /// tried and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, &file))
    }

    /// Resolve configuration from CLI args and env vars alone.
    ///
    /// Used when the config file cannot be loaded, so the command-line layer
    /// still applies over the defaults.
    #[must_use]
    pub fn from_cli(cli: &CliArgs) -> Self {
        Self::resolve(cli, &ConfigFile::default())
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        let base_url = if cli.offline {
            None
        } else {
            cli.api_url
                .clone()
                .or_else(|| file.api.base_url.clone())
                .filter(|url| !url.trim().is_empty())
        };

        Self {
            base_url,
            request_timeout: file
                .api
                .request_timeout_secs
                .map_or(defaults.request_timeout, Duration::from_secs),
            connect_timeout: file
                .api
                .connect_timeout_secs
                .map_or(defaults.connect_timeout, Duration::from_secs),
            seed_demo_tasks: file
                .store
                .seed_demo_tasks
                .unwrap_or(defaults.seed_demo_tasks),
            date_format: cli
                .date_format
                .clone()
                .or_else(|| file.view.date_format.clone())
                .unwrap_or(defaults.date_format),
        }
    }

    /// Build an [`ApiConfig`] if a base URL is configured.
    ///
    /// Returns `Ok(None)` in offline demo mode.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL does not parse or
    /// is not http(s).
    pub fn to_api_config(&self) -> Result<Option<ApiConfig>, ConfigError> {
        let Some(raw) = self.base_url.as_deref() else {
            return Ok(None);
        };
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason,
        };
        let base_url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", base_url.scheme())));
        }
        Ok(Some(ApiConfig {
            base_url,
            request_timeout: self.request_timeout,
            connect_timeout: self.connect_timeout,
        }))
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Task list client")]
pub struct CliArgs {
    /// Base URL of the task API, e.g. `http://localhost:3000/api`.
    #[arg(long, env = "TODOLIST_API_URL")]
    pub api_url: Option<String>,

    /// Ignore any configured API and run the in-memory demo.
    #[arg(long)]
    pub offline: bool,

    /// Path to config file (default: `~/.config/todolist/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Due date display format (chrono format string).
    #[arg(long)]
    pub date_format: Option<String>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", env = "TODOLIST_LOG")]
    pub log_level: String,

    /// Path to log file (default: stderr).
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// What to do (default: list).
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands of the `todolist` binary.
#[derive(clap::Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the task list.
    List {
        /// Restrict to a bucket: all, undone, meeting or completed.
        #[arg(long)]
        filter: Option<FilterKind>,
        /// Case-insensitive text search.
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a task.
    Add {
        /// Task title.
        text: String,
        #[command(flatten)]
        fields: TaskFields,
        /// Mark the task as recurring.
        #[arg(long)]
        recurring: bool,
    },
    /// Toggle a task between done and undone.
    Toggle {
        /// Task id.
        id: String,
    },
    /// Delete a task.
    Delete {
        /// Task id.
        id: String,
    },
    /// Show one task as the service currently has it.
    Show {
        /// Task id.
        id: String,
    },
    /// Change fields of a task.
    Edit {
        /// Task id.
        id: String,
        /// New title.
        #[arg(long)]
        text: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
        /// Set or unset the recurring flag.
        #[arg(long)]
        recurring: Option<bool>,
        /// Remove the due date.
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
        /// Remove the due time.
        #[arg(long, conflicts_with = "time")]
        clear_time: bool,
    },
}

/// Task fields shared by `add` and `edit`.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    /// Priority: high, medium, low or none.
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Category: meeting, review, marketing, design or other.
    #[arg(long)]
    pub category: Option<Category>,
    /// Due date (YYYY-MM-DD).
    #[arg(long, value_parser = wire::parse_date)]
    pub due: Option<NaiveDate>,
    /// Due time (HH:MM).
    #[arg(long, value_parser = wire::parse_time)]
    pub time: Option<NaiveTime>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and a missing
/// file is treated as empty config.
fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    let path = config_dir.join("todolist").join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
