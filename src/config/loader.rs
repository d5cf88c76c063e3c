//! Configuration file loading with precedence handling.

use crate::state::list_state::DEFAULT_PAGE_SIZE;
use crate::view_state::cache::DEFAULT_LAYOUT_CACHE_CAPACITY;
use crate::view_state::row::MaxLines;
use crate::view_state::scroll::DEFAULT_PREFETCH_SCREENS;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "REVIEWLIST_CONFIG";

/// Environment variable overriding the page size.
pub const PAGE_SIZE_ENV_VAR: &str = "REVIEWLIST_PAGE_SIZE";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting parsed but is out of range.
    #[error("Invalid value for `{key}`: {reason}")]
    InvalidValue {
        /// Setting name.
        key: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/reviewlist/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Reviews per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Body line limit for collapsed rows; 0 shows every row expanded.
    #[serde(default)]
    pub collapsed_lines: Option<u32>,

    /// Viewport heights below the viewport that trigger the next page.
    #[serde(default)]
    pub prefetch_screens: Option<f64>,

    /// Maximum number of memoised row layouts.
    #[serde(default)]
    pub layout_cache_capacity: Option<usize>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Review fixture used when no file is given on the command line.
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Directory avatar and photo identifiers are resolved against.
    #[serde(default)]
    pub image_dir: Option<PathBuf>,

    /// Simulated fetch latency in milliseconds.
    #[serde(default)]
    pub latency_ms: Option<u64>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Reviews per page.
    pub page_size: usize,
    /// Body line limit for collapsed rows.
    pub collapsed_lines: u32,
    /// Prefetch distance in viewport heights.
    pub prefetch_screens: f64,
    /// Layout memo table capacity.
    pub layout_cache_capacity: usize,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Review fixture.
    pub data_file: Option<PathBuf>,
    /// Image root directory.
    pub image_dir: Option<PathBuf>,
    /// Simulated fetch latency in milliseconds.
    pub latency_ms: u64,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            collapsed_lines: MaxLines::COLLAPSED.get(),
            prefetch_screens: DEFAULT_PREFETCH_SCREENS,
            layout_cache_capacity: DEFAULT_LAYOUT_CACHE_CAPACITY,
            log_file_path: default_log_path(),
            data_file: None,
            image_dir: None,
            latency_ms: 0,
        }
    }
}

impl ResolvedConfig {
    /// Reject settings the list cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero page size or a negative or non-finite
    /// prefetch distance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.prefetch_screens.is_finite() || self.prefetch_screens < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "prefetch_screens",
                reason: format!("must be a non-negative number, got {}", self.prefetch_screens),
            });
        }
        Ok(())
    }

    /// Line limit for new rows.
    pub fn max_lines(&self) -> MaxLines {
        MaxLines::new(self.collapsed_lines)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/reviewlist/reviewlist.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("reviewlist").join("reviewlist.log")
    } else {
        PathBuf::from("reviewlist.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/reviewlist/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("reviewlist").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `REVIEWLIST_CONFIG` environment variable
/// 3. Default path `~/.config/reviewlist/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `REVIEWLIST_PAGE_SIZE`: Override page size
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when the variable is set but is not a number.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(PAGE_SIZE_ENV_VAR) {
        config.page_size = raw
            .trim()
            .parse()
            .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                key: PAGE_SIZE_ENV_VAR,
                reason: format!("{raw:?}: {e}"),
            })?;
    }

    Ok(config)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        page_size: config.page_size.unwrap_or(defaults.page_size),
        collapsed_lines: config.collapsed_lines.unwrap_or(defaults.collapsed_lines),
        prefetch_screens: config.prefetch_screens.unwrap_or(defaults.prefetch_screens),
        layout_cache_capacity: config
            .layout_cache_capacity
            .unwrap_or(defaults.layout_cache_capacity),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        data_file: config.data_file.or(defaults.data_file),
        image_dir: config.image_dir.or(defaults.image_dir),
        latency_ms: config.latency_ms.unwrap_or(defaults.latency_ms),
    }
}

/// Command-line values that override every other source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--page-size`.
    pub page_size: Option<usize>,
    /// Positional fixture path.
    pub data_file: Option<PathBuf>,
    /// `--images`.
    pub image_dir: Option<PathBuf>,
    /// `--latency-ms`.
    pub latency_ms: Option<u64>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(page_size) = cli.page_size {
        config.page_size = page_size;
    }
    if let Some(data_file) = cli.data_file {
        config.data_file = Some(data_file);
    }
    if let Some(image_dir) = cli.image_dir {
        config.image_dir = Some(image_dir);
    }
    if let Some(latency_ms) = cli.latency_ms {
        config.latency_ms = latency_ms;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
