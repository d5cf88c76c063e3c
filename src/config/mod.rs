//! Configuration module.
//!
//! Settings come from defaults, a TOML file, environment variables and the command line,
//! in increasing order of precedence.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    CliOverrides, ConfigError, ConfigFile, ResolvedConfig,
};
