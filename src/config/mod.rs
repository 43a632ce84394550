//! Configuration module for Triage.
//!
//! Handles the TOML settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, AuthSettings, DatabaseSettings, ExportSettings, LoggingSettings,
    ServerSettings, Settings, SettingsError,
};
