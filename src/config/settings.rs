//! TOML-based configuration for Triage.
//!
//! Supports a config file (triage.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [database]
//! path = "${TRIAGE_DATA}/hospital.db"
//!
//! [export]
//! csv_bom = true
//! document_auto_print = true
//! page_size = 25
//! organization = "St. Example General"
//!
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [auth]
//! admin_tokens = ["${TRIAGE_ADMIN_TOKEN}"]
//! login_url = "/login"
//!
//! [logging]
//! filter = "triage=info"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::ExportOptions;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Unterminated variable reference in: {0}")]
    UnterminatedVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub export: ExportSettings,
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub logging: LoggingSettings,
}

/// Database location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file path (supports ${ENV_VAR} expansion).
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "triage.db".to_string(),
        }
    }
}

impl DatabaseSettings {
    /// Get the database path with environment variables expanded.
    pub fn resolved_path(&self) -> Result<PathBuf, SettingsError> {
        expand_env_vars(&self.path).map(PathBuf::from)
    }
}

/// Export rendering switches.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Prepend a UTF-8 BOM to CSV exports.
    pub csv_bom: bool,

    /// Open the print dialog when a printable document loads.
    pub document_auto_print: bool,

    /// Rows per page in fragment listings.
    pub page_size: u64,

    /// Heading shown on printable documents.
    pub organization: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        let options = ExportOptions::default();
        Self {
            csv_bom: options.csv_bom,
            document_auto_print: options.document_auto_print,
            page_size: 25,
            organization: options.organization,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Listen address, e.g. "127.0.0.1:8080".
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Admin session gate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Accepted admin tokens (each supports ${ENV_VAR} expansion).
    pub admin_tokens: Vec<String>,

    /// Where unauthenticated requests are redirected.
    pub login_url: String,

    /// Cookie carrying the session token.
    pub session_cookie: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            admin_tokens: Vec::new(),
            login_url: "/login".to_string(),
            session_cookie: "triage_session".to_string(),
        }
    }
}

impl AuthSettings {
    /// Admin tokens with environment variables expanded; blank entries are dropped.
    pub fn resolved_tokens(&self) -> Result<Vec<String>, SettingsError> {
        let mut tokens = Vec::with_capacity(self.admin_tokens.len());
        for raw in &self.admin_tokens {
            let token = expand_env_vars(raw)?;
            if !token.trim().is_empty() {
                tokens.push(token);
            }
        }
        Ok(tokens)
    }
}

/// Log filter used when neither TRIAGE_LOG nor RUST_LOG is set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "triage=info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `TRIAGE_CONFIG`
    /// 2. `./triage.toml`
    /// 3. `~/.config/triage/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("TRIAGE_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("triage.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("triage").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.export.page_size == 0 {
            return Err(SettingsError::InvalidConfig(
                "export.page_size must be at least 1".to_string(),
            ));
        }
        if self.auth.session_cookie.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "auth.session_cookie must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Rendering options handed to the report engine.
    pub fn to_export_options(&self) -> ExportOptions {
        ExportOptions {
            csv_bom: self.export.csv_bom,
            document_auto_print: self.export.document_auto_print,
            organization: self.export.organization.clone(),
        }
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            let mut var_name = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                var_name.push(ch);
            }
            if !closed {
                return Err(SettingsError::UnterminatedVar(s.to_string()));
            }
            let value =
                env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
            result.push_str(&value);
        } else {
            // $VAR (ends at non-alphanumeric/underscore)
            let mut var_name = String::new();
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                var_name.push(ch);
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
            } else {
                let value = env::var(&var_name)
                    .map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
                result.push_str(&value);
            }
        }
    }

    Ok(result)
}
