//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.natter/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ResponderKind;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NatterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub chat_server: ChatServerConfig,
    #[serde(default)]
    pub local: LocalConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_responder: Option<ResponderKind>,
    pub greeting: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatServerConfig {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocalConfig {
    pub echo_delay_ms: Option<u64>,
    pub canned_delay_ms: Option<u64>,
    pub keyword_delay_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CHAT_SERVER_URL: &str = "http://127.0.0.1:3901/chat";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GREETING: &str = "Hello! I'm your assistant, let's start chatting!";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub responder: ResponderKind,
    /// Greeting shown shortly after start-up, None when disabled.
    pub greeting: Option<String>,
    pub api_base_url: String,
    pub chat_server_url: String,
    pub request_timeout: Duration,
    pub echo_delay: Duration,
    pub canned_delay: Duration,
    pub keyword_delay: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.natter/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".natter").join("config.toml"))
}

/// Load config from `~/.natter/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NatterConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NatterConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NatterConfig::default());
        }
    };
    load_config_from(&path)
}

/// Same as [`load_config`] for an explicit path.
pub fn load_config_from(path: &Path) -> Result<NatterConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(NatterConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: NatterConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Natter Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_responder = "keyword"   # api, api-verbose, chat-server, echo, canned, keyword
# greeting = true                 # Show a greeting shortly after start-up

# [api]
# base_url = "http://127.0.0.1:8000"   # Or set NATTER_API_BASE_URL; requests go to <base_url>/api/chat
# timeout_secs = 30

# [chat_server]
# url = "http://127.0.0.1:3901/chat"   # Or set NATTER_CHAT_SERVER_URL

# [local]
# echo_delay_ms = 500
# canned_delay_ms = 800
# keyword_delay_ms = 600
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_responder` is from the `--responder` flag, `cli_no_greeting` from
/// `--no-greeting`.
pub fn resolve(
    config: &NatterConfig,
    cli_responder: Option<ResponderKind>,
    cli_no_greeting: bool,
) -> ResolvedConfig {
    // Responder: CLI → env → config → default
    let responder = cli_responder
        .or_else(|| {
            std::env::var("NATTER_RESPONDER")
                .ok()
                .map(|name| ResponderKind::from_name(&name))
        })
        .or(config.general.default_responder)
        .unwrap_or_default();

    let greeting_enabled = !cli_no_greeting && config.general.greeting.unwrap_or(true);

    // API base URL: env → config → default
    let api_base_url = std::env::var("NATTER_API_BASE_URL")
        .ok()
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // Chat server URL: env → config → default
    let chat_server_url = std::env::var("NATTER_CHAT_SERVER_URL")
        .ok()
        .or_else(|| config.chat_server.url.clone())
        .unwrap_or_else(|| DEFAULT_CHAT_SERVER_URL.to_string());

    let local = &config.local;
    let delay = |ms: Option<u64>, default: Duration| ms.map(Duration::from_millis).unwrap_or(default);

    ResolvedConfig {
        responder,
        greeting: greeting_enabled.then(|| DEFAULT_GREETING.to_string()),
        api_base_url,
        chat_server_url,
        request_timeout: Duration::from_secs(
            config.api.timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        echo_delay: delay(local.echo_delay_ms, crate::reply::responders::DEFAULT_ECHO_DELAY),
        canned_delay: delay(local.canned_delay_ms, crate::reply::responders::DEFAULT_CANNED_DELAY),
        keyword_delay: delay(
            local.keyword_delay_ms,
            crate::reply::responders::DEFAULT_KEYWORD_DELAY,
        ),
    }
}
