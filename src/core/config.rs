//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tutorat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::state::{DEFAULT_REPLY_DELAY, DEFAULT_UNLOCK_DELAY};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TutoratConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_route: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub reply_delay_ms: Option<u64>,
    pub unlock_delay_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_START_ROUTE: &str = "/";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_route: String,
    pub log_level: LevelFilter,
    pub reply_delay: Duration,
    pub unlock_delay: Duration,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            start_route: DEFAULT_START_ROUTE.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
            reply_delay: DEFAULT_REPLY_DELAY,
            unlock_delay: DEFAULT_UNLOCK_DELAY,
        }
    }
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

/// Returns the path to `~/.tutorat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tutorat").join("config.toml"))
}

/// Load config from `~/.tutorat/config.toml`, generating a default if absent.
pub fn load_config() -> Result<TutoratConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TutoratConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<TutoratConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TutoratConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TutoratConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Tutorat Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_route = "/"          # "/", "/shop", "/cours", "/messages", "/profil"
# log_level = "debug"        # "error", "warn", "info", "debug", "trace", "off"

# [chat]
# reply_delay_ms = 2000      # Simulated teacher reply (TUTORAT_REPLY_DELAY_MS)
# unlock_delay_ms = 1000     # Next exercise after validation (TUTORAT_UNLOCK_DELAY_MS)
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Environment overrides, read once so resolution stays testable.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub start_route: Option<String>,
    pub log_level: Option<String>,
    pub reply_delay_ms: Option<String>,
    pub unlock_delay_ms: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            start_route: std::env::var("TUTORAT_START_ROUTE").ok(),
            log_level: std::env::var("TUTORAT_LOG_LEVEL").ok(),
            reply_delay_ms: std::env::var("TUTORAT_REPLY_DELAY_MS").ok(),
            unlock_delay_ms: std::env::var("TUTORAT_UNLOCK_DELAY_MS").ok(),
        }
    }
}

/// CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub route: Option<String>,
    pub log_level: Option<String>,
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TutoratConfig, env: &EnvOverrides, cli: &CliOverrides) -> ResolvedConfig {
    let start_route = cli
        .route
        .clone()
        .or_else(|| env.start_route.clone())
        .or_else(|| config.general.start_route.clone())
        .unwrap_or_else(|| DEFAULT_START_ROUTE.to_string());

    let log_level = [
        cli.log_level.as_deref(),
        env.log_level.as_deref(),
        config.general.log_level.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find_map(parse_level)
    .unwrap_or(DEFAULT_LOG_LEVEL);

    let reply_delay = delay_ms(env.reply_delay_ms.as_deref(), config.chat.reply_delay_ms)
        .unwrap_or(DEFAULT_REPLY_DELAY);
    let unlock_delay = delay_ms(env.unlock_delay_ms.as_deref(), config.chat.unlock_delay_ms)
        .unwrap_or(DEFAULT_UNLOCK_DELAY);

    ResolvedConfig {
        start_route,
        log_level,
        reply_delay,
        unlock_delay,
    }
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    match raw.parse::<LevelFilter>() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Ignoring unknown log level '{}'", raw);
            None
        }
    }
}

/// Env value wins over config value. Unparseable env values fall through.
fn delay_ms(env: Option<&str>, config: Option<u64>) -> Option<Duration> {
    env.and_then(|raw| match raw.trim().parse::<u64>() {
        Ok(ms) => Some(ms),
        Err(_) => {
            warn!("Ignoring non-numeric delay '{}'", raw);
            None
        }
    })
    .or(config)
    .map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = TutoratConfig::default();
        assert!(config.general.start_route.is_none());
        assert!(config.chat.reply_delay_ms.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(
            &TutoratConfig::default(),
            &EnvOverrides::default(),
            &CliOverrides::default(),
        );
        assert_eq!(resolved.start_route, "/");
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.reply_delay, Duration::from_millis(2000));
        assert_eq!(resolved.unlock_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = TutoratConfig {
            general: GeneralConfig {
                start_route: Some("/cours".to_string()),
                log_level: Some("warn".to_string()),
            },
            chat: ChatConfig {
                reply_delay_ms: Some(500),
                unlock_delay_ms: Some(250),
            },
        };
        let resolved = resolve(&config, &EnvOverrides::default(), &CliOverrides::default());
        assert_eq!(resolved.start_route, "/cours");
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.reply_delay, Duration::from_millis(500));
        assert_eq!(resolved.unlock_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = TutoratConfig {
            general: GeneralConfig {
                start_route: Some("/shop".to_string()),
                ..Default::default()
            },
            chat: ChatConfig {
                reply_delay_ms: Some(500),
                ..Default::default()
            },
        };
        let env = EnvOverrides {
            start_route: Some("/messages".to_string()),
            reply_delay_ms: Some("50".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&config, &env, &CliOverrides::default());
        assert_eq!(resolved.start_route, "/messages");
        assert_eq!(resolved.reply_delay, Duration::from_millis(50));

        let cli = CliOverrides {
            route: Some("/profil".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve(&config, &env, &cli).start_route, "/profil");
    }

    #[test]
    fn test_bad_env_values_fall_through() {
        let config = TutoratConfig {
            general: GeneralConfig {
                log_level: Some("info".to_string()),
                ..Default::default()
            },
            chat: ChatConfig {
                reply_delay_ms: Some(300),
                ..Default::default()
            },
        };
        let env = EnvOverrides {
            log_level: Some("loud".to_string()),
            reply_delay_ms: Some("soon".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&config, &env, &CliOverrides::default());
        assert_eq!(resolved.log_level, LevelFilter::Info);
        assert_eq!(resolved.reply_delay, Duration::from_millis(300));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[chat]
reply_delay_ms = 100
"#;
        let config: TutoratConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.chat.reply_delay_ms, Some(100));
        assert!(config.chat.unlock_delay_ms.is_none());
        assert!(config.general.start_route.is_none());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("tutorat-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[chat\nreply_delay_ms = ").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
        let _ = fs::remove_dir_all(&dir);
    }
}
