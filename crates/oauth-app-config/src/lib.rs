use hocon::HoconLoader;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use oauth_app_core::EventType;

pub const DEFAULT_PATH_PREFIX: &str = "/api/github/oauth";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

const NESTED_ENV_PREFIX: &str = "OAUTH_APP__";
const FILTER_MODES: [&str; 3] = ["allow_all", "include", "exclude"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub middleware: MiddlewareConfig,
    #[serde(default)]
    pub events: EventConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MiddlewareConfig {
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_filter_mode")]
    pub filter_mode: String,
    #[serde(default)]
    pub event_types: Vec<String>,
}

fn default_path_prefix() -> String {
    DEFAULT_PATH_PREFIX.to_string()
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

fn default_true() -> bool {
    true
}

fn default_filter_mode() -> String {
    "allow_all".to_string()
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            path_prefix: default_path_prefix(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filter_mode: default_filter_mode(),
            event_types: Vec::new(),
        }
    }
}

impl Config {
    /// Load from `application.conf`, then nested `OAUTH_APP__*` variables, then
    /// the flat `OAUTH_APP_*` variables.
    pub fn load() -> Self {
        let vars = process_env();
        Self::load_from(Path::new("application.conf"), &vars)
    }

    fn load_from(path: &Path, vars: &HashMap<String, String>) -> Self {
        match Self::from_hocon_path(path) {
            Ok(config) => return config,
            Err(e) => tracing::warn!(
                "Failed to load HOCON config: {}. Falling back to environment variables.",
                e
            ),
        }

        if vars.keys().any(|k| k.starts_with(NESTED_ENV_PREFIX)) {
            match Self::from_env_vars(vars) {
                Ok(config) => return config,
                Err(e) => tracing::warn!(
                    "Failed to read {}* variables: {}. Falling back to flat variables.",
                    NESTED_ENV_PREFIX,
                    e
                ),
            }
        }

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Load configuration from `application.conf` in the working directory.
    pub fn from_hocon() -> Result<Self, String> {
        Self::from_hocon_path("application.conf")
    }

    /// Load configuration from a specific HOCON file path.
    ///
    /// Missing keys take their defaults. `OAUTH_APP_EVENTS_TYPES` (comma-separated)
    /// overrides `events.event_types`, since HOCON can't substitute arrays from env.
    pub fn from_hocon_path<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(format!("Configuration file not found: {}", path.display()));
        }

        let mut config: Config = HoconLoader::new()
            .load_file(path)
            .map_err(|e| format!("Failed to load HOCON file: {}", e))?
            .resolve()
            .map_err(|e| format!("Failed to parse and resolve HOCON: {}", e))?;

        if let Ok(event_types_str) = std::env::var("OAUTH_APP_EVENTS_TYPES") {
            config.events.event_types = split_list(&event_types_str);
        }

        Ok(config)
    }

    /// Load from nested `OAUTH_APP__SECTION__KEY` environment variables via the `config` crate.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let vars = process_env();
        Self::from_env_vars(&vars)
    }

    fn from_env_vars(vars: &HashMap<String, String>) -> Result<Self, config::ConfigError> {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let config = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("OAUTH_APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("events.event_types")
                    .source(Some(source)),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Flat environment variables (`OAUTH_APP_PATH_PREFIX`, ...).
    fn from_env_fallback() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            middleware: MiddlewareConfig {
                path_prefix: lookup("OAUTH_APP_PATH_PREFIX").unwrap_or_else(default_path_prefix),
                max_body_bytes: lookup("OAUTH_APP_MAX_BODY_BYTES")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_MAX_BODY_BYTES),
            },
            events: EventConfig {
                enabled: lookup("OAUTH_APP_EVENTS_ENABLED")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(true),
                filter_mode: lookup("OAUTH_APP_EVENTS_FILTER_MODE")
                    .unwrap_or_else(default_filter_mode),
                event_types: lookup("OAUTH_APP_EVENTS_TYPES")
                    .map(|v| split_list(&v))
                    .unwrap_or_default(),
            },
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let prefix = &self.middleware.path_prefix;
        if !prefix.is_empty() && !prefix.starts_with('/') {
            return Err(format!(
                "middleware.path_prefix must start with '/' (got {prefix:?})"
            ));
        }

        if self.middleware.max_body_bytes == 0 {
            return Err("middleware.max_body_bytes must be greater than zero".to_string());
        }

        if !FILTER_MODES.contains(&self.events.filter_mode.as_str()) {
            return Err(format!(
                "events.filter_mode must be one of {:?} (got {:?})",
                FILTER_MODES, self.events.filter_mode
            ));
        }

        for event_type in &self.events.event_types {
            event_type
                .parse::<EventType>()
                .map_err(|e| format!("events.event_types: {e}"))?;
        }

        Ok(())
    }
}

/// Environment variables with UTF-8 names and values; others are skipped.
fn process_env() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
