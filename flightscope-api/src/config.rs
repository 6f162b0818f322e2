//! Application Configuration Module
//!
//! Configuration is read once from environment variables at startup and is
//! immutable afterwards. Everything is built on [`AppConfig::from_lookup`] so
//! tests can supply variables without touching the process environment.

use flightscope_core::ConfigError;
use flightscope_llm::{AnsweringConfig, ProviderKind};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Default flight API root.
pub const DEFAULT_FLIGHT_API_BASE_URL: &str = "https://api.flightapi.io";

/// Default LLM API root when the key comes from `LLM_API_KEY` or `OPENAI_API_KEY`.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";

/// Default LLM API root when the key comes from `PERPLEXITY_API_KEY`.
pub const PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

/// Dotenv file read at startup, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Key value that explicitly selects offline answers.
const OFFLINE_KEY_SENTINEL: &str = "mock_openai_key";

// ============================================================================
// SECTIONS
// ============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Human-readable debug logging.
    pub debug: bool,
    /// Allowed CORS origins. Empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            debug: false,
            cors_origins: Vec::new(),
        }
    }
}

/// Flight schedule API settings.
#[derive(Clone, PartialEq, Eq)]
pub struct FlightApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl FlightApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_FLIGHT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl fmt::Debug for FlightApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlightApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Chat completion API settings.
#[derive(Clone, PartialEq)]
pub struct LlmConfig {
    /// `None` selects offline answers.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Overrides the provider's default model.
    pub model: Option<String>,
    pub max_tokens: i32,
    pub temperature: f32,
    pub timeout: Option<Duration>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: None,
            max_tokens: 1000,
            temperature: 0.1,
            timeout: None,
        }
    }
}

impl LlmConfig {
    pub fn provider_kind(&self) -> ProviderKind {
        ProviderKind::from_base_url(&self.base_url)
    }

    /// Generation parameters for the answering service.
    pub fn answering_config(&self) -> AnsweringConfig {
        AnsweringConfig {
            model: self
                .model
                .clone()
                .unwrap_or_else(|| self.provider_kind().default_model().to_string()),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// APPLICATION CONFIGURATION
// ============================================================================

/// Complete process configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub flight_api: FlightApiConfig,
    pub llm: LlmConfig,
    /// How long a fetched schedule is served from cache.
    pub cache_ttl: Duration,
    /// Substitute generated flights when the live schedule is empty.
    pub demo_fallback: bool,
}

impl AppConfig {
    /// Configuration with defaults everywhere except the flight API key.
    pub fn new(flight_api_key: impl Into<String>) -> Self {
        Self {
            server: ServerConfig::default(),
            flight_api: FlightApiConfig::new(flight_api_key),
            llm: LlmConfig::default(),
            cache_ttl: Duration::from_secs(15 * 60),
            demo_fallback: false,
        }
    }

    /// Create AppConfig from environment variables.
    ///
    /// Environment variables:
    /// - `FLIGHT_API_KEY`: Flight API key (required)
    /// - `FLIGHT_API_BASE_URL`: Flight API root (default: https://api.flightapi.io)
    /// - `LLM_API_KEY` / `PERPLEXITY_API_KEY` / `OPENAI_API_KEY`: Chat API key, first set wins
    /// - `LLM_BASE_URL`: Chat API root (default depends on which key variable was used)
    /// - `LLM_MODEL`, `LLM_MAX_TOKENS`, `LLM_TEMPERATURE`, `LLM_TIMEOUT_SECS`
    /// - `HOST` / `PORT` / `DEBUG`: Server binding and log style (default: 0.0.0.0 / 8000 / false)
    /// - `CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `CACHE_TTL_SECS`: Schedule cache TTL (default: 900)
    /// - `DEMO_FALLBACK`: "true" or "false" (default: false)
    ///
    /// Variables missing from the process environment are read from `.env`
    /// when that file exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_file(DEFAULT_ENV_FILE)
    }

    /// Like [`AppConfig::from_env`] with an explicit dotenv path.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_sources(|name| std::env::var(name).ok(), path)
    }

    /// Layer `lookup` over the variables in the dotenv file at `path`.
    ///
    /// `lookup` wins; a missing file contributes nothing.
    pub fn from_sources<F>(lookup: F, path: impl AsRef<Path>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_vars = read_env_file(path.as_ref())?;
        Self::from_lookup(|name| lookup(name).or_else(|| file_vars.get(name).cloned()))
    }

    /// Create AppConfig from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let flight_api_key = get("FLIGHT_API_KEY").ok_or_else(|| ConfigError::MissingRequired {
            field: "FLIGHT_API_KEY".to_string(),
        })?;
        let mut config = Self::new(flight_api_key);

        if let Some(base_url) = get("FLIGHT_API_BASE_URL") {
            config.flight_api.base_url = base_url.trim_end_matches('/').to_string();
        }

        // LLM credentials
        let key_source = ["LLM_API_KEY", "PERPLEXITY_API_KEY", "OPENAI_API_KEY"]
            .into_iter()
            .find_map(|name| get(name).map(|value| (name, value)));
        let default_base_url = match key_source {
            Some(("PERPLEXITY_API_KEY", _)) => PERPLEXITY_BASE_URL,
            _ => DEFAULT_LLM_BASE_URL,
        };
        config.llm.api_key = key_source
            .map(|(_, value)| value)
            .filter(|value| value != OFFLINE_KEY_SENTINEL);
        config.llm.base_url = get("LLM_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| default_base_url.to_string());
        config.llm.model = get("LLM_MODEL");
        config.llm.max_tokens = parse_or(&get, "LLM_MAX_TOKENS", config.llm.max_tokens)?;
        config.llm.temperature = parse_or(&get, "LLM_TEMPERATURE", config.llm.temperature)?;
        config.llm.timeout = get("LLM_TIMEOUT_SECS")
            .map(|raw| parse_value::<u64>("LLM_TIMEOUT_SECS", &raw))
            .transpose()?
            .map(Duration::from_secs);

        if config.llm.max_tokens <= 0 {
            return Err(invalid("LLM_MAX_TOKENS", config.llm.max_tokens, "must be positive"));
        }
        if !(0.0..=2.0).contains(&config.llm.temperature) {
            return Err(invalid("LLM_TEMPERATURE", config.llm.temperature, "must be within 0.0..=2.0"));
        }

        // Server
        if let Some(host) = get("HOST") {
            config.server.host = host;
        }
        config.server.port = parse_or(&get, "PORT", config.server.port)?;
        config.server.debug = bool_or(&get, "DEBUG", config.server.debug)?;
        config.server.cors_origins = get("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        // Cache and fallback
        let ttl_secs: u64 = parse_or(&get, "CACHE_TTL_SECS", config.cache_ttl.as_secs())?;
        config.cache_ttl = Duration::from_secs(ttl_secs);
        config.demo_fallback = bool_or(&get, "DEMO_FALLBACK", config.demo_fallback)?;

        Ok(config)
    }

    /// True when answers come from a chat API rather than local templates.
    pub fn llm_enabled(&self) -> bool {
        self.llm.api_key.is_some()
    }
}

// ============================================================================
// PARSING HELPERS
// ============================================================================

fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(invalid(DEFAULT_ENV_FILE, path.display(), e.to_string())),
    };
    entries
        .map(|entry| entry.map_err(|e| invalid(DEFAULT_ENV_FILE, path.display(), e.to_string())))
        .collect()
}

fn invalid(field: &str, value: impl fmt::Display, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn parse_value<T>(field: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse::<T>().map_err(|e| invalid(field, raw, e.to_string()))
}

fn parse_or<T, G>(get: &G, field: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(field) {
        Some(raw) => parse_value(field, &raw),
        None => Ok(default),
    }
}

fn bool_or<G>(get: &G, field: &str, default: bool) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(field) {
        None => Ok(default),
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(invalid(field, &raw, "expected true or false")),
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================
