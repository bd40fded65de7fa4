use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub sessions: SessionsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings of the text-generation service.
///
/// The API key itself is never part of the file: `api_key_env` names the
/// environment variable it is read from.
#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub api_base: String,
    pub model: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: i32,
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Очистка неактивных сессий черновиков
#[derive(Debug, Deserialize, Clone)]
pub struct SessionsConfig {
    #[serde(default = "default_max_idle_minutes")]
    pub max_idle_minutes: i64,
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            max_idle_minutes: default_max_idle_minutes(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

impl SessionsConfig {
    pub fn max_idle(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.max_idle_minutes)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

fn default_max_idle_minutes() -> i64 {
    120
}

fn default_cleanup_interval_secs() -> u64 {
    300
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> i32 {
    2048
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[llm]
api_base = "https://generativelanguage.googleapis.com/v1beta/openai"
model = "gemini-3-flash-preview"
api_key_env = "API_KEY"
timeout_secs = 60

[sessions]
max_idle_minutes = 120
cleanup_interval_secs = 300
"#;

/// API key wrapper that never prints its contents.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    if config.llm.timeout_secs == 0 {
        anyhow::bail!("llm.timeout_secs must be greater than zero");
    }
    if config.sessions.max_idle_minutes <= 0 || config.sessions.cleanup_interval_secs == 0 {
        anyhow::bail!("sessions.max_idle_minutes and sessions.cleanup_interval_secs must be positive");
    }
    Ok(config)
}

/// Read the API key from the environment variable named in the config
pub fn resolve_api_key(llm: &LlmConfig) -> anyhow::Result<ApiKey> {
    api_key_from(&llm.api_key_env, std::env::var(&llm.api_key_env).ok())
}

fn api_key_from(var_name: &str, value: Option<String>) -> anyhow::Result<ApiKey> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(ApiKey(v.trim().to_string())),
        _ => Err(anyhow::anyhow!(
            "Environment variable {} with the LLM API key is not set",
            var_name
        )),
    }
}

/// Address the HTTP server binds to
pub fn bind_address(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    let addr = format!("{}:{}", server.host, server.port).parse::<SocketAddr>()?;
    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.llm.model, "gemini-3-flash-preview");
        assert_eq!(config.llm.api_key_env, "API_KEY");
        assert_eq!(config.llm.timeout(), Duration::from_secs(60));
        assert_eq!(config.llm.max_tokens, 2048);
        assert_eq!(config.sessions.max_idle(), chrono::Duration::minutes(120));
        assert_eq!(config.sessions.cleanup_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = parse_config(
            r#"
            [llm]
            api_base = "http://localhost:8080/v1"
            model = "local-model"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.timeout_secs, 60);
        assert_eq!(config.sessions.max_idle_minutes, 120);
        assert!((config.llm.temperature - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = parse_config(
            r#"
            [llm]
            api_base = "http://localhost:8080/v1"
            model = "local-model"
            timeout_secs = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_non_positive_session_limits_are_rejected() {
        let result = parse_config(
            r#"
            [llm]
            api_base = "http://localhost:8080/v1"
            model = "local-model"

            [sessions]
            max_idle_minutes = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_required_and_hidden() {
        assert!(api_key_from("API_KEY", None).is_err());
        assert!(api_key_from("API_KEY", Some("   ".into())).is_err());

        let key = api_key_from("API_KEY", Some("secret-value".into())).unwrap();
        assert_eq!(key.expose(), "secret-value");
        assert!(!format!("{:?}", key).contains("secret-value"));
    }

    #[test]
    fn test_bind_address() {
        let addr = bind_address(&ServerConfig::default()).unwrap();
        assert_eq!(addr.port(), 3000);
    }
}
