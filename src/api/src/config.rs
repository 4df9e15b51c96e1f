//! Configuration for the Calscape API.

use serde::{Deserialize, Serialize};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origin allowed by the CORS layer
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5002
}

fn default_cors_origin() -> String {
    "https://chat.openai.com".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Upstream site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    crate::scraper::BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("calscape-api/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of results returned when the caller gives no limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn default_limit() -> usize {
    20
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

/// Plugin manifest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Advertise `http` instead of `https` in the manifest
    #[serde(default)]
    pub dev: bool,
    #[serde(default = "default_logo_path")]
    pub logo_path: String,
}

fn default_logo_path() -> String {
    "logo.png".to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            dev: false,
            logo_path: default_logo_path(),
        }
    }
}

impl PluginConfig {
    /// Scheme used when templating public URLs.
    pub fn protocol(&self) -> &'static str {
        if self.dev {
            "http"
        } else {
            "https"
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub plugin: PluginConfig,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (CALSCAPE_SERVER__PORT, etc.)
            .add_source(
                config::Environment::with_prefix("CALSCAPE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // A bare DEV variable switches the manifest to plain http
        if std::env::var_os("DEV").is_some() {
            app_config.plugin.dev = true;
        }

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5002);
        assert_eq!(config.upstream.base_url, "https://calscape.org");
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.search.default_limit, 20);
        assert!(!config.plugin.dev);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"upstream": {"timeout_secs": 5}, "plugin": {"dev": true}}"#)
                .unwrap();
        assert_eq!(config.upstream.timeout_secs, 5);
        assert_eq!(config.upstream.base_url, "https://calscape.org");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.plugin.protocol(), "http");
    }

    #[test]
    fn test_protocol() {
        assert_eq!(PluginConfig::default().protocol(), "https");
    }
}
