//! Service configuration types.
//!
//! `ServiceConfig` mirrors the optional `marketplan.toml` file. Every field
//! has a default so an empty (or absent) file yields a usable config. Secrets
//! are deliberately not part of this record; they are read from the
//! environment by the infra layer.

use serde::{Deserialize, Serialize};

use crate::error::StartupError;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub generation: GenerationSettings,

    #[serde(default)]
    pub bridge: BridgeSettings,
}

/// Where the HTTP listener binds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Chat-completion provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Base URL; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_generation_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_generation_timeout_secs(),
        }
    }
}

/// Content-bridge settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeSettings {
    /// Absent until configured; publishing fails until it is set.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_bridge_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_bridge_timeout_secs(),
        }
    }
}

/// Outcome of validating configuration at startup.
///
/// The service starts either way; `/ready` reports not-ready while any
/// problem is recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Readiness {
    problems: Vec<StartupError>,
}

impl Readiness {
    pub fn new(problems: Vec<StartupError>) -> Self {
        Self { problems }
    }

    pub fn is_ready(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problems(&self) -> &[StartupError] {
        &self.problems
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_generation_timeout_secs() -> u64 {
    120
}

fn default_bridge_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_config_default_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.generation.base_url, "https://api.openai.com/v1");
        assert_eq!(config.generation.model, "gpt-4-turbo-preview");
        assert!((config.generation.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.generation.timeout_secs, 120);
        assert!(config.bridge.url.is_none());
        assert_eq!(config.bridge.timeout_secs, 30);
    }

    #[test]
    fn test_readiness() {
        assert!(Readiness::default().is_ready());

        let readiness = Readiness::new(vec![StartupError::MissingSetting("OPENAI_API_KEY")]);
        assert!(!readiness.is_ready());
        assert_eq!(readiness.problems().len(), 1);
    }

    #[test]
    fn test_service_config_deserialize_empty() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn test_service_config_deserialize_partial() {
        let toml_str = r#"
[server]
port = 8080

[generation]
model = "gpt-4o"
timeout_secs = 60

[bridge]
url = "https://example.com/wp-json/giblink/v1/plan"
"#;
        let config: ServiceConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.generation.model, "gpt-4o");
        assert_eq!(config.generation.base_url, "https://api.openai.com/v1");
        assert_eq!(config.generation.timeout_secs, 60);
        assert_eq!(
            config.bridge.url.as_deref(),
            Some("https://example.com/wp-json/giblink/v1/plan")
        );
        assert_eq!(config.bridge.timeout_secs, 30);
    }
}
