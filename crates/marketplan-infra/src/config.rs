//! Service configuration loader.
//!
//! Precedence, lowest first: built-in defaults, then the TOML config file,
//! then environment variables. CLI flags are applied on top by the binary.
//!
//! Problems never abort startup. They are returned as [`StartupError`]s so
//! the caller can log them and report readiness.

use std::path::{Path, PathBuf};

use marketplan_types::config::ServiceConfig;
use marketplan_types::error::StartupError;

use crate::secret::{Credentials, BRIDGE_SECRET_KEY, OPENAI_API_KEY};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "marketplan.toml";

/// Environment variable overriding the bridge URL.
pub const BRIDGE_URL_ENV: &str = "GIBLINK_BRIDGE_URL";

/// Environment variable overriding the generation base URL.
pub const GENERATION_BASE_URL_ENV: &str = "MARKETPLAN_GENERATION_BASE_URL";

/// Environment variable overriding the generation model.
pub const GENERATION_MODEL_ENV: &str = "MARKETPLAN_GENERATION_MODEL";

/// A loaded config plus whatever went wrong while loading it.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: ServiceConfig,
    pub problems: Vec<StartupError>,
}

/// Load the config file.
///
/// - `Some(path)`: the file must exist and parse; otherwise a problem is
///   recorded and defaults are used.
/// - `None`: `marketplan.toml` in the working directory is used if present,
///   defaults otherwise.
pub async fn load_service_config(path: Option<&Path>) -> LoadedConfig {
    let (config_path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            tracing::debug!("No {} found, using defaults", config_path.display());
            return LoadedConfig::default();
        }
        Err(err) => {
            return LoadedConfig {
                config: ServiceConfig::default(),
                problems: vec![StartupError::ConfigFile {
                    path: config_path.display().to_string(),
                    message: err.to_string(),
                }],
            };
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            LoadedConfig {
                config,
                problems: Vec::new(),
            }
        }
        Err(err) => LoadedConfig {
            config: ServiceConfig::default(),
            problems: vec![StartupError::ConfigFile {
                path: config_path.display().to_string(),
                message: err.to_string(),
            }],
        },
    }
}

/// Overlay environment variables onto `config`.
///
/// Takes a lookup function so callers (and tests) decide where values come
/// from; the binary passes `std::env::var`. Blank values are ignored.
pub fn apply_env_overrides(config: &mut ServiceConfig, lookup: impl Fn(&str) -> Option<String>) {
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = lookup(BRIDGE_URL_ENV) {
        config.bridge.url = Some(url);
    }
    if let Some(base_url) = lookup(GENERATION_BASE_URL_ENV) {
        config.generation.base_url = base_url;
    }
    if let Some(model) = lookup(GENERATION_MODEL_ENV) {
        config.generation.model = model;
    }
}

/// Check that everything the pipeline needs at request time is present and
/// usable.
pub fn validate(config: &ServiceConfig, credentials: &Credentials) -> Vec<StartupError> {
    let mut problems = Vec::new();

    if credentials.openai_api_key.is_none() {
        problems.push(StartupError::MissingSetting(OPENAI_API_KEY));
    }
    if let Err(message) = check_http_url(&config.generation.base_url) {
        problems.push(StartupError::InvalidSetting {
            name: GENERATION_BASE_URL_ENV,
            message,
        });
    }
    match config.bridge.url.as_deref().map(str::trim) {
        None | Some("") => problems.push(StartupError::MissingSetting(BRIDGE_URL_ENV)),
        Some(url) => {
            if let Err(message) = check_http_url(url) {
                problems.push(StartupError::InvalidSetting {
                    name: BRIDGE_URL_ENV,
                    message,
                });
            }
        }
    }
    if credentials.bridge_secret.is_none() {
        problems.push(StartupError::MissingSetting(BRIDGE_SECRET_KEY));
    }

    problems
}

/// An absolute `http` or `https` URL.
fn check_http_url(value: &str) -> Result<(), String> {
    let url = reqwest::Url::parse(value.trim()).map_err(|e| format!("'{value}': {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("'{value}': unsupported scheme '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_explicit_missing_file_records_problem() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.toml");

        let loaded = load_service_config(Some(&path)).await;

        assert_eq!(loaded.config, ServiceConfig::default());
        assert_eq!(loaded.problems.len(), 1);
        assert!(matches!(loaded.problems[0], StartupError::ConfigFile { .. }));
    }

    #[tokio::test]
    async fn load_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("marketplan.toml");
        tokio::fs::write(
            &path,
            r#"
[server]
port = 9090

[bridge]
url = "https://bridge.example.com/plans"
timeout_secs = 10
"#,
        )
        .await
        .unwrap();

        let loaded = load_service_config(Some(&path)).await;

        assert!(loaded.problems.is_empty());
        assert_eq!(loaded.config.server.port, 9090);
        assert_eq!(
            loaded.config.bridge.url.as_deref(),
            Some("https://bridge.example.com/plans")
        );
        assert_eq!(loaded.config.bridge.timeout_secs, 10);
    }

    #[tokio::test]
    async fn load_invalid_toml_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("marketplan.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let loaded = load_service_config(Some(&path)).await;

        assert_eq!(loaded.config, ServiceConfig::default());
        assert!(matches!(
            &loaded.problems[..],
            [StartupError::ConfigFile { .. }]
        ));
    }

    #[test]
    fn env_overrides_take_precedence() {
        let vars = HashMap::from([
            (BRIDGE_URL_ENV, "https://env.example.com/bridge"),
            (GENERATION_MODEL_ENV, "gpt-4o"),
            (GENERATION_BASE_URL_ENV, ""),
        ]);
        let mut config = ServiceConfig::default();

        apply_env_overrides(&mut config, |k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(
            config.bridge.url.as_deref(),
            Some("https://env.example.com/bridge")
        );
        assert_eq!(config.generation.model, "gpt-4o");
        // blank value ignored
        assert_eq!(config.generation.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn validate_reports_each_missing_setting() {
        let problems = validate(&ServiceConfig::default(), &Credentials::default());

        assert_eq!(
            problems,
            vec![
                StartupError::MissingSetting(OPENAI_API_KEY),
                StartupError::MissingSetting(BRIDGE_URL_ENV),
                StartupError::MissingSetting(BRIDGE_SECRET_KEY),
            ]
        );
    }

    #[test]
    fn validate_rejects_unparsable_urls() {
        let mut config = ServiceConfig::default();
        config.bridge.url = Some("not a url".to_string());
        config.generation.base_url = "ftp://models.example.com".to_string();
        let credentials = Credentials::from_lookup(|_| Some("value".to_string()));

        let problems = validate(&config, &credentials);

        assert_eq!(problems.len(), 2);
        assert!(matches!(
            &problems[0],
            StartupError::InvalidSetting { name, message }
                if *name == GENERATION_BASE_URL_ENV && message.contains("ftp")
        ));
        assert!(matches!(
            &problems[1],
            StartupError::InvalidSetting { name, .. } if *name == BRIDGE_URL_ENV
        ));
    }

    #[test]
    fn validate_complete_config_is_clean() {
        let mut config = ServiceConfig::default();
        config.bridge.url = Some("https://bridge.example.com".to_string());
        let credentials = Credentials::from_lookup(|_| Some("value".to_string()));

        assert!(validate(&config, &credentials).is_empty());
    }
}
