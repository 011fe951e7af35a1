//! BridgeClient -- concrete [`PlanPublisher`] for the content bridge.
//!
//! Posts the [`BridgePayload`] as JSON to the configured bridge URL with the
//! shared secret in the `x-giblink-secret-key` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use marketplan_core::bridge::PlanPublisher;
use marketplan_types::config::BridgeSettings;
use marketplan_types::error::BridgeError;
use marketplan_types::plan::BridgePayload;

/// Header carrying the bridge shared secret.
pub const SECRET_HEADER: &str = "x-giblink-secret-key";

/// Content-bridge publisher.
///
/// A missing URL or secret is reported on the first publish, not at
/// construction.
pub struct BridgeClient {
    client: reqwest::Client,
    url: Option<String>,
    secret: Option<SecretString>,
    timeout: Duration,
}

impl BridgeClient {
    pub fn new(settings: &BridgeSettings, secret: Option<SecretString>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("marketplan/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            url: settings.url.clone().filter(|url| !url.trim().is_empty()),
            secret,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }
}

impl PlanPublisher for BridgeClient {
    #[tracing::instrument(name = "publish_plan", skip_all, fields(title = %payload.title))]
    async fn publish(&self, payload: &BridgePayload) -> Result<(), BridgeError> {
        let url = self.url.as_deref().ok_or(BridgeError::MissingUrl)?;
        let secret = self.secret.as_ref().ok_or(BridgeError::MissingSecret)?;

        let response = self
            .client
            .post(url)
            .header(SECRET_HEADER, secret.expose_secret())
            .timeout(self.timeout)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BridgeError::Timeout
                } else {
                    BridgeError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(BridgeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), "Bridge accepted plan");
        Ok(())
    }
}
