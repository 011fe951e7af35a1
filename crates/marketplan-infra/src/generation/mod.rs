//! ChatCompletionGenerator -- concrete [`PlanGenerator`] for OpenAI-compatible APIs.
//!
//! Sends one non-streaming request to `{base_url}/chat/completions` with a
//! bearer credential and returns the first choice's message content.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use marketplan_core::generation::PlanGenerator;
use marketplan_types::config::GenerationSettings;
use marketplan_types::error::UpstreamError;
use marketplan_types::plan::{GeneratedPlan, MarketingPlanPrompt};

use self::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Chat-completion generation client.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the `Authorization` header. A missing key is not an error
/// until the first call, which fails with [`UpstreamError::MissingCredential`].
pub struct ChatCompletionGenerator {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl ChatCompletionGenerator {
    pub fn new(settings: &GenerationSettings, api_key: Option<SecretString>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("marketplan/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    /// The model requested on every call.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

// ChatCompletionGenerator intentionally does NOT derive Debug so the
// credential cannot end up in a log line by accident.

impl PlanGenerator for ChatCompletionGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    #[tracing::instrument(name = "generate_plan", skip_all, fields(model = %self.model))]
    async fn generate(&self, prompt: &MarketingPlanPrompt) -> Result<GeneratedPlan, UpstreamError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(UpstreamError::MissingCredential)?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.as_str(),
            }],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(self.url())
            .bearer_auth(api_key.expose_secret())
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout
                } else {
                    UpstreamError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                UpstreamError::Timeout
            } else {
                UpstreamError::Transport(format!("failed to read response body: {e}"))
            }
        })?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| UpstreamError::MalformedResponse(format!("{e}: {text}")))?;

        let content = parsed.into_first_content().ok_or_else(|| {
            UpstreamError::MalformedResponse(format!("missing choices[0].message.content: {text}"))
        })?;

        tracing::debug!(plan_bytes = content.len(), "Generation provider responded");
        Ok(GeneratedPlan::new(content))
    }
}
