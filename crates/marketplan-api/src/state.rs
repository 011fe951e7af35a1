//! Application state wiring the pipeline together.
//!
//! `PlanPipeline` is generic over its ports; AppState pins it to the reqwest
//! implementations from the infra crate.

use std::path::Path;
use std::sync::Arc;

use marketplan_core::pipeline::PlanPipeline;
use marketplan_infra::bridge::BridgeClient;
use marketplan_infra::config::{apply_env_overrides, load_service_config, validate};
use marketplan_infra::generation::ChatCompletionGenerator;
use marketplan_infra::secret::Credentials;
use marketplan_types::config::{Readiness, ServiceConfig};
use marketplan_types::error::StartupError;

/// Pipeline pinned to the concrete outbound clients.
pub type ConcretePlanPipeline = PlanPipeline<ChatCompletionGenerator, BridgeClient>;

/// Shared application state. Everything in it is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ConcretePlanPipeline>,
    pub config: Arc<ServiceConfig>,
    readiness: Arc<Readiness>,
}

impl AppState {
    /// Load configuration from file and environment, then wire the pipeline.
    ///
    /// Never fails: configuration problems are logged and reported through
    /// [`AppState::readiness`].
    pub async fn init(config_path: Option<&Path>) -> Self {
        let loaded = load_service_config(config_path).await;
        let mut config = loaded.config;
        apply_env_overrides(&mut config, |key| std::env::var(key).ok());

        Self::new(config, Credentials::from_env(), loaded.problems)
    }

    /// Wire the pipeline from an already-resolved config.
    ///
    /// `problems` holds anything found while loading; validation of
    /// `config` and `credentials` is appended to it.
    pub fn new(
        config: ServiceConfig,
        credentials: Credentials,
        mut problems: Vec<StartupError>,
    ) -> Self {
        problems.extend(validate(&config, &credentials));
        for problem in &problems {
            tracing::error!(error = %problem, "Startup configuration problem");
        }

        let generator =
            ChatCompletionGenerator::new(&config.generation, credentials.openai_api_key);
        let publisher = BridgeClient::new(&config.bridge, credentials.bridge_secret);

        tracing::debug!(
            model = generator.model(),
            ready = problems.is_empty(),
            "Plan pipeline wired"
        );

        Self {
            pipeline: Arc::new(PlanPipeline::new(generator, publisher)),
            config: Arc::new(config),
            readiness: Arc::new(Readiness::new(problems)),
        }
    }

    pub fn readiness(&self) -> &Readiness {
        &self.readiness
    }
}
