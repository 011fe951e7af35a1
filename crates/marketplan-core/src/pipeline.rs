//! The per-request plan pipeline.
//!
//! `PlanPipeline` sequences render -> generate -> publish for one form
//! submission. Each step hard-depends on the previous one; the first failure
//! stops the pipeline and nothing already done is rolled back.

use std::fmt;

use marketplan_types::error::{BridgeError, UpstreamError};
use marketplan_types::form::FormSubmission;
use marketplan_types::plan::{BridgePayload, GeneratedPlan};

use crate::bridge::PlanPublisher;
use crate::generation::PlanGenerator;
use crate::prompt;

/// Stages a request moves through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Rendered,
    Generated,
    Published,
    Responded,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Received => write!(f, "received"),
            PipelineStage::Rendered => write!(f, "rendered"),
            PipelineStage::Generated => write!(f, "generated"),
            PipelineStage::Published => write!(f, "published"),
            PipelineStage::Responded => write!(f, "responded"),
        }
    }
}

/// Why a pipeline run stopped early.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("plan generation failed: {0}")]
    Generation(#[from] UpstreamError),

    /// The plan was generated but could not be published. The plan is carried
    /// here so the caller can log it; it is not retried.
    #[error("publishing '{title}' failed: {source}")]
    Publish {
        title: String,
        plan: GeneratedPlan,
        source: BridgeError,
    },
}

impl PipelineError {
    /// The last stage that completed before the failure.
    pub fn stage(&self) -> PipelineStage {
        match self {
            PipelineError::Generation(_) => PipelineStage::Rendered,
            PipelineError::Publish { .. } => PipelineStage::Generated,
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub title: String,
    pub plan_bytes: usize,
}

/// Render, generate and publish one marketing plan.
///
/// Generic over the generation and publishing ports so tests can swap in
/// stubs; the API layer pins it to the reqwest-backed infra clients.
pub struct PlanPipeline<G, P> {
    generator: G,
    publisher: P,
}

impl<G, P> PlanPipeline<G, P>
where
    G: PlanGenerator,
    P: PlanPublisher,
{
    pub fn new(generator: G, publisher: P) -> Self {
        Self {
            generator,
            publisher,
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Run the full pipeline for one submission.
    #[tracing::instrument(name = "plan_pipeline", skip_all, fields(generator = %self.generator.name()))]
    pub async fn run(&self, form: &FormSubmission) -> Result<PipelineOutcome, PipelineError> {
        tracing::info!(stage = %PipelineStage::Received, fields = form.len(), "Form received");

        let prompt = prompt::render(form);
        tracing::info!(
            stage = %PipelineStage::Rendered,
            prompt_bytes = prompt.as_str().len(),
            "Prompt rendered, calling generation provider"
        );

        let plan = self.generator.generate(&prompt).await?;
        tracing::info!(
            stage = %PipelineStage::Generated,
            plan_bytes = plan.len(),
            "Plan generated, posting to bridge"
        );

        let payload = BridgePayload::for_plan(form, plan);
        if let Err(source) = self.publisher.publish(&payload).await {
            return Err(PipelineError::Publish {
                title: payload.title,
                plan: payload.content,
                source,
            });
        }
        tracing::info!(stage = %PipelineStage::Published, title = %payload.title, "Plan posted to bridge");

        Ok(PipelineOutcome {
            plan_bytes: payload.content.len(),
            title: payload.title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketplan_types::form::fields;
    use marketplan_types::plan::MarketingPlanPrompt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    // --- Mock ports ---

    struct MockGenerator {
        reply: Result<String, u16>,
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PlanGenerator for MockGenerator {
        fn name(&self) -> &str {
            "mock"
        }

        async fn generate(&self, prompt: &MarketingPlanPrompt) -> Result<GeneratedPlan, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.as_str().to_string());
            match &self.reply {
                Ok(text) => Ok(GeneratedPlan::new(text.clone())),
                Err(status) => Err(UpstreamError::Status {
                    status: *status,
                    body: "upstream exploded".to_string(),
                }),
            }
        }
    }

    struct RecordingPublisher {
        fail: bool,
        payloads: Mutex<Vec<BridgePayload>>,
    }

    impl RecordingPublisher {
        fn accepting() -> Self {
            Self {
                fail: false,
                payloads: Mutex::new(Vec::new()),
            }
        }

        fn rejecting() -> Self {
            Self {
                fail: true,
                payloads: Mutex::new(Vec::new()),
            }
        }

        fn payloads(&self) -> Vec<BridgePayload> {
            self.payloads.lock().unwrap().clone()
        }
    }

    impl PlanPublisher for RecordingPublisher {
        async fn publish(&self, payload: &BridgePayload) -> Result<(), BridgeError> {
            self.payloads.lock().unwrap().push(payload.clone());
            if self.fail {
                Err(BridgeError::Status {
                    status: 502,
                    body: "bad gateway".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn form() -> FormSubmission {
        FormSubmission::new()
            .with_scalar(fields::BUSINESS_NAME, "Acme")
            .with_scalar(fields::PRIMARY_MARKETING_GOAL, "Grow")
            .with_scalar(fields::USER_ID, "12")
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_run_publishes_generated_plan_once() {
        let pipeline = PlanPipeline::new(MockGenerator::ok("PLAN_TEXT"), RecordingPublisher::accepting());

        let outcome = pipeline.run(&form()).await.unwrap();

        assert_eq!(outcome.title, "AI Marketing Plan for Acme");
        assert_eq!(outcome.plan_bytes, "PLAN_TEXT".len());
        assert_eq!(pipeline.generator().calls(), 1);

        let payloads = pipeline.publisher().payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].title, "AI Marketing Plan for Acme");
        assert_eq!(payloads[0].content.as_str(), "PLAN_TEXT");
        assert_eq!(payloads[0].user_id.as_deref(), Some("12"));
    }

    #[tokio::test]
    async fn test_run_sends_rendered_prompt() {
        let pipeline = PlanPipeline::new(MockGenerator::ok("x"), RecordingPublisher::accepting());
        let form = form();

        pipeline.run(&form).await.unwrap();

        let prompts = pipeline.generator().prompts.lock().unwrap().clone();
        assert_eq!(prompts, vec![prompt::render(&form).into_inner()]);
    }

    #[tokio::test]
    async fn test_generation_failure_skips_bridge() {
        let pipeline = PlanPipeline::new(MockGenerator::failing(500), RecordingPublisher::accepting());

        let err = pipeline.run(&form()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Generation(UpstreamError::Status { status: 500, .. })));
        assert_eq!(err.stage(), PipelineStage::Rendered);
        assert!(pipeline.publisher().payloads().is_empty());
    }

    #[tokio::test]
    async fn test_bridge_failure_is_final() {
        let pipeline = PlanPipeline::new(MockGenerator::ok("PLAN_TEXT"), RecordingPublisher::rejecting());

        let err = pipeline.run(&form()).await.unwrap_err();

        assert_eq!(err.stage(), PipelineStage::Generated);
        match err {
            PipelineError::Publish { title, plan, source } => {
                assert_eq!(title, "AI Marketing Plan for Acme");
                assert_eq!(plan.as_str(), "PLAN_TEXT");
                assert!(matches!(source, BridgeError::Status { status: 502, .. }));
            }
            other => panic!("expected publish error, got {other:?}"),
        }
        assert_eq!(pipeline.generator().calls(), 1);
        assert_eq!(pipeline.publisher().payloads().len(), 1);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(PipelineStage::Received.to_string(), "received");
        assert_eq!(PipelineStage::Responded.to_string(), "responded");
    }
}
