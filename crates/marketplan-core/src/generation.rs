//! PlanGenerator trait definition.

use std::future::Future;

use marketplan_types::error::UpstreamError;
use marketplan_types::plan::{GeneratedPlan, MarketingPlanPrompt};

/// A text-generation backend that turns a prompt into a plan.
///
/// Implementations issue exactly one request per call and never retry.
/// Implementations live in marketplan-infra (e.g., `ChatCompletionGenerator`).
pub trait PlanGenerator: Send + Sync {
    /// Human-readable backend name for log lines (e.g., "openai").
    fn name(&self) -> &str;

    /// Send the prompt and return only the generated text.
    fn generate(
        &self,
        prompt: &MarketingPlanPrompt,
    ) -> impl Future<Output = Result<GeneratedPlan, UpstreamError>> + Send;
}
