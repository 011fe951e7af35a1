//! Marketing plan webhook handler.
//!
//! Receives a form submission, runs the plan pipeline and answers with one
//! of the fixed messages. Failure details only go to the logs.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use uuid::Uuid;

use marketplan_core::pipeline::{PipelineError, PipelineStage};
use marketplan_types::error::FormError;
use marketplan_types::form::FormSubmission;

use crate::http::error::AppError;
use crate::http::response::{MessageBody, SUCCESS_MESSAGE};
use crate::state::AppState;

/// Why an inbound body was rejected before the pipeline ran.
#[derive(Debug, thiserror::Error)]
enum BodyError {
    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Form(#[from] FormError),
}

/// Parse the raw body into a form. An empty body is an empty form.
fn parse_form(body: &[u8]) -> Result<FormSubmission, BodyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(FormSubmission::new());
    }
    let value: serde_json::Value = serde_json::from_slice(body)?;
    Ok(FormSubmission::from_json(value)?)
}

/// POST /generate-plan - Generate a marketing plan and publish it.
///
/// Content type is not checked; the body is parsed as JSON regardless.
#[tracing::instrument(name = "generate_plan_request", skip_all, fields(request_id = %Uuid::now_v7()))]
pub async fn generate_plan(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageBody>, AppError> {
    let start = Instant::now();
    tracing::info!(body_bytes = body.len(), "Webhook received at /generate-plan");

    let form = parse_form(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected form submission");
        AppError::InvalidForm
    })?;
    tracing::debug!(fields = form.len(), form = ?form, "Parsed form submission");

    match state.pipeline.run(&form).await {
        Ok(outcome) => {
            tracing::info!(
                stage = %PipelineStage::Responded,
                title = %outcome.title,
                plan_bytes = outcome.plan_bytes,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Plan generated and posted"
            );
            Ok(Json(MessageBody::new(SUCCESS_MESSAGE)))
        }
        Err(err) => {
            log_pipeline_failure(&err, start);
            Err(AppError::PlanFailed)
        }
    }
}

fn log_pipeline_failure(err: &PipelineError, start: Instant) {
    let elapsed_ms = start.elapsed().as_millis() as u64;

    match err {
        PipelineError::Generation(source) => {
            tracing::error!(
                stage = %err.stage(),
                error = %source,
                elapsed_ms,
                "Plan generation failed"
            );
        }
        PipelineError::Publish {
            title,
            plan,
            source,
        } => {
            tracing::error!(
                stage = %err.stage(),
                title = %title,
                plan_bytes = plan.len(),
                error = %source,
                elapsed_ms,
                "Plan generated but not published"
            );
            tracing::debug!(title = %title, plan = plan.as_str(), "Unpublished plan content");
        }
    }
}
