//! Response bodies returned to the webhook caller.

use serde::{Deserialize, Serialize};

/// Body sent after the plan was generated and published.
pub const SUCCESS_MESSAGE: &str = "Plan generated and posted successfully!";

/// Body sent for any failure inside the pipeline.
pub const FAILURE_MESSAGE: &str = "An error occurred while generating the plan.";

/// Body sent when the inbound form fails boundary validation.
pub const INVALID_FORM_MESSAGE: &str = "Invalid form submission.";

/// `{ "message": ... }` -- the only shape the webhook endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Body of `GET /ready`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessBody {
    pub status: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub problems: Vec<String>,
}
