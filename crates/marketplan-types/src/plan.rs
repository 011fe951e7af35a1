//! Documents produced while handling one webhook request.

use std::fmt;

use serde::Serialize;

use crate::form::{fields, FormSubmission};

/// The rendered prompt sent to the generation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketingPlanPrompt(String);

impl MarketingPlanPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for MarketingPlanPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text returned by the generation provider. Treated as opaque content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneratedPlan(String);

impl GeneratedPlan {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes, used for log lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Record published to the content bridge.
///
/// `user_id` serializes as JSON `null` when the submitter is anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BridgePayload {
    pub title: String,
    pub content: GeneratedPlan,
    pub user_id: Option<String>,
}

impl BridgePayload {
    /// Derive the payload for a generated plan from the submission it came from.
    pub fn for_plan(form: &FormSubmission, content: GeneratedPlan) -> Self {
        Self {
            title: plan_title(&form.get(fields::BUSINESS_NAME)),
            content,
            user_id: form.user_id().map(str::to_string),
        }
    }
}

/// Title under which a plan is published.
pub fn plan_title(business_name: &str) -> String {
    format!("AI Marketing Plan for {business_name}")
}
