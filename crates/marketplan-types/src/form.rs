//! Inbound form submission and the field accessor used by the renderer.
//!
//! The webhook body is an untyped JSON object. [`FormSubmission::from_json`]
//! validates it once at the boundary into a map of [`FieldValue`]s so the
//! rest of the pipeline never deals with raw JSON.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::FormError;

/// Placeholder rendered for a missing entry in a repeated field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Field names read from the intake form.
pub mod fields {
    pub const PRIMARY_MARKETING_GOAL: &str = "primary_marketing_goal";
    pub const BUSINESS_NAME: &str = "business_name";
    pub const VISION_STATEMENT: &str = "vision_statement";
    pub const MISSION_STATEMENT: &str = "mission_statement";
    pub const CORE_VALUES: &str = "core_values";
    pub const PRIMARY_COMPETITOR: &str = "primary_competitor";
    pub const UVP_DIFFERENTIATOR: &str = "uvp_differentiator";
    pub const ICP_SEGMENT_NAME: &str = "icp_segment_name";
    pub const ICP_PAIN_POINTS: &str = "icp_pain_points";
    pub const ICP_WATERING_HOLES: &str = "icp_watering_holes";
    pub const BRAND_VOICE_POSITIVE_1: &str = "brand_voice_positive_1";
    pub const BRAND_VOICE_NEGATIVE_1: &str = "brand_voice_negative_1";
    pub const BRAND_VOICE_POSITIVE_2: &str = "brand_voice_positive_2";
    pub const BRAND_VOICE_NEGATIVE_2: &str = "brand_voice_negative_2";
    pub const CONTENT_PILLARS: &str = "content_pillars";
    pub const OFFERING_NAME: &str = "offering_name";
    pub const KEY_BENEFIT: &str = "key_benefit";
    pub const USER_ID: &str = "user_id";
}

/// A single form field: either one value or an ordered list of values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(String),
    Sequence(Vec<String>),
}

/// A validated form submission, scoped to one inbound request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    fields: BTreeMap<String, FieldValue>,
}

impl FormSubmission {
    /// Create an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures.
    pub fn with(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Builder-style insert of a scalar value.
    pub fn with_scalar(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(key, FieldValue::Scalar(value.into()))
    }

    /// Builder-style insert of a sequence value.
    pub fn with_sequence<I, S>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(
            key,
            FieldValue::Sequence(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Validate a raw JSON body into a submission.
    ///
    /// - strings become scalars; numbers and booleans become scalars of their JSON text
    /// - `null` drops the field entirely
    /// - arrays of scalars become sequences (a `null` entry becomes an empty entry)
    /// - nested objects, or arrays holding objects/arrays, are rejected
    pub fn from_json(body: Value) -> Result<Self, FormError> {
        let Value::Object(map) = body else {
            return Err(FormError::NotAnObject);
        };

        let mut fields = BTreeMap::new();
        for (key, value) in map {
            let field = match value {
                Value::Null => continue,
                Value::Array(items) => {
                    let mut entries = Vec::with_capacity(items.len());
                    for item in items {
                        match scalar_text(item) {
                            Some(text) => entries.push(text),
                            None => return Err(FormError::UnsupportedValue { field: key }),
                        }
                    }
                    FieldValue::Sequence(entries)
                }
                other => match scalar_text(other) {
                    Some(text) => FieldValue::Scalar(text),
                    None => return Err(FormError::UnsupportedValue { field: key }),
                },
            };
            fields.insert(key, field);
        }

        Ok(Self { fields })
    }

    /// Look up a field for interpolation.
    ///
    /// Absent keys yield an empty string. A sequence read as a scalar renders
    /// its entries joined with `", "`.
    pub fn get(&self, key: &str) -> Cow<'_, str> {
        match self.fields.get(key) {
            Some(FieldValue::Scalar(value)) => Cow::Borrowed(value.as_str()),
            Some(FieldValue::Sequence(values)) => Cow::Owned(values.join(", ")),
            None => Cow::Borrowed(""),
        }
    }

    /// Entries of a repeated field, or `None` if the key is absent or scalar.
    pub fn sequence(&self, key: &str) -> Option<&[String]> {
        match self.fields.get(key) {
            Some(FieldValue::Sequence(values)) => Some(values),
            _ => None,
        }
    }

    /// Entry `index` of a repeated field, or [`NOT_AVAILABLE`] when missing or empty.
    pub fn entry(&self, key: &str, index: usize) -> &str {
        self.sequence(key)
            .and_then(|values| values.get(index))
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// The submitter id, if a non-empty scalar was supplied.
    pub fn user_id(&self) -> Option<&str> {
        match self.fields.get(fields::USER_ID) {
            Some(FieldValue::Scalar(value)) if !value.is_empty() => Some(value.as_str()),
            _ => None,
        }
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl TryFrom<Value> for FormSubmission {
    type Error = FormError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
