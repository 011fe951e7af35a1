//! Shared domain types for the marketing plan webhook.
//!
//! This crate contains the request-scoped types that flow through the
//! pipeline (form submission, prompt, generated plan, bridge payload), the
//! service configuration record, and the error enums for every stage.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod form;
pub mod plan;
