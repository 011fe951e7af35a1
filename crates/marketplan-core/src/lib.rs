//! Business logic and port trait definitions for the marketing plan webhook.
//!
//! This crate defines the "ports" ([`generation::PlanGenerator`],
//! [`bridge::PlanPublisher`]) that the infrastructure layer implements, the
//! prompt renderer, and the pipeline that sequences them. It depends only on
//! `marketplan-types` -- never on `marketplan-infra` or any HTTP crate.

pub mod bridge;
pub mod generation;
pub mod pipeline;
pub mod prompt;
