//! HTTP layer for the webhook service.
//!
//! Axum router exposing `/health`, `/ready` and `/generate-plan`. Every
//! request-time failure is mapped to a fixed JSON message; causes only go
//! to the logs.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;
