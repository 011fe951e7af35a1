//! PlanPublisher trait definition.

use std::future::Future;

use marketplan_types::error::BridgeError;
use marketplan_types::plan::BridgePayload;

/// A downstream content system that stores generated plans.
///
/// Implementations issue exactly one request per call and never retry.
pub trait PlanPublisher: Send + Sync {
    /// Publish a payload. Any non-success outcome is a [`BridgeError`].
    fn publish(
        &self,
        payload: &BridgePayload,
    ) -> impl Future<Output = Result<(), BridgeError>> + Send;
}
