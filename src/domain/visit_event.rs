//! Visit event model for best-effort visit counting.

use std::time::Instant;

/// A redirect that still has to be counted.
///
/// Sent by the redirect handler over a bounded channel and applied by
/// [`crate::application::visit_worker::run_visit_worker`], so the redirect
/// response never waits on the counter update.
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub code: String,
    pub received_at: Instant,
}

impl VisitEvent {
    /// Creates an event stamped with the current instant.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            received_at: Instant::now(),
        }
    }
}
