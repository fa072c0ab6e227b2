//! Intervention log port.
//!
//! Records the delta between what the council recommended and what the
//! human decided. Adapters must not fail the sign-off path: log the write
//! failure and drop the event instead.

use icgl_domain::InterventionEvent;

/// Sink for intervention events.
pub trait InterventionLog: Send + Sync {
    /// Record one intervention. Infallible at the port level.
    fn record(&self, event: &InterventionEvent);
}

/// Discards all events. Default for hosts that don't collect feedback.
pub struct NoInterventionLog;

impl InterventionLog for NoInterventionLog {
    fn record(&self, _event: &InterventionEvent) {}
}
