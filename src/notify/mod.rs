//! Notification dispatch.
//!
//! The pipeline only knows the [`Notifier`] trait; the concrete LINE
//! Messaging API transport lives in [`line`]. Tests substitute their own
//! implementations to observe or fail dispatches.

pub mod line;

use crate::model::{AlertEvent, NotifyError};

/// Black-box, best-effort alert delivery.
///
/// Implementations may be slow or fail; the pipeline makes exactly one
/// attempt per alert, logs any error, and moves on. Nothing here is allowed
/// to influence classification or tracker state.
pub trait Notifier {
    /// Push a formatted alert for a risk escalation. `hydration_ml` is the
    /// current intake recommendation included in the message body.
    fn send_alert(&self, event: &AlertEvent, hydration_ml: u32) -> Result<(), NotifyError>;

    /// Push an ad hoc plain-text message (connectivity checks, operator
    /// announcements).
    fn send_text(&self, message: &str) -> Result<(), NotifyError>;
}
