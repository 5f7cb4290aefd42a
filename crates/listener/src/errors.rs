//! Errors raised while dispatching accepted webhooks.

use thiserror::Error;

/// A subscriber failed to handle a webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The named subscriber reported a failure.
    #[error("subscriber '{subscriber}' failed: {message}")]
    SubscriberFailed {
        /// Name the subscriber registered under.
        subscriber: String,
        /// Description of the failure.
        message: String,
    },
}
