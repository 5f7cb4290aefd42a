//! Shared value types for webhook ingestion.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! behaviour of their own: [`WebhookSecret`] never prints its value, and
//! [`Timestamp`] hides the `chrono` representation from downstream crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Secrets
// ---------------------------------------------------------------------------

/// The shared secret configured for the Storyblok webhook.
///
/// Used as the HMAC key for the `webhook-signature` header and, when the URL
/// fallback is enabled, compared against the URL token. The value is redacted
/// from `Debug` output so configuration snapshots can be logged safely.
///
/// Deliberately not `Serialize`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct WebhookSecret(String);

impl WebhookSecret {
    /// Wraps a secret value. An empty value means "no secret configured".
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the secret for use as key material.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("WebhookSecret(<empty>)")
        } else {
            f.write_str("WebhookSecret(<redacted>)")
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// When a webhook delivery reached the endpoint, in UTC.
///
/// Displays and serialises as RFC 3339 so subscribers can log or forward it
/// without touching `chrono` themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current time; used as the receive time of a new delivery.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps a time recorded elsewhere, e.g. by the embedding HTTP server.
    pub fn from_utc(received: DateTime<Utc>) -> Self {
        Self(received)
    }

    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
