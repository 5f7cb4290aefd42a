//! Read-only configuration snapshot for webhook ingestion.
//!
//! Loading the snapshot (from files, environment, a secret store) is the
//! embedding application's job; this module only defines its shape and
//! validation. The deserialised layout mirrors the bundle configuration:
//!
//! ```json
//! {
//!   "space_id": 123456,
//!   "webhook": { "secret": "…", "allow_url_secret": false }
//! }
//! ```

use serde::Deserialize;

use crate::{ConfigurationError, SpaceId, WebhookSecret};

/// Settings of the `webhook` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookSettings {
    /// The secret configured in the Storyblok webhook. `None` or empty means
    /// the endpoint is deliberately unsecured.
    #[serde(default)]
    pub secret: Option<WebhookSecret>,

    /// Allows the secret to be sent as a URL parameter when the sender cannot
    /// sign requests.
    ///
    /// Intended as a temporary migration aid: disable it as soon as possible
    /// and rotate the secret afterwards.
    #[serde(default)]
    pub allow_url_secret: bool,
}

/// Configuration consumed by the ingestion pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    space_id: SpaceId,
    #[serde(default)]
    webhook: WebhookSettings,
}

impl WebhookConfig {
    /// Creates an unsecured configuration for `space_id`.
    pub fn new(space_id: SpaceId) -> Self {
        Self {
            space_id,
            webhook: WebhookSettings::default(),
        }
    }

    /// Sets the shared webhook secret.
    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.webhook.secret = Some(WebhookSecret::new(secret));
        self
    }

    /// Enables or disables the URL secret fallback.
    #[must_use]
    pub fn with_url_secret_allowed(mut self, allowed: bool) -> Self {
        self.webhook.allow_url_secret = allowed;
        self
    }

    /// The Storyblok space this deployment accepts webhooks for.
    pub fn space_id(&self) -> SpaceId {
        self.space_id
    }

    /// The configured secret, or `""` when none is configured.
    pub fn secret(&self) -> &str {
        self.webhook
            .secret
            .as_ref()
            .map(WebhookSecret::expose)
            .unwrap_or("")
    }

    /// Whether the URL secret fallback is enabled.
    pub fn url_secret_allowed(&self) -> bool {
        self.webhook.allow_url_secret
    }

    /// Checks the snapshot before the pipeline accepts it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidSpaceId`] for a zero space id.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.space_id.as_u64() == 0 {
            return Err(ConfigurationError::InvalidSpaceId);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
