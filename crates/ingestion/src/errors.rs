//! Error types for webhook ingestion.
//!
//! None of these cross the public pipeline boundary as failures: malformed
//! third-party payloads are expected operational noise. They are carried
//! inside [`crate::IngestionOutcome`] so callers and tests can see *why* a
//! request was rejected or ignored.
//!
//! - [`AuthenticationFailure`] — the caller could not be trusted.
//! - [`ClassificationError`] — an authenticated payload could not be mapped
//!   to a typed event.
//! - [`IgnoreReason`] — the pipeline-level reason a payload was ignored.
//! - [`ConfigurationError`] — the configuration snapshot is unusable.
//! - [`InvalidAssetPath`] — a value cannot serve as an asset storage path.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::Domain;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Why a request failed authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthenticationFailure {
    /// A valid signature header was sent together with a URL secret.
    ///
    /// Indicates a stale fallback URL that was never removed; the request is
    /// rejected even though the signature alone would pass.
    #[error("both a webhook signature and a URL secret were supplied")]
    BothCredentialsPresent,

    /// A URL secret was sent but the URL fallback is disabled.
    #[error("a URL secret was supplied but URL secrets are not allowed")]
    UrlSecretNotAllowed,

    /// The URL fallback is enabled but the URL secret is wrong.
    #[error("the URL secret does not match the configured secret")]
    UrlSecretMismatch,

    /// The signature header is missing or does not match the body.
    #[error("the webhook signature is missing or does not match")]
    SignatureMismatch,
}

impl AuthenticationFailure {
    /// Short machine-readable tag used as the `anomaly` log field.
    pub const fn anomaly(self) -> &'static str {
        match self {
            AuthenticationFailure::BothCredentialsPresent => "both_credentials_present",
            AuthenticationFailure::UrlSecretNotAllowed => "url_secret_not_allowed",
            AuthenticationFailure::UrlSecretMismatch => "url_secret_mismatch",
            AuthenticationFailure::SignatureMismatch => "signature_mismatch",
        }
    }

    /// Whether this failure points at a misconfiguration an operator must fix.
    pub const fn is_critical(self) -> bool {
        matches!(
            self,
            AuthenticationFailure::BothCredentialsPresent
                | AuthenticationFailure::UrlSecretNotAllowed
        )
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Why an authenticated payload could not be turned into a typed event.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassificationError {
    /// `text`, `action` or `space_id` is missing or has the wrong type.
    #[error("could not parse basic structure")]
    MissingBaseStructure,

    /// The payload was sent for a different Storyblok space.
    #[error("received webhook for different space: got {provided}, expected {expected}")]
    SpaceMismatch {
        /// The `space_id` found in the payload.
        provided: Number,
        /// The configured space id.
        expected: u64,
    },

    /// None of the disambiguating keys are present.
    #[error("could not match any action")]
    NoDomainMatched,

    /// The domain was identified but its table has no such action.
    ///
    /// Either Storyblok added an action or the protocol changed.
    #[error("invalid {domain} webhook action found: {action}")]
    UnknownAction {
        /// The domain selected by its disambiguating key.
        domain: Domain,
        /// The unrecognised literal.
        action: String,
    },

    /// A field required by the domain's payload is missing or mistyped.
    #[error("could not parse {domain} event: invalid {field}")]
    InvalidField {
        /// The domain whose payload was being built.
        domain: Domain,
        /// The offending payload key.
        field: &'static str,
    },
}

impl ClassificationError {
    /// Short machine-readable tag used as the `kind` log field.
    pub const fn kind(&self) -> &'static str {
        match self {
            ClassificationError::MissingBaseStructure => "missing_base_structure",
            ClassificationError::SpaceMismatch { .. } => "space_mismatch",
            ClassificationError::NoDomainMatched => "no_domain_matched",
            ClassificationError::UnknownAction { .. } => "unknown_action",
            ClassificationError::InvalidField { .. } => "invalid_field",
        }
    }

    /// Hard errors mean a payload shape we recognise carried content we
    /// cannot interpret; soft errors are payloads we never expected to handle.
    pub const fn is_hard(&self) -> bool {
        matches!(self, ClassificationError::UnknownAction { .. })
    }

    /// Emits the error-level diagnostic for this failure with the full payload.
    pub fn log(&self, payload: &Map<String, Value>) {
        let payload = Value::Object(payload.clone());
        if self.is_hard() {
            tracing::error!(
                kind = self.kind(),
                payload = %payload,
                "Storyblok webhook: failed to parse payload: {}",
                self
            );
        } else {
            tracing::error!(
                kind = self.kind(),
                payload = %payload,
                "Storyblok webhook: ignoring payload: {}",
                self
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Why an authenticated request produced no event.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IgnoreReason {
    /// The body is not a JSON object.
    #[error("invalid JSON: {message}")]
    InvalidJson {
        /// Decoder message.
        message: String,
    },

    /// The body decoded but could not be classified or built.
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// The webhook configuration snapshot is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Storyblok space ids are positive integers.
    #[error("Configuration error: space id must be a positive integer")]
    InvalidSpaceId,
}

/// A value that cannot be used as an asset storage path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid asset path '{0}': expected a relative path without '.', '..' or empty segments")]
pub struct InvalidAssetPath(pub String);

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
