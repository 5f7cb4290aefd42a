//! The ingestion pipeline: authenticate → classify → build.
//!
//! Each stage only runs when the previous one succeeded. In particular the
//! body is never decoded for a request that failed authentication: decoding
//! takes an [`AuthenticatedBody`], which only a successful
//! [`IngestionPipeline::authenticate`] produces.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::instrument;

use crate::authenticator::{self, AuthenticationCredentials};
use crate::{
    AuthenticationFailure, ConfigurationError, IgnoreReason, PayloadClassifier, PayloadFactory,
    WebhookConfig, WebhookPayload,
};

/// The raw inputs of one webhook delivery.
///
/// `body` must be the exact bytes received; re-serialising the JSON before
/// authentication invalidates the signature.
#[derive(Debug, Clone, Copy)]
pub struct InboundRequest<'a> {
    pub body: &'a [u8],
    /// The `webhook-signature` header, if sent.
    pub signature: Option<&'a str>,
    /// The secret passed in the URL, if any.
    pub url_secret: Option<&'a str>,
}

impl<'a> InboundRequest<'a> {
    /// A request with only a body and no credentials.
    pub fn new(body: &'a [u8]) -> Self {
        Self {
            body,
            signature: None,
            url_secret: None,
        }
    }

    #[must_use]
    pub fn with_signature(mut self, signature: &'a str) -> Self {
        self.signature = Some(signature);
        self
    }

    #[must_use]
    pub fn with_url_secret(mut self, url_secret: &'a str) -> Self {
        self.url_secret = Some(url_secret);
        self
    }
}

/// A request body that passed authentication.
///
/// Only [`IngestionPipeline::authenticate`] creates one, so
/// [`IngestionPipeline::ingest_authenticated`] never sees an untrusted body.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedBody<'a>(&'a [u8]);

impl<'a> AuthenticatedBody<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }
}

/// The terminal result of ingesting one request.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestionOutcome {
    /// Fully classified; ready for event dispatch.
    Accepted(WebhookPayload),
    /// The caller is not trusted. Nothing was parsed.
    Rejected(AuthenticationFailure),
    /// Authenticated, but not convertible into a typed event.
    Ignored(IgnoreReason),
}

impl IngestionOutcome {
    /// The accepted payload, if any.
    pub fn payload(&self) -> Option<&WebhookPayload> {
        match self {
            IngestionOutcome::Accepted(p) => Some(p),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the accepted payload, if any.
    pub fn into_payload(self) -> Option<WebhookPayload> {
        match self {
            IngestionOutcome::Accepted(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, IngestionOutcome::Rejected(_))
    }
}

/// Composes authentication, classification and payload construction.
///
/// Holds only a read-only configuration snapshot; one instance can serve any
/// number of concurrent requests.
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    config: Arc<WebhookConfig>,
    classifier: PayloadClassifier,
}

impl IngestionPipeline {
    /// Creates a pipeline over a validated configuration snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the snapshot fails validation.
    pub fn new(config: Arc<WebhookConfig>) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let classifier = PayloadClassifier::new(config.space_id());
        Ok(Self { config, classifier })
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Runs one request through the pipeline.
    pub fn ingest(&self, request: &InboundRequest<'_>) -> IngestionOutcome {
        let body = match self.authenticate(request) {
            Ok(body) => body,
            Err(failure) => return IngestionOutcome::Rejected(failure),
        };

        match self.ingest_authenticated(body) {
            Ok(payload) => IngestionOutcome::Accepted(payload),
            Err(reason) => IngestionOutcome::Ignored(reason),
        }
    }

    /// Checks the request's credentials without looking at the body.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthenticationFailure`] of the rule that rejected it.
    #[instrument(skip_all, fields(space_id = %self.config.space_id(), body_len = request.body.len()))]
    pub fn authenticate<'a>(
        &self,
        request: &InboundRequest<'a>,
    ) -> Result<AuthenticatedBody<'a>, AuthenticationFailure> {
        let credentials =
            AuthenticationCredentials::new(&self.config, request.signature, request.url_secret);

        if let Err(failure) = authenticator::verify(request.body, &credentials) {
            tracing::warn!(
                anomaly = failure.anomaly(),
                "Storyblok webhook: request rejected: {}",
                failure
            );
            return Err(failure);
        }
        Ok(AuthenticatedBody(request.body))
    }

    /// Decodes, classifies and builds an authenticated body.
    ///
    /// # Errors
    ///
    /// Returns the [`IgnoreReason`] when the body is not a JSON object or
    /// cannot be turned into a typed payload.
    #[instrument(skip_all, fields(space_id = %self.config.space_id(), body_len = body.0.len()))]
    pub fn ingest_authenticated(
        &self,
        body: AuthenticatedBody<'_>,
    ) -> Result<WebhookPayload, IgnoreReason> {
        let raw = body.as_bytes();
        let body = match serde_json::from_slice::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(invalid_json(raw, "body is not a JSON object".into())),
            Err(err) => return Err(invalid_json(raw, err.to_string())),
        };

        let payload = self.classify_and_build(&body)?;
        tracing::info!(
            domain = %payload.domain(),
            action = %payload.action(),
            "Storyblok webhook: accepted payload"
        );
        Ok(payload)
    }

    /// Classifies and builds an already authenticated body.
    ///
    /// The factory is never invoked for a body that failed classification.
    ///
    /// # Errors
    ///
    /// Returns the [`IgnoreReason`] after logging it with the payload.
    fn classify_and_build(
        &self,
        body: &Map<String, Value>,
    ) -> Result<WebhookPayload, IgnoreReason> {
        let result = self
            .classifier
            .try_classify(body)
            .and_then(|classification| PayloadFactory::try_build(classification, body));

        result.map_err(|err| {
            err.log(body);
            IgnoreReason::from(err)
        })
    }
}

fn invalid_json(body: &[u8], message: String) -> IgnoreReason {
    tracing::error!(
        body = %String::from_utf8_lossy(body),
        "Storyblok webhook: invalid JSON: {}",
        message
    );
    IgnoreReason::InvalidJson { message }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
