//! The webhook endpoint.
//!
//! Maps each inbound request to a [`WebhookResponse`]:
//!
//! | Situation | Status | Body |
//! |-----------|--------|------|
//! | authentication failed, or not `POST` | 403 | `{"ok": false, "error": "invalid / unsigned request"}` |
//! | body is not a JSON object | 200 | `{"ok": false, "error": "invalid JSON"}` |
//! | payload ignored | 200 | `{"ok": false, "error": "invalid payload"}` |
//! | dispatch failed | 500 | `{"ok": false, "error": "event dispatch failed"}` |
//! | accepted | 200 | subscriber response data plus `"ok": true` |
//!
//! Credentials are checked before the method, so a misconfigured sender is
//! reported even on a `GET`.
//!
//! Ignored payloads answer 200 so Storyblok records the delivery as received
//! and does not retry it.

use std::sync::Arc;

use ingestion::{DeliveryId, IgnoreReason, IngestionPipeline, Timestamp};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::instrument;

use crate::{EventDispatcher, WebhookEvent, WebhookRequest};

/// Status and JSON body to send back to Storyblok.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: Value,
}

impl WebhookResponse {
    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "ok": false, "error": message }),
        }
    }

    fn ok(mut data: Map<String, Value>) -> Self {
        data.insert("ok".to_string(), Value::Bool(true));
        Self {
            status: 200,
            body: Value::Object(data),
        }
    }

    /// Whether the `ok` flag in the body is set.
    pub fn is_ok(&self) -> bool {
        self.body.get("ok").and_then(Value::as_bool).unwrap_or(false)
    }
}

/// Runs deliveries through the pipeline and dispatches accepted events.
pub struct WebhookEndpoint {
    pipeline: IngestionPipeline,
    dispatcher: Arc<dyn EventDispatcher>,
}

impl WebhookEndpoint {
    pub fn new(pipeline: IngestionPipeline, dispatcher: Arc<dyn EventDispatcher>) -> Self {
        Self {
            pipeline,
            dispatcher,
        }
    }

    /// Handles one delivery.
    #[instrument(skip_all, fields(delivery_id = %delivery_id, method = %request.method()))]
    async fn handle_delivery(
        &self,
        request: &WebhookRequest,
        delivery_id: DeliveryId,
    ) -> WebhookResponse {
        let inbound = request.as_inbound();
        let authenticated = self.pipeline.authenticate(&inbound);

        let body = match authenticated {
            Ok(body) if request.is_post() => body,
            _ => {
                tracing::error!(
                    method = %request.method(),
                    authenticated = authenticated.is_ok(),
                    anomaly = authenticated.err().map(|failure| failure.anomaly()),
                    signature_present = request.header(ingestion::SIGNATURE_HEADER).is_some(),
                    url_secret_present = request.url_secret().is_some(),
                    "Storyblok webhook: failed to handle request"
                );
                return WebhookResponse::error(403, "invalid / unsigned request");
            }
        };

        let payload = match self.pipeline.ingest_authenticated(body) {
            Ok(payload) => payload,
            Err(IgnoreReason::InvalidJson { .. }) => {
                return WebhookResponse::error(200, "invalid JSON");
            }
            Err(IgnoreReason::Classification(_)) => {
                return WebhookResponse::error(200, "invalid payload");
            }
        };

        let mut event = WebhookEvent::new(delivery_id, Timestamp::now(), payload);

        if let Err(err) = self.dispatcher.dispatch(&mut event).await {
            tracing::error!(error = %err, "Storyblok webhook: event dispatch failed");
            return WebhookResponse::error(500, "event dispatch failed");
        }

        WebhookResponse::ok(event.into_response_data())
    }

    /// Handles one delivery under a freshly generated [`DeliveryId`].
    pub async fn handle(&self, request: &WebhookRequest) -> WebhookResponse {
        self.handle_delivery(request, DeliveryId::new_random()).await
    }
}

impl std::fmt::Debug for WebhookEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookEndpoint")
            .field("pipeline", &self.pipeline)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
