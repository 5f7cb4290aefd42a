//! The event handed to webhook subscribers.

use ingestion::{DeliveryId, Timestamp, WebhookPayload};
use serde_json::{Map, Value};

/// An accepted webhook, dispatched once to every subscriber.
///
/// Subscribers may attach data to the HTTP response through
/// [`WebhookEvent::add_response_data`].
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    delivery_id: DeliveryId,
    received_at: Timestamp,
    payload: WebhookPayload,
    response_data: Map<String, Value>,
}

impl WebhookEvent {
    pub fn new(delivery_id: DeliveryId, received_at: Timestamp, payload: WebhookPayload) -> Self {
        Self {
            delivery_id,
            received_at,
            payload,
            response_data: Map::new(),
        }
    }

    pub fn delivery_id(&self) -> DeliveryId {
        self.delivery_id
    }

    pub fn received_at(&self) -> Timestamp {
        self.received_at
    }

    pub fn payload(&self) -> &WebhookPayload {
        &self.payload
    }

    /// Adds a key to the response body. Later writes to the same key win.
    pub fn add_response_data(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> &mut Self {
        self.response_data.insert(key.into(), value.into());
        self
    }

    pub fn response_data(&self) -> &Map<String, Value> {
        &self.response_data
    }

    pub(crate) fn into_response_data(self) -> Map<String, Value> {
        self.response_data
    }
}
