//! Transport-agnostic description of an inbound webhook request.
//!
//! Whatever HTTP server embeds the endpoint converts its native request into a
//! [`WebhookRequest`]. Header names are stored lowercased so lookups are
//! case-insensitive, matching HTTP semantics.

use std::collections::HashMap;

use ingestion::{InboundRequest, SIGNATURE_HEADER};

/// An inbound webhook delivery as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    method: String,
    body: Vec<u8>,
    headers: HashMap<String, String>,
    url_secret: Option<String>,
}

impl WebhookRequest {
    /// Creates a request with the given method and exact body bytes.
    pub fn new(method: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method: method.into(),
            body: body.into(),
            headers: HashMap::new(),
            url_secret: None,
        }
    }

    /// Shorthand for a `POST` request.
    pub fn post(body: impl Into<Vec<u8>>) -> Self {
        Self::new("POST", body)
    }

    /// Adds a header; later values replace earlier ones.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Sets the secret passed as a URL parameter.
    #[must_use]
    pub fn with_url_secret(mut self, secret: impl Into<String>) -> Self {
        self.url_secret = Some(secret.into());
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn is_post(&self) -> bool {
        self.method.eq_ignore_ascii_case("POST")
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn url_secret(&self) -> Option<&str> {
        self.url_secret.as_deref()
    }

    /// Borrows the parts the ingestion pipeline needs.
    pub fn as_inbound(&self) -> InboundRequest<'_> {
        InboundRequest {
            body: &self.body,
            signature: self.header(SIGNATURE_HEADER),
            url_secret: self.url_secret(),
        }
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
