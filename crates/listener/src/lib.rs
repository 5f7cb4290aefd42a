//! Storyblok webhook endpoint.
//!
//! Turns inbound deliveries into [`ingestion::IngestionPipeline`] runs and
//! hands accepted payloads to subscribers:
//!
//! - [`WebhookRequest`] — transport-agnostic request (method, raw body,
//!   headers, optional URL secret). Built by the embedding HTTP server.
//! - [`WebhookEndpoint`] — authenticates, classifies, dispatches, and maps the
//!   outcome to a [`WebhookResponse`].
//! - [`EventDispatcher`] / [`WebhookSubscriber`] — the dispatch port and its
//!   subscriber-based implementation [`SubscriberList`].
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Request plumbing, response shapes and dispatch live
//! here. The [`ingestion`] crate sees only the raw body and credentials.
//! Binding a socket and routing are left to the embedding server.

pub mod dispatch;
pub mod endpoint;
pub mod errors;
pub mod event;
pub mod request;

pub use dispatch::{EventDispatcher, SubscriberList, WebhookSubscriber};
pub use endpoint::{WebhookEndpoint, WebhookResponse};
pub use errors::DispatchError;
pub use event::WebhookEvent;
pub use request::WebhookRequest;
