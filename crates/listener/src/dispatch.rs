//! Event dispatch to downstream webhook subscribers.
//!
//! [`EventDispatcher`] is the port the endpoint talks to. [`SubscriberList`]
//! is the in-process implementation: it calls each registered
//! [`WebhookSubscriber`] in registration order and stops at the first failure.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{DispatchError, WebhookEvent};

/// Delivers an accepted webhook to whatever handles it downstream.
#[async_trait]
pub trait EventDispatcher: Send + Sync {
    /// Dispatches `event`. Handlers may add response data to it.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] if a handler failed.
    async fn dispatch(&self, event: &mut WebhookEvent) -> Result<(), DispatchError>;
}

/// A handler interested in Storyblok webhooks.
#[async_trait]
pub trait WebhookSubscriber: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Handles one event. Subscribers that do not care about the payload's
    /// domain return `Ok(())` without doing anything.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] if handling failed.
    async fn on_webhook(&self, event: &mut WebhookEvent) -> Result<(), DispatchError>;
}

/// Ordered set of subscribers.
#[derive(Default, Clone)]
pub struct SubscriberList {
    subscribers: Vec<Arc<dyn WebhookSubscriber>>,
}

impl SubscriberList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber after all existing ones.
    #[must_use]
    pub fn with_subscriber(mut self, subscriber: Arc<dyn WebhookSubscriber>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for SubscriberList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.subscribers.iter().map(|s| s.name()))
            .finish()
    }
}

#[async_trait]
impl EventDispatcher for SubscriberList {
    async fn dispatch(&self, event: &mut WebhookEvent) -> Result<(), DispatchError> {
        for subscriber in &self.subscribers {
            tracing::debug!(
                subscriber = subscriber.name(),
                delivery_id = %event.delivery_id(),
                "Dispatching Storyblok webhook event"
            );
            subscriber.on_webhook(event).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
