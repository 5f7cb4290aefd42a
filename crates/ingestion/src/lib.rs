//! Storyblok webhook ingestion core.
//!
//! Authenticates inbound webhook deliveries and classifies their untyped JSON
//! bodies into strongly typed [`WebhookPayload`] variants for downstream
//! event handling.
//!
//! ## Architectural Layer
//!
//! **Business logic.** This crate has no I/O dependencies: every operation is
//! a pure function of the request and a read-only [`WebhookConfig`] snapshot.
//! HTTP transport and event dispatch live in the `listener` crate.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`SpaceId`, `StoryId`, `AssetPath`, etc.) |
//! | [`types`] | Shared value types (`WebhookSecret`, `Timestamp`) |
//! | [`errors`] | Authentication, classification and configuration errors |
//! | [`config`] | The configuration snapshot |
//! | [`catalog`] | `Domain`, `Action` and the static action table |
//! | [`authenticator`] | Signature / URL secret verification |
//! | [`classifier`] | Domain detection and action resolution |
//! | [`factory`] | Typed payload construction |
//! | [`payload`] | The `WebhookPayload` variants |
//! | [`pipeline`] | `IngestionPipeline` composing the above |
//!
//! ## Outcomes
//!
//! [`IngestionPipeline::ingest`] never fails for malformed input. It returns an
//! [`IngestionOutcome`]: `Accepted` with a payload, `Rejected` when the caller
//! could not be authenticated, or `Ignored` when an authenticated payload was
//! not recognised (the reason is logged at error level).

pub mod authenticator;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod factory;
pub mod identifiers;
pub mod payload;
pub mod pipeline;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use authenticator::{authenticate, AuthenticationCredentials, SIGNATURE_HEADER};
pub use catalog::{Action, ActionCatalog, CatalogEntry, Domain};
pub use classifier::{Classification, PayloadClassifier};
pub use config::{WebhookConfig, WebhookSettings};
pub use errors::{
    AuthenticationFailure, ClassificationError, ConfigurationError, IgnoreReason,
    InvalidAssetPath,
};
pub use factory::PayloadFactory;
pub use identifiers::{
    AssetId, AssetPath, BranchId, DatasourceSlug, DeliveryId, FullSlug, ReleaseId, SpaceId,
    StoryId, UserId, WorkflowName, WorkflowStageName,
};
pub use payload::{
    AssetPayload, DatasourceEntryPayload, PipelinePayload, ReleasePayload, StoryPayload,
    UserPayload, WebhookPayload, WorkflowStagePayload,
};
pub use pipeline::{AuthenticatedBody, InboundRequest, IngestionOutcome, IngestionPipeline};
pub use types::{Timestamp, WebhookSecret};

#[cfg(test)]
mod test_support;
