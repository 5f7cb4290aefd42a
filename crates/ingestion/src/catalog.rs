//! The catalogue of every webhook action Storyblok sends.
//!
//! Storyblok action strings are not unique: `"deleted"` is sent for both
//! assets and stories. An [`Action`] is therefore always scoped to a
//! [`Domain`], and the [`ActionCatalog`] maps a `(Domain, literal)` pair to at
//! most one [`Action`].
//!
//! The domain of a payload is detected from a single disambiguating key. The
//! keys are tested in [`ActionCatalog::DOMAIN_PRIORITY`] order: workflow
//! payloads also carry a `story_id` and must be tested before stories.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain
// ---------------------------------------------------------------------------

/// The entity category a webhook notification pertains to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Asset,
    Datasource,
    Story,
    Pipeline,
    User,
    Release,
    Workflow,
}

impl Domain {
    /// The payload key whose presence identifies this domain.
    pub const fn disambiguating_key(self) -> &'static str {
        match self {
            Domain::Asset => "asset_id",
            Domain::Datasource => "datasource_slug",
            Domain::Story => "story_id",
            Domain::Pipeline => "branch_id",
            Domain::User => "user_id",
            Domain::Release => "release_id",
            Domain::Workflow => "workflow_name",
        }
    }

    /// Lowercase name used in logs and serialised output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Domain::Asset => "asset",
            Domain::Datasource => "datasource",
            Domain::Story => "story",
            Domain::Pipeline => "pipeline",
            Domain::User => "user",
            Domain::Release => "release",
            Domain::Workflow => "workflow",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A domain-scoped webhook event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Asset
    AssetCreated,
    AssetDeleted,
    AssetReplaced,
    AssetRestored,

    // Datasource
    DatasourceEntryUpdated,

    // Pipeline
    PipelineDeployed,

    // Release
    ReleaseMerged,

    // Story
    StoryDeleted,
    StoryMoved,
    StoryPublished,
    StoryUnpublished,

    // User
    UserAdded,
    UserRolesUpdated,
    UserRemoved,

    // Workflow
    WorkflowStageChanged,
}

impl Action {
    /// Every action, grouped by domain.
    pub const ALL: [Action; 15] = [
        Action::AssetCreated,
        Action::AssetDeleted,
        Action::AssetReplaced,
        Action::AssetRestored,
        Action::DatasourceEntryUpdated,
        Action::PipelineDeployed,
        Action::ReleaseMerged,
        Action::StoryDeleted,
        Action::StoryMoved,
        Action::StoryPublished,
        Action::StoryUnpublished,
        Action::UserAdded,
        Action::UserRolesUpdated,
        Action::UserRemoved,
        Action::WorkflowStageChanged,
    ];

    /// The domain this action belongs to.
    pub const fn domain(self) -> Domain {
        match self {
            Action::AssetCreated
            | Action::AssetDeleted
            | Action::AssetReplaced
            | Action::AssetRestored => Domain::Asset,
            Action::DatasourceEntryUpdated => Domain::Datasource,
            Action::PipelineDeployed => Domain::Pipeline,
            Action::ReleaseMerged => Domain::Release,
            Action::StoryDeleted
            | Action::StoryMoved
            | Action::StoryPublished
            | Action::StoryUnpublished => Domain::Story,
            Action::UserAdded | Action::UserRolesUpdated | Action::UserRemoved => Domain::User,
            Action::WorkflowStageChanged => Domain::Workflow,
        }
    }

    /// The literal `action` string Storyblok sends for this action.
    ///
    /// Not unique on its own; see [`ActionCatalog::lookup`].
    pub const fn literal(self) -> &'static str {
        match self {
            Action::AssetCreated => "created",
            Action::AssetDeleted => "deleted",
            Action::AssetReplaced => "replaced",
            Action::AssetRestored => "restored",
            Action::DatasourceEntryUpdated => "entries_updated",
            Action::PipelineDeployed => "deployed",
            Action::ReleaseMerged => "merged",
            Action::StoryDeleted => "deleted",
            Action::StoryMoved => "moved",
            Action::StoryPublished => "published",
            Action::StoryUnpublished => "unpublished",
            Action::UserAdded => "added",
            Action::UserRolesUpdated => "roles_updated",
            Action::UserRemoved => "removed",
            Action::WorkflowStageChanged => "stage.changed",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.domain(), self.literal())
    }
}

// ---------------------------------------------------------------------------
// Catalogue
// ---------------------------------------------------------------------------

/// One row of the action table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub domain: Domain,
    pub literal: &'static str,
    pub action: Action,
}

const fn entry(action: Action) -> CatalogEntry {
    CatalogEntry {
        domain: action.domain(),
        literal: action.literal(),
        action,
    }
}

/// Static lookup table from `(Domain, literal)` to [`Action`].
pub struct ActionCatalog;

impl ActionCatalog {
    /// The order in which disambiguating keys are tested.
    pub const DOMAIN_PRIORITY: [Domain; 7] = [
        Domain::Workflow,
        Domain::Asset,
        Domain::Datasource,
        Domain::Story,
        Domain::Pipeline,
        Domain::User,
        Domain::Release,
    ];

    /// Every recognised `(domain, literal, action)` triple.
    pub const TABLE: [CatalogEntry; 15] = [
        entry(Action::WorkflowStageChanged),
        entry(Action::AssetCreated),
        entry(Action::AssetDeleted),
        entry(Action::AssetReplaced),
        entry(Action::AssetRestored),
        entry(Action::DatasourceEntryUpdated),
        entry(Action::StoryDeleted),
        entry(Action::StoryMoved),
        entry(Action::StoryPublished),
        entry(Action::StoryUnpublished),
        entry(Action::PipelineDeployed),
        entry(Action::UserAdded),
        entry(Action::UserRolesUpdated),
        entry(Action::UserRemoved),
        entry(Action::ReleaseMerged),
    ];

    /// Resolves a literal action string within `domain`.
    pub fn lookup(domain: Domain, literal: &str) -> Option<Action> {
        Self::TABLE
            .iter()
            .find(|e| e.domain == domain && e.literal == literal)
            .map(|e| e.action)
    }

    /// All actions that belong to `domain`, in table order.
    pub fn actions_for(domain: Domain) -> impl Iterator<Item = Action> {
        Self::TABLE
            .iter()
            .filter(move |e| e.domain == domain)
            .map(|e| e.action)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
