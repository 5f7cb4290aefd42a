//! Typed webhook payloads.
//!
//! A [`WebhookPayload`] is only ever produced once every field its variant
//! requires has been found and type-checked, so holders never deal with a
//! partially valid event. Payloads are immutable: fields are private and
//! exposed through accessors.
//!
//! Only [`crate::PayloadFactory`] constructs payloads. Deserialising one (for
//! example after forwarding it to another service) re-checks that its action
//! belongs to the variant's domain.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    Action, AssetId, AssetPath, BranchId, DatasourceSlug, Domain, FullSlug, ReleaseId, StoryId,
    UserId, WorkflowName, WorkflowStageName,
};

/// A classified Storyblok webhook, one variant per [`Domain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "snake_case")]
pub enum WebhookPayload {
    Asset(AssetPayload),
    Datasource(DatasourceEntryPayload),
    Story(StoryPayload),
    Pipeline(PipelinePayload),
    User(UserPayload),
    Release(ReleasePayload),
    Workflow(WorkflowStagePayload),
}

impl WebhookPayload {
    /// The resolved action.
    pub fn action(&self) -> Action {
        match self {
            WebhookPayload::Asset(p) => p.action,
            WebhookPayload::Datasource(p) => p.action,
            WebhookPayload::Story(p) => p.action,
            WebhookPayload::Pipeline(p) => p.action,
            WebhookPayload::User(p) => p.action,
            WebhookPayload::Release(p) => p.action,
            WebhookPayload::Workflow(p) => p.action,
        }
    }

    /// The human-readable `text` Storyblok sent with the event.
    pub fn text(&self) -> &str {
        match self {
            WebhookPayload::Asset(p) => &p.text,
            WebhookPayload::Datasource(p) => &p.text,
            WebhookPayload::Story(p) => &p.text,
            WebhookPayload::Pipeline(p) => &p.text,
            WebhookPayload::User(p) => &p.text,
            WebhookPayload::Release(p) => &p.text,
            WebhookPayload::Workflow(p) => &p.text,
        }
    }

    /// The domain of the variant.
    pub fn domain(&self) -> Domain {
        match self {
            WebhookPayload::Asset(_) => Domain::Asset,
            WebhookPayload::Datasource(_) => Domain::Datasource,
            WebhookPayload::Story(_) => Domain::Story,
            WebhookPayload::Pipeline(_) => Domain::Pipeline,
            WebhookPayload::User(_) => Domain::User,
            WebhookPayload::Release(_) => Domain::Release,
            WebhookPayload::Workflow(_) => Domain::Workflow,
        }
    }
}

// ---------------------------------------------------------------------------
// Action scoping
// ---------------------------------------------------------------------------

/// Deserialises an [`Action`], rejecting one that belongs to another domain.
fn scoped_action<'de, D>(deserializer: D, domain: Domain) -> Result<Action, D::Error>
where
    D: Deserializer<'de>,
{
    let action = Action::deserialize(deserializer)?;
    if action.domain() == domain {
        Ok(action)
    } else {
        Err(serde::de::Error::custom(format_args!(
            "action '{}' does not belong to the {} domain",
            action, domain
        )))
    }
}

// Generates one `deserialize_with` function per domain.
macro_rules! scoped_action_fns {
    ($($name:ident => $domain:ident),* $(,)?) => {
        $(
            fn $name<'de, D>(deserializer: D) -> Result<Action, D::Error>
            where
                D: Deserializer<'de>,
            {
                scoped_action(deserializer, Domain::$domain)
            }
        )*
    };
}

scoped_action_fns! {
    asset_action => Asset,
    datasource_action => Datasource,
    story_action => Story,
    pipeline_action => Pipeline,
    user_action => User,
    release_action => Release,
    workflow_action => Workflow,
}

// ---------------------------------------------------------------------------
// Asset
// ---------------------------------------------------------------------------

/// An asset was created, deleted, replaced or restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPayload {
    #[serde(deserialize_with = "asset_action")]
    action: Action,
    text: String,
    asset_id: AssetId,
    asset_path: Option<AssetPath>,
}

impl AssetPayload {
    pub(crate) fn new(
        action: Action,
        text: impl Into<String>,
        asset_id: AssetId,
        asset_path: Option<AssetPath>,
    ) -> Self {
        debug_assert_eq!(action.domain(), Domain::Asset);
        Self {
            action,
            text: text.into(),
            asset_id,
            asset_path,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    /// Storage path derived from the asset URL, when the payload carried one.
    pub fn asset_path(&self) -> Option<&AssetPath> {
        self.asset_path.as_ref()
    }

    /// Whether a locally stored copy of the asset is now stale.
    pub fn invalidates_cached_file(&self) -> bool {
        matches!(self.action, Action::AssetReplaced | Action::AssetDeleted)
    }
}

// ---------------------------------------------------------------------------
// Datasource
// ---------------------------------------------------------------------------

/// Entries of a datasource were updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasourceEntryPayload {
    #[serde(deserialize_with = "datasource_action")]
    action: Action,
    text: String,
    datasource_slug: DatasourceSlug,
}

impl DatasourceEntryPayload {
    pub(crate) fn new(
        action: Action,
        text: impl Into<String>,
        datasource_slug: DatasourceSlug,
    ) -> Self {
        debug_assert_eq!(action.domain(), Domain::Datasource);
        Self {
            action,
            text: text.into(),
            datasource_slug,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn datasource_slug(&self) -> &DatasourceSlug {
        &self.datasource_slug
    }
}

// ---------------------------------------------------------------------------
// Story
// ---------------------------------------------------------------------------

/// A story was published, unpublished, moved or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPayload {
    #[serde(deserialize_with = "story_action")]
    action: Action,
    text: String,
    story_id: StoryId,
    full_slug: FullSlug,
}

impl StoryPayload {
    pub(crate) fn new(
        action: Action,
        text: impl Into<String>,
        story_id: StoryId,
        full_slug: FullSlug,
    ) -> Self {
        debug_assert_eq!(action.domain(), Domain::Story);
        Self {
            action,
            text: text.into(),
            story_id,
            full_slug,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn story_id(&self) -> StoryId {
        self.story_id
    }

    pub fn full_slug(&self) -> &FullSlug {
        &self.full_slug
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// A pipeline branch was deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelinePayload {
    #[serde(deserialize_with = "pipeline_action")]
    action: Action,
    text: String,
    branch_id: BranchId,
}

impl PipelinePayload {
    pub(crate) fn new(action: Action, text: impl Into<String>, branch_id: BranchId) -> Self {
        debug_assert_eq!(action.domain(), Domain::Pipeline);
        Self {
            action,
            text: text.into(),
            branch_id,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn branch_id(&self) -> BranchId {
        self.branch_id
    }
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A collaborator was added, removed or had their roles changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(deserialize_with = "user_action")]
    action: Action,
    text: String,
    user_id: UserId,
}

impl UserPayload {
    pub(crate) fn new(action: Action, text: impl Into<String>, user_id: UserId) -> Self {
        debug_assert_eq!(action.domain(), Domain::User);
        Self {
            action,
            text: text.into(),
            user_id,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

// ---------------------------------------------------------------------------
// Release
// ---------------------------------------------------------------------------

/// A release was merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePayload {
    #[serde(deserialize_with = "release_action")]
    action: Action,
    text: String,
    release_id: ReleaseId,
}

impl ReleasePayload {
    pub(crate) fn new(action: Action, text: impl Into<String>, release_id: ReleaseId) -> Self {
        debug_assert_eq!(action.domain(), Domain::Release);
        Self {
            action,
            text: text.into(),
            release_id,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn release_id(&self) -> ReleaseId {
        self.release_id
    }
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// A story moved to another workflow stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStagePayload {
    #[serde(deserialize_with = "workflow_action")]
    action: Action,
    text: String,
    story_id: StoryId,
    workflow_name: WorkflowName,
    workflow_stage_name: WorkflowStageName,
}

impl WorkflowStagePayload {
    pub(crate) fn new(
        action: Action,
        text: impl Into<String>,
        story_id: StoryId,
        workflow_name: WorkflowName,
        workflow_stage_name: WorkflowStageName,
    ) -> Self {
        debug_assert_eq!(action.domain(), Domain::Workflow);
        Self {
            action,
            text: text.into(),
            story_id,
            workflow_name,
            workflow_stage_name,
        }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn story_id(&self) -> StoryId {
        self.story_id
    }

    pub fn workflow_name(&self) -> &WorkflowName {
        &self.workflow_name
    }

    pub fn workflow_stage_name(&self) -> &WorkflowStageName {
        &self.workflow_stage_name
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
