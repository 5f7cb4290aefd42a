//! Typed payload construction.
//!
//! Given a confirmed [`Classification`], extracts the fields the domain's
//! payload requires. Integer fields must be non-negative JSON integers and
//! string fields must be JSON strings; anything else is reported as
//! [`ClassificationError::InvalidField`] naming the offending key.

use serde_json::{Map, Value};

use crate::{
    AssetId, AssetPath, AssetPayload, BranchId, Classification, ClassificationError,
    DatasourceEntryPayload, DatasourceSlug, Domain, FullSlug, PipelinePayload, ReleaseId,
    ReleasePayload, StoryId, StoryPayload, UserId, UserPayload, WebhookPayload, WorkflowName,
    WorkflowStageName, WorkflowStagePayload,
};

/// Keys an asset URL may be read from, in order of preference.
const ASSET_URL_KEYS: [&str; 2] = ["asset_url", "filename"];

fn int_field(
    body: &Map<String, Value>,
    domain: Domain,
    field: &'static str,
) -> Result<u64, ClassificationError> {
    body.get(field)
        .and_then(Value::as_u64)
        .ok_or(ClassificationError::InvalidField { domain, field })
}

fn str_field<'a>(
    body: &'a Map<String, Value>,
    domain: Domain,
    field: &'static str,
) -> Result<&'a str, ClassificationError> {
    body.get(field)
        .and_then(Value::as_str)
        .ok_or(ClassificationError::InvalidField { domain, field })
}

fn asset_path(body: &Map<String, Value>) -> Option<AssetPath> {
    ASSET_URL_KEYS
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .find_map(AssetPath::from_asset_url)
}

/// Builds [`WebhookPayload`] variants from classified bodies.
pub struct PayloadFactory;

impl PayloadFactory {
    /// Builds the payload for `classification`.
    ///
    /// # Errors
    ///
    /// Returns [`ClassificationError::MissingBaseStructure`] if `text` is not
    /// a string and [`ClassificationError::InvalidField`] for the first
    /// required field that is missing or mistyped.
    pub fn try_build(
        classification: Classification,
        body: &Map<String, Value>,
    ) -> Result<WebhookPayload, ClassificationError> {
        let domain = classification.domain();
        let action = classification.action();
        let text = body
            .get("text")
            .and_then(Value::as_str)
            .ok_or(ClassificationError::MissingBaseStructure)?;

        let payload = match domain {
            Domain::Asset => WebhookPayload::Asset(AssetPayload::new(
                action,
                text,
                AssetId::new(int_field(body, domain, "asset_id")?),
                asset_path(body),
            )),
            Domain::Datasource => WebhookPayload::Datasource(DatasourceEntryPayload::new(
                action,
                text,
                DatasourceSlug::new(str_field(body, domain, "datasource_slug")?),
            )),
            Domain::Story => WebhookPayload::Story(StoryPayload::new(
                action,
                text,
                StoryId::new(int_field(body, domain, "story_id")?),
                FullSlug::new(str_field(body, domain, "full_slug")?),
            )),
            Domain::Pipeline => WebhookPayload::Pipeline(PipelinePayload::new(
                action,
                text,
                BranchId::new(int_field(body, domain, "branch_id")?),
            )),
            Domain::User => WebhookPayload::User(UserPayload::new(
                action,
                text,
                UserId::new(int_field(body, domain, "user_id")?),
            )),
            Domain::Release => WebhookPayload::Release(ReleasePayload::new(
                action,
                text,
                ReleaseId::new(int_field(body, domain, "release_id")?),
            )),
            Domain::Workflow => WebhookPayload::Workflow(WorkflowStagePayload::new(
                action,
                text,
                StoryId::new(int_field(body, domain, "story_id")?),
                WorkflowName::new(str_field(body, domain, "workflow_name")?),
                WorkflowStageName::new(str_field(body, domain, "workflow_stage_name")?),
            )),
        };

        Ok(payload)
    }

    /// Builds the payload for `classification`, logging and discarding the
    /// reason on failure.
    pub fn build(
        classification: Classification,
        body: &Map<String, Value>,
    ) -> Option<WebhookPayload> {
        Self::try_build(classification, body)
            .map_err(|err| err.log(body))
            .ok()
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
