//! Fixtures shared by the unit tests.

use serde_json::{json, Map, Value};

use crate::{Action, Domain};

pub(crate) const SPACE_ID: u64 = 123456;

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be an object, got {other}"),
    }
}

/// The smallest body Storyblok could send for `action`.
pub(crate) fn minimal_payload(action: Action) -> Map<String, Value> {
    let mut body = object(json!({
        "text": format!("The {} webhook", action),
        "action": action.literal(),
        "space_id": SPACE_ID,
    }));

    let fields = match action.domain() {
        Domain::Asset => json!({ "asset_id": 987 }),
        Domain::Datasource => json!({ "datasource_slug": "colors" }),
        Domain::Story => json!({ "story_id": 555, "full_slug": "en/blog/post" }),
        Domain::Pipeline => json!({ "branch_id": 42 }),
        Domain::User => json!({ "user_id": 7 }),
        Domain::Release => json!({ "release_id": 3 }),
        Domain::Workflow => json!({
            "story_id": 555,
            "workflow_name": "Default",
            "workflow_stage_name": "Review",
        }),
    };
    body.extend(object(fields));
    body
}

/// `minimal_payload` serialised to bytes.
pub(crate) fn minimal_body_bytes(action: Action) -> Vec<u8> {
    serde_json::to_vec(&Value::Object(minimal_payload(action))).expect("serialisable fixture")
}
