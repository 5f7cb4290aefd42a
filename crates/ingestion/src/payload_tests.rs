use super::*;
use serde_json::json;

fn story() -> WebhookPayload {
    WebhookPayload::Story(StoryPayload::new(
        Action::StoryPublished,
        "Story published",
        StoryId::new(555),
        FullSlug::new("en/home"),
    ))
}

#[test]
fn test_payload_serialises_with_domain_tag() {
    assert_eq!(
        serde_json::to_value(story()).unwrap(),
        json!({
            "domain": "story",
            "action": "story_published",
            "text": "Story published",
            "story_id": 555,
            "full_slug": "en/home",
        })
    );
}

#[test]
fn test_payload_deserialises_from_tagged_form() {
    let value = serde_json::to_value(story()).unwrap();
    let decoded: WebhookPayload = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, story());
}

#[test]
fn test_common_accessors() {
    let payload = story();
    assert_eq!(payload.action(), Action::StoryPublished);
    assert_eq!(payload.domain(), Domain::Story);
    assert_eq!(payload.text(), "Story published");
}

#[test]
fn test_only_replaced_and_deleted_assets_invalidate_the_cache() {
    let asset = |action| AssetPayload::new(action, "", AssetId::new(1), None);

    assert!(asset(Action::AssetReplaced).invalidates_cached_file());
    assert!(asset(Action::AssetDeleted).invalidates_cached_file());
    assert!(!asset(Action::AssetCreated).invalidates_cached_file());
    assert!(!asset(Action::AssetRestored).invalidates_cached_file());
}

fn built(action: Action) -> WebhookPayload {
    let body = crate::test_support::minimal_payload(action);
    crate::PayloadFactory::try_build(crate::Classification::from_action(action), &body)
        .expect("minimal payload builds")
}

#[test]
fn test_deserialising_rejects_action_from_another_domain() {
    for source in Action::ALL {
        let mut value = serde_json::to_value(built(source)).unwrap();

        for action in Action::ALL {
            value["action"] = serde_json::to_value(action).unwrap();
            let decoded = serde_json::from_value::<WebhookPayload>(value.clone());

            if action.domain() == source.domain() {
                let payload = decoded.unwrap_or_else(|e| panic!("{action:?}: {e}"));
                assert_eq!(payload.action(), action);
            } else {
                let err = decoded.expect_err("cross-domain action must be rejected");
                assert!(
                    err.to_string().contains("does not belong to the"),
                    "{source:?} with {action:?}: {err}"
                );
            }
        }
    }
}

#[test]
fn test_asset_tag_with_story_action_is_rejected() {
    let value = json!({
        "domain": "asset",
        "action": "story_published",
        "text": "x",
        "asset_id": 1,
        "asset_path": null,
    });

    assert!(serde_json::from_value::<WebhookPayload>(value).is_err());
}

#[test]
fn test_variant_struct_checks_its_action_too() {
    let value = json!({
        "action": "user_removed",
        "text": "x",
        "asset_id": 1,
        "asset_path": null,
    });

    assert!(serde_json::from_value::<AssetPayload>(value).is_err());
}

#[test]
fn test_factory_payloads_keep_action_and_domain_in_step() {
    for action in Action::ALL {
        let payload = built(action);
        assert_eq!(payload.action().domain(), payload.domain());
    }
}
