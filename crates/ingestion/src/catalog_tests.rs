use super::*;
use std::collections::HashSet;

#[test]
fn test_every_action_is_in_the_table_exactly_once() {
    for action in Action::ALL {
        let rows = ActionCatalog::TABLE
            .iter()
            .filter(|e| e.action == action)
            .count();
        assert_eq!(rows, 1, "{action:?} must appear exactly once");
    }
    assert_eq!(ActionCatalog::TABLE.len(), Action::ALL.len());
}

#[test]
fn test_domain_and_literal_pairs_are_unique() {
    let pairs: HashSet<_> = ActionCatalog::TABLE
        .iter()
        .map(|e| (e.domain, e.literal))
        .collect();
    assert_eq!(pairs.len(), ActionCatalog::TABLE.len());
}

#[test]
fn test_table_rows_agree_with_action_metadata() {
    for row in ActionCatalog::TABLE {
        assert_eq!(row.action.domain(), row.domain);
        assert_eq!(row.action.literal(), row.literal);
    }
}

#[test]
fn test_lookup_is_scoped_to_the_domain() {
    assert_eq!(
        ActionCatalog::lookup(Domain::Story, "deleted"),
        Some(Action::StoryDeleted)
    );
    assert_eq!(
        ActionCatalog::lookup(Domain::Asset, "deleted"),
        Some(Action::AssetDeleted)
    );
    assert_eq!(ActionCatalog::lookup(Domain::User, "deleted"), None);
    assert_eq!(ActionCatalog::lookup(Domain::Story, "stage.changed"), None);
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert_eq!(ActionCatalog::lookup(Domain::Story, "Published"), None);
}

#[test]
fn test_actions_for_each_domain() {
    let story: Vec<_> = ActionCatalog::actions_for(Domain::Story).collect();
    assert_eq!(
        story,
        vec![
            Action::StoryDeleted,
            Action::StoryMoved,
            Action::StoryPublished,
            Action::StoryUnpublished,
        ]
    );

    let workflow: Vec<_> = ActionCatalog::actions_for(Domain::Workflow).collect();
    assert_eq!(workflow, vec![Action::WorkflowStageChanged]);

    for domain in ActionCatalog::DOMAIN_PRIORITY {
        assert!(
            ActionCatalog::actions_for(domain).next().is_some(),
            "{domain} has no actions"
        );
    }
}

#[test]
fn test_workflow_is_tested_before_story() {
    let position = |d: Domain| {
        ActionCatalog::DOMAIN_PRIORITY
            .iter()
            .position(|p| *p == d)
            .expect("domain listed")
    };
    assert!(position(Domain::Workflow) < position(Domain::Story));
    assert_eq!(ActionCatalog::DOMAIN_PRIORITY[0], Domain::Workflow);
}

#[test]
fn test_priority_lists_every_domain_once() {
    let domains: HashSet<_> = ActionCatalog::DOMAIN_PRIORITY.iter().collect();
    assert_eq!(domains.len(), 7);
}

#[test]
fn test_action_serialises_as_snake_case() {
    assert_eq!(
        serde_json::to_value(Action::WorkflowStageChanged).unwrap(),
        serde_json::json!("workflow_stage_changed")
    );
    assert_eq!(Action::StoryPublished.to_string(), "story:published");
}
