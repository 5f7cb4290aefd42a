use super::*;
use crate::authenticator::sign;
use crate::test_support::{minimal_body_bytes, SPACE_ID};
use crate::{Action, ClassificationError, SpaceId};

fn pipeline(config: WebhookConfig) -> IngestionPipeline {
    IngestionPipeline::new(Arc::new(config)).expect("valid config")
}

fn secured() -> IngestionPipeline {
    pipeline(WebhookConfig::new(SpaceId::new(SPACE_ID)).with_secret("s3cr3t"))
}

#[test]
fn test_signed_request_is_accepted() {
    let body = minimal_body_bytes(Action::StoryPublished);
    let signature = sign("s3cr3t", &body).unwrap();

    let outcome = secured().ingest(&InboundRequest::new(&body).with_signature(&signature));

    let payload = outcome.payload().expect("accepted");
    assert_eq!(payload.action(), Action::StoryPublished);
}

#[test]
fn test_rejected_request_is_never_parsed() {
    // Not JSON at all: a rejected request must not reach the decoder.
    let body = b"definitely not json";

    let outcome = secured().ingest(&InboundRequest::new(body).with_signature("bad"));

    assert_eq!(
        outcome,
        IngestionOutcome::Rejected(AuthenticationFailure::SignatureMismatch)
    );
}

#[test]
fn test_both_credentials_are_rejected() {
    let body = minimal_body_bytes(Action::StoryPublished);
    let signature = sign("s3cr3t", &body).unwrap();

    let outcome = secured().ingest(
        &InboundRequest::new(&body)
            .with_signature(&signature)
            .with_url_secret("s3cr3t"),
    );

    assert_eq!(
        outcome,
        IngestionOutcome::Rejected(AuthenticationFailure::BothCredentialsPresent)
    );
    assert!(outcome.is_rejected());
}

#[test]
fn test_url_secret_fallback() {
    let body = minimal_body_bytes(Action::AssetCreated);
    let config = WebhookConfig::new(SpaceId::new(SPACE_ID))
        .with_secret("url secret")
        .with_url_secret_allowed(true);

    let outcome = pipeline(config).ingest(&InboundRequest::new(&body).with_url_secret("url secret"));

    assert!(matches!(
        outcome.into_payload(),
        Some(WebhookPayload::Asset(_))
    ));
}

#[test]
fn test_unsecured_deployment_accepts_unsigned_requests() {
    let body = minimal_body_bytes(Action::ReleaseMerged);
    let outcome = pipeline(WebhookConfig::new(SpaceId::new(SPACE_ID)))
        .ingest(&InboundRequest::new(&body));

    assert!(outcome.payload().is_some());
}

#[test]
fn test_invalid_json_is_ignored() {
    let outcome =
        pipeline(WebhookConfig::new(SpaceId::new(SPACE_ID))).ingest(&InboundRequest::new(b"{"));

    assert!(matches!(
        outcome,
        IngestionOutcome::Ignored(IgnoreReason::InvalidJson { .. })
    ));
}

#[test]
fn test_non_object_json_is_ignored() {
    let outcome = pipeline(WebhookConfig::new(SpaceId::new(SPACE_ID)))
        .ingest(&InboundRequest::new(b"[1, 2, 3]"));

    assert!(matches!(
        outcome,
        IngestionOutcome::Ignored(IgnoreReason::InvalidJson { .. })
    ));
}

#[test]
fn test_other_space_is_ignored() {
    let body = minimal_body_bytes(Action::StoryPublished);
    let outcome = pipeline(WebhookConfig::new(SpaceId::new(1))).ingest(&InboundRequest::new(&body));

    assert!(matches!(
        outcome,
        IngestionOutcome::Ignored(IgnoreReason::Classification(
            ClassificationError::SpaceMismatch { .. }
        ))
    ));
    assert_eq!(outcome.payload(), None);
}

#[test]
fn test_unknown_action_is_ignored_as_hard_error() {
    let body = br#"{"text":"x","action":"archived","space_id":123456,"story_id":1,"full_slug":"a"}"#;
    let outcome = pipeline(WebhookConfig::new(SpaceId::new(SPACE_ID))).ingest(&InboundRequest::new(body));

    let IngestionOutcome::Ignored(IgnoreReason::Classification(err)) = outcome else {
        panic!("expected ignored outcome");
    };
    assert!(err.is_hard());
}

#[test]
fn test_invalid_field_is_ignored() {
    let body = br#"{"text":"x","action":"published","space_id":123456,"story_id":1}"#;
    let outcome = pipeline(WebhookConfig::new(SpaceId::new(SPACE_ID))).ingest(&InboundRequest::new(body));

    assert_eq!(
        outcome,
        IngestionOutcome::Ignored(IgnoreReason::Classification(
            ClassificationError::InvalidField {
                domain: crate::Domain::Story,
                field: "full_slug",
            }
        ))
    );
}

#[test]
fn test_zero_space_id_config_is_rejected() {
    let result = IngestionPipeline::new(Arc::new(WebhookConfig::new(SpaceId::new(0))));
    assert_eq!(result.err(), Some(ConfigurationError::InvalidSpaceId));
}

#[test]
fn test_pipeline_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<IngestionPipeline>();
    assert_send_sync::<IngestionOutcome>();
}

#[test]
fn test_authentication_runs_without_decoding() {
    let body: &[u8] = b"not json";
    let signature = sign("s3cr3t", body).unwrap();
    let pipeline = secured();

    let authenticated = pipeline
        .authenticate(&InboundRequest::new(body).with_signature(&signature))
        .expect("signed request");
    assert_eq!(authenticated.as_bytes(), body);

    assert!(matches!(
        pipeline.ingest_authenticated(authenticated),
        Err(IgnoreReason::InvalidJson { .. })
    ));
}

#[test]
fn test_authenticate_reports_the_failed_rule() {
    let err = secured()
        .authenticate(&InboundRequest::new(b"{}").with_url_secret("s3cr3t"))
        .unwrap_err();

    assert_eq!(err, AuthenticationFailure::UrlSecretNotAllowed);
}
