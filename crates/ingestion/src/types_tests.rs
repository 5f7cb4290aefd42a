use super::*;
use chrono::TimeZone;

#[test]
fn test_timestamp_displays_as_rfc3339() {
    let received = Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();
    let ts = Timestamp::from_utc(received);

    assert_eq!(ts.to_string(), "2024-05-17T09:30:00+00:00");
    assert_eq!(ts.as_datetime(), received);
}

#[test]
fn test_secret_debug_never_shows_the_value() {
    assert_eq!(format!("{:?}", WebhookSecret::new("s3cr3t")), "WebhookSecret(<redacted>)");
    assert_eq!(format!("{:?}", WebhookSecret::new("")), "WebhookSecret(<empty>)");
}
