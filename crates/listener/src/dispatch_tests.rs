use super::*;
use ingestion::{DeliveryId, Timestamp, WebhookPayload};
use serde_json::json;
use std::sync::Mutex;

struct Recorder {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl WebhookSubscriber for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    async fn on_webhook(&self, event: &mut WebhookEvent) -> Result<(), DispatchError> {
        self.log.lock().unwrap().push(self.name.clone());
        if self.fail {
            return Err(DispatchError::SubscriberFailed {
                subscriber: self.name.clone(),
                message: "boom".into(),
            });
        }
        event.add_response_data(self.name.clone(), true);
        Ok(())
    }
}

fn recorder(name: &str, log: &Arc<Mutex<Vec<String>>>, fail: bool) -> Arc<dyn WebhookSubscriber> {
    Arc::new(Recorder {
        name: name.to_string(),
        log: Arc::clone(log),
        fail,
    })
}

fn event() -> WebhookEvent {
    WebhookEvent::new(
        DeliveryId::new_random(),
        Timestamp::now(),
        serde_json::from_value::<WebhookPayload>(json!({
            "domain": "story",
            "action": "story_published",
            "text": "published",
            "story_id": 1,
            "full_slug": "home",
        }))
        .unwrap(),
    )
}

#[tokio::test]
async fn test_subscribers_run_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let list = SubscriberList::new()
        .with_subscriber(recorder("first", &log, false))
        .with_subscriber(recorder("second", &log, false));

    let mut event = event();
    list.dispatch(&mut event).await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    assert_eq!(event.response_data().len(), 2);
}

#[tokio::test]
async fn test_dispatch_stops_at_first_failure() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let list = SubscriberList::new()
        .with_subscriber(recorder("failing", &log, true))
        .with_subscriber(recorder("never", &log, false));

    let err = list.dispatch(&mut event()).await.unwrap_err();

    assert_eq!(
        err,
        DispatchError::SubscriberFailed {
            subscriber: "failing".into(),
            message: "boom".into(),
        }
    );
    assert_eq!(*log.lock().unwrap(), vec!["failing"]);
}

#[tokio::test]
async fn test_empty_list_dispatches_nothing() {
    let list = SubscriberList::new();
    assert!(list.is_empty());
    assert!(list.dispatch(&mut event()).await.is_ok());
}
