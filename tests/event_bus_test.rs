use entity_lookup::events::*;
use entity_lookup::query::SearchType;
use std::time::Duration;
use tokio::time::timeout;

fn started(source: &EventSource) -> LookupEvent {
    LookupEvent::search_started(source.clone(), "acme", SearchType::Name, 1)
}

#[tokio::test]
async fn test_event_bus_creation() {
    let bus = LookupEventBus::new(16);
    assert_eq!(bus.subscriber_count(), 0);
    assert!(!bus.has_subscribers());
    assert_eq!(bus.config().capacity, 16);
}

#[tokio::test]
async fn test_publish_with_no_subscribers() {
    let bus = LookupEventBus::new(16);
    let source = EventSource::new("abnLookup");

    match bus.publish(started(&source)) {
        Err(EventBusError::NoSubscribers) => {}
        other => panic!("Expected EventBusError::NoSubscribers, got: {other:?}"),
    }
    assert_eq!(bus.metrics().snapshot().events_undelivered, 1);
}

#[tokio::test]
async fn test_subscribe_and_publish() {
    let bus = LookupEventBus::new(16);
    let mut receiver = bus.subscribe();
    let source = EventSource::new("abnLookup");
    let event = started(&source);

    assert_eq!(bus.publish(event.clone()), Ok(1));

    let received = match timeout(Duration::from_millis(100), receiver.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Failed to receive event: {e}"),
        Err(_) => panic!("Timed out waiting for event"),
    };
    assert_eq!(received, event);
    assert_eq!(received.source().instance_id, source.instance_id);
}

#[tokio::test]
async fn test_multiple_subscribers() {
    let bus = LookupEventBus::new(16);
    let mut first = bus.subscribe();
    let mut second = bus.subscribe();
    let source = EventSource::new("abnLookup");

    assert_eq!(bus.publish(LookupEvent::selection_cleared(source)), Ok(2));
    assert_eq!(first.recv().await.unwrap().event_name(), "entitychanged");
    assert_eq!(second.recv().await.unwrap().event_name(), "entitychanged");
    assert_eq!(bus.metrics().snapshot().peak_subscribers, 2);
}

#[tokio::test]
async fn test_filtered_receiver() {
    let bus = LookupEventBus::new(16);
    let mut errors = bus.subscribe_filtered(|e| e.event_name() == "error");
    let source = EventSource::new("abnLookup");
    let failure = LookupEvent::search_failed(
        source.clone(),
        "Search failed. Please try again.",
        FailureKind::Business,
        None,
        None,
    );

    assert!(!errors.would_receive(&started(&source)));
    assert!(errors.would_receive(&failure));

    let delivered = bus.publish_batch([started(&source), failure.clone(), started(&source)]);
    assert_eq!(delivered, 3);

    assert_eq!(errors.recv().await.unwrap(), failure);
    assert_eq!(errors.try_recv().unwrap(), None);
}

#[tokio::test]
async fn test_metrics_report() {
    let bus = LookupEventBus::new(16);
    let _receiver = bus.subscribe();
    let source = EventSource::new("abnLookup");
    bus.publish(started(&source)).unwrap();

    let report = bus.metrics_report();
    assert!(report.contains("Events Published: 1"));
    assert!(report.contains("Delivery Rate: 100.00%"));

    let quiet = LookupEventBus::with_config(EventBusConfig {
        capacity: 4,
        enable_metrics: false,
    });
    assert_eq!(quiet.metrics_report(), "Metrics disabled");
}

#[tokio::test]
async fn test_event_wire_shape_is_flat() {
    let bus = LookupEventBus::new(16);
    let mut receiver = bus.subscribe();
    let source = EventSource::new("abnLookup");

    bus.publish(LookupEvent::selection_cleared(source.clone()))
        .expect("one subscriber");
    let event = receiver.recv().await.expect("event delivered");

    let value = serde_json::to_value(&event).expect("event serializes");
    assert_eq!(value["componentName"], "abnLookup");
    assert_eq!(value["instanceId"], source.instance_id.to_string());
    assert_eq!(value["action"], "cleared");
    assert!(value["timestamp"].is_string());
    assert!(value.get("source").is_none());

    let parsed: LookupEvent = serde_json::from_value(value).expect("event deserializes");
    assert_eq!(parsed, event);
}
