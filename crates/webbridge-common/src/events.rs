use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Host-initiated events pushed from the bridge to every embedded page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum BridgeEvent {
    /// The in-memory key/value map changed. Carries the full snapshot.
    DataUpdated(serde_json::Value),
    /// A plain message for the page.
    MessageToPage(String),
    /// A named system-level event.
    SystemEvent { event_type: String, data: String },
    #[serde(other)]
    Unknown,
}

impl BridgeEvent {
    /// Name of the JS-side handler this event is delivered to.
    pub fn page_kind(&self) -> &'static str {
        match self {
            BridgeEvent::DataUpdated(_) => "dataUpdated",
            BridgeEvent::MessageToPage(_) => "messageToPage",
            BridgeEvent::SystemEvent { .. } => "systemEvent",
            BridgeEvent::Unknown => "unknown",
        }
    }

    /// Payload handed to the JS-side handler.
    pub fn page_payload(&self) -> serde_json::Value {
        match self {
            BridgeEvent::DataUpdated(snapshot) => snapshot.clone(),
            BridgeEvent::MessageToPage(text) => serde_json::Value::String(text.clone()),
            BridgeEvent::SystemEvent { event_type, data } => serde_json::json!({
                "event_type": event_type,
                "data": data,
            }),
            BridgeEvent::Unknown => serde_json::Value::Null,
        }
    }
}

pub struct EventBus {
    sender: broadcast::Sender<BridgeEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: BridgeEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(BridgeEvent::MessageToPage("hi".into()));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, BridgeEvent::MessageToPage(ref m) if m == "hi"));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(BridgeEvent::DataUpdated(serde_json::json!({})));

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert!(matches!(e1, BridgeEvent::DataUpdated(_)));
        assert!(matches!(e2, BridgeEvent::DataUpdated(_)));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        let count = bus.publish(BridgeEvent::MessageToPage("nobody".into()));
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn publish_returns_subscriber_count() {
        let bus = EventBus::new(16);
        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();

        let count = bus.publish(BridgeEvent::MessageToPage("x".into()));
        assert_eq!(count, 2);
    }

    #[test]
    fn page_kind_and_payload() {
        let event = BridgeEvent::SystemEvent {
            event_type: "theme".into(),
            data: "dark".into(),
        };
        assert_eq!(event.page_kind(), "systemEvent");
        assert_eq!(event.page_payload()["event_type"], "theme");
        assert_eq!(event.page_payload()["data"], "dark");

        let event = BridgeEvent::MessageToPage("hello".into());
        assert_eq!(event.page_kind(), "messageToPage");
        assert_eq!(event.page_payload(), serde_json::json!("hello"));
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomethingNew","data":null}"#;
        let event: BridgeEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, BridgeEvent::Unknown));
    }
}
