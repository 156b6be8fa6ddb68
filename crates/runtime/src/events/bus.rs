//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{ProgressEvent, PurchaseEvent, TickEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// One event per processed tick
    Tick,
    /// Accepted and rejected purchases
    Purchase,
    /// Milestones, tracker transitions and day changes
    Progress,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Tick(TickEvent),
    Purchase(PurchaseEvent),
    Progress(ProgressEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Tick(_) => Topic::Tick,
            Event::Purchase(_) => Topic::Purchase,
            Event::Progress(_) => Topic::Progress,
        }
    }
}

#[derive(Debug)]
struct Channels {
    tick: broadcast::Sender<Event>,
    purchase: broadcast::Sender<Event>,
    progress: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Tick => &self.tick,
            Topic::Purchase => &self.purchase,
            Topic::Progress => &self.progress,
        }
    }
}

/// Topic-based event bus
///
/// Every topic has its own broadcast channel, created up front. Clones share
/// the same channels.
#[derive(Debug, Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                tick: broadcast::channel(capacity).0,
                purchase: broadcast::channel(capacity).0,
                progress: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    ///
    /// Best-effort: an event with no subscribers is dropped.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn routes_events_by_topic() {
        let bus = EventBus::new();
        let mut progress = bus.subscribe(Topic::Progress);
        let mut ticks = bus.subscribe(Topic::Tick);

        bus.publish(Event::Progress(ProgressEvent::DayChanged { from: 1, to: 2 }));

        let event = progress.recv().await.unwrap();
        assert_eq!(event.topic(), Topic::Progress);
        assert!(ticks.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(0);
        bus.publish(Event::Progress(ProgressEvent::LayerUnlocked {
            layer: "trees".into(),
        }));
    }
}
