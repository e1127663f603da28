//! Broadcast event bus for distributing `SkillEvent` to multiple subscribers.
//!
//! Built on `tokio::sync::broadcast`. Publishing is synchronous, so skill
//! runs can emit events without an async runtime; publishing with no active
//! subscribers is a no-op.

use autolearn_types::event::SkillEvent;
use tokio::sync::broadcast;

/// Multi-consumer event bus for registry and run events.
///
/// Cloning the bus clones the sender, allowing multiple producers and
/// consumers on one channel.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SkillEvent>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create a new subscriber that will receive all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<SkillEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: SkillEvent) {
        let _ = self.sender.send(event);
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("receiver_count", &self.sender.receiver_count())
            .finish()
    }
}
