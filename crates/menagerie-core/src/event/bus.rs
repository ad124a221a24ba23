// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A generic, thread-safe, unbounded event channel.
///
/// Publishing never blocks. Events are retained until drained, so a consumer that
/// only looks once per frame still sees everything published in between.
#[derive(Debug)]
pub struct EventBus<T: Send + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Send + 'static> EventBus<T> {
    /// Creates a new EventBus with an unbounded channel.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Publishes an event, logging an error if every receiver is gone.
    pub fn publish(&self, event: T) {
        log::trace!("Publishing an event.");

        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to send event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sender end of the channel.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns a clone of the receiver end of the channel.
    ///
    /// Receivers compete for events: each event is delivered to exactly one of them.
    pub fn subscribe(&self) -> flume::Receiver<T> {
        self.receiver.clone()
    }

    /// Removes and returns every event currently queued.
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of queued events.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Returns `true` if no events are queued.
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

impl<T: Send + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{thread, time::Duration};

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Loaded(&'static str),
        Failed(&'static str),
        Settled { loaded: usize },
    }

    #[test]
    fn drain_returns_events_in_publish_order() {
        let bus = EventBus::new();
        bus.publish(TestEvent::Loaded("a.glb"));
        bus.publish(TestEvent::Failed("b.glb"));
        bus.publish(TestEvent::Settled { loaded: 1 });

        assert_eq!(bus.len(), 3);
        assert_eq!(
            bus.drain(),
            vec![
                TestEvent::Loaded("a.glb"),
                TestEvent::Failed("b.glb"),
                TestEvent::Settled { loaded: 1 },
            ]
        );
        assert!(bus.is_empty());
    }

    #[test]
    fn sender_clone_publishes_from_another_thread() {
        let bus = EventBus::new();
        let sender = bus.sender();

        let handle = thread::spawn(move || {
            sender
                .send(TestEvent::Loaded("c.glb"))
                .expect("Send from thread failed");
        });
        handle.join().expect("Thread join failed");

        let received = bus
            .subscribe()
            .recv_timeout(Duration::from_secs(1))
            .expect("Event should arrive");
        assert_eq!(received, TestEvent::Loaded("c.glb"));
    }

    #[test]
    fn drain_on_empty_bus_is_empty() {
        let bus = EventBus::<TestEvent>::default();
        assert!(bus.drain().is_empty());
    }
}
