//! Flash notification bus.
//!
//! Transient user-facing messages, published by whatever hits an error and
//! drained by the renderer. An explicit value passed around instead of a
//! hidden singleton; the queue is bounded and drops the oldest entry on
//! overflow.

use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Severity of a flash message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Info,
    Warn,
    Error,
}

/// One transient notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Bounded FIFO of pending notifications.
#[derive(Debug)]
pub struct FlashBus {
    queue: VecDeque<Flash>,
    capacity: usize,
}

impl FlashBus {
    pub fn new(capacity: usize) -> FlashBus {
        FlashBus {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Publish a notification, evicting the oldest when full.
    pub fn send(&mut self, level: FlashLevel, message: &str) {
        if self.queue.len() == self.capacity {
            let dropped = self.queue.pop_front();
            log::debug!("Flash queue full, dropping {dropped:?}");
        }
        self.queue.push_back(Flash {
            level,
            message: message.to_string(),
            created_at: Utc::now(),
        });
    }

    /// Take all pending notifications in publish order.
    pub fn drain(&mut self) -> Vec<Flash> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_drain_in_order() {
        let mut bus = FlashBus::new(5);
        bus.send(FlashLevel::Error, "first");
        bus.send(FlashLevel::Info, "second");
        let flashes = bus.drain();
        assert_eq!(flashes.len(), 2);
        assert_eq!(flashes[0].message, "first");
        assert_eq!(flashes[1].message, "second");
        assert!(bus.is_empty(), "Drain must empty the queue");
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let mut bus = FlashBus::new(2);
        bus.send(FlashLevel::Info, "one");
        bus.send(FlashLevel::Info, "two");
        bus.send(FlashLevel::Info, "three");
        let messages: Vec<String> = bus.drain().into_iter().map(|f| f.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }
}
