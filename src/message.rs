//! Pending direct messages, delivered oldest first.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub content: String,
}

impl Message {
    pub fn new(from: &str, to: &str, content: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            content: content.to_string(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "From: {}  ->  To: {}  |  \"{}\"", self.from, self.to, self.content)
    }
}

/// FIFO queue of messages waiting for delivery.
#[derive(Debug, Clone, Default)]
pub struct MessageQueue {
    pending: VecDeque<Message>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.pending.push_back(message);
    }

    /// Takes the oldest message off the queue.
    pub fn pop(&mut self) -> Option<Message> {
        self.pending.pop_front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
