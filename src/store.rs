use crate::message::Message;
use chrono::{TimeZone, Utc};

const SAMPLE_MESSAGES: [(&str, &str); 10] = [
    ("Alice", "Great work team!"),
    ("Bob", "You're not meeting expectations"),
    ("Alice", "Let's collaborate on this"),
    ("Charlie", "This is unacceptable"),
    ("Bob", "Nice job yesterday"),
    ("Charlie", "Why can't you do anything right?"),
    ("Alice", "I appreciate your effort"),
    ("Bob", "You're useless"),
    ("Charlie", "We're making good progress"),
    ("Alice", "This place is toxic"),
];

/// Immutable, ordered collection of chat messages.
#[derive(Clone, Debug)]
pub struct SampleStore {
    messages: Vec<Message>,
}

impl SampleStore {
    /// The built-in sample: one message per day from 2023-01-01 onwards.
    pub fn builtin() -> Self {
        let messages = SAMPLE_MESSAGES
            .iter()
            .zip(1u32..)
            .filter_map(|(&(sender, text), day)| {
                Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0)
                    .single()
                    .map(|timestamp| Message::new(timestamp, sender, text))
            })
            .collect();

        Self::from_messages(messages)
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
