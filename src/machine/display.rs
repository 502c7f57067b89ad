//! What the machine shows on its display.
//!
//! The machine only records a [`MessageKey`] or an amount; turning keys into
//! text is left to a [`MessageBundle`] at the edge.

use std::collections::HashMap;

use crate::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Hello,
    NoProductOnShelf,
    ShelfOutOfRange,
    CapacityExceeded,
    NoChangeAvailable,
}

impl MessageKey {
    pub const ALL: [MessageKey; 5] = [
        MessageKey::Hello,
        MessageKey::NoProductOnShelf,
        MessageKey::ShelfOutOfRange,
        MessageKey::CapacityExceeded,
        MessageKey::NoChangeAvailable,
    ];

    /// Stable identifier used to look the message up in a bundle.
    pub const fn id(self) -> &'static str {
        match self {
            MessageKey::Hello => "hello",
            MessageKey::NoProductOnShelf => "no_product_on_shelf",
            MessageKey::ShelfOutOfRange => "shelf_out_of_range",
            MessageKey::CapacityExceeded => "capacity_exceeded",
            MessageKey::NoChangeAvailable => "no_change_available",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Message(MessageKey),
    /// A price or the amount still owed.
    Amount(Amount),
}

impl Default for Display {
    fn default() -> Self {
        Display::Message(MessageKey::Hello)
    }
}

/// Message texts keyed by [`MessageKey::id`].
#[derive(Debug, Clone, Default)]
pub struct MessageBundle {
    messages: HashMap<String, String>,
}

impl MessageBundle {
    pub fn english() -> Self {
        [
            ("hello", "Hello! Please select a product."),
            ("no_product_on_shelf", "Sorry, this shelf is empty."),
            ("shelf_out_of_range", "There is no such shelf."),
            (
                "capacity_exceeded",
                "Coin box is full. Please take your money back.",
            ),
            (
                "no_change_available",
                "Sorry, no change available. Please take your money back.",
            ),
        ]
        .into_iter()
        .collect()
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(id.into(), text.into());
    }

    pub fn get(&self, key: MessageKey) -> Option<&str> {
        self.messages.get(key.id()).map(String::as_str)
    }

    /// Text to show for `display`; unknown keys fall back to the key id.
    pub fn render(&self, display: &Display) -> String {
        match display {
            Display::Message(key) => self.get(*key).unwrap_or(key.id()).to_string(),
            Display::Amount(amount) => amount.to_string(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageBundle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bundle = MessageBundle::default();
        for (id, text) in iter {
            bundle.insert(id, text);
        }
        bundle
    }
}
