use std::collections::HashSet;

use crate::{Chord, Key, Modifier};

/// A key press delivered by the host event loop.
///
/// Handlers that act on the event call [`KeyEvent::prevent_default`] so the
/// host suppresses its own behavior and later handlers can see the event was
/// consumed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KeyEvent {
    /// The pressed key.
    pub key: Key,
    /// Modifiers held while the key was pressed.
    pub modifiers: HashSet<Modifier>,
    /// Set once a handler has consumed the event.
    default_prevented: bool,
}

impl KeyEvent {
    /// A press of `key` with no modifiers held.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: HashSet::new(),
            default_prevented: false,
        }
    }

    /// Adds a held modifier (builder).
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    /// Parses a chord spec such as "ctrl+k" into an unconsumed event.
    pub fn parse(spec: &str) -> Option<Self> {
        Chord::parse(spec).map(Self::from)
    }

    /// True when `modifier` was held.
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Marks the event as consumed.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// True once some handler consumed the event.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl From<Chord> for KeyEvent {
    fn from(chord: Chord) -> Self {
        Self {
            key: chord.key,
            modifiers: chord.modifiers,
            default_prevented: false,
        }
    }
}
