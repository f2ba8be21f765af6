use std::{collections::HashSet, fmt};

use crate::{Key, Modifier};

/// A modifier set plus a single key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chord {
    /// Modifiers held for this chord.
    pub modifiers: HashSet<Modifier>,
    /// The non-modifier key.
    pub key: Key,
}

/// Display order for modifiers.
const MODIFIER_ORDER: [Modifier; 4] = [
    Modifier::Command,
    Modifier::Option,
    Modifier::Control,
    Modifier::Shift,
];

impl Chord {
    /// A chord of one modifier and a key.
    pub fn new(modifier: Modifier, key: Key) -> Self {
        Self {
            modifiers: HashSet::from([modifier]),
            key,
        }
    }

    /// Parses specs like "shift+cmd+k", case-insensitively.
    ///
    /// The last `+`-separated component is the key; the rest are modifiers
    /// (aliases accepted). A bare `" "` key component means Space. Empty
    /// modifier components are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let (mods, key_raw) = match s.rsplit_once('+') {
            Some((mods, key)) => (Some(mods), key),
            None => (None, s),
        };
        let key = match key_raw {
            " " => Key::Space,
            raw => Key::from_spec(raw.trim())?,
        };
        let mut modifiers = HashSet::new();
        if let Some(mods) = mods {
            for part in mods.split('+').map(str::trim) {
                if part.is_empty() {
                    return None;
                }
                modifiers.insert(Modifier::from_spec(part)?);
            }
        }
        Some(Self { modifiers, key })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in MODIFIER_ORDER {
            if self.modifiers.contains(&m) {
                write!(f, "{}+", m.to_spec())?;
            }
        }
        f.write_str(&self.key.to_spec())
    }
}
