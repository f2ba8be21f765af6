//! Textual key specs: symbol shorthands and alias words.

use crate::Key;

/// Keys written as the character they type.
const SYMBOLS: &[(Key, &str)] = &[
    (Key::Digit0, "0"),
    (Key::Digit1, "1"),
    (Key::Digit2, "2"),
    (Key::Digit3, "3"),
    (Key::Digit4, "4"),
    (Key::Digit5, "5"),
    (Key::Digit6, "6"),
    (Key::Digit7, "7"),
    (Key::Digit8, "8"),
    (Key::Digit9, "9"),
    (Key::Space, " "),
    (Key::Minus, "-"),
    (Key::Equal, "="),
    (Key::LeftBracket, "["),
    (Key::RightBracket, "]"),
    (Key::Backslash, "\\"),
    (Key::Semicolon, ";"),
    (Key::Quote, "'"),
    (Key::Comma, ","),
    (Key::Period, "."),
    (Key::Slash, "/"),
    (Key::Grave, "`"),
];

/// Lowercase words accepted when parsing but never produced by `to_spec`.
const ALIASES: &[(&str, Key)] = &[
    ("cmd", Key::Command),
    ("meta", Key::Command),
    ("super", Key::Command),
    ("ctrl", Key::Control),
    ("opt", Key::Option),
    ("alt", Key::Option),
    ("enter", Key::Return),
    ("ret", Key::Return),
    ("backspace", Key::Delete),
    ("del", Key::ForwardDelete),
    ("esc", Key::Escape),
    ("space", Key::Space),
    ("left", Key::LeftArrow),
    ("arrowleft", Key::LeftArrow),
    ("right", Key::RightArrow),
    ("arrowright", Key::RightArrow),
    ("up", Key::UpArrow),
    ("arrowup", Key::UpArrow),
    ("down", Key::DownArrow),
    ("arrowdown", Key::DownArrow),
    ("pgup", Key::PageUp),
    ("pgdn", Key::PageDown),
];

/// Exact symbol lookup for digits, punctuation and space.
pub(crate) fn from_symbol(s: &str) -> Option<Key> {
    SYMBOLS.iter().find(|(_, sym)| *sym == s).map(|(k, _)| *k)
}

impl Key {
    /// Parses a key specification string into a `Key`.
    ///
    /// Tries a case-insensitive variant name, then the symbol shorthands for
    /// digits, punctuation and space, then alias words such as esc, enter,
    /// arrowdown, pgup and cmd.
    pub fn from_spec(s: &str) -> Option<Self> {
        Self::from_name(s).or_else(|| from_symbol(s)).or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(s))
                .map(|(_, k)| *k)
        })
    }

    /// Returns the key specification string for this `Key`.
    ///
    /// Symbol keys use their character; everything else is the lowercased
    /// variant name.
    pub fn to_spec(self) -> String {
        SYMBOLS
            .iter()
            .find(|(k, _)| *k == self)
            .map_or_else(|| self.name().to_ascii_lowercase(), |(_, sym)| (*sym).to_string())
    }
}
