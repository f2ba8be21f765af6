//! keycode: the key vocabulary shared by the palette crates.
//!
//! - `Key`: platform-neutral keys the palette cares about (letters, digits,
//!   punctuation, navigation and modifier keys).
//! - `Modifier`: modifier keys with conversions to/from `Key`.
//! - `Chord`: a modifier set plus a key, parsed from specs like "cmd+k".
//! - `KeyEvent`: a key press delivered by the host, with a consumable default.
//!
//! Spec helpers (`Key::from_spec`, `Key::to_spec`, `Modifier::from_spec`,
//! `Modifier::to_spec`) are case-insensitive and accept common aliases.

mod key;
pub use key::Key;

mod spec;

mod modifiers;
pub use modifiers::Modifier;

mod chord;
pub use chord::Chord;

mod event;
pub use event::KeyEvent;
