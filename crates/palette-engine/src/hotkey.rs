//! Global open/close hotkey: parsing, matching and registration lifetime.

use std::{collections::HashMap, fmt, sync::Arc};

use keycode::{Chord, Key, KeyEvent, Modifier};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Host platform, used to pick the primary modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// macOS: the primary modifier is Command.
    Mac,
    /// Everything else: the primary modifier is Control.
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Mac
        } else {
            Self::Other
        }
    }

    /// Command on Mac, Control elsewhere.
    pub fn primary_modifier(self) -> Modifier {
        match self {
            Self::Mac => Modifier::Command,
            Self::Other => Modifier::Control,
        }
    }
}

/// Modifier tokens accepted in a hotkey spec. All mean "primary modifier".
const MODIFIER_TOKENS: &[&str] = &["mod", "cmd", "command", "meta", "super", "ctrl", "control"];

/// A parsed `"<modifier>+<key>"` hotkey bound to a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    /// Resolved primary modifier.
    modifier: Modifier,
    /// The single non-modifier key.
    key: Key,
}

impl Hotkey {
    /// Parse `spec` for `platform`.
    ///
    /// The spec is trimmed and case-insensitive. It must hold exactly one
    /// modifier token from the accepted set and exactly one single-character
    /// key, joined by `+`.
    pub fn parse(spec: &str, platform: Platform) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidHotkey {
            spec: spec.to_string(),
            reason: reason.to_string(),
        };
        let normalized = spec.trim().to_lowercase();
        let parts: Vec<&str> = normalized.split('+').map(str::trim).collect();
        let [modifier, key] = parts.as_slice() else {
            return Err(invalid("expected exactly one modifier and one key"));
        };
        if !MODIFIER_TOKENS.contains(modifier) {
            return Err(invalid("unknown modifier"));
        }
        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(invalid("key must be a single character"));
        };
        let key = Key::from_char(c).ok_or_else(|| invalid("unsupported key"))?;
        Ok(Self {
            modifier: platform.primary_modifier(),
            key,
        })
    }

    /// The key half of the hotkey.
    pub fn key(&self) -> Key {
        self.key
    }

    /// The resolved modifier.
    pub fn modifier(&self) -> Modifier {
        self.modifier
    }

    /// The chord to register with a [`HotkeyApi`].
    pub fn chord(&self) -> Chord {
        Chord::new(self.modifier, self.key)
    }

    /// True when the primary modifier is held and the key matches.
    ///
    /// Extra modifiers do not prevent a match.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.key == self.key && event.has_modifier(self.modifier)
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chord())
    }
}

/// Identifier handed out by a [`HotkeyApi`] for one registration.
pub type RegistrationId = u32;

/// Minimal hotkey backend used by the palette.
pub trait HotkeyApi: Send + Sync {
    /// Start listening for `chord`.
    fn register(&self, chord: &Chord) -> Result<RegistrationId>;
    /// Stop listening for a previous registration.
    fn unregister(&self, id: RegistrationId) -> Result<()>;
}

/// In-process backend that records registrations.
///
/// Key events are delivered by the host through `Palette::handle_key`; this
/// backend only tracks which chords are live.
#[derive(Debug, Default)]
pub struct LocalHotkeys {
    /// Registration table and counters.
    state: Mutex<LocalState>,
}

/// Mutable state behind [`LocalHotkeys`].
#[derive(Debug, Default)]
struct LocalState {
    /// Next id to hand out.
    next_id: RegistrationId,
    /// Live registrations.
    active: HashMap<RegistrationId, Chord>,
    /// Successful `unregister` calls so far.
    unregister_calls: usize,
}

impl LocalHotkeys {
    /// An empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations.
    pub fn active(&self) -> usize {
        self.state.lock().active.len()
    }

    /// Number of successful removals.
    pub fn unregister_calls(&self) -> usize {
        self.state.lock().unregister_calls
    }

    /// True when `chord` has a live registration.
    pub fn is_registered(&self, chord: &Chord) -> bool {
        self.state.lock().active.values().any(|c| c == chord)
    }
}

impl HotkeyApi for LocalHotkeys {
    fn register(&self, chord: &Chord) -> Result<RegistrationId> {
        let mut st = self.state.lock();
        st.next_id = st.next_id.wrapping_add(1);
        let id = st.next_id;
        st.active.insert(id, chord.clone());
        Ok(id)
    }

    fn unregister(&self, id: RegistrationId) -> Result<()> {
        let mut st = self.state.lock();
        if st.active.remove(&id).is_none() {
            return Err(Error::InvalidRegistration);
        }
        st.unregister_calls += 1;
        Ok(())
    }
}

/// A live hotkey registration; released explicitly or on drop.
pub struct Registration {
    /// Backend the registration lives in.
    api: Arc<dyn HotkeyApi>,
    /// `None` once released.
    id: Option<RegistrationId>,
}

impl Registration {
    /// Register `hotkey` with `api`.
    pub fn acquire(api: Arc<dyn HotkeyApi>, hotkey: &Hotkey) -> Result<Self> {
        let id = api.register(&hotkey.chord())?;
        debug!(id, hotkey = %hotkey, "hotkey_registered");
        Ok(Self { api, id: Some(id) })
    }

    /// True until released.
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Remove the registration. Later calls do nothing.
    pub fn release(&mut self) -> Result<()> {
        match self.id.take() {
            Some(id) => {
                debug!(id, "hotkey_unregistered");
                self.api.unregister(id)
            }
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration").field("id", &self.id).finish()
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            warn!(error = %e, "hotkey_release_failed");
        }
    }
}
