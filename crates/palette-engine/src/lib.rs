//! Palette Engine
//!
//! A headless, keyboard-driven command palette:
//! - normalizes a flat or grouped command registry
//! - filters and truncates it for a query
//! - tracks open state, query and selection, self-managed or owner-managed
//! - toggles on a global hotkey registered for the palette's lifetime
//! - runs selected actions and reports typed outcomes
//!
//! [`Palette`] is the type you construct (via [`Palette::builder`]) and drive
//! with [`Palette::handle_key`] or the transition methods. Rendering is left
//! to the host: read [`Palette::view`], [`Palette::query`] and friends after
//! each input.

mod command;
mod error;
mod executor;
mod filter;
mod hotkey;
mod navigation;
mod palette;
mod registry;

pub use command::{Command, CommandGroup};
pub use error::{ActionError, Error, Result};
pub use executor::{Action, ActionResult, Outcome, PendingOutcome, execute};
pub use filter::{FilteredView, Matcher, default_matches, filter};
pub use hotkey::{Hotkey, HotkeyApi, LocalHotkeys, Platform, Registration, RegistrationId};
pub use navigation::{Navigator, OpenMode, Owner, OwnerCallback};
pub use palette::{KeyResponse, Palette, PaletteBuilder, Selection};
pub use registry::{DEFAULT_GROUP_ID, Registry, command_count, duplicate_ids, find_command};
