//! The palette facade: ties registry, filter, navigation, hotkey and executor
//! together behind one `&mut` handle driven by the host's event loop.

use std::sync::Arc;

use config::PaletteConfig;
use keycode::{Key, KeyEvent};
use tracing::{debug, warn};

use crate::{
    Command, CommandGroup, FilteredView, Matcher, PendingOutcome, Registry, Result,
    executor::execute,
    filter::filter,
    hotkey::{Hotkey, HotkeyApi, LocalHotkeys, Platform, Registration},
    navigation::{Navigator, OpenMode, Owner},
    registry::{duplicate_ids, find_command},
};

/// A command that was run by a selection.
#[derive(Debug)]
#[must_use = "an async action only runs when its outcome is awaited"]
pub struct Selection {
    /// Id of the command that ran.
    pub command_id: String,
    /// Resolves when the action finishes; carries any failure.
    pub outcome: PendingOutcome,
    /// Whether the close-on-select policy closed the palette.
    pub closed: bool,
}

/// What [`Palette::handle_key`] did with an event.
#[derive(Debug)]
#[must_use = "a `Selected` response carries an outcome that must be awaited"]
pub enum KeyResponse {
    /// Not for the palette; the host should process it normally.
    Ignored,
    /// Consumed without a visible open/close transition.
    Handled,
    /// The palette opened.
    Opened,
    /// The palette closed (or, owner-managed, asked its owner to close).
    Closed,
    /// A command was selected and run.
    Selected(Selection),
}

/// Collects palette inputs; see [`Palette::builder`].
pub struct PaletteBuilder {
    /// Commands to show.
    registry: Registry,
    /// Input hint.
    placeholder: String,
    /// Present for owner-managed mode, with the owner's initial open value.
    owner: Option<(Owner, bool)>,
    /// Toggle hotkey spec.
    hotkey: String,
    /// Result cap across all groups.
    max_results: usize,
    /// Shown when nothing matches.
    empty_message: String,
    /// Replaces the default matcher when set.
    matcher: Option<Matcher>,
    /// Close after a selection.
    close_on_select: bool,
    /// Decides the primary modifier.
    platform: Platform,
    /// Hotkey backend; a fresh [`LocalHotkeys`] when unset.
    hotkeys: Option<Arc<dyn HotkeyApi>>,
}

impl Default for PaletteBuilder {
    fn default() -> Self {
        Self::from_config(&PaletteConfig::default())
    }
}

impl PaletteBuilder {
    /// A builder seeded from file options.
    pub fn from_config(cfg: &PaletteConfig) -> Self {
        Self {
            registry: Registry::default(),
            placeholder: cfg.placeholder.clone(),
            owner: None,
            hotkey: cfg.hotkey.clone(),
            max_results: cfg.max_results,
            empty_message: cfg.empty_message.clone(),
            matcher: None,
            close_on_select: cfg.close_on_select,
            platform: Platform::current(),
            hotkeys: None,
        }
    }

    /// Set commands (builder).
    pub fn registry(mut self, registry: impl Into<Registry>) -> Self {
        self.registry = registry.into();
        self
    }

    /// Set placeholder (builder).
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Hand the open flag to `owner`, starting at `open` (builder).
    pub fn owner(mut self, owner: Owner, open: bool) -> Self {
        self.owner = Some((owner, open));
        self
    }

    /// Set hotkey spec (builder).
    pub fn hotkey(mut self, spec: impl Into<String>) -> Self {
        self.hotkey = spec.into();
        self
    }

    /// Set result cap (builder).
    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    /// Set empty-state message (builder).
    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Install a custom matcher (builder).
    pub fn matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Set close-on-select policy (builder).
    pub fn close_on_select(mut self, close: bool) -> Self {
        self.close_on_select = close;
        self
    }

    /// Override platform detection (builder).
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Use `api` for the hotkey registration (builder).
    pub fn hotkeys(mut self, api: Arc<dyn HotkeyApi>) -> Self {
        self.hotkeys = Some(api);
        self
    }

    /// Parse the hotkey, register it and assemble the palette.
    pub fn build(self) -> Result<Palette> {
        let hotkey = Hotkey::parse(&self.hotkey, self.platform)?;
        let api = self
            .hotkeys
            .unwrap_or_else(|| Arc::new(LocalHotkeys::new()) as Arc<dyn HotkeyApi>);
        let registration = Registration::acquire(api, &hotkey)?;
        let nav = match self.owner {
            Some((owner, open)) => Navigator::owner_managed(owner, open),
            None => Navigator::self_managed(),
        };
        let mut palette = Palette {
            groups: Vec::new(),
            view: FilteredView::default(),
            nav,
            placeholder: self.placeholder,
            empty_message: self.empty_message,
            max_results: self.max_results,
            matcher: self.matcher,
            close_on_select: self.close_on_select,
            hotkey,
            registration,
        };
        palette.set_registry(self.registry);
        debug!(mode = ?palette.mode(), hotkey = %palette.hotkey, "palette_built");
        Ok(palette)
    }
}

/// A headless command palette.
///
/// All mutation goes through `&mut self`, one input at a time. Actions run
/// detached from the palette: a [`Selection`]'s outcome can be awaited while
/// the palette keeps handling input.
///
/// A synchronous action runs inside the selecting call. An asynchronous one
/// is lazy: it makes progress only while its [`Selection::outcome`] is polled,
/// so the host must await or spawn every outcome it receives. Dropping a
/// selection drops the action and its failure with it.
#[derive(Debug)]
pub struct Palette {
    /// Normalized registry.
    groups: Vec<CommandGroup>,
    /// Derived from `groups` and the query; refreshed on every change.
    view: FilteredView,
    /// Open state, query and selection.
    nav: Navigator,
    /// Input hint.
    placeholder: String,
    /// Shown when nothing matches.
    empty_message: String,
    /// Result cap.
    max_results: usize,
    /// Optional custom matcher.
    matcher: Option<Matcher>,
    /// Close after a selection.
    close_on_select: bool,
    /// Toggle chord.
    hotkey: Hotkey,
    /// Live hotkey registration; released on shutdown or drop.
    registration: Registration,
}

impl Palette {
    /// Start building a palette with default options.
    pub fn builder() -> PaletteBuilder {
        PaletteBuilder::default()
    }

    /// Recompute the view and pull the selection back into range.
    fn refresh(&mut self) {
        self.view = filter(
            &self.groups,
            self.nav.query(),
            self.max_results,
            self.matcher.as_ref(),
        );
        self.nav.clamp(self.view.len());
    }

    /// Replace the commands. The query is kept; the selection is clamped.
    pub fn set_registry(&mut self, registry: impl Into<Registry>) {
        self.groups = registry.into().normalize();
        let dups = duplicate_ids(&self.groups);
        if !dups.is_empty() {
            warn!(ids = ?dups, "duplicate_command_ids");
        }
        self.refresh();
    }

    /// Normalized registry in caller order.
    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    /// Look up any registered command by id; the last duplicate wins.
    pub fn command(&self, id: &str) -> Option<&Command> {
        find_command(&self.groups, id)
    }

    /// Ownership mode fixed at build time.
    pub fn mode(&self) -> OpenMode {
        self.nav.mode()
    }

    /// Whether the palette is open.
    pub fn is_open(&self) -> bool {
        self.nav.is_open()
    }

    /// The parsed toggle hotkey.
    pub fn hotkey(&self) -> &Hotkey {
        &self.hotkey
    }

    /// Whether the hotkey registration is still live.
    pub fn is_listening(&self) -> bool {
        self.registration.is_active()
    }

    /// Open from closed; see [`Navigator::open`].
    pub fn open(&mut self) -> bool {
        let taken = self.nav.open();
        if taken {
            self.refresh();
        }
        taken
    }

    /// Close; a no-op when already closed.
    pub fn close(&mut self) -> bool {
        let taken = self.nav.close();
        if taken {
            self.refresh();
        }
        taken
    }

    /// Close when open, open otherwise.
    pub fn toggle(&mut self) -> bool {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// Accept the owner's current open value.
    pub fn sync_owner_open(&mut self, open: bool) -> bool {
        let taken = self.nav.sync_owner_open(open);
        if taken {
            self.refresh();
        }
        taken
    }

    /// Replace the query while open.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let taken = self.nav.set_query(query);
        if taken {
            self.refresh();
        }
        taken
    }

    /// Select the next result, wrapping.
    pub fn move_next(&mut self) -> bool {
        self.nav.move_next(self.view.len())
    }

    /// Select the previous result, wrapping.
    pub fn move_previous(&mut self) -> bool {
        self.nav.move_previous(self.view.len())
    }

    /// Select the first result.
    pub fn move_first(&mut self) -> bool {
        self.nav.move_first(self.view.len())
    }

    /// Select the last result.
    pub fn move_last(&mut self) -> bool {
        self.nav.move_last(self.view.len())
    }

    /// Run the selected command.
    ///
    /// Returns `None` when closed, when nothing is visible, or when the
    /// selected command is disabled; none of these change any state.
    #[must_use = "an async action only runs when its outcome is awaited"]
    pub fn select_current(&mut self) -> Option<Selection> {
        if !self.is_open() {
            return None;
        }
        let command = self.view.get(self.nav.selected())?;
        if command.disabled {
            return None;
        }
        let command_id = command.id.clone();
        let outcome = execute(command);
        let closed = self.close_on_select && self.close();
        Some(Selection {
            command_id,
            outcome,
            closed,
        })
    }

    /// Select the visible result at `index` and run it (pointer click).
    #[must_use = "an async action only runs when its outcome is awaited"]
    pub fn select_at(&mut self, index: usize) -> Option<Selection> {
        if !self.nav.move_to(index, self.view.len()) {
            return None;
        }
        self.select_current()
    }

    /// Current filtered view in render order.
    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    /// Number of visible results; always `view().len()`.
    pub fn result_count(&self) -> usize {
        self.view.len()
    }

    /// Selected flat index.
    pub fn selected_index(&self) -> usize {
        self.nav.selected()
    }

    /// The command under the selection, if any result is visible.
    pub fn selected_command(&self) -> Option<&Command> {
        self.view.get(self.nav.selected())
    }

    /// Current query.
    pub fn query(&self) -> &str {
        self.nav.query()
    }

    /// Input hint.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Message for the empty state.
    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    /// True when open with no visible results.
    pub fn is_empty_state(&self) -> bool {
        self.is_open() && self.view.is_empty()
    }

    /// Consume the pending focus request raised by an open.
    pub fn take_focus_request(&mut self) -> bool {
        self.nav.take_focus_request()
    }

    /// Apply the keyboard contract to `event`.
    ///
    /// Events already consumed by another handler are ignored. The hotkey
    /// toggles in any state; the navigation keys only act while open. Every
    /// handled event has its default prevented.
    #[must_use = "a `Selected` response carries an outcome that must be awaited"]
    pub fn handle_key(&mut self, event: &mut KeyEvent) -> KeyResponse {
        if event.is_default_prevented() {
            return KeyResponse::Ignored;
        }
        if self.hotkey.matches(event) {
            event.prevent_default();
            let was_open = self.is_open();
            return match (self.toggle(), was_open) {
                (true, true) => KeyResponse::Closed,
                (true, false) => KeyResponse::Opened,
                (false, _) => KeyResponse::Handled,
            };
        }
        if !self.is_open() {
            return KeyResponse::Ignored;
        }
        let response = match event.key {
            Key::DownArrow => {
                self.move_next();
                KeyResponse::Handled
            }
            Key::UpArrow => {
                self.move_previous();
                KeyResponse::Handled
            }
            Key::Home => {
                self.move_first();
                KeyResponse::Handled
            }
            Key::End => {
                self.move_last();
                KeyResponse::Handled
            }
            Key::Return | Key::Space => match self.select_current() {
                Some(selection) => KeyResponse::Selected(selection),
                None => KeyResponse::Handled,
            },
            Key::Escape => {
                self.close();
                KeyResponse::Closed
            }
            _ => return KeyResponse::Ignored,
        };
        event.prevent_default();
        response
    }

    /// Release the hotkey registration. Safe to call more than once; drop
    /// releases too.
    pub fn shutdown(&mut self) -> Result<()> {
        self.registration.release()
    }
}
