//! Open/closed state, query and selected index.
//!
//! The navigator only knows the length of the current flat view, passed in by
//! the caller on each move; it never holds the commands themselves. Every
//! transition returns whether it was taken. Transitions attempted from the
//! wrong state are silent no-ops.

use std::{fmt, mem};

use tracing::debug;

/// Callback invoked by the engine toward the owner of the open flag.
pub type OwnerCallback = Box<dyn FnMut() + Send>;

/// The party that owns the open flag in owner-managed mode.
pub struct Owner {
    /// Invoked once per close transition taken while open.
    on_close: OwnerCallback,
    /// Invoked when the engine would like to open (e.g. hotkey while closed).
    on_open_request: Option<OwnerCallback>,
}

impl Owner {
    /// An owner that is told about closes.
    pub fn new<F>(on_close: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self {
            on_close: Box::new(on_close),
            on_open_request: None,
        }
    }

    /// Also tell the owner when the engine asks to be opened (builder).
    pub fn on_open_request<F>(mut self, f: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_open_request = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owner")
            .field("on_open_request", &self.on_open_request.is_some())
            .finish_non_exhaustive()
    }
}

/// Who owns the open flag. Fixed for the navigator's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// The engine flips its own flag (uncontrolled).
    SelfManaged,
    /// The owner supplies the flag and is notified of closes (controlled).
    OwnerManaged,
}

/// Ownership plus the current open flag.
#[derive(Debug)]
enum Ownership {
    /// Engine-owned flag.
    SelfManaged {
        /// Current value.
        open: bool,
    },
    /// Owner-supplied flag.
    OwnerManaged {
        /// Last value the owner supplied.
        open: bool,
        /// Notification target.
        owner: Owner,
    },
}

/// Navigation state machine.
#[derive(Debug)]
pub struct Navigator {
    /// Open flag and who owns it.
    ownership: Ownership,
    /// Current query text.
    query: String,
    /// Selected index into the flat view.
    selected: usize,
    /// Raised on open; consumed by the renderer.
    focus_requested: bool,
}

impl Navigator {
    /// A closed, engine-owned navigator.
    pub fn self_managed() -> Self {
        Self::with(Ownership::SelfManaged { open: false })
    }

    /// An owner-managed navigator starting from the owner's current value.
    pub fn owner_managed(owner: Owner, open: bool) -> Self {
        let mut nav = Self::with(Ownership::OwnerManaged { open, owner });
        nav.focus_requested = open;
        nav
    }

    /// Shared constructor.
    fn with(ownership: Ownership) -> Self {
        Self {
            ownership,
            query: String::new(),
            selected: 0,
            focus_requested: false,
        }
    }

    /// Which ownership mode this navigator was built with.
    pub fn mode(&self) -> OpenMode {
        match self.ownership {
            Ownership::SelfManaged { .. } => OpenMode::SelfManaged,
            Ownership::OwnerManaged { .. } => OpenMode::OwnerManaged,
        }
    }

    /// Whether the palette is open.
    pub fn is_open(&self) -> bool {
        match self.ownership {
            Ownership::SelfManaged { open } | Ownership::OwnerManaged { open, .. } => open,
        }
    }

    /// The current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The selected flat index.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Clear query and selection.
    fn reset(&mut self) {
        self.query.clear();
        self.selected = 0;
    }

    /// Open from closed.
    ///
    /// Self-managed: flips the flag, clears query and selection and raises a
    /// focus request. Owner-managed: forwards an open request to the owner
    /// and returns `false`; the owner's next [`sync_owner_open`] decides.
    ///
    /// [`sync_owner_open`]: Self::sync_owner_open
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        match &mut self.ownership {
            Ownership::SelfManaged { open } => {
                *open = true;
                self.reset();
                self.focus_requested = true;
                debug!("palette_opened");
                true
            }
            Ownership::OwnerManaged { owner, .. } => {
                if let Some(request) = owner.on_open_request.as_mut() {
                    debug!("palette_open_requested");
                    request();
                }
                false
            }
        }
    }

    /// Close from open; a no-op when already closed.
    ///
    /// Clears query and selection. Self-managed flips the flag; owner-managed
    /// invokes the owner's close callback and leaves the flag to the owner.
    pub fn close(&mut self) -> bool {
        if !self.is_open() {
            return false;
        }
        self.reset();
        self.focus_requested = false;
        match &mut self.ownership {
            Ownership::SelfManaged { open } => *open = false,
            Ownership::OwnerManaged { owner, .. } => (owner.on_close)(),
        }
        debug!(mode = ?self.mode(), "palette_closed");
        true
    }

    /// `close` when open, `open` otherwise.
    pub fn toggle(&mut self) -> bool {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// Accept a new open value from the owner. Ignored when self-managed.
    ///
    /// An edge into open clears query and selection and raises a focus
    /// request; an edge into closed clears query and selection.
    pub fn sync_owner_open(&mut self, value: bool) -> bool {
        let Ownership::OwnerManaged { open, .. } = &mut self.ownership else {
            debug!("sync_owner_open_ignored_self_managed");
            return false;
        };
        if *open == value {
            return false;
        }
        *open = value;
        self.reset();
        self.focus_requested = value;
        debug!(open = value, "palette_owner_sync");
        true
    }

    /// Replace the query while open; the selection returns to 0.
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        if !self.is_open() {
            return false;
        }
        self.query = query.into();
        self.selected = 0;
        true
    }

    /// Current selection clamped into `[0, len)`.
    fn current(&self, len: usize) -> usize {
        self.selected.min(len - 1)
    }

    /// True when a move over a view of `len` items is allowed.
    fn can_move(&self, len: usize) -> bool {
        self.is_open() && len > 0
    }

    /// Step forward, wrapping from the last index to 0.
    pub fn move_next(&mut self, len: usize) -> bool {
        if !self.can_move(len) {
            return false;
        }
        self.selected = (self.current(len) + 1) % len;
        true
    }

    /// Step backward, wrapping from 0 to the last index.
    pub fn move_previous(&mut self, len: usize) -> bool {
        if !self.can_move(len) {
            return false;
        }
        self.selected = match self.current(len) {
            0 => len - 1,
            i => i - 1,
        };
        true
    }

    /// Jump to index 0.
    pub fn move_first(&mut self, len: usize) -> bool {
        if !self.can_move(len) {
            return false;
        }
        self.selected = 0;
        true
    }

    /// Jump to the last index.
    pub fn move_last(&mut self, len: usize) -> bool {
        if !self.can_move(len) {
            return false;
        }
        self.selected = len - 1;
        true
    }

    /// Jump to `index`; out-of-range indices are rejected.
    pub fn move_to(&mut self, index: usize, len: usize) -> bool {
        if !self.can_move(len) || index >= len {
            return false;
        }
        self.selected = index;
        true
    }

    /// Pull the selection back into range after the view shrank.
    pub fn clamp(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Consume the pending focus request, if any.
    pub fn take_focus_request(&mut self) -> bool {
        mem::take(&mut self.focus_requested)
    }
}
