//! Commands and command groups.

use crate::Action;

/// A named, invocable entry shown in the palette.
///
/// Identity is `id`. The palette does not enforce uniqueness; see
/// [`duplicate_ids`](crate::duplicate_ids).
#[derive(Debug, Clone)]
pub struct Command {
    /// Identifier, expected to be unique across the whole registry.
    pub id: String,
    /// Display label; always searched.
    pub label: String,
    /// Secondary text; searched when present.
    pub description: Option<String>,
    /// Renderer-interpreted icon reference. Never inspected by the engine.
    pub icon: Option<String>,
    /// Extra search terms, each matched independently.
    pub keywords: Vec<String>,
    /// What runs when the command is selected.
    pub action: Action,
    /// Display-only shortcut hint such as "cmd+s".
    pub shortcut: Option<String>,
    /// Disabled commands are never shown and never run.
    pub disabled: bool,
}

impl Command {
    /// Create an enabled command with a no-op action.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            icon: None,
            keywords: Vec::new(),
            action: Action::noop(),
            shortcut: None,
            disabled: false,
        }
    }

    /// Set description (builder).
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set icon (builder).
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set keywords (builder).
    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = keywords.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Set action (builder).
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Set shortcut hint (builder).
    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Set disabled flag (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// An ordered, optionally labeled bucket of commands.
///
/// Groups keep caller order; the engine never reorders them.
#[derive(Debug, Clone)]
pub struct CommandGroup {
    /// Group identifier.
    pub id: String,
    /// Optional section heading.
    pub label: Option<String>,
    /// Commands in display order.
    pub commands: Vec<Command>,
}

impl CommandGroup {
    /// Create an unlabeled group.
    pub fn new(id: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            id: id.into(),
            label: None,
            commands,
        }
    }

    /// Set label (builder).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
