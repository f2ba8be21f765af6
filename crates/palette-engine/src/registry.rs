//! Command registry shapes and normalization into groups.

use std::collections::BTreeSet;

use config::{CommandSpec, RegistrySpec};

use crate::{Action, Command, CommandGroup};

/// Id of the synthetic group that wraps a flat registry.
pub const DEFAULT_GROUP_ID: &str = "default";

/// Caller-supplied commands, either flat or already grouped.
///
/// The shape is chosen explicitly by the caller; nothing is inferred from
/// element contents.
#[derive(Debug, Clone)]
pub enum Registry {
    /// Ungrouped commands.
    Flat(Vec<Command>),
    /// Commands in caller-defined groups.
    Grouped(Vec<CommandGroup>),
}

impl Default for Registry {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl From<Vec<Command>> for Registry {
    fn from(commands: Vec<Command>) -> Self {
        Self::Flat(commands)
    }
}

impl From<Vec<CommandGroup>> for Registry {
    fn from(groups: Vec<CommandGroup>) -> Self {
        Self::Grouped(groups)
    }
}

impl Registry {
    /// Normalize into a sequence of groups.
    ///
    /// Grouped input passes through unchanged. A non-empty flat list becomes
    /// one unlabeled group with id [`DEFAULT_GROUP_ID`]. An empty registry of
    /// either shape yields no groups. Every command lands in exactly one
    /// group, in input order.
    pub fn normalize(self) -> Vec<CommandGroup> {
        match self {
            Self::Grouped(groups) => groups,
            Self::Flat(commands) if commands.is_empty() => Vec::new(),
            Self::Flat(commands) => vec![CommandGroup::new(DEFAULT_GROUP_ID, commands)],
        }
    }

    /// Build a registry from file entries, keeping the file's shape.
    ///
    /// `action_for` turns each entry into its action; entries without a `run`
    /// usually map to [`Action::noop`].
    pub fn from_spec<F>(spec: &RegistrySpec, mut action_for: F) -> Self
    where
        F: FnMut(&CommandSpec) -> Action,
    {
        let mut build = |c: &CommandSpec| Command {
            id: c.id.clone(),
            label: c.label.clone(),
            description: c.description.clone(),
            icon: c.icon.clone(),
            keywords: c.keywords.clone(),
            action: action_for(c),
            shortcut: c.shortcut.clone(),
            disabled: c.disabled,
        };
        match spec {
            RegistrySpec::Flat(cmds) => Self::Flat(cmds.iter().map(&mut build).collect()),
            RegistrySpec::Grouped(groups) => Self::Grouped(
                groups
                    .iter()
                    .map(|g| CommandGroup {
                        id: g.id.clone(),
                        label: g.label.clone(),
                        commands: g.commands.iter().map(&mut build).collect(),
                    })
                    .collect(),
            ),
        }
    }
}

/// Total number of commands across `groups`.
pub fn command_count(groups: &[CommandGroup]) -> usize {
    groups.iter().map(|g| g.commands.len()).sum()
}

/// Ids that occur more than once across `groups`, sorted, each reported once.
pub fn duplicate_ids(groups: &[CommandGroup]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut dups = BTreeSet::new();
    for cmd in groups.iter().flat_map(|g| g.commands.iter()) {
        if !seen.insert(cmd.id.as_str()) {
            dups.insert(cmd.id.clone());
        }
    }
    dups.into_iter().collect()
}

/// Find a command by id. With duplicates, the last one in registry order wins.
pub fn find_command<'a>(groups: &'a [CommandGroup], id: &str) -> Option<&'a Command> {
    groups
        .iter()
        .rev()
        .flat_map(|g| g.commands.iter().rev())
        .find(|c| c.id == id)
}
