//! Filter and truncation pipeline from raw query to visible commands.

use std::{fmt, sync::Arc};

use tracing::trace;

use crate::{Command, CommandGroup};

/// Caller-supplied predicate `(command, lowercased_query) -> visible`.
///
/// Replaces the default matcher entirely when installed.
#[derive(Clone)]
pub struct Matcher(Arc<dyn Fn(&Command, &str) -> bool + Send + Sync>);

impl Matcher {
    /// Wrap a predicate.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Command, &str) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Evaluate the predicate.
    pub fn matches(&self, command: &Command, query: &str) -> bool {
        (self.0)(command, query)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Matcher(..)")
    }
}

/// Default matcher: `query` is a substring of the lowercased label, the
/// lowercased description, or any lowercased keyword.
pub fn default_matches(command: &Command, query: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(query);
    hit(command.label.as_str())
        || command.description.as_deref().is_some_and(hit)
        || command.keywords.iter().any(|k| hit(k.as_str()))
}

/// The visible, filtered and truncated commands, grouped for display.
///
/// The flat index space used by navigation is the concatenation of
/// `groups()[*].commands` in order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    /// Non-empty groups in caller order.
    groups: Vec<CommandGroup>,
    /// Total commands across `groups`.
    len: usize,
}

impl FilteredView {
    /// Groups to render, in order. Never contains an empty group.
    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    /// The navigation index space: all visible commands in display order.
    pub fn flat(&self) -> impl Iterator<Item = &Command> {
        self.groups.iter().flat_map(|g| g.commands.iter())
    }

    /// Number of visible commands.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The command at flat position `index`.
    pub fn get(&self, index: usize) -> Option<&Command> {
        let mut rest = index;
        for g in &self.groups {
            if rest < g.commands.len() {
                return g.commands.get(rest);
            }
            rest -= g.commands.len();
        }
        None
    }

    /// Flat position of the first visible command with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.flat().position(|c| c.id == id)
    }
}

/// Derive the visible view of `groups` for `query`.
///
/// Disabled commands are dropped first. A query that is empty after trimming
/// keeps everything else; otherwise `matcher` (or [`default_matches`]) decides
/// using the trimmed, lowercased query. Groups are then walked in order and
/// filled until `max_results` commands have been taken; the group that
/// crosses the budget is cut and later groups are skipped. Empty groups are
/// omitted.
pub fn filter(
    groups: &[CommandGroup],
    query: &str,
    max_results: usize,
    matcher: Option<&Matcher>,
) -> FilteredView {
    let needle = query.trim().to_lowercase();
    let passes = |c: &Command| {
        if c.disabled {
            return false;
        }
        if needle.is_empty() {
            return true;
        }
        match matcher {
            Some(m) => m.matches(c, &needle),
            None => default_matches(c, &needle),
        }
    };

    let mut out = Vec::new();
    let mut taken = 0usize;
    for g in groups {
        if taken >= max_results {
            break;
        }
        let budget = max_results - taken;
        let commands: Vec<Command> = g
            .commands
            .iter()
            .filter(|&c| passes(c))
            .take(budget)
            .cloned()
            .collect();
        if commands.is_empty() {
            continue;
        }
        taken += commands.len();
        out.push(CommandGroup {
            id: g.id.clone(),
            label: g.label.clone(),
            commands,
        });
    }

    trace!(query = %needle, groups = out.len(), results = taken, "filtered");
    FilteredView {
        groups: out,
        len: taken,
    }
}
