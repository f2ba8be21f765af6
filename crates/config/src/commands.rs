//! Declarative command entries as written in a palette file.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One command entry. `run` is an optional shell command executed on select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub shortcut: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub run: Option<String>,
}

/// A labeled bucket of command entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupSpec {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub commands: Vec<CommandSpec>,
}

/// The commands section: a flat list or a list of groups, tagged explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrySpec {
    /// `Flat([...])`
    Flat(Vec<CommandSpec>),
    /// `Grouped([...])`
    Grouped(Vec<GroupSpec>),
}

impl Default for RegistrySpec {
    fn default() -> Self {
        Self::Flat(Vec::new())
    }
}

impl RegistrySpec {
    /// Iterate every command entry in file order.
    pub fn commands(&self) -> Box<dyn Iterator<Item = &CommandSpec> + '_> {
        match self {
            Self::Flat(cmds) => Box::new(cmds.iter()),
            Self::Grouped(groups) => Box::new(groups.iter().flat_map(|g| g.commands.iter())),
        }
    }

    /// Total number of command entries.
    pub fn len(&self) -> usize {
        self.commands().count()
    }

    /// True when no command entries are present.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids that appear more than once, sorted.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut dups = BTreeSet::new();
        for c in self.commands() {
            if !seen.insert(c.id.as_str()) {
                dups.insert(c.id.clone());
            }
        }
        dups.into_iter().collect()
    }

    /// Reject entries that cannot be displayed or addressed.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if let Self::Grouped(groups) = self
            && let Some(g) = groups.iter().find(|g| g.id.trim().is_empty())
        {
            return Err(format!(
                "group with label {:?} has an empty id",
                g.label.as_deref().unwrap_or("")
            ));
        }
        for c in self.commands() {
            if c.id.trim().is_empty() {
                return Err(format!("command {:?} has an empty id", c.label));
            }
            if c.label.trim().is_empty() {
                return Err(format!("command {:?} has an empty label", c.id));
            }
        }
        Ok(())
    }
}
