//! Palette-level options.

use serde::{Deserialize, Serialize};

use crate::defaults::{
    default_close_on_select, default_empty_message, default_hotkey, default_max_results,
    default_placeholder,
};

/// User-facing palette options. Every field has a default, so `()` is a valid
/// palette section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteConfig {
    /// Hint shown in the empty query input.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Global toggle chord, e.g. "cmd+k". "cmd" and "ctrl" both mean the
    /// platform's primary modifier.
    #[serde(default = "default_hotkey")]
    pub hotkey: String,

    /// Upper bound on visible results across all groups.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Message shown when no command matches.
    #[serde(default = "default_empty_message")]
    pub empty_message: String,

    /// Close the palette after a command is selected.
    #[serde(default = "default_close_on_select")]
    pub close_on_select: bool,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            hotkey: default_hotkey(),
            max_results: default_max_results(),
            empty_message: default_empty_message(),
            close_on_select: default_close_on_select(),
        }
    }
}

impl PaletteConfig {
    /// Check value ranges that serde cannot express.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 {
            return Err("max_results must be greater than zero".to_string());
        }
        if self.hotkey.trim().is_empty() {
            return Err("hotkey must not be empty".to_string());
        }
        Ok(())
    }
}
