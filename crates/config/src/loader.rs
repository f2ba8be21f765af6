//! Parse and load palette files.

use std::{ffi::OsStr, fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, PaletteConfig, RegistrySpec};

/// A whole palette file: options plus the command registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteFile {
    #[serde(default)]
    pub palette: PaletteConfig,
    #[serde(default)]
    pub commands: RegistrySpec,
}

/// Parse a palette file from RON text. `path` is only used for error context.
pub fn load_from_str(text: &str, path: Option<&Path>) -> Result<PaletteFile, Error> {
    let file: PaletteFile = ron::from_str(text).map_err(|e| Error::Parse {
        path: path.map(Path::to_path_buf),
        message: e.to_string(),
    })?;

    let invalid = |message: String| Error::Validation {
        path: path.map(Path::to_path_buf),
        message,
    };
    file.palette.validate().map_err(invalid)?;
    file.commands.validate().map_err(invalid)?;

    let dups = file.commands.duplicate_ids();
    if !dups.is_empty() {
        warn!(ids = ?dups, "duplicate_command_ids");
    }
    debug!(
        commands = file.commands.len(),
        hotkey = %file.palette.hotkey,
        "palette_file_loaded"
    );
    Ok(file)
}

/// Load a palette file from a `.ron` file at `path`.
pub fn load_from_path(path: &Path) -> Result<PaletteFile, Error> {
    if path.extension() != Some(OsStr::new("ron")) {
        return Err(Error::Read {
            path: Some(path.to_path_buf()),
            message: "Unsupported config format (expected a .ron file)".to_string(),
        });
    }
    let text = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    load_from_str(&text, Some(path)).map_err(|e| e.with_path(path))
}
