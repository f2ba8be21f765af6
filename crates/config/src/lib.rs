//! Configuration types and file loading for the command palette.
#![allow(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

use std::{
    env,
    path::{Path, PathBuf},
};

mod commands;
mod defaults;
mod error;
mod loader;
mod palette;

#[cfg(test)]
mod test_parse;

pub use commands::{CommandSpec, GroupSpec, RegistrySpec};
pub use error::Error;
pub use loader::{PaletteFile, load_from_path, load_from_str};
pub use palette::PaletteConfig;

/// Determine the preferred user config path (`~/.palette/palette.ron`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".palette");
    p.push("palette.ron");
    p
}

/// Resolve the effective config path using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided.
/// 2) Else use `~/.palette/palette.ron` when it exists.
/// 3) Else return a "no config found" error naming the preferred location.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let preferred = default_config_path();
    if preferred.exists() {
        return Ok(preferred);
    }

    Err(Error::Read {
        path: Some(preferred),
        message: "No config found. Create ~/.palette/palette.ron or pass --config".to_string(),
    })
}
