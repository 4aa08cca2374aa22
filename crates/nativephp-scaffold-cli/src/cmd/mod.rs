pub mod config;
pub mod names;
pub mod new;
pub mod templates;

use anyhow::Context;
use nativephp_scaffold_core::{config::ScaffoldConfig, paths};
use std::path::{Path, PathBuf};

/// The config file in effect: `--config` when given, else the one under `root`.
pub fn config_file(root: &Path, explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| paths::config_path(root))
}

pub fn load_config(root: &Path, explicit: Option<&Path>) -> anyhow::Result<ScaffoldConfig> {
    let path = config_file(root, explicit);
    ScaffoldConfig::load_from(&path)
        .with_context(|| format!("failed to load {}", path.display()))
}
