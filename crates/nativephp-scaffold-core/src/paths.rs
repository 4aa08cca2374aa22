use crate::identifier::PluginIdentifier;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = "nativephp-scaffold.yaml";
pub const DEFAULT_PACKAGES_DIR: &str = "packages";

/// File that marks the root of a Laravel (and so NativePHP) application.
pub const APP_ROOT_MARKER: &str = "artisan";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// `<root>/<packages_dir>/<vendor>/<plugin-slug>`
pub fn plugin_dir(root: &Path, packages_dir: &str, id: &PluginIdentifier) -> PathBuf {
    root.join(packages_dir)
        .join(id.vendor())
        .join(id.directory_name())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/app");
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/app/nativephp-scaffold.yaml")
        );
        let id = PluginIdentifier::parse("acme/plugin-ble").unwrap();
        assert_eq!(
            plugin_dir(root, DEFAULT_PACKAGES_DIR, &id),
            PathBuf::from("/tmp/app/packages/acme/plugin-ble")
        );
    }
}
