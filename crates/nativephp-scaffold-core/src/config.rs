use crate::catalog::MetadataPlacement;
use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ScaffoldConfig
// ---------------------------------------------------------------------------

/// Contents of `nativephp-scaffold.yaml`. Every field has a default, so an
/// empty or missing file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Directory under the project root that holds `<vendor>/<plugin>` trees.
    #[serde(default = "default_packages_dir")]
    pub packages_dir: String,
    #[serde(default)]
    pub no_clobber: bool,
    #[serde(default)]
    pub metadata_placement: MetadataPlacement,
}

fn default_packages_dir() -> String {
    paths::DEFAULT_PACKAGES_DIR.to_string()
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            packages_dir: default_packages_dir(),
            no_clobber: false,
            metadata_placement: MetadataPlacement::default(),
        }
    }
}

impl ScaffoldConfig {
    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: ScaffoldConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn load(root: &Path) -> Result<Self> {
        Self::load_from(&paths::config_path(root))
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let dir = Path::new(&self.packages_dir);

        if self.packages_dir.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "packages_dir is empty".to_string(),
            });
        } else if dir.is_absolute() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "packages_dir '{}' is absolute; plugins will be written outside the project",
                    self.packages_dir
                ),
            });
        } else if dir.components().any(|c| c == Component::ParentDir) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "packages_dir '{}' escapes the project root",
                    self.packages_dir
                ),
            });
        }

        warnings
    }
}
