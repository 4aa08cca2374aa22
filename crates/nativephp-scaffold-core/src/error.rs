use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("invalid plugin identifier '{input}': {reason}")]
    InvalidIdentifierFormat { input: String, reason: String },

    #[error("plugin slug '{0}' leaves an empty namespace once the 'plugin-' prefix is removed")]
    EmptyNamespaceSegment(String),

    #[error("unresolved placeholder '{{{{{token}}}}}' in {template}")]
    UnresolvedPlaceholder { template: String, token: String },

    #[error("file already exists: {}", .0.display())]
    FileAlreadyExists(PathBuf),

    #[error("failed to write {}: {source}", .path.display())]
    FilesystemWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metadata placement '{0}': expected manifest, composer or both")]
    InvalidMetadataPlacement(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ScaffoldError {
    /// True for errors that abort a run before any file is touched.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScaffoldError::InvalidIdentifierFormat { .. } | ScaffoldError::EmptyNamespaceSegment(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
