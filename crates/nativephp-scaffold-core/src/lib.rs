pub mod catalog;
pub mod config;
pub mod error;
pub mod identifier;
pub mod io;
pub mod paths;
pub mod render;
pub mod sink;
pub mod template;

pub use catalog::{MetadataPlacement, TemplateSet};
pub use error::{Result, ScaffoldError};
pub use identifier::PluginIdentifier;
pub use render::{render, GenerationRun, RenderOptions, Renderer, SkipReason, SkippedFile};
