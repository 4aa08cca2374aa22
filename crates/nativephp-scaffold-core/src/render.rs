use crate::error::{Result, ScaffoldError};
use crate::identifier::PluginIdentifier;
use crate::sink::{DiskSink, OutputSink};
use crate::template::{substitute, FileTemplate, TemplateRole};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// RenderOptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Fail a file instead of replacing it when its target already exists.
    #[serde(default)]
    pub no_clobber: bool,
}

// ---------------------------------------------------------------------------
// SkipReason / SkippedFile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    UnresolvedPlaceholder { token: String },
    FileAlreadyExists,
    FilesystemWriteFailure { message: String },
}

impl From<&ScaffoldError> for SkipReason {
    fn from(err: &ScaffoldError) -> Self {
        match err {
            ScaffoldError::UnresolvedPlaceholder { token, .. } => SkipReason::UnresolvedPlaceholder {
                token: token.clone(),
            },
            ScaffoldError::FileAlreadyExists(_) => SkipReason::FileAlreadyExists,
            ScaffoldError::FilesystemWriteFailure { source, .. } => {
                SkipReason::FilesystemWriteFailure {
                    message: source.to_string(),
                }
            }
            other => SkipReason::FilesystemWriteFailure {
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnresolvedPlaceholder { token } => {
                write!(f, "unresolved placeholder {{{{{token}}}}}")
            }
            SkipReason::FileAlreadyExists => f.write_str("file already exists"),
            SkipReason::FilesystemWriteFailure { message } => write!(f, "write failed: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    /// Relative output path; the raw path template when the path itself did not resolve.
    pub path: String,
    pub reason: SkipReason,
}

// ---------------------------------------------------------------------------
// GenerationRun
// ---------------------------------------------------------------------------

/// Outcome of rendering one template list for one identifier.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRun {
    pub identifier: PluginIdentifier,
    pub target_root: PathBuf,
    pub total: usize,
    /// Paths relative to `target_root`, in template order.
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

impl GenerationRun {
    fn new(identifier: PluginIdentifier, target_root: &Path) -> Self {
        Self {
            identifier,
            target_root: target_root.to_path_buf(),
            total: 0,
            written: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// A run that wrote nothing is a failure even if no error escaped.
    pub fn is_success(&self) -> bool {
        !self.written.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub relative_path: PathBuf,
    pub role: TemplateRole,
    pub contents: String,
}

/// Substitute every token in a template's path and body.
pub fn resolve(
    template: &FileTemplate,
    values: &BTreeMap<&'static str, String>,
) -> Result<ResolvedFile> {
    let unresolved = |token: String| ScaffoldError::UnresolvedPlaceholder {
        template: template.path.to_string(),
        token,
    };
    let path = substitute(template.path, values).map_err(unresolved)?;
    let contents = substitute(template.body, values).map_err(unresolved)?;
    Ok(ResolvedFile {
        relative_path: PathBuf::from(path),
        role: template.role,
        contents,
    })
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

pub struct Renderer<S = DiskSink> {
    sink: S,
    options: RenderOptions,
}

impl Renderer<DiskSink> {
    pub fn new(options: RenderOptions) -> Self {
        Self::with_sink(DiskSink, options)
    }
}

impl<S: OutputSink> Renderer<S> {
    pub fn with_sink(sink: S, options: RenderOptions) -> Self {
        Self { sink, options }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Render and write every template under `target_root`.
    ///
    /// Failures are recorded per file; a failing file never stops the
    /// remaining ones.
    pub fn render(
        &mut self,
        identifier: &PluginIdentifier,
        templates: &[FileTemplate],
        target_root: &Path,
    ) -> GenerationRun {
        let values = identifier.placeholders();
        let mut run = GenerationRun::new(identifier.clone(), target_root);

        for template in templates {
            run.total += 1;
            match self.render_one(template, &values, target_root) {
                Ok(relative) => {
                    tracing::debug!(path = %relative.display(), "wrote file");
                    run.written.push(relative);
                }
                Err((path, err)) => {
                    tracing::warn!(path = %path, error = %err, "skipped file");
                    run.skipped.push(SkippedFile {
                        path,
                        reason: SkipReason::from(&err),
                    });
                }
            }
        }

        tracing::info!(
            plugin = %identifier,
            written = run.written.len(),
            skipped = run.skipped.len(),
            "generation finished"
        );
        run
    }

    fn render_one(
        &mut self,
        template: &FileTemplate,
        values: &BTreeMap<&'static str, String>,
        target_root: &Path,
    ) -> std::result::Result<PathBuf, (String, ScaffoldError)> {
        let resolved = resolve(template, values).map_err(|e| {
            let path = substitute(template.path, values).unwrap_or_else(|_| template.path.to_string());
            (path, e)
        })?;
        let relative = resolved.relative_path;
        let display = relative.display().to_string();
        let full = target_root.join(&relative);

        if self.options.no_clobber && self.sink.exists(&full) {
            return Err((display, ScaffoldError::FileAlreadyExists(full)));
        }

        match self.sink.write_file(&full, &resolved.contents) {
            Ok(()) => Ok(relative),
            Err(ScaffoldError::Io(source)) => Err((
                display,
                ScaffoldError::FilesystemWriteFailure { path: full, source },
            )),
            Err(other) => Err((display, other)),
        }
    }
}

/// Render `templates` for `identifier` straight to disk.
pub fn render(
    identifier: &PluginIdentifier,
    templates: &[FileTemplate],
    target_root: &Path,
    options: RenderOptions,
) -> GenerationRun {
    Renderer::new(options).render(identifier, templates, target_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TemplateSet;
    use crate::sink::MemorySink;
    use crate::template::has_placeholders;
    use tempfile::TempDir;

    fn ble() -> PluginIdentifier {
        PluginIdentifier::parse("acme/plugin-ble").unwrap()
    }

    fn files_under(dir: &Path) -> Vec<PathBuf> {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                out.extend(files_under(&path));
            } else {
                out.push(path);
            }
        }
        out
    }

    #[test]
    fn full_set_in_memory_has_no_placeholders() {
        let templates = TemplateSet::default().entries();
        let root = Path::new("/virtual/plugin-ble");
        let mut renderer = Renderer::with_sink(MemorySink::new(), RenderOptions::default());
        let run = renderer.render(&ble(), &templates, root);

        assert_eq!(run.total, templates.len());
        assert_eq!(run.written.len(), templates.len());
        assert!(run.skipped.is_empty());

        let sink = renderer.into_sink();
        assert_eq!(sink.len(), templates.len());
        for (path, contents) in sink.files() {
            assert!(path.starts_with(root));
            assert!(!has_placeholders(&path.to_string_lossy()), "{}", path.display());
            assert!(!has_placeholders(contents), "{}", path.display());
        }
        assert!(sink.exists(&root.join("src/BleServiceProvider.php")));
        assert!(sink.exists(&root.join("resources/android/src/com/acme/ble/BleFunctions.kt")));
        assert!(sink.exists(&root.join("resources/js/plugin-ble.js")));
    }

    #[test]
    fn full_set_on_disk_writes_one_file_per_entry() {
        let dir = TempDir::new().unwrap();
        let templates = TemplateSet::default().entries();
        let run = render(&ble(), &templates, dir.path(), RenderOptions::default());

        assert!(run.is_success());
        let on_disk = files_under(dir.path());
        assert_eq!(on_disk.len(), templates.len());
        for path in on_disk {
            let contents = std::fs::read_to_string(&path).unwrap();
            assert!(!has_placeholders(&contents), "{}", path.display());
        }
    }

    #[test]
    fn unresolved_token_fails_only_that_file() {
        let templates = vec![
            FileTemplate::new("a.txt", TemplateRole::Documentation, "{{title}}"),
            FileTemplate::new("b.txt", TemplateRole::Documentation, "by {{author}}"),
            FileTemplate::new("{{license}}/c.txt", TemplateRole::Documentation, "c"),
            FileTemplate::new("d.txt", TemplateRole::Documentation, "{{namespace}}"),
        ];
        let mut renderer = Renderer::with_sink(MemorySink::new(), RenderOptions::default());
        let run = renderer.render(&ble(), &templates, Path::new("/out"));

        assert_eq!(run.total, 4);
        assert_eq!(run.written, vec![PathBuf::from("a.txt"), PathBuf::from("d.txt")]);
        assert_eq!(
            run.skipped,
            vec![
                SkippedFile {
                    path: "b.txt".to_string(),
                    reason: SkipReason::UnresolvedPlaceholder {
                        token: "author".to_string()
                    },
                },
                SkippedFile {
                    path: "{{license}}/c.txt".to_string(),
                    reason: SkipReason::UnresolvedPlaceholder {
                        token: "license".to_string()
                    },
                },
            ]
        );
        assert_eq!(renderer.sink().get(Path::new("/out/d.txt")), Some("Ble"));
    }

    #[test]
    fn overwrites_by_default() {
        let root = Path::new("/out");
        let sink = MemorySink::new().with_file("/out/README.md", "hand edited");
        let templates = TemplateSet::default().entries();
        let mut renderer = Renderer::with_sink(sink, RenderOptions::default());
        let run = renderer.render(&ble(), &templates, root);

        assert!(run.skipped.is_empty());
        let readme = renderer.sink().get(&root.join("README.md")).unwrap();
        assert!(readme.starts_with("# Ble"));
    }

    #[test]
    fn no_clobber_rerun_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let templates = TemplateSet::default().entries();
        let first = render(&ble(), &templates, dir.path(), RenderOptions::default());
        assert_eq!(first.written.len(), templates.len());

        let readme = dir.path().join("README.md");
        std::fs::write(&readme, "hand edited").unwrap();

        let second = render(
            &ble(),
            &templates,
            dir.path(),
            RenderOptions { no_clobber: true },
        );
        assert!(second.written.is_empty());
        assert!(!second.is_success());
        assert_eq!(second.skipped.len(), templates.len());
        assert!(second
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::FileAlreadyExists));
        assert_eq!(std::fs::read_to_string(&readme).unwrap(), "hand edited");
    }

    #[test]
    fn no_clobber_still_writes_missing_files() {
        let root = Path::new("/out");
        let sink = MemorySink::new().with_file("/out/.gitignore", "custom");
        let templates = TemplateSet::default().entries();
        let mut renderer = Renderer::with_sink(sink, RenderOptions { no_clobber: true });
        let run = renderer.render(&ble(), &templates, root);

        assert_eq!(run.written.len(), templates.len() - 1);
        assert_eq!(run.skipped.len(), 1);
        assert_eq!(run.skipped[0].path, ".gitignore");
        assert_eq!(renderer.sink().get(&root.join(".gitignore")), Some("custom"));
    }

    #[test]
    fn write_failures_are_isolated_per_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let templates = vec![
            FileTemplate::new("nested/a.txt", TemplateRole::Documentation, "a"),
            FileTemplate::new("b.txt", TemplateRole::Documentation, "b"),
        ];
        let run = render(&ble(), &templates, &blocker, RenderOptions::default());

        assert!(run.written.is_empty());
        assert_eq!(run.skipped.len(), 2);
        for skipped in &run.skipped {
            assert!(matches!(
                skipped.reason,
                SkipReason::FilesystemWriteFailure { .. }
            ));
        }
    }

    #[test]
    fn skip_reason_display() {
        let reason = SkipReason::UnresolvedPlaceholder {
            token: "author".to_string(),
        };
        assert_eq!(reason.to_string(), "unresolved placeholder {{author}}");
        assert_eq!(SkipReason::FileAlreadyExists.to_string(), "file already exists");
    }

    #[test]
    fn run_serializes_for_reports() {
        let mut renderer = Renderer::with_sink(MemorySink::new(), RenderOptions::default());
        let templates = vec![FileTemplate::new(
            "x.txt",
            TemplateRole::Documentation,
            "{{nope}}",
        )];
        let run = renderer.render(&ble(), &templates, Path::new("/out"));
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["identifier"]["vendor"], "acme");
        assert_eq!(json["total"].as_u64(), Some(1));
        assert_eq!(json["skipped"][0]["reason"]["kind"], "unresolved_placeholder");
        assert_eq!(json["skipped"][0]["reason"]["token"], "nope");
    }
}
