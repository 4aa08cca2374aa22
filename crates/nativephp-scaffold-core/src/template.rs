use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// TemplateRole
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateRole {
    Manifest,
    Source,
    NativeStub,
    Script,
    Documentation,
    Test,
    Ignore,
}

impl TemplateRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateRole::Manifest => "manifest",
            TemplateRole::Source => "source",
            TemplateRole::NativeStub => "native_stub",
            TemplateRole::Script => "script",
            TemplateRole::Documentation => "documentation",
            TemplateRole::Test => "test",
            TemplateRole::Ignore => "ignore",
        }
    }
}

impl fmt::Display for TemplateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FileTemplate
// ---------------------------------------------------------------------------

/// One output file: a path template, a body template and the file's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileTemplate {
    pub path: &'static str,
    pub role: TemplateRole,
    #[serde(skip)]
    pub body: &'static str,
}

impl FileTemplate {
    pub const fn new(path: &'static str, role: TemplateRole, body: &'static str) -> Self {
        Self { path, role, body }
    }

    /// Distinct token names referenced by the path and the body.
    pub fn tokens(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for text in [self.path, self.body] {
            for caps in token_re().captures_iter(text) {
                out.insert(caps[1].to_string());
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Placeholder substitution
// ---------------------------------------------------------------------------

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_re() -> &'static Regex {
    TOKEN_RE.get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap())
}

/// Replace every `{{token}}` in `text` with its value.
///
/// Returns the first token with no value as the error; the partially
/// substituted text is discarded.
pub fn substitute(
    text: &str,
    values: &BTreeMap<&'static str, String>,
) -> std::result::Result<String, String> {
    let mut missing: Option<String> = None;
    let out = token_re().replace_all(text, |caps: &Captures| match values.get(&caps[1]) {
        Some(v) => v.clone(),
        None => {
            missing.get_or_insert_with(|| caps[1].to_string());
            caps[0].to_string()
        }
    });
    match missing {
        Some(token) => Err(token),
        None => Ok(out.into_owned()),
    }
}

/// True if `text` still carries a `{{token}}` marker.
pub fn has_placeholders(text: &str) -> bool {
    token_re().is_match(text)
}
