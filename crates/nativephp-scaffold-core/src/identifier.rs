use crate::error::{Result, ScaffoldError};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Conventional prefix on plugin slugs, dropped when forming class names.
pub const PLUGIN_PREFIX: &str = "plugin-";

/// First label of the reverse-domain package used by the Android bridge.
pub const NATIVE_DOMAIN_ROOT: &str = "com";

// ---------------------------------------------------------------------------
// Segment validation
// ---------------------------------------------------------------------------

static SEGMENT_RE: OnceLock<Regex> = OnceLock::new();

fn segment_re() -> &'static Regex {
    SEGMENT_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*$").unwrap())
}

fn check_segment(label: &str, segment: &str, input: &str) -> Result<()> {
    let reason = if segment.is_empty() {
        format!("{label} segment is empty")
    } else if !segment_re().is_match(segment) {
        format!(
            "{label} segment '{segment}' must be lowercase alphanumeric with hyphens \
             and must not start with a hyphen"
        )
    } else {
        return Ok(());
    };
    Err(ScaffoldError::InvalidIdentifierFormat {
        input: input.to_string(),
        reason,
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// PluginIdentifier
// ---------------------------------------------------------------------------

/// A validated `vendor/plugin-name` pair.
///
/// Only the two raw segments are stored. Every other naming form is derived
/// on each call so the forms can never disagree with each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PluginIdentifier {
    vendor: String,
    plugin_slug: String,
}

impl PluginIdentifier {
    pub fn parse(raw: &str) -> Result<Self> {
        let input = raw.trim();
        let slashes = input.matches('/').count();
        if slashes != 1 {
            let reason = if slashes == 0 {
                "missing '/' between vendor and plugin name".to_string()
            } else {
                format!("expected exactly one '/', found {slashes}")
            };
            return Err(ScaffoldError::InvalidIdentifierFormat {
                input: input.to_string(),
                reason,
            });
        }

        let (vendor, slug) = input.split_once('/').unwrap_or((input, ""));
        check_segment("vendor", vendor, input)?;
        check_segment("plugin name", slug, input)?;

        let id = Self {
            vendor: vendor.to_string(),
            plugin_slug: slug.to_string(),
        };
        if id.name_words().is_empty() {
            return Err(ScaffoldError::EmptyNamespaceSegment(id.plugin_slug));
        }
        Ok(id)
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn plugin_slug(&self) -> &str {
        &self.plugin_slug
    }

    /// Hyphen-delimited words of the slug after the `plugin-` prefix.
    fn name_words(&self) -> Vec<&str> {
        self.plugin_slug
            .strip_prefix(PLUGIN_PREFIX)
            .unwrap_or(&self.plugin_slug)
            .split('-')
            .filter(|w| !w.is_empty())
            .collect()
    }

    /// Composer package name: `acme/plugin-ble`.
    pub fn package_name(&self) -> String {
        format!("{}/{}", self.vendor, self.plugin_slug)
    }

    /// PascalCase class-name segment: `plugin-barcode-scanner` → `BarcodeScanner`.
    pub fn namespace(&self) -> String {
        self.name_words().into_iter().map(capitalize).collect()
    }

    pub fn vendor_namespace(&self) -> String {
        self.vendor
            .split('-')
            .filter(|w| !w.is_empty())
            .map(capitalize)
            .collect()
    }

    /// Reverse-domain Android package, e.g. `com.acme.barcodescanner`.
    pub fn native_package(&self) -> String {
        format!(
            "{NATIVE_DOMAIN_ROOT}.{}.{}",
            self.vendor.replace('-', ""),
            self.name_words().concat()
        )
    }

    pub fn native_package_path(&self) -> String {
        self.native_package().replace('.', "/")
    }

    pub fn directory_name(&self) -> &str {
        &self.plugin_slug
    }

    /// Exported symbol of the generated JavaScript module.
    pub fn camel_name(&self) -> String {
        self.name_words()
            .into_iter()
            .enumerate()
            .map(|(i, w)| if i == 0 { w.to_string() } else { capitalize(w) })
            .collect()
    }

    /// The slug without its prefix: `barcode-scanner`.
    pub fn short_name(&self) -> String {
        self.name_words().join("-")
    }

    /// Human-readable name: `Barcode Scanner`.
    pub fn title(&self) -> String {
        self.name_words()
            .into_iter()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every placeholder token this identifier can resolve, keyed by token name.
    pub fn placeholders(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("vendor", self.vendor.clone()),
            ("plugin_slug", self.plugin_slug.clone()),
            ("package_name", self.package_name()),
            ("namespace", self.namespace()),
            ("vendor_namespace", self.vendor_namespace()),
            ("native_package", self.native_package()),
            ("native_package_path", self.native_package_path()),
            ("directory_name", self.directory_name().to_string()),
            ("camel_name", self.camel_name()),
            ("short_name", self.short_name()),
            ("title", self.title()),
        ])
    }
}

impl fmt::Display for PluginIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vendor, self.plugin_slug)
    }
}

impl std::str::FromStr for PluginIdentifier {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(raw: &str) {
        match PluginIdentifier::parse(raw) {
            Err(ScaffoldError::InvalidIdentifierFormat { .. }) => {}
            other => panic!("expected InvalidIdentifierFormat for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn barcode_scanner_forms() {
        let id = PluginIdentifier::parse("acme/plugin-barcode-scanner").unwrap();
        assert_eq!(id.vendor(), "acme");
        assert_eq!(id.plugin_slug(), "plugin-barcode-scanner");
        assert_eq!(id.namespace(), "BarcodeScanner");
        assert_eq!(id.camel_name(), "barcodeScanner");
        assert_eq!(id.directory_name(), "plugin-barcode-scanner");
        assert_eq!(id.package_name(), "acme/plugin-barcode-scanner");
        assert_eq!(id.short_name(), "barcode-scanner");
        assert_eq!(id.title(), "Barcode Scanner");
        assert_eq!(id.native_package(), "com.acme.barcodescanner");
        assert_eq!(id.native_package_path(), "com/acme/barcodescanner");
    }

    #[test]
    fn ble_forms() {
        let id = PluginIdentifier::parse("acme/plugin-ble").unwrap();
        assert_eq!(id.namespace(), "Ble");
        let native = id.native_package();
        assert!(native.contains("acme") && native.contains("ble"));
        assert!(!native.contains('-'));
        assert!(!native.chars().any(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn hyphenated_vendor() {
        let id = PluginIdentifier::parse("my-co/plugin-geo-fence").unwrap();
        assert_eq!(id.vendor_namespace(), "MyCo");
        assert_eq!(id.native_package(), "com.myco.geofence");
    }

    #[test]
    fn slug_without_prefix_is_used_whole() {
        let id = PluginIdentifier::parse("acme/haptics2").unwrap();
        assert_eq!(id.namespace(), "Haptics2");
        assert_eq!(id.camel_name(), "haptics2");
        assert_eq!(id.directory_name(), "haptics2");
    }

    #[test]
    fn derivations_are_idempotent() {
        for raw in ["acme/plugin-ble", "a1/plugin-x-y-z", "vendor/camera", "z/plugin-9lives"] {
            let id = PluginIdentifier::parse(raw).unwrap();
            assert_eq!(id.placeholders(), id.placeholders(), "{raw}");
            assert_eq!(id.namespace(), id.namespace());
            assert_eq!(id.camel_name(), id.camel_name());
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let id = PluginIdentifier::parse("  acme/plugin-ble\n").unwrap();
        assert_eq!(id.to_string(), "acme/plugin-ble");
    }

    #[test]
    fn slash_count_must_be_one() {
        for raw in ["acme", "acme-plugin-ble", "", "acme/plugin/ble", "a//b", "/"] {
            assert_invalid(raw);
        }
    }

    #[test]
    fn segments_must_match_pattern() {
        for raw in [
            "/plugin-ble",
            "acme/",
            "Acme/plugin-ble",
            "acme/Plugin-Ble",
            "-acme/plugin-ble",
            "acme/-plugin",
            "acme/plugin_ble",
            "ac me/plugin-ble",
        ] {
            assert_invalid(raw);
        }
    }

    #[test]
    fn error_names_offending_segment() {
        let err = PluginIdentifier::parse("acme/Plugin-Ble").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("plugin name segment 'Plugin-Ble'"), "{msg}");

        let err = PluginIdentifier::parse("ACME/plugin-ble").unwrap_err();
        assert!(err.to_string().contains("vendor segment 'ACME'"));
    }

    #[test]
    fn bare_prefix_is_empty_namespace() {
        for raw in ["acme/plugin-", "acme/plugin---"] {
            match PluginIdentifier::parse(raw) {
                Err(ScaffoldError::EmptyNamespaceSegment(slug)) => {
                    assert!(slug.starts_with("plugin-"))
                }
                other => panic!("expected EmptyNamespaceSegment for {raw}, got {other:?}"),
            }
        }
    }

    #[test]
    fn from_str_matches_parse() {
        let id: PluginIdentifier = "acme/plugin-ble".parse().unwrap();
        assert_eq!(id, PluginIdentifier::parse("acme/plugin-ble").unwrap());
    }

    #[test]
    fn placeholders_cover_every_form() {
        let id = PluginIdentifier::parse("acme/plugin-barcode-scanner").unwrap();
        let map = id.placeholders();
        assert_eq!(map["namespace"], "BarcodeScanner");
        assert_eq!(map["vendor_namespace"], "Acme");
        assert_eq!(map["camel_name"], "barcodeScanner");
        assert_eq!(map["directory_name"], "plugin-barcode-scanner");
        assert_eq!(map.len(), 11);
    }
}
