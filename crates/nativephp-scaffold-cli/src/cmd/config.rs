use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use nativephp_scaffold_core::{
    config::{ScaffoldConfig, WarnLevel},
    io,
};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,

    /// Write a default config file if none exists
    Init,

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(
    root: &Path,
    config_path: Option<&Path>,
    subcmd: ConfigSubcommand,
    json: bool,
) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, config_path, json),
        ConfigSubcommand::Init => init(root, config_path, json),
        ConfigSubcommand::Validate => validate(root, config_path, json),
    }
}

fn show(root: &Path, config_path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let path = super::config_file(root, config_path);
    let config = super::load_config(root, config_path)?;

    if json {
        return print_json(&serde_json::json!({
            "path": path,
            "exists": path.exists(),
            "config": config,
        }));
    }

    let source = if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", path.display())
    };
    println!("# {source}");
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

fn init(root: &Path, config_path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let path = super::config_file(root, config_path);
    let data = serde_yaml::to_string(&ScaffoldConfig::default())?;
    let created = io::write_if_missing(&path, data.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        print_json(&serde_json::json!({
            "path": path,
            "created": created,
        }))?;
    } else if created {
        println!("  created: {}", path.display());
    } else {
        println!("  exists:  {}", path.display());
    }
    Ok(())
}

fn validate(root: &Path, config_path: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root, config_path)?;
    let warnings = config.validate();

    if json {
        print_json(&serde_json::json!({
            "warnings": warnings,
        }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}
