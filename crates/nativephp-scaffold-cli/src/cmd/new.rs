use crate::output::print_json;
use anyhow::Context;
use nativephp_scaffold_core::{
    paths,
    render::{GenerationRun, RenderOptions, Renderer},
    sink::PreviewSink,
    MetadataPlacement, PluginIdentifier, TemplateSet,
};
use std::path::{Path, PathBuf};

pub struct NewArgs {
    pub identifier: String,
    pub path: Option<PathBuf>,
    pub no_clobber: bool,
    pub dry_run: bool,
    pub metadata: Option<MetadataPlacement>,
}

pub fn run(
    root: &Path,
    config_path: Option<&Path>,
    args: NewArgs,
    json: bool,
) -> anyhow::Result<()> {
    // Identifier errors abort before anything touches the filesystem.
    let id = PluginIdentifier::parse(&args.identifier).context("cannot scaffold plugin")?;

    let config = super::load_config(root, config_path)?;
    let placement = args.metadata.unwrap_or(config.metadata_placement);
    let target = args
        .path
        .unwrap_or_else(|| paths::plugin_dir(root, &config.packages_dir, &id));
    let options = RenderOptions {
        no_clobber: args.no_clobber || config.no_clobber,
    };
    let templates = TemplateSet::new(placement).entries();

    tracing::debug!(
        plugin = %id,
        target = %target.display(),
        placement = %placement,
        no_clobber = options.no_clobber,
        dry_run = args.dry_run,
        "starting generation"
    );

    let run = if args.dry_run {
        Renderer::with_sink(PreviewSink::new(), options).render(&id, &templates, &target)
    } else {
        Renderer::new(options).render(&id, &templates, &target)
    };

    if json {
        print_json(&serde_json::json!({
            "package": id.package_name(),
            "target_root": run.target_root,
            "metadata_placement": placement,
            "dry_run": args.dry_run,
            "total": run.total,
            "written": run.written,
            "skipped": run.skipped,
        }))?;
    } else {
        print_report(&run, args.dry_run);
    }

    if !run.is_success() {
        anyhow::bail!(
            "no files were written for {} ({} skipped)",
            id,
            run.skipped.len()
        );
    }
    Ok(())
}

fn print_report(run: &GenerationRun, dry_run: bool) {
    let (created, heading) = if dry_run {
        ("would create", "Dry run for")
    } else {
        ("created", "Scaffolding")
    };

    println!(
        "{heading} {} in: {}",
        run.identifier,
        run.target_root.display()
    );
    for path in &run.written {
        println!("  {created}: {}", path.display());
    }
    for skipped in &run.skipped {
        println!("  skipped: {} ({})", skipped.path, skipped.reason);
    }

    println!(
        "\n{} of {} files {}.",
        run.written.len(),
        run.total,
        if dry_run { "would be written" } else { "written" }
    );
    if run.is_success() && !dry_run {
        println!(
            "Next: composer config repositories.{vendor}-{slug} path {dir} && composer require {package}",
            vendor = run.identifier.vendor(),
            slug = run.identifier.plugin_slug(),
            dir = run.target_root.display(),
            package = run.identifier.package_name(),
        );
    }
}
