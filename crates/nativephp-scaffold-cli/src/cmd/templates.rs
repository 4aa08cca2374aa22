use crate::output::{print_json, print_table};
use nativephp_scaffold_core::{MetadataPlacement, TemplateSet};
use std::path::Path;

pub fn run(
    root: &Path,
    config_path: Option<&Path>,
    metadata: Option<MetadataPlacement>,
    json: bool,
) -> anyhow::Result<()> {
    let placement = match metadata {
        Some(p) => p,
        None => super::load_config(root, config_path)?.metadata_placement,
    };
    let entries = TemplateSet::new(placement).entries();

    if json {
        let list: Vec<_> = entries
            .iter()
            .map(|t| {
                serde_json::json!({
                    "path": t.path,
                    "role": t.role,
                    "tokens": t.tokens(),
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "metadata_placement": placement,
            "templates": list,
        }));
    }

    let rows = entries
        .iter()
        .map(|t| vec![t.role.to_string(), t.path.to_string()])
        .collect();
    print_table(&["ROLE", "PATH"], rows);
    println!("\n{} files, metadata in: {placement}", entries.len());
    Ok(())
}
