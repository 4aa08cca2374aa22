use crate::output::{print_json, print_table};
use anyhow::Context;
use nativephp_scaffold_core::PluginIdentifier;

pub fn run(identifier: &str, json: bool) -> anyhow::Result<()> {
    let id = PluginIdentifier::parse(identifier).context("invalid plugin identifier")?;
    let forms = id.placeholders();

    if json {
        return print_json(&forms);
    }

    let rows = forms
        .into_iter()
        .map(|(token, value)| vec![token.to_string(), value])
        .collect();
    print_table(&["TOKEN", "VALUE"], rows);
    Ok(())
}
