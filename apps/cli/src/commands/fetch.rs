//! Fetch command implementation.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use tune_core::TuneConfig;

use crate::session::open_loader;

/// Fetches a resource and prints its content.
pub fn execute(config: &TuneConfig, uri: &str, json: bool) -> Result<()> {
    let mut loader = open_loader(config)?;
    let loaded = loader.load(uri);
    loader.save()?;
    let resource = loaded?;

    if json {
        let output = json!({
            "kind": resource.kind(),
            "content": resource.content(),
            "metadata": resource.metadata(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(metadata) = resource.metadata() {
        eprintln!(
            "{} {} by {} (revision {}, updated {})",
            resource.kind().to_string().cyan(),
            metadata.id.bold(),
            metadata.owner.green(),
            metadata.revision,
            metadata.updated_at.format("%Y-%m-%d %H:%M"),
        );
    }

    print!("{}", resource.content());
    if !resource.content().ends_with('\n') {
        println!();
    }

    Ok(())
}
