//! Auth command implementation.

use anyhow::{Result, anyhow};
use colored::Colorize;
use serde_json::json;
use tune_core::auth::ProviderAuthFile;
use tune_core::{ResourceKind, TuneConfig};

use super::AuthCommand;
use crate::session::{open_loader, open_storage};

/// Execute the auth command.
pub fn execute(config: &TuneConfig, command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Login { kind } => login(config, &kind),
        AuthCommand::Logout { all, kind } => logout(config, all, kind.as_deref()),
        AuthCommand::Status { json } => status(config, json),
    }
}

fn parse_kind(kind: &str) -> Result<ResourceKind> {
    ResourceKind::parse(kind).ok_or_else(|| {
        let supported: Vec<&str> =
            ResourceKind::all().into_iter().map(ResourceKind::as_str).collect();
        anyhow!("Unknown resource kind: {}. Supported: {}", kind, supported.join(", "))
    })
}

fn login(config: &TuneConfig, kind: &str) -> Result<()> {
    let kind = parse_kind(kind)?;
    let mut loader = open_loader(config)?;
    loader.authenticate(kind)?;
    loader.save()?;

    println!("{}", format!("✓ Authenticated for {}", kind).green());
    Ok(())
}

fn logout(config: &TuneConfig, all: bool, kind: Option<&str>) -> Result<()> {
    let mut storage = open_storage(config)?;

    let removed: Vec<String> = if all {
        let keys: Vec<String> = storage.keys().into_iter().map(str::to_string).collect();
        for key in &keys {
            storage.remove(key);
        }
        keys
    } else {
        let kind = kind.ok_or_else(|| anyhow!("Specify a resource kind or use --all"))?;
        let kind = parse_kind(kind)?;
        storage.remove(kind.as_str()).map(|_| kind.as_str().to_string()).into_iter().collect()
    };

    storage.save()?;

    if removed.is_empty() {
        println!("{}", "No stored tokens to remove".yellow());
    } else {
        for key in removed {
            println!("{}", format!("✓ Logged out from {}", key).green());
        }
    }
    Ok(())
}

/// Where the token for `kind` would come from.
fn token_source(config: &TuneConfig, kind: ResourceKind, stored: bool) -> Option<&'static str> {
    if stored {
        return Some("token_file");
    }
    match kind {
        ResourceKind::Gist => ProviderAuthFile::new(config.auth_file())
            .github_oauth("github.com")
            .map(|_| "auth_file"),
    }
}

fn status(config: &TuneConfig, json: bool) -> Result<()> {
    let storage = open_storage(config)?;
    let entries: Vec<(ResourceKind, Option<&'static str>)> = ResourceKind::all()
        .into_iter()
        .map(|kind| (kind, token_source(config, kind, storage.get(kind.as_str()).is_some())))
        .collect();

    if json {
        let resources: Vec<_> = entries
            .iter()
            .map(|(kind, source)| {
                json!({ "kind": kind, "authenticated": source.is_some(), "source": source })
            })
            .collect();
        let output = json!({
            "token_file": config.token_file().display().to_string(),
            "resources": resources,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Authentication status:".bold().cyan());
    println!("  Token file: {}", config.token_file().display());
    for (kind, source) in entries {
        match source {
            Some("auth_file") => {
                println!("  • {}: {}", kind, "Authenticated (provider auth file)".green());
            }
            Some(_) => println!("  • {}: {}", kind, "Authenticated".green()),
            None => println!("  • {}: {}", kind, "Not authenticated".yellow()),
        }
    }
    Ok(())
}
