//! `autojoin list`: show what the active profile enables.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use autojoin_config::{ExtensionConfigStore, ResolvedConfig};
use autojoin_extensions::ExtensionCatalog;

use crate::builtin::builtin_catalog;
use crate::formatter::{OutputFormat, to_json};
use crate::theme::Theme;

#[derive(Debug, Serialize)]
struct ListedExtension {
    name: String,
    registered: bool,
    capabilities: Vec<&'static str>,
    preference_keys: Vec<String>,
}

/// Print the enabled extensions in processing order.
pub(crate) fn list_extensions(resolved: &ResolvedConfig, format: OutputFormat) -> Result<()> {
    let store = ExtensionConfigStore::from_section(&resolved.config.extensions)
        .context("failed to load the extension profile")?;
    let listed = collect(&store, &builtin_catalog()?);

    match format {
        OutputFormat::Json => println!("{}", to_json(&listed)?),
        OutputFormat::Pretty => {
            if !store.is_enabled() {
                println!("{}", Theme::warning("extensions are disabled"));
                return Ok(());
            }
            println!("{}", Theme::header("Enabled extensions"));
            if listed.is_empty() {
                println!("  {}", Theme::dimmed("(none)"));
            }
            for ext in &listed {
                print_entry(ext);
            }
        },
    }
    Ok(())
}

fn collect(store: &ExtensionConfigStore, catalog: &ExtensionCatalog) -> Vec<ListedExtension> {
    store
        .enabled_units()
        .iter()
        .map(|id| ListedExtension {
            name: id.to_string(),
            registered: catalog.contains(id),
            capabilities: store
                .permissions(id)
                .iter_capabilities()
                .map(|c| c.as_str())
                .collect(),
            preference_keys: store.preferences(id).into_keys().collect(),
        })
        .collect()
}

fn print_entry(ext: &ListedExtension) {
    let name = if ext.registered {
        ext.name.bold().to_string()
    } else {
        format!("{} {}", ext.name.bold(), "(not installed)".red())
    };
    println!("  {name}");

    let caps = if ext.capabilities.is_empty() {
        "none".to_owned()
    } else {
        ext.capabilities.join(", ")
    };
    println!("    {} {caps}", "capabilities:".dimmed());
    if !ext.preference_keys.is_empty() {
        println!("    {} {}", "preferences:".dimmed(), ext.preference_keys.join(", "));
    }
}
