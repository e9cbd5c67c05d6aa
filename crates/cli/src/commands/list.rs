//! List command: discovered environments for the detected document format.

use std::path::PathBuf;

use anyhow::{Context, Result};
use envpatch_engine::{DocumentFormat, ProjectLayout};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Listing {
    format: DocumentFormat,
    resources_dir: PathBuf,
    environments: Vec<EnvironmentEntry>,
}

#[derive(Debug, Serialize)]
struct EnvironmentEntry {
    name: String,
    overlay_document: PathBuf,
    backed_up: bool,
}

pub fn run(layout: &ProjectLayout, output_format: &str) -> Result<()> {
    // Validate output format before touching the filesystem
    match output_format {
        "json" | "table" => {}
        _ => {
            anyhow::bail!(
                "Invalid output format '{}'. Valid values are 'json' or 'table'",
                output_format
            );
        }
    }

    let listing = collect(layout)?;

    match output_format {
        "json" => println!("{}", serde_json::to_string_pretty(&listing)?),
        _ => print!("{}", render_table(&listing)),
    }
    Ok(())
}

fn collect(layout: &ProjectLayout) -> Result<Listing> {
    let format = layout.detect_format();
    let store = layout.backup_store();
    let environments = layout
        .environments(format)
        .context("Failed to list environments")?
        .into_iter()
        .map(|name| {
            let overlay_document = layout.overlay_document(&name, format);
            EnvironmentEntry {
                backed_up: store.has_backup(&overlay_document),
                overlay_document,
                name,
            }
        })
        .collect();

    Ok(Listing {
        format,
        resources_dir: layout.resources_dir().to_path_buf(),
        environments,
    })
}

fn render_table(listing: &Listing) -> String {
    let mut out = format!(
        "Format: {} ({})\n",
        listing.format,
        listing.resources_dir.display()
    );

    if listing.environments.is_empty() {
        out.push_str("No environments found.\n");
        return out;
    }

    out.push_str(&format!("{:<20} {:<8} {}\n", "Environment", "Backup", "Overlay"));
    out.push_str(&format!("{}\n", "-".repeat(60)));
    for entry in &listing.environments {
        let file_name = entry
            .overlay_document
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let backup = if entry.backed_up { "yes" } else { "no" };
        out.push_str(&format!("{:<20} {:<8} {}\n", entry.name, backup, file_name));
    }
    out
}
