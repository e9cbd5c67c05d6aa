//! Restore command.

use anyhow::{Context, Result};
use envpatch_engine::{OverlayEngine, Outcome, ProjectLayout, Request, RestoreReport, RestoreStatus};

pub fn run(layout: ProjectLayout, env: &str, quiet: bool) -> Result<()> {
    let environment = super::resolve_environment(env);
    let engine = OverlayEngine::new(layout);

    let outcome = engine
        .handle_request(&Request::Restore {
            environment: environment.clone(),
        })
        .with_context(|| format!("Failed to restore '{}' configuration", environment))?;

    tracing::debug!(touched = ?outcome.touched_files(), "restore finished");

    if quiet {
        return Ok(());
    }
    println!("{}", outcome.message());
    if let Outcome::Restored(report) = &outcome {
        for note in missing_backup_notes(report) {
            println!("{}", note);
        }
    }
    Ok(())
}

/// One line per document that had no backup to restore from.
fn missing_backup_notes(report: &RestoreReport) -> Vec<String> {
    [
        (report.base, &report.base_document),
        (report.overlay, &report.overlay_document),
    ]
    .into_iter()
    .filter(|(status, _)| *status == RestoreStatus::NothingToRestore)
    .map(|(_, path)| format!("No backup found for {}; left unchanged.", path.display()))
    .collect()
}
