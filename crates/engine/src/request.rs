//! Requests accepted by the engine and the outcomes it reports.
//!
//! Responsibilities:
//! - Model the "apply" and "restore" user actions as plain values.
//! - Describe what an operation changed so a front end can notify the user and refresh
//!   any cached view of the touched files.
//!
//! Does NOT handle:
//! - Executing requests (see `engine`).
//! - Rendering outcomes (see the CLI crate).

use std::path::PathBuf;

use serde::Serialize;

use crate::backup::{BackupStatus, RestoreStatus};
use crate::document::DocumentFormat;

/// Input of one apply operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub environment: String,
    pub disable_kafka: bool,
    pub disable_redis: bool,
    pub replace_urls: bool,
}

impl MutationRequest {
    /// A request that only activates `environment`; every switch is off.
    pub fn new(environment: impl Into<String>) -> Self {
        Self {
            environment: environment.into(),
            disable_kafka: false,
            disable_redis: false,
            replace_urls: false,
        }
    }

    pub fn with_disable_kafka(mut self, disable: bool) -> Self {
        self.disable_kafka = disable;
        self
    }

    pub fn with_disable_redis(mut self, disable: bool) -> Self {
        self.disable_redis = disable;
        self
    }

    pub fn with_replace_urls(mut self, replace: bool) -> Self {
        self.replace_urls = replace;
        self
    }
}

/// A user action routed through `OverlayEngine::handle_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Apply(MutationRequest),
    Restore { environment: String },
}

/// What an apply operation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub environment: String,
    pub format: DocumentFormat,
    pub base_document: PathBuf,
    pub overlay_document: PathBuf,
    pub base_backup: BackupStatus,
    pub overlay_backup: BackupStatus,
    /// Base documents that received the active profile.
    pub profile_documents: usize,
    /// Overlay documents whose Kafka listener switch was set (0 when not requested).
    pub kafka_documents: usize,
    /// Overlay documents whose Redis consumer switch was set (0 when not requested).
    pub redis_documents: usize,
    /// String values rewritten by placeholder substitution.
    pub substitutions: usize,
    /// String values rewritten by URL replacement.
    pub url_rewrites: usize,
}

/// What a restore operation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreReport {
    pub environment: String,
    pub format: DocumentFormat,
    pub base_document: PathBuf,
    pub overlay_document: PathBuf,
    pub base: RestoreStatus,
    pub overlay: RestoreStatus,
}

impl RestoreReport {
    pub fn restored_anything(&self) -> bool {
        self.base == RestoreStatus::Restored || self.overlay == RestoreStatus::Restored
    }
}

/// Result of a successfully handled request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Outcome {
    Applied(ApplyReport),
    Restored(RestoreReport),
}

impl Outcome {
    pub fn environment(&self) -> &str {
        match self {
            Outcome::Applied(report) => &report.environment,
            Outcome::Restored(report) => &report.environment,
        }
    }

    /// Files whose contents may have changed; views of them should be refreshed.
    pub fn touched_files(&self) -> Vec<PathBuf> {
        match self {
            Outcome::Applied(report) => {
                vec![report.base_document.clone(), report.overlay_document.clone()]
            }
            Outcome::Restored(report) => [
                (report.base, &report.base_document),
                (report.overlay, &report.overlay_document),
            ]
            .into_iter()
            .filter(|(status, _)| *status == RestoreStatus::Restored)
            .map(|(_, path)| path.clone())
            .collect(),
        }
    }

    /// One-line notification for the user.
    pub fn message(&self) -> String {
        match self {
            Outcome::Applied(report) => {
                format!("Applied '{}' configuration successfully.", report.environment)
            }
            Outcome::Restored(report) => {
                format!("Restored original configuration for '{}'.", report.environment)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restore_report(base: RestoreStatus, overlay: RestoreStatus) -> RestoreReport {
        RestoreReport {
            environment: "dev".to_string(),
            format: DocumentFormat::Hierarchical,
            base_document: PathBuf::from("application.yml"),
            overlay_document: PathBuf::from("application-dev.yml"),
            base,
            overlay,
        }
    }

    #[test]
    fn test_mutation_request_builder() {
        let request = MutationRequest::new("dev")
            .with_disable_kafka(true)
            .with_replace_urls(true);
        assert_eq!(request.environment, "dev");
        assert!(request.disable_kafka);
        assert!(!request.disable_redis);
        assert!(request.replace_urls);
    }

    #[test]
    fn test_restore_touched_files_only_lists_restored_documents() {
        let outcome = Outcome::Restored(restore_report(
            RestoreStatus::NothingToRestore,
            RestoreStatus::Restored,
        ));
        assert_eq!(outcome.touched_files(), [PathBuf::from("application-dev.yml")]);
    }

    #[test]
    fn test_restored_anything() {
        assert!(restore_report(RestoreStatus::Restored, RestoreStatus::NothingToRestore).restored_anything());
        assert!(
            !restore_report(RestoreStatus::NothingToRestore, RestoreStatus::NothingToRestore)
                .restored_anything()
        );
    }

    #[test]
    fn test_messages() {
        let outcome = Outcome::Restored(restore_report(
            RestoreStatus::Restored,
            RestoreStatus::Restored,
        ));
        assert_eq!(outcome.message(), "Restored original configuration for 'dev'.");
        assert_eq!(outcome.environment(), "dev");
    }
}
