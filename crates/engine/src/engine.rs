//! Apply and restore orchestration.
//!
//! Responsibilities:
//! - Run one apply or restore request to completion against a `ProjectLayout`.
//! - Back up both documents before their first mutation.
//! - Drive the activation, substitution and URL rewrite steps through the format's codec.
//!
//! Does NOT handle:
//! - Locking or concurrent callers; requests are expected one at a time.
//! - Rolling back a failed apply; `restore` is the recovery path.
//! - Presenting outcomes to the user (see the CLI crate).
//!
//! Invariants:
//! - Both documents must exist before anything is backed up or written.
//! - The environment-definition file is parsed once per apply.
//! - All mutations happen in memory; the base document is written first, then the overlay.
//! - Listener switches and the active profile follow "every document that has the marker,
//!   otherwise the first document", so the setting always lands somewhere. The profile
//!   marker is the `spring` key; a listener's marker is its parent mapping, with or without
//!   the `enabled` leaf.

use std::path::Path;

use tracing::debug;

use crate::constants::{
    ACTIVE_PROFILE_PATH, KAFKA_LISTENER_PATH, REDIS_CONSUMER_PATH, SPRING_MARKER_PATH,
};
use crate::document::{DocumentCodec, Mapping, Node, tree};
use crate::env_block::EnvironmentTable;
use crate::error::EngineError;
use crate::fsutil::atomic_write;
use crate::layout::{ProjectLayout, validate_environment};
use crate::request::{ApplyReport, MutationRequest, Outcome, Request, RestoreReport};

/// Applies environment overlays to, and restores, one project's documents.
#[derive(Debug, Clone)]
pub struct OverlayEngine {
    layout: ProjectLayout,
}

impl OverlayEngine {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Single entry point for front ends.
    pub fn handle_request(&self, request: &Request) -> Result<Outcome, EngineError> {
        match request {
            Request::Apply(mutation) => self.apply(mutation).map(Outcome::Applied),
            Request::Restore { environment } => self.restore(environment).map(Outcome::Restored),
        }
    }

    /// Activate `request.environment` and apply the requested switches.
    ///
    /// # Errors
    ///
    /// - `EngineError::InvalidEnvironment` for identifiers that cannot name an overlay file.
    /// - `EngineError::MissingDocument` if the base or overlay document does not exist;
    ///   nothing is backed up or written in that case.
    /// - I/O and codec errors, immediately and without retry.
    pub fn apply(&self, request: &MutationRequest) -> Result<ApplyReport, EngineError> {
        let env = request.environment.as_str();
        validate_environment(env)?;

        let format = self.layout.detect_format();
        let codec = format.codec();
        let base_path = self.layout.base_document(format);
        let overlay_path = self.layout.overlay_document(env, format);
        debug!(
            "Applying environment '{}' ({} format): kafka={}, redis={}, urls={}",
            env, format, request.disable_kafka, request.disable_redis, request.replace_urls
        );

        for path in [&base_path, &overlay_path] {
            if !path.is_file() {
                return Err(EngineError::MissingDocument { path: path.clone() });
            }
        }

        let store = self.layout.backup_store();
        let base_backup = store.ensure_backup(&base_path)?;
        let overlay_backup = store.ensure_backup(&overlay_path)?;

        let table = EnvironmentTable::load(&self.layout.env_file())?;

        let mut base_documents = read_documents(codec, &base_path)?;
        let profile_documents = activate(
            codec,
            &mut base_documents,
            Marker::Key(SPRING_MARKER_PATH),
            ACTIVE_PROFILE_PATH,
            Node::String(env.to_string()),
        );

        let mut overlay_documents = read_documents(codec, &overlay_path)?;
        let kafka_documents = if request.disable_kafka {
            activate(
                codec,
                &mut overlay_documents,
                Marker::ParentOf(KAFKA_LISTENER_PATH),
                KAFKA_LISTENER_PATH,
                Node::Bool(false),
            )
        } else {
            0
        };
        let redis_documents = if request.disable_redis {
            activate(
                codec,
                &mut overlay_documents,
                Marker::ParentOf(REDIS_CONSUMER_PATH),
                REDIS_CONSUMER_PATH,
                Node::Bool(false),
            )
        } else {
            0
        };

        let mut substitutions = 0;
        if let Some(variables) = table.variables_for(env) {
            for (key, value) in variables {
                for document in overlay_documents.iter_mut() {
                    substitutions += tree::substitute_placeholder(document, key, value);
                }
            }
        }

        let mut url_rewrites = 0;
        if request.replace_urls {
            match table.urls_for(env) {
                Some(urls) => {
                    let pairs: Vec<(&str, &str)> = urls
                        .iter()
                        .map(|(old, new)| (old.as_str(), new.as_str()))
                        .collect();
                    for document in overlay_documents.iter_mut() {
                        url_rewrites += tree::replace_substrings(document, &pairs);
                    }
                }
                None => debug!("No URL section for environment '{}'", env),
            }
        }

        write_documents(codec, &base_path, &base_documents)?;
        write_documents(codec, &overlay_path, &overlay_documents)?;

        Ok(ApplyReport {
            environment: env.to_string(),
            format,
            base_document: base_path,
            overlay_document: overlay_path,
            base_backup,
            overlay_backup,
            profile_documents,
            kafka_documents,
            redis_documents,
            substitutions,
            url_rewrites,
        })
    }

    /// Copy the backups of `environment`'s documents back over the live files.
    ///
    /// Documents without a backup are left alone and reported as `NothingToRestore`.
    pub fn restore(&self, environment: &str) -> Result<RestoreReport, EngineError> {
        validate_environment(environment)?;

        let format = self.layout.detect_format();
        let base_path = self.layout.base_document(format);
        let overlay_path = self.layout.overlay_document(environment, format);
        debug!("Restoring environment '{}' ({} format)", environment, format);

        let store = self.layout.backup_store();
        let base = store.restore(&base_path)?;
        let overlay = store.restore(&overlay_path)?;

        Ok(RestoreReport {
            environment: environment.to_string(),
            format,
            base_document: base_path,
            overlay_document: overlay_path,
            base,
            overlay,
        })
    }
}

/// What marks a document as the home of a setting.
#[derive(Debug, Clone, Copy)]
enum Marker<'a> {
    /// The key itself is present.
    Key(&'a str),
    /// Every mapping above the leaf of this path is present.
    ParentOf(&'a str),
}

impl Marker<'_> {
    fn matches(self, codec: &dyn DocumentCodec, document: &Mapping) -> bool {
        match self {
            Marker::Key(path) => codec.contains_path(document, path),
            Marker::ParentOf(path) => codec.contains_parent(document, path),
        }
    }
}

/// Set `target` to `value` in every document matching `marker`, or in the first
/// document if none does. Returns the number of documents changed.
fn activate(
    codec: &dyn DocumentCodec,
    documents: &mut [Mapping],
    marker: Marker<'_>,
    target: &str,
    value: Node,
) -> usize {
    let mut applied = 0;
    for document in documents.iter_mut() {
        if marker.matches(codec, document) {
            codec.set_value(document, target, value.clone());
            applied += 1;
        }
    }

    if applied == 0
        && let Some(first) = documents.first_mut()
    {
        debug!("{:?} not present in any document; setting {} in the first", marker, target);
        codec.set_value(first, target, value);
        applied = 1;
    }
    applied
}

fn read_documents(codec: &dyn DocumentCodec, path: &Path) -> Result<Vec<Mapping>, EngineError> {
    let text = std::fs::read_to_string(path).map_err(|e| EngineError::io(path, e))?;
    codec.decode(path, &text)
}

fn write_documents(
    codec: &dyn DocumentCodec,
    path: &Path,
    documents: &[Mapping],
) -> Result<(), EngineError> {
    let text = codec.encode(path, documents)?;
    atomic_write(path, text.as_bytes()).map_err(|e| EngineError::io(path, e))?;
    debug!("Wrote {} document(s) to {}", documents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{PropertiesCodec, YamlCodec};

    fn yaml_docs(text: &str) -> Vec<Mapping> {
        YamlCodec.decode(Path::new("t.yml"), text).unwrap()
    }

    #[test]
    fn test_activate_sets_every_document_with_marker() {
        let mut docs = yaml_docs(
            "kafka:\n  listener:\n    enabled: true\n---\nother: 1\n---\nkafka:\n  listener:\n    enabled: true\n",
        );
        let applied = activate(
            &YamlCodec,
            &mut docs,
            Marker::ParentOf(KAFKA_LISTENER_PATH),
            KAFKA_LISTENER_PATH,
            Node::Bool(false),
        );
        assert_eq!(applied, 2);
        assert!(!YamlCodec.contains_path(&docs[1], KAFKA_LISTENER_PATH));
        assert_eq!(
            docs[2],
            yaml_docs("kafka:\n  listener:\n    enabled: false\n").remove(0)
        );
    }

    #[test]
    fn test_activate_falls_back_to_first_document() {
        let mut docs = yaml_docs("a: 1\n---\nb: 2\n");
        let applied = activate(
            &YamlCodec,
            &mut docs,
            Marker::ParentOf(REDIS_CONSUMER_PATH),
            REDIS_CONSUMER_PATH,
            Node::Bool(false),
        );
        assert_eq!(applied, 1);
        assert!(YamlCodec.contains_path(&docs[0], REDIS_CONSUMER_PATH));
        assert!(!YamlCodec.contains_path(&docs[1], REDIS_CONSUMER_PATH));
    }

    #[test]
    fn test_activate_listener_in_document_with_parent_mapping_only() {
        let mut docs = yaml_docs("a: 1\n---\nkafka:\n  listener:\n    concurrency: 3\n");
        let applied = activate(
            &YamlCodec,
            &mut docs,
            Marker::ParentOf(KAFKA_LISTENER_PATH),
            KAFKA_LISTENER_PATH,
            Node::Bool(false),
        );
        assert_eq!(applied, 1);
        assert_eq!(docs[0], yaml_docs("a: 1\n").remove(0));
        assert_eq!(
            docs[1],
            yaml_docs("kafka:\n  listener:\n    concurrency: 3\n    enabled: false\n").remove(0)
        );
    }

    #[test]
    fn test_activate_profile_uses_spring_marker() {
        let mut docs = yaml_docs("server:\n  port: 1\n---\nspring:\n  application:\n    name: x\n");
        let applied = activate(
            &YamlCodec,
            &mut docs,
            Marker::Key(SPRING_MARKER_PATH),
            ACTIVE_PROFILE_PATH,
            Node::String("dev".into()),
        );
        assert_eq!(applied, 1);
        assert!(!YamlCodec.contains_path(&docs[0], ACTIVE_PROFILE_PATH));
        assert!(YamlCodec.contains_path(&docs[1], ACTIVE_PROFILE_PATH));
        assert!(YamlCodec.contains_path(&docs[1], "spring.application.name"));
    }

    #[test]
    fn test_activate_flat_document() {
        let mut docs = PropertiesCodec
            .decode(Path::new("t.properties"), "server.port=8080\n")
            .unwrap();
        activate(
            &PropertiesCodec,
            &mut docs,
            Marker::Key(SPRING_MARKER_PATH),
            ACTIVE_PROFILE_PATH,
            Node::String("qa".into()),
        );
        assert_eq!(
            docs[0].get(ACTIVE_PROFILE_PATH).and_then(Node::as_str),
            Some("qa")
        );
    }
}
