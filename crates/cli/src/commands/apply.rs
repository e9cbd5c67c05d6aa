//! Apply command.

use anyhow::{Context, Result};
use envpatch_engine::{MutationRequest, OverlayEngine, Outcome, ProjectLayout, Request};

/// Which apply steps the user opted out of. Every step runs by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    pub keep_kafka: bool,
    pub keep_redis: bool,
    pub keep_urls: bool,
}

impl ApplyOptions {
    fn into_request(self, environment: String) -> MutationRequest {
        MutationRequest::new(environment)
            .with_disable_kafka(!self.keep_kafka)
            .with_disable_redis(!self.keep_redis)
            .with_replace_urls(!self.keep_urls)
    }
}

pub fn run(layout: ProjectLayout, env: &str, options: ApplyOptions, quiet: bool) -> Result<()> {
    let environment = super::resolve_environment(env);
    let engine = OverlayEngine::new(layout);

    let outcome = engine
        .handle_request(&Request::Apply(options.into_request(environment.clone())))
        .with_context(|| format!("Failed to apply '{}' configuration", environment))?;

    if let Outcome::Applied(report) = &outcome {
        tracing::debug!(
            format = %report.format,
            profile_documents = report.profile_documents,
            kafka_documents = report.kafka_documents,
            redis_documents = report.redis_documents,
            substitutions = report.substitutions,
            url_rewrites = report.url_rewrites,
            touched = ?outcome.touched_files(),
            "apply finished"
        );
    }

    if !quiet {
        println!("{}", outcome.message());
    }
    Ok(())
}
