//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map EngineError and ConfigError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories. Code 2 is left to clap's
//!   usage errors; code 3 is unused.

use std::io::ErrorKind;

use envpatch_engine::{ConfigError, EngineError};

/// Structured exit codes for envpatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Not found - a configuration document or the project root does not exist.
    ///
    /// Scripts should check the environment name and `--project-root`.
    NotFound = 4,

    /// Validation error - bad environment identifier or unparseable document.
    ///
    /// Scripts should fix the input and not retry.
    ValidationError = 5,

    /// Permission denied - a document, backup or dotenv file could not be accessed.
    PermissionDenied = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

fn from_io_kind(kind: ErrorKind) -> ExitCode {
    match kind {
        ErrorKind::NotFound => ExitCode::NotFound,
        ErrorKind::PermissionDenied => ExitCode::PermissionDenied,
        _ => ExitCode::GeneralError,
    }
}

impl From<&EngineError> for ExitCode {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::InvalidEnvironment(_) => ExitCode::ValidationError,
            EngineError::MissingDocument { .. } => ExitCode::NotFound,
            EngineError::Io { source, .. } => from_io_kind(source.kind()),
            EngineError::YamlParse { .. } => ExitCode::ValidationError,
            EngineError::NotAMapping { .. } => ExitCode::ValidationError,
            EngineError::YamlSerialize { .. } => ExitCode::GeneralError,
            EngineError::Config(config_err) => Self::from(config_err),
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::ProjectRootMissing(_) => ExitCode::NotFound,
            ConfigError::CurrentDirUnavailable(kind) => from_io_kind(*kind),
            ConfigError::DotenvParse { .. } => ExitCode::ValidationError,
            ConfigError::DotenvIo { kind } => from_io_kind(*kind),
            ConfigError::DotenvUnknown => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no engine or config error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(engine_err) = cause.downcast_ref::<EngineError>() {
                return ExitCode::from(engine_err);
            }
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
        }

        ExitCode::GeneralError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::NotFound.as_i32(), 4);
        assert_eq!(ExitCode::ValidationError.as_i32(), 5);
        assert_eq!(ExitCode::PermissionDenied.as_i32(), 6);
    }

    #[test]
    fn test_from_engine_error_missing_document() {
        let err = EngineError::MissingDocument {
            path: PathBuf::from("application-dev.yml"),
        };
        assert_eq!(ExitCode::from(&err), ExitCode::NotFound);
    }

    #[test]
    fn test_from_engine_error_invalid_environment() {
        let err = EngineError::InvalidEnvironment("../x".to_string());
        assert_eq!(ExitCode::from(&err), ExitCode::ValidationError);
    }

    #[test]
    fn test_from_engine_error_io_kinds() {
        let denied = EngineError::Io {
            path: PathBuf::from("a"),
            source: std::io::Error::from(ErrorKind::PermissionDenied),
        };
        let other = EngineError::Io {
            path: PathBuf::from("a"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(ExitCode::from(&denied), ExitCode::PermissionDenied);
        assert_eq!(ExitCode::from(&other), ExitCode::GeneralError);
    }

    #[test]
    fn test_from_config_error() {
        assert_eq!(
            ExitCode::from(&ConfigError::ProjectRootMissing(PathBuf::from("/nope"))),
            ExitCode::NotFound
        );
        assert_eq!(
            ExitCode::from(&ConfigError::DotenvParse { error_index: 3 }),
            ExitCode::ValidationError
        );
        assert_eq!(
            ExitCode::from(&EngineError::Config(ConfigError::DotenvUnknown)),
            ExitCode::GeneralError
        );
    }

    #[test]
    fn test_exit_code_ext_finds_error_under_context() {
        let result: Result<(), EngineError> = Err(EngineError::MissingDocument {
            path: PathBuf::from("application.yml"),
        });
        let err = result.context("Failed to apply 'dev' configuration").unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::NotFound);
    }

    #[test]
    fn test_exit_code_ext_defaults_to_general() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(err.exit_code(), ExitCode::GeneralError);
    }
}
