//! Centralized constants for the envpatch workspace.
//!
//! File names, key paths and environment variable names shared between the
//! engine and the command-line front end.

// =============================================================================
// Project Layout Defaults
// =============================================================================

/// Resources directory, relative to the project root.
pub const DEFAULT_RESOURCES_DIR: &str = "src/main/resources";

/// Backup directory, relative to the project root.
pub const DEFAULT_BACKUP_DIR: &str = ".env-backups";

/// Suffix appended to a document's file name to form its backup file name.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Environment-definition file inside the resources directory.
pub const ENV_DEFINITION_FILE: &str = ".env";

/// Stem shared by the base document and every overlay document.
pub const APPLICATION_STEM: &str = "application";

/// Prefix of overlay document file names (`application-<env>.<ext>`).
pub const OVERLAY_PREFIX: &str = "application-";

/// Extension of hierarchical (YAML) documents.
pub const YAML_EXTENSION: &str = "yml";

/// Extension of flat (Java properties) documents.
pub const PROPERTIES_EXTENSION: &str = "properties";

// =============================================================================
// Mutated Key Paths
// =============================================================================

/// Key whose presence marks a document as carrying Spring settings.
pub const SPRING_MARKER_PATH: &str = "spring";

/// Active-profile indicator set in the base document.
pub const ACTIVE_PROFILE_PATH: &str = "spring.profiles.active";

/// Kafka listener switch in the overlay document.
pub const KAFKA_LISTENER_PATH: &str = "kafka.listener.enabled";

/// Redis consumer switch in the overlay document.
pub const REDIS_CONSUMER_PATH: &str = "redis.consumer.enabled";

/// Prefix of the environment-definition section holding URL rewrites.
pub const URL_SECTION_PREFIX: &str = "URLS_";

// =============================================================================
// Process Configuration
// =============================================================================

/// Overrides the project root (defaults to the current directory).
pub const ENV_PROJECT_ROOT: &str = "ENVPATCH_PROJECT_ROOT";

/// Overrides the resources directory (relative to the project root unless absolute).
pub const ENV_RESOURCES_DIR: &str = "ENVPATCH_RESOURCES_DIR";

/// Overrides the backup directory (relative to the project root unless absolute).
pub const ENV_BACKUP_DIR: &str = "ENVPATCH_BACKUP_DIR";

/// Dotenv file loaded into the process environment by `LayoutLoader::load_dotenv`.
///
/// Deliberately distinct from the block-format `.env` that the engine reads as data.
pub const DOTENV_FILE: &str = ".envpatch.env";

/// Set to `1` or `true` to skip dotenv loading.
pub const ENV_DOTENV_DISABLED: &str = "DOTENV_DISABLED";
