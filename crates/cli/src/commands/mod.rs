//! Command handlers, one module per subcommand.

pub mod apply;
pub mod list;
pub mod restore;

use envpatch_engine::constants::{OVERLAY_PREFIX, PROPERTIES_EXTENSION, YAML_EXTENSION};
use envpatch_engine::environment_from_file_name;

/// Accept either an identifier (`dev`) or an overlay file name (`application-dev.yml`).
pub(crate) fn resolve_environment(arg: &str) -> String {
    let name = arg.trim();
    let is_file_name = name.starts_with(OVERLAY_PREFIX)
        || [YAML_EXTENSION, PROPERTIES_EXTENSION]
            .iter()
            .any(|ext| name.ends_with(&format!(".{}", ext)));
    if is_file_name {
        environment_from_file_name(name).to_string()
    } else {
        name.to_string()
    }
}
