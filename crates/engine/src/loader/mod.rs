//! Project layout loader for environment variables and builder overrides.
//!
//! Responsibilities:
//! - Load `.envpatch.env` into the process environment on request.
//! - Provide a builder-pattern `LayoutLoader` that merges defaults, environment
//!   variables and explicit overrides into a `ProjectLayout`.
//!
//! Does NOT handle:
//! - Reading the block-format `.env` definition file (see `env_block`).
//! - Resolving document paths (see `layout`).
//!
//! Invariants / Assumptions:
//! - Builder overrides take precedence over environment variables, which take precedence
//!   over defaults.
//! - `load_dotenv()` must be called explicitly to enable dotenv loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy` is called.

mod builder;
mod env;
mod error;

pub use builder::LayoutLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;

#[cfg(test)]
mod tests;
