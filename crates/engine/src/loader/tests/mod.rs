//! Tests for the layout loader.
//!
//! Responsibilities:
//! - Test builder precedence and defaults.
//! - Test `ENVPATCH_*` environment variable handling.
//! - Test dotenv loading and its `DOTENV_DISABLED` gate.
//!
//! Invariants:
//! - Tests that touch process-global state (env vars, cwd) are `#[serial]`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

pub mod builder_tests;
