//! Parser for the block-structured environment-definition file.
//!
//! Responsibilities:
//! - Parse `NAME: {` ... `}` blocks of `key=value` lines into an `EnvironmentTable`.
//! - Resolve the variable and URL sections for an environment identifier.
//!
//! Does NOT handle:
//! - Loading values into the process environment (this file is engine input data).
//! - Applying the values to documents (see `document::tree`).
//!
//! Invariants:
//! - Parsing never fails: unmatched braces, non-identifier section names and lines
//!   without `=` are skipped.
//! - Sections and keys keep the order of first appearance; URL rewrites rely on it.
//! - A reopened section name starts afresh; a later block replaces the earlier one.

use std::path::Path;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::constants::URL_SECTION_PREFIX;
use crate::error::EngineError;

static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_]+)\s*:\s*\{$").expect("section header pattern is valid")
});

/// Variables of one section, in file order.
pub type Section = IndexMap<String, String>;

/// Named sections parsed from an environment-definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentTable {
    sections: IndexMap<String, Section>,
}

impl EnvironmentTable {
    /// Parse the contents of an environment-definition file.
    pub fn parse(content: &str) -> Self {
        let mut sections: IndexMap<String, Section> = IndexMap::new();
        let mut current: Option<String> = None;

        for line in content.lines() {
            let trimmed = line.trim();

            if let Some(caps) = SECTION_HEADER.captures(trimmed) {
                let name = caps[1].to_string();
                if sections.insert(name.clone(), Section::new()).is_some() {
                    tracing::warn!(section = %name, "environment section reopened; earlier entries discarded");
                }
                current = Some(name);
            } else if trimmed == "}" {
                current = None;
            } else if let Some(section) = current.as_ref().and_then(|name| sections.get_mut(name))
                && let Some((key, value)) = trimmed.split_once('=')
            {
                section.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Self { sections }
    }

    /// Read and parse the definition file at `path`.
    ///
    /// A missing file yields an empty table; any other read failure is returned.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no environment definition file");
                Ok(Self::default())
            }
            Err(e) => Err(EngineError::io(path, e)),
        }
    }

    /// Look up a section by its exact name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Variable substitutions for `env` (section named by the upper-cased identifier).
    pub fn variables_for(&self, env: &str) -> Option<&Section> {
        self.section(&env.to_uppercase())
    }

    /// URL rewrites for `env` (section `URLS_<UPPER-ENV>`).
    pub fn urls_for(&self, env: &str) -> Option<&Section> {
        self.section(&format!("{}{}", URL_SECTION_PREFIX, env.to_uppercase()))
    }

    /// Iterate over all sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, section)| (name.as_str(), section))
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Parse an environment-definition file's contents.
pub fn parse(content: &str) -> EnvironmentTable {
    EnvironmentTable::parse(content)
}
