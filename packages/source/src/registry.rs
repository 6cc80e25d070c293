//! Compile-time registry of POI map sources.
//!
//! Each entry is a `(name, toml_content)` pair embedded via
//! `include_str!`. Adding a site requires creating a TOML file in
//! `sources/` and a corresponding entry here.

use crate::source_def::SourceDefinition;

/// Number of registered sources. Updated when new sites are added.
/// Enforced by a test.
#[cfg(test)]
const EXPECTED_SOURCE_COUNT: usize = 1;

/// Embedded TOML source definitions.
const SOURCE_TOMLS: &[(&str, &str)] = &[(
    "domaene_dahlem",
    include_str!("../sources/domaene_dahlem.toml"),
)];

/// Returns all registered map sources.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught during CI.
#[must_use]
pub fn all_sources() -> Vec<SourceDefinition> {
    SOURCE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse map source '{name}': {e}"))
        })
        .collect()
}
