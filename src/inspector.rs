//! Tools for inspecting the contents of a registry.
//! Useful for debugging subtype registrations and dispatch problems.

use serde::Serialize;

use crate::error::Result;
use crate::registry::Registry;

/// A structural report of a registry's dispatch table.
#[derive(Debug, Serialize)]
pub struct RegistryReport {
    /// One section per abstract type, sorted by name.
    pub abstract_types: Vec<AbstractTypeReport>,
}

/// Everything registered under one abstract type.
#[derive(Debug, Serialize)]
pub struct AbstractTypeReport {
    /// The abstract type's name.
    pub name: String,
    /// Registered subtypes, in insertion order (duplicates included).
    pub subtypes: Vec<SubtypeReport>,
}

/// Metadata for a single registered subtype.
#[derive(Debug, Serialize)]
pub struct SubtypeReport {
    /// The wire tag.
    pub tag: String,
    /// Field count of the product.
    pub arity: usize,
    /// Whether identity and components are both configured.
    pub configured: bool,
}

/// The registry inspector tool.
#[derive(Debug)]
pub struct RegistryInspector;

impl RegistryInspector {
    /// Builds a report over every abstract type in `registry`.
    ///
    /// Abstract types are sorted by name so the report is deterministic;
    /// within a type, subtypes keep their insertion order.
    pub fn inspect(registry: &Registry) -> Result<RegistryReport> {
        let mut names = registry.abstract_names()?;
        names.sort();

        let mut abstract_types = Vec::with_capacity(names.len());
        for name in names {
            let mut subtypes = Vec::new();
            for (tag, registration) in registry.entries_of(name)? {
                subtypes.push(SubtypeReport {
                    tag: tag.as_str().to_string(),
                    arity: registration.arity(),
                    configured: registration.is_configured(),
                });
            }
            abstract_types.push(AbstractTypeReport {
                name: name.as_str().to_string(),
                subtypes,
            });
        }
        Ok(RegistryReport { abstract_types })
    }
}
