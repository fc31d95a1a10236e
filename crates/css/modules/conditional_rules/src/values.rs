use crate::ResolveError;
use css_media_queries::{BreakpointError, BreakpointRegistry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw values keyed by breakpoint name (or the reserved `default` key).
pub type BreakpointValueMap<T> = BTreeMap<String, T>;

/// A configuration value: one scalar, or a table of per-breakpoint values.
///
/// Deserializes untagged: a JSON object becomes a `Table`, anything the inner type accepts
/// becomes a `Scalar`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue<T> {
    Scalar(T),
    Table(BreakpointValueMap<T>),
}

impl<T> ConfigValue<T> {
    /// Build a table from `(breakpoint, value)` pairs.
    pub fn table<'name>(entries: impl IntoIterator<Item = (&'name str, T)>) -> Self {
        Self::Table(
            entries
                .into_iter()
                .map(|(name, value)| (name.to_owned(), value))
                .collect(),
        )
    }

    pub const fn as_table(&self) -> Option<&BreakpointValueMap<T>> {
        match self {
            Self::Table(map) => Some(map),
            Self::Scalar(_) => None,
        }
    }

    /// Check that this is a non-empty table whose keys are all registered breakpoints.
    ///
    /// `label` names the value in error messages.
    ///
    /// # Errors
    /// Returns `ResolveError::NotAMap` for a scalar, `ResolveError::Empty` for an empty
    /// table and `BreakpointError::Unknown` for a key outside the registry.
    pub fn validate(&self, registry: &BreakpointRegistry, label: &str) -> Result<(), ResolveError> {
        let Self::Table(map) = self else {
            return Err(ResolveError::NotAMap {
                operation: "validate",
                value: label.to_owned(),
            });
        };
        if map.is_empty() {
            return Err(ResolveError::Empty {
                operation: "validate",
            });
        }
        if let Some(unknown) = map.keys().find(|key| !registry.contains(key)) {
            return Err(BreakpointError::Unknown {
                operation: "validate",
                name: format!("{label}.{unknown}"),
            }
            .into());
        }
        Ok(())
    }
}
