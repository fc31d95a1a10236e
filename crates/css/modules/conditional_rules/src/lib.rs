//! CSS Conditional Rules — per-breakpoint configuration values.
//! Spec: <https://www.w3.org/TR/css-conditional-3/#at-media>
//!
//! A configuration value either holds one value for every breakpoint or a table keyed by
//! breakpoint name. Tables may leave breakpoints out: a missing breakpoint inherits the
//! closest narrower definition, the way later `@media (min-width)` blocks only override
//! what they redeclare.

#![forbid(unsafe_code)]

mod cascade;
mod values;

pub use cascade::resolve;
pub use values::{BreakpointValueMap, ConfigValue};

use css_media_queries::BreakpointError;
use css_values_units::ErrorKind;
use thiserror::Error;

/// Errors raised while resolving a per-breakpoint value.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ResolveError {
    #[error("{operation}: `{value}` is a scalar, not a map")]
    NotAMap {
        operation: &'static str,
        value: String,
    },
    #[error("{operation}: the breakpoint map has no values")]
    Empty { operation: &'static str },
    #[error(transparent)]
    Breakpoint(#[from] BreakpointError),
}

impl ResolveError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAMap { .. } | Self::Empty { .. } => ErrorKind::Type,
            Self::Breakpoint(inner) => inner.kind(),
        }
    }
}
