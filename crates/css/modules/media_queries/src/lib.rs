//! Media Queries Level 4 — `min-width` breakpoints.
//! Spec: <https://www.w3.org/TR/mediaqueries-4/#width>
//!
//! Breakpoints are named `min-width` thresholds. They are kept in ascending width order;
//! the narrowest one is the unconditional default rule. Producing `@media` syntax is left
//! to whoever emits the computed values.

#![forbid(unsafe_code)]

mod selection;
mod table;

pub use selection::{BreakpointSelector, resolve_breakpoints};
pub use table::{Breakpoint, BreakpointDefinition, BreakpointRegistry, DEFAULT_KEY};

use css_values_units::{ErrorKind, ValueError};
use thiserror::Error;

/// Errors raised while building or querying the breakpoint table.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BreakpointError {
    #[error("{operation}: `{name}` is not a registered breakpoint")]
    Unknown {
        operation: &'static str,
        name: String,
    },
    #[error("breakpoint `{name}` is declared more than once")]
    DuplicateName { name: String },
    #[error("breakpoints `{first}` and `{second}` share the same min-width")]
    DuplicateWidth { first: String, second: String },
    #[error("breakpoint `{name}` uses the reserved key `default` but is not the narrowest breakpoint")]
    MisplacedDefault { name: String },
    #[error("a breakpoint table needs at least one breakpoint")]
    Empty,
    #[error(transparent)]
    Value(#[from] ValueError),
}

impl BreakpointError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unknown { .. } => ErrorKind::UnknownBreakpoint,
            Self::DuplicateName { .. }
            | Self::DuplicateWidth { .. }
            | Self::MisplacedDefault { .. }
            | Self::Empty => ErrorKind::Type,
            Self::Value(inner) => inner.kind(),
        }
    }
}
