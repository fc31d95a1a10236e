//! CSS Fonts — font sizes and line heights on a vertical rhythm.
//! Spec: <https://www.w3.org/TR/css-fonts-4/#font-size-prop>
//! Spec: <https://www.w3.org/TR/css-inline-3/#line-height-property>
//!
//! Every line height produced here is a whole number of rhythm units, so text set with
//! any named size keeps to the same vertical grid at every breakpoint.

#![forbid(unsafe_code)]

mod config;
mod declarations;
mod sizes;
mod vertical_rhythm;

pub use config::{RhythmConfig, Typography, TypographyConfig};
pub use declarations::{Baseline, FontSizePair};
pub use sizes::{BODY_SIZE, RHYTHM_UNIT_SIZE, SizeDefinition, SizeRef};
pub use vertical_rhythm::{RhythmCalculator, lines_for};

use css_conditional_rules::ResolveError;
use css_media_queries::BreakpointError;
use css_values_units::{ErrorKind, ValueError};
use thiserror::Error;

/// Errors raised by rhythm computations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RhythmError {
    #[error("{operation}: `{name}` is a `string`, not a valid CSS length")]
    UnknownSize {
        operation: &'static str,
        name: String,
    },
    #[error("size `{name}` is reserved for the rhythm configuration")]
    ReservedSize { name: String },
    #[error("{operation}: `{value}` must be a positive length")]
    NonPositive {
        operation: &'static str,
        value: String,
    },
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error(transparent)]
    Breakpoint(#[from] BreakpointError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl RhythmError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownSize { .. } | Self::ReservedSize { .. } => ErrorKind::Type,
            Self::NonPositive { .. } => ErrorKind::Domain,
            Self::Value(inner) => inner.kind(),
            Self::Breakpoint(inner) => inner.kind(),
            Self::Resolve(inner) => inner.kind(),
        }
    }
}
