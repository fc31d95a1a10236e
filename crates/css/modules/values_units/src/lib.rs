//! CSS Values and Units — lengths, unit conversion and numeric helpers used by the
//! vertical rhythm engine.
//! Spec: <https://www.w3.org/TR/css-values-3/>
//! Spec: <https://www.w3.org/TR/css-values-4/#math>

#![forbid(unsafe_code)]

use core::fmt;
use thiserror::Error;

// Per-chapter modules following the CSS Values chapters.
// Each module links the W3C section it implements.
pub mod chapter_10_math;
pub mod chapter_2_component_values;
pub mod chapter_3_identifiers;
pub mod chapter_4_numbers;
pub mod chapter_5_percentages;
pub mod chapter_6_dimensions;

// Re-exports for ergonomic access from other crates.
pub use chapter_2_component_values::{ComponentValue, parse_component_values};
pub use chapter_3_identifiers::{Ident, parse_ident};
pub use chapter_4_numbers::{PRECISION, round_to_precision, serialize_number, strip_unit};
pub use chapter_5_percentages::{percentage_to_px, px_to_percentage};
pub use chapter_6_dimensions::{
    BROWSER_DEFAULT_FONT_SIZE_PX, Length, LengthUnit, PX_PER_MM, UnitEnvironment,
    compute_length_px, convert_length, parse_length,
};
pub use chapter_10_math::{DEFAULT_EXPONENT, pow, pow_default};

/// Parse error for the token-level parsing utilities in this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The next token did not match the expected grammar.
    UnexpectedToken {
        /// Human readable kind of the token that was found.
        found: &'static str,
    },
    /// A dimension carried a unit outside the supported set.
    UnknownUnit(String),
    /// The input ended before a value was read.
    EndOfInput,
    /// A single value was expected but more input followed it.
    TrailingInput,
}

impl ParseError {
    /// Lift a token-level failure into a [`ValueError`] describing `text`.
    pub fn into_value_error(
        self,
        operation: &'static str,
        text: &str,
        expected: &'static str,
    ) -> ValueError {
        let found = match self {
            Self::UnknownUnit(unit) => {
                return ValueError::InvalidUnit { operation, unit };
            }
            Self::UnexpectedToken { found } => found,
            Self::EndOfInput => "empty value",
            Self::TrailingInput => "list",
        };
        ValueError::Type {
            operation,
            value: text.to_owned(),
            found,
            expected,
        }
    }
}

/// Failure categories shared by every crate of the typography engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An argument is not the expected kind (map vs scalar, length vs identifier).
    Type,
    /// A value lies outside the mathematically valid domain of an operation.
    Domain,
    /// A unit outside `px`, `em`, `rem`, `%`, `ex` and `mm` was requested.
    InvalidUnit,
    /// A relative conversion lacks the context length it requires.
    MissingContext,
    /// A breakpoint name is not registered.
    UnknownBreakpoint,
    /// A derived quantity would be negative.
    Range,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Type => "TypeError",
            Self::Domain => "DomainError",
            Self::InvalidUnit => "InvalidUnitError",
            Self::MissingContext => "MissingContextError",
            Self::UnknownBreakpoint => "UnknownBreakpointError",
            Self::Range => "RangeError",
        };
        formatter.write_str(label)
    }
}

/// Errors raised while parsing, converting or computing CSS values.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValueError {
    #[error("{operation}: `{value}` is a {found}, not {expected}")]
    Type {
        operation: &'static str,
        value: String,
        found: &'static str,
        expected: &'static str,
    },
    #[error("{operation}: {detail}")]
    Domain {
        operation: &'static str,
        detail: String,
    },
    #[error("{operation}: `{unit}` is not a supported unit (expected px, em, rem, %, ex or mm)")]
    InvalidUnit {
        operation: &'static str,
        unit: String,
    },
    #[error("{operation}: converting `{unit}` requires a context length")]
    MissingContext {
        operation: &'static str,
        unit: LengthUnit,
    },
}

impl ValueError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Type { .. } => ErrorKind::Type,
            Self::Domain { .. } => ErrorKind::Domain,
            Self::InvalidUnit { .. } => ErrorKind::InvalidUnit,
            Self::MissingContext { .. } => ErrorKind::MissingContext,
        }
    }

    pub fn domain(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::Domain {
            operation,
            detail: detail.into(),
        }
    }
}
