//! CSS Backgrounds and Borders — borders that keep content on the vertical rhythm.
//! Spec: <https://www.w3.org/TR/css-backgrounds-3/#borders>

#![forbid(unsafe_code)]

mod chapter_4_borders;

pub use chapter_4_borders::{
    BorderBox, BorderCalculator, BorderRules, BorderSides, BorderStyle, Edge,
};

use css_fonts::RhythmError;
use css_values_units::ErrorKind;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum BorderError {
    #[error(transparent)]
    Rhythm(#[from] RhythmError),
    /// The border is taller than the rhythm lines reserved for it.
    #[error("border: a `{width}` border does not fit in {lines} rhythm line(s) ({padding_px}px of padding left)")]
    NegativePadding {
        width: String,
        lines: u32,
        padding_px: f64,
    },
}

impl BorderError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Rhythm(inner) => inner.kind(),
            Self::NegativePadding { .. } => ErrorKind::Range,
        }
    }
}
