//! Named sizes: explicit lengths or steps on a modular scale.

use core::convert::Infallible;
use core::fmt;
use core::str::FromStr;
use css_values_units::{Length, ValueError, pow};
use serde::{Deserialize, Serialize};

/// Size name that resolves to the configured body font size.
pub const BODY_SIZE: &str = "body";
/// Size name that resolves to the configured rhythm unit.
pub const RHYTHM_UNIT_SIZE: &str = "rhythm-unit";

/// A declared size: `base`, or `base * ratio^scale` when `scale` is set.
///
/// Deserializes from a length (`"12px"`) or an object
/// (`{"base": "12px", "ratio": 2, "scale": 2}`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSize")]
pub struct SizeDefinition {
    pub base: Length,
    /// Scale ratio; the configuration-wide ratio applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    /// Steps along the scale; negative steps shrink the base.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl SizeDefinition {
    pub const fn explicit(base: Length) -> Self {
        Self {
            base,
            ratio: None,
            scale: None,
        }
    }

    pub const fn scaled(base: Length, scale: f64) -> Self {
        Self {
            base,
            ratio: None,
            scale: Some(scale),
        }
    }

    #[must_use]
    pub const fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// The length this definition stands for.
    ///
    /// # Errors
    /// Returns `ValueError::Domain` when the ratio cannot be raised to `scale`.
    pub fn compute(&self, default_ratio: f64) -> Result<Length, ValueError> {
        let Some(scale) = self.scale else {
            return Ok(self.base);
        };
        let factor = pow(self.ratio.unwrap_or(default_ratio), scale)?;
        Ok(Length::new(self.base.value * factor, self.base.unit))
    }
}

impl fmt::Display for SizeDefinition {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.scale, self.ratio) {
            (None, _) => write!(formatter, "{}", self.base),
            (Some(scale), None) => write!(formatter, "{} * ratio^{scale}", self.base),
            (Some(scale), Some(ratio)) => write!(formatter, "{} * {ratio}^{scale}", self.base),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScaledFields {
    base: Length,
    #[serde(default)]
    ratio: Option<f64>,
    #[serde(default)]
    scale: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Explicit(Length),
    Scaled(ScaledFields),
}

impl From<RawSize> for SizeDefinition {
    fn from(raw: RawSize) -> Self {
        match raw {
            RawSize::Explicit(base) => Self::explicit(base),
            RawSize::Scaled(fields) => Self {
                base: fields.base,
                ratio: fields.ratio,
                scale: fields.scale,
            },
        }
    }
}

/// A size argument: a configured size name or an explicit length.
#[derive(Clone, Debug, PartialEq)]
pub enum SizeRef {
    Named(String),
    Length(Length),
}

impl FromStr for SizeRef {
    type Err = Infallible;

    /// Text that parses as a length is a length; anything else is a size name.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(text
            .parse::<Length>()
            .map_or_else(|_| Self::Named(text.trim().to_owned()), Self::Length))
    }
}

impl From<&str> for SizeRef {
    fn from(text: &str) -> Self {
        match text.parse() {
            Ok(size) => size,
            Err(never) => match never {},
        }
    }
}

impl From<Length> for SizeRef {
    fn from(length: Length) -> Self {
        Self::Length(length)
    }
}

impl fmt::Display for SizeRef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => formatter.write_str(name),
            Self::Length(length) => write!(formatter, "{length}"),
        }
    }
}
