//! CSS Values & Units Level 3 — §6 Dimensions (Lengths subset)
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>
//!
//! Every conversion is routed through pixels: the source length is resolved to `px`
//! and the pixel value is then expressed in the target unit.

use crate::chapter_4_numbers::{
    Numeric, next_numeric, parse_single, round_to_precision, serialize_number,
};
use crate::chapter_5_percentages::{percentage_to_px, px_to_percentage};
use crate::{ParseError, ValueError};
use core::fmt;
use core::str::FromStr;
use cssparser::Parser;
use serde::{Deserialize, Serialize};

/// Font size user agents apply to the root element when nothing else is declared.
pub const BROWSER_DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// CSS reference pixels per millimetre (96px per inch, 25.4mm per inch).
///
/// Spec: <https://www.w3.org/TR/css-values-3/#absolute-lengths>
pub const PX_PER_MM: f64 = 96.0 / 25.4;

const CONVERT: &str = "convert_length";

/// Supported subset of CSS <length> units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    #[serde(rename = "px")]
    Pixels,
    #[serde(rename = "em")]
    Ems,
    #[serde(rename = "rem")]
    RootEms,
    #[serde(rename = "%")]
    Percent,
    /// Approximated as half an `em`.
    #[serde(rename = "ex")]
    Exs,
    #[serde(rename = "mm")]
    Millimeters,
}

impl LengthUnit {
    pub const ALL: [Self; 6] = [
        Self::Pixels,
        Self::Ems,
        Self::RootEms,
        Self::Percent,
        Self::Exs,
        Self::Millimeters,
    ];

    /// The unit as written in a stylesheet.
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Pixels => "px",
            Self::Ems => "em",
            Self::RootEms => "rem",
            Self::Percent => "%",
            Self::Exs => "ex",
            Self::Millimeters => "mm",
        }
    }

    /// Look up a unit by its (case-insensitive) stylesheet spelling.
    pub fn from_css(unit: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.as_css().eq_ignore_ascii_case(unit))
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_css())
    }
}

impl FromStr for LengthUnit {
    type Err = ValueError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_css(text.trim()).ok_or_else(|| ValueError::InvalidUnit {
            operation: "parse_unit",
            unit: text.to_owned(),
        })
    }
}

/// A CSS <length> value with unit.
///
/// Lengths deserialize from and serialize to their stylesheet text (`"6px"`, `"20em"`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    #[inline]
    pub const fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    #[inline]
    pub const fn px(value: f64) -> Self {
        Self::new(value, LengthUnit::Pixels)
    }

    #[inline]
    pub const fn em(value: f64) -> Self {
        Self::new(value, LengthUnit::Ems)
    }

    #[inline]
    pub const fn rem(value: f64) -> Self {
        Self::new(value, LengthUnit::RootEms)
    }

    #[inline]
    pub const fn percent(value: f64) -> Self {
        Self::new(value, LengthUnit::Percent)
    }

    /// The bare magnitude, without its unit.
    #[inline]
    pub const fn value(self) -> f64 {
        self.value
    }

    /// The same length with its magnitude rounded to the CSS output precision.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self::new(round_to_precision(self.value), self.unit)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}{}", serialize_number(self.value), self.unit)
    }
}

impl FromStr for Length {
    type Err = ValueError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_single(text, parse_length)
            .map_err(|err| err.into_value_error("parse_length", text, "a valid CSS length"))
    }
}

impl TryFrom<String> for Length {
    type Error = ValueError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Length> for String {
    fn from(length: Length) -> Self {
        length.to_string()
    }
}

/// Font sizes that relative units resolve against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitEnvironment {
    /// Font size of the root element; one `rem`.
    pub root_font_size_px: f64,
    /// Font size used for `em`/`ex` when no explicit context is given.
    pub font_size_px: f64,
}

impl UnitEnvironment {
    #[inline]
    pub const fn new(root_font_size_px: f64, font_size_px: f64) -> Self {
        Self {
            root_font_size_px,
            font_size_px,
        }
    }
}

impl Default for UnitEnvironment {
    #[inline]
    fn default() -> Self {
        Self::new(BROWSER_DEFAULT_FONT_SIZE_PX, BROWSER_DEFAULT_FONT_SIZE_PX)
    }
}

/// Compute the pixel value of `length`.
///
/// - Pixels: returns the raw value.
/// - Rems: scale by the root font size.
/// - Ems/Exs: scale by `context`, or the environment font size without one.
/// - Percentages: resolve against `context`, which is mandatory.
/// - Millimetres: fixed physical ratio.
///
/// # Errors
/// Returns `ValueError::MissingContext` for a percentage without `context`, and
/// `ValueError::Type` when `context` is itself a percentage.
pub fn compute_length_px(
    length: Length,
    env: &UnitEnvironment,
    context: Option<Length>,
) -> Result<f64, ValueError> {
    let value = length.value;
    match length.unit {
        LengthUnit::Pixels => Ok(value),
        LengthUnit::RootEms => Ok(value * env.root_font_size_px),
        LengthUnit::Ems => Ok(value * font_context_px(context, env)?),
        LengthUnit::Exs => Ok(value * font_context_px(context, env)? / 2.0),
        LengthUnit::Percent => Ok(percentage_to_px(
            value,
            required_context_px(context, env, LengthUnit::Percent)?,
        )),
        LengthUnit::Millimeters => Ok(value * PX_PER_MM),
    }
}

/// Convert `length` to `to_unit`.
///
/// `from_context` describes the source unit's reference length and `to_context` the
/// target's; `to_context` falls back to `from_context`. Converting to the unit the
/// length already has returns it untouched. Results are rounded to the CSS output
/// precision.
///
/// # Errors
/// Returns `ValueError::MissingContext` when a percentage has no context,
/// `ValueError::Domain` when a context is zero or the value is not finite, and
/// `ValueError::Type` when a context is itself a percentage.
pub fn convert_length(
    length: Length,
    to_unit: LengthUnit,
    env: &UnitEnvironment,
    from_context: Option<Length>,
    to_context: Option<Length>,
) -> Result<Length, ValueError> {
    if length.unit == to_unit {
        return Ok(length);
    }
    if !length.value.is_finite() {
        return Err(ValueError::domain(
            CONVERT,
            format!("`{}` is not a finite length", length.value),
        ));
    }
    let px = compute_length_px(length, env, from_context)?;
    let converted = px_to_unit(px, to_unit, env, to_context.or(from_context))?;
    let result = Length::new(round_to_precision(converted), to_unit);
    log::trace!("convert_length({length} -> {to_unit}) = {result}");
    Ok(result)
}

/// Parse a CSS <length> (§6.2). Supports the six engine units, percentages and unitless zero.
///
/// # Errors
/// Returns `ParseError::UnknownUnit` for an unsupported dimension and
/// `ParseError::UnexpectedToken` when the next token is not a `<length>`.
pub fn parse_length(input: &mut Parser) -> Result<Length, ParseError> {
    match next_numeric(input)? {
        Numeric::Dimension(value, unit) => LengthUnit::from_css(&unit)
            .map(|unit_kind| Length::new(value, unit_kind))
            .ok_or(ParseError::UnknownUnit(unit)),
        Numeric::Percentage(value) => Ok(Length::percent(value)),
        Numeric::Number(value) if value == 0.0 => Ok(Length::px(0.0)),
        Numeric::Number(_) => Err(ParseError::UnexpectedToken { found: "number" }),
    }
}

fn px_to_unit(
    px: f64,
    unit: LengthUnit,
    env: &UnitEnvironment,
    context: Option<Length>,
) -> Result<f64, ValueError> {
    match unit {
        LengthUnit::Pixels => Ok(px),
        LengthUnit::RootEms => divide(px, env.root_font_size_px, unit),
        LengthUnit::Ems => divide(px, font_context_px(context, env)?, unit),
        LengthUnit::Exs => divide(px, font_context_px(context, env)? / 2.0, unit),
        LengthUnit::Percent => px_to_percentage(px, required_context_px(context, env, unit)?),
        LengthUnit::Millimeters => Ok(px / PX_PER_MM),
    }
}

fn divide(px: f64, reference_px: f64, unit: LengthUnit) -> Result<f64, ValueError> {
    if reference_px == 0.0 || !reference_px.is_finite() {
        return Err(ValueError::domain(
            CONVERT,
            format!("`{px}px` cannot be expressed in `{unit}` against a `{reference_px}px` reference"),
        ));
    }
    Ok(px / reference_px)
}

fn context_px(context: Option<Length>, env: &UnitEnvironment) -> Result<Option<f64>, ValueError> {
    context
        .map(|reference| {
            if reference.unit == LengthUnit::Percent {
                Err(ValueError::Type {
                    operation: CONVERT,
                    value: reference.to_string(),
                    found: "percentage",
                    expected: "an absolute or font-relative context length",
                })
            } else {
                compute_length_px(reference, env, None)
            }
        })
        .transpose()
}

fn font_context_px(context: Option<Length>, env: &UnitEnvironment) -> Result<f64, ValueError> {
    Ok(context_px(context, env)?.unwrap_or(env.font_size_px))
}

fn required_context_px(
    context: Option<Length>,
    env: &UnitEnvironment,
    unit: LengthUnit,
) -> Result<f64, ValueError> {
    context_px(context, env)?.ok_or(ValueError::MissingContext {
        operation: CONVERT,
        unit,
    })
}
