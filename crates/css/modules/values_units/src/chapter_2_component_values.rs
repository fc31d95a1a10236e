//! CSS Values & Units Level 3 — §2 Value definition syntax (space-separated component lists)
//! Spec: <https://www.w3.org/TR/css-values-3/#component-combinators>

use crate::chapter_3_identifiers::{Ident, parse_ident};
use crate::chapter_4_numbers::{Numeric, next_numeric, serialize_number};
use crate::chapter_6_dimensions::{Length, LengthUnit};
use crate::{ParseError, ValueError};
use core::fmt;
use cssparser::{Parser, ParserInput};
use serde::Serialize;

/// One component of a declaration value. Serializes as its CSS text.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(into = "String")]
pub enum ComponentValue {
    Length(Length),
    Number(f64),
    Keyword(Ident),
}

impl ComponentValue {
    /// The contained length, if this component is one.
    pub const fn as_length(&self) -> Option<Length> {
        match self {
            Self::Length(length) => Some(*length),
            Self::Number(_) | Self::Keyword(_) => None,
        }
    }
}

impl From<Length> for ComponentValue {
    fn from(length: Length) -> Self {
        Self::Length(length)
    }
}

impl From<ComponentValue> for String {
    fn from(value: ComponentValue) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(length) => write!(formatter, "{length}"),
            Self::Number(number) => formatter.write_str(&serialize_number(*number)),
            Self::Keyword(ident) => write!(formatter, "{ident}"),
        }
    }
}

/// Parse a whitespace-separated list of lengths, numbers and keywords (`24px 6px`, `right`).
///
/// # Errors
/// Returns `ValueError::InvalidUnit` for an unsupported dimension and `ValueError::Type`
/// for any other token (strings, functions, punctuation) or an empty value.
pub fn parse_component_values(text: &str) -> Result<Vec<ComponentValue>, ValueError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut values = Vec::new();
    while !parser.is_exhausted() {
        let component = parse_component(&mut parser)
            .map_err(|err| err.into_value_error("parse_component_values", text, "a length, number or keyword"))?;
        values.push(component);
    }
    if values.is_empty() {
        return Err(ParseError::EndOfInput.into_value_error(
            "parse_component_values",
            text,
            "a length, number or keyword",
        ));
    }
    Ok(values)
}

fn parse_component(input: &mut Parser) -> Result<ComponentValue, ParseError> {
    if let Ok(numeric) = input.try_parse(next_numeric) {
        return match numeric {
            Numeric::Dimension(value, unit) => LengthUnit::from_css(&unit)
                .map(|unit_kind| ComponentValue::Length(Length::new(value, unit_kind)))
                .ok_or(ParseError::UnknownUnit(unit)),
            Numeric::Percentage(value) => Ok(ComponentValue::Length(Length::percent(value))),
            Numeric::Number(value) => Ok(ComponentValue::Number(value)),
        };
    }
    parse_ident(input).map(ComponentValue::Keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    /// # Panics
    /// Panics if component lists are not split into typed values.
    fn parses_mixed_lists() {
        assert_eq!(
            parse_component_values("24px 6px"),
            Ok(vec![
                ComponentValue::Length(Length::px(24.0)),
                ComponentValue::Length(Length::px(6.0)),
            ])
        );
        assert_eq!(
            parse_component_values("right"),
            Ok(vec![ComponentValue::Keyword(Ident("right".to_owned()))])
        );
        assert_eq!(
            parse_component_values("0 auto 1.5"),
            Ok(vec![
                ComponentValue::Number(0.0),
                ComponentValue::Keyword(Ident("auto".to_owned())),
                ComponentValue::Number(1.5),
            ])
        );
    }

    #[test]
    /// # Panics
    /// Panics if unsupported tokens are accepted.
    fn rejects_unsupported_tokens() {
        assert_eq!(
            parse_component_values("12pt").map_err(|err| err.kind()),
            Err(ErrorKind::InvalidUnit)
        );
        assert_eq!(
            parse_component_values("\"quoted\"").map_err(|err| err.kind()),
            Err(ErrorKind::Type)
        );
        assert_eq!(parse_component_values("   ").map_err(|err| err.kind()), Err(ErrorKind::Type));
    }

    #[test]
    /// # Panics
    /// Panics if components do not serialize back to stylesheet text.
    fn displays_components() {
        let rendered: Vec<String> = [
            ComponentValue::Length(Length::rem(4.0)),
            ComponentValue::Number(0.25),
            ComponentValue::Keyword(Ident("solid".to_owned())),
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(rendered, ["4rem", ".25", "solid"]);
    }
}
