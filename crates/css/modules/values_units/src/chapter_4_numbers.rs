//! CSS Values & Units Level 3 — §4 Numbers
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>
//! Spec: <https://www.w3.org/TR/cssom-1/#serializing-css-values>

use crate::{ParseError, ValueError};
use cssparser::{Parser, ParserInput, Token};

/// Decimal places kept by every CSS-facing number.
pub const PRECISION: i32 = 5;

/// Round `value` to [`PRECISION`] decimal places.
#[inline]
pub fn round_to_precision(value: f64) -> f64 {
    let factor = 10_f64.powi(PRECISION);
    let rounded = (value * factor).round() / factor;
    // Normalize `-0` so it never serializes with a sign.
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Serialize a number the way stylesheets conventionally write it: rounded to
/// [`PRECISION`] places, trailing zeros stripped and no leading zero (`.16667`, `-.5`).
pub fn serialize_number(value: f64) -> String {
    let rounded = round_to_precision(value);
    if rounded == 0.0 {
        return "0".to_owned();
    }
    let fixed = format!("{:.5}", rounded.abs());
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let digits = trimmed.strip_prefix('0').unwrap_or(trimmed);
    if rounded < 0.0 {
        format!("-{digits}")
    } else {
        digits.to_owned()
    }
}

/// Return the bare magnitude of a numeric CSS token (`12px` → `12`, `100%` → `100`).
///
/// # Errors
/// Returns `ValueError::Type` when `text` is not a single number, percentage or dimension.
pub fn strip_unit(text: &str) -> Result<f64, ValueError> {
    parse_single(text, next_numeric)
        .map(Numeric::magnitude)
        .map_err(|err| err.into_value_error("strip_unit", text, "a number"))
}

/// A numeric token with its magnitude read at full precision.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Numeric {
    Number(f64),
    Percentage(f64),
    Dimension(f64, String),
}

impl Numeric {
    pub(crate) fn magnitude(self) -> f64 {
        match self {
            Self::Number(value) | Self::Percentage(value) | Self::Dimension(value, _) => value,
        }
    }
}

/// Read the next numeric token, skipping leading whitespace.
///
/// `cssparser` stores numbers as `f32`; the magnitude is re-read from the source text so
/// values such as `13.75px` or `.1` keep full `f64` precision.
pub(crate) fn next_numeric(input: &mut Parser) -> Result<Numeric, ParseError> {
    input.skip_whitespace();
    let start = input.position();
    let token = input
        .next_including_whitespace_and_comments()
        .map_err(|_| ParseError::EndOfInput)?
        .clone();
    let source = input.slice_from(start);
    match token {
        Token::Number { value, .. } => Ok(Numeric::Number(precise(source, value))),
        Token::Percentage { unit_value, .. } => Ok(Numeric::Percentage(precise(
            source.trim_end_matches('%'),
            unit_value * 100.0,
        ))),
        Token::Dimension { value, unit, .. } => {
            let number_text = source
                .len()
                .checked_sub(unit.len())
                .and_then(|end| source.get(..end))
                .unwrap_or_default();
            Ok(Numeric::Dimension(
                precise(number_text, value),
                unit.as_ref().to_ascii_lowercase(),
            ))
        }
        other => Err(ParseError::UnexpectedToken {
            found: describe_token(&other),
        }),
    }
}

fn precise(text: &str, fallback: f32) -> f64 {
    text.parse::<f64>().unwrap_or_else(|_| f64::from(fallback))
}

/// Run `parse` over the whole of `text`, rejecting trailing input.
pub(crate) fn parse_single<T>(
    text: &str,
    parse: impl FnOnce(&mut Parser) -> Result<T, ParseError>,
) -> Result<T, ParseError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let value = parse(&mut parser)?;
    parser
        .expect_exhausted()
        .map_err(|_| ParseError::TrailingInput)?;
    Ok(value)
}

/// Name the kind of a token for error messages.
pub(crate) const fn describe_token(token: &Token) -> &'static str {
    match token {
        Token::Ident(_) | Token::QuotedString(_) | Token::BadString(_) => "string",
        Token::Number { .. } => "number",
        Token::Percentage { .. } => "percentage",
        Token::Dimension { .. } => "length",
        Token::Function(_) => "function",
        Token::Hash(_) | Token::IDHash(_) => "color",
        Token::UnquotedUrl(_) | Token::BadUrl(_) => "url",
        Token::AtKeyword(_)
        | Token::Delim(_)
        | Token::WhiteSpace(_)
        | Token::Comment(_)
        | Token::Colon
        | Token::Semicolon
        | Token::Comma
        | Token::IncludeMatch
        | Token::DashMatch
        | Token::PrefixMatch
        | Token::SuffixMatch
        | Token::SubstringMatch
        | Token::CDO
        | Token::CDC
        | Token::ParenthesisBlock
        | Token::SquareBracketBlock
        | Token::CurlyBracketBlock
        | Token::CloseParenthesis
        | Token::CloseSquareBracket
        | Token::CloseCurlyBracket => "token",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    /// # Panics
    /// Panics if numbers are not serialized with the conventional short form.
    fn serializes_without_leading_zero_or_trailing_zeros() {
        assert_eq!(serialize_number(0.1), ".1");
        assert_eq!(serialize_number(1.0 / 6.0), ".16667");
        assert_eq!(serialize_number(2.0), "2");
        assert_eq!(serialize_number(9.525), "9.525");
        assert_eq!(serialize_number(-0.5), "-.5");
        assert_eq!(serialize_number(-0.000_001), "0");
        assert_eq!(serialize_number(16.0 / 6.0), "2.66667");
    }

    #[test]
    /// # Panics
    /// Panics if magnitudes are not returned for numeric tokens.
    fn strips_units() {
        assert_eq!(strip_unit("12px"), Ok(12.0));
        assert_eq!(strip_unit("0em"), Ok(0.0));
        assert_eq!(strip_unit("10rem"), Ok(10.0));
        assert_eq!(strip_unit("100%"), Ok(100.0));
        assert_eq!(strip_unit(" 3 "), Ok(3.0));
        assert_eq!(strip_unit("13.75px"), Ok(13.75));
    }

    #[test]
    /// # Panics
    /// Panics if non-numeric input is not reported as a type error.
    fn strip_unit_rejects_strings() {
        let err = strip_unit("str").err();
        assert_eq!(err.as_ref().map(ValueError::kind), Some(ErrorKind::Type));
        assert_eq!(
            err.map(|value_error| value_error.to_string()),
            Some("strip_unit: `str` is a string, not a number".to_owned())
        );
        assert_eq!(
            strip_unit("12px 4px").map_err(|err| err.kind()),
            Err(ErrorKind::Type)
        );
        assert_eq!(strip_unit("").map_err(|err| err.kind()), Err(ErrorKind::Type));
    }
}
