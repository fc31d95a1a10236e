//! CSS Identifiers (keywords passed through untouched by the rhythm helpers)
//! Spec: <https://www.w3.org/TR/CSS2/syndata.html#value-def-identifier>

use crate::ParseError;
use crate::chapter_4_numbers::describe_token;
use core::fmt;
use cssparser::{Parser, Token};

/// A CSS identifier value (lowercased for canonicalization).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident(pub String);

impl fmt::Display for Ident {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Parse a CSS identifier token, skipping leading whitespace.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not an identifier and
/// `ParseError::EndOfInput` when nothing is left.
#[inline]
pub fn parse_ident(input: &mut Parser) -> Result<Ident, ParseError> {
    let token = input.next().map_err(|_| ParseError::EndOfInput)?;
    match token {
        Token::Ident(text) => Ok(Ident(text.as_ref().to_ascii_lowercase())),
        other => Err(ParseError::UnexpectedToken {
            found: describe_token(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssparser::ParserInput;

    #[test]
    /// # Panics
    /// Panics if identifiers are not lowercased or non-identifiers are accepted.
    fn parses_identifiers() {
        let mut input = ParserInput::new("  Right 12px");
        let mut parser = Parser::new(&mut input);
        assert_eq!(parse_ident(&mut parser), Ok(Ident("right".to_owned())));
        assert_eq!(
            parse_ident(&mut parser),
            Err(ParseError::UnexpectedToken { found: "length" })
        );
        assert_eq!(parse_ident(&mut parser), Err(ParseError::EndOfInput));
    }
}
