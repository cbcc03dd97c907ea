//! Provides parsers for bare tokens: names and numbers.

use crate::error::{PddlError, Result};
use crate::parsed_types::Name;
use crate::parsers::{ParseResult, Span};
use nom::bytes::complete::take_till1;
use nom::combinator::{all_consuming, map};
use nom::number::complete::double;

/// Whether `c` ends a token.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')' || c == ';' || c == '['
}

/// Parses a single token, i.e. a run of characters up to whitespace or a
/// parenthesis.
pub fn parse_token<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Span<'a>> {
    take_till1(is_delimiter)(input.into())
}

/// Parses a token into a [`Name`].
///
/// ## Example
/// ```
/// # use pddl_ground::parsers::{parse_name, Span};
/// # use pddl_ground::Name;
/// let (remainder, name) = parse_name(Span::new("?from ?to")).unwrap();
/// assert_eq!(name, Name::from("?from"));
/// assert_eq!(remainder.fragment(), &" ?to");
/// ```
pub fn parse_name<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Name> {
    map(parse_token, |token: Span<'a>| Name::new(token.fragment()))(input.into())
}

/// Interprets a whole token as a number, e.g. `0.25` or `10`.
pub fn parse_number(token: Span) -> Result<f64> {
    let parsed: ParseResult<f64> = all_consuming(double)(token);
    parsed
        .map(|(_, value)| value)
        .map_err(|_| {
            PddlError::syntax(token, format!("expected a number, found `{}`", token.fragment()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_stop_at_parentheses() {
        let (remainder, token) = parse_token("at-robot)").unwrap();
        assert_eq!(token.fragment(), &"at-robot");
        assert_eq!(remainder.fragment(), &")");
        assert!(parse_token(" x").is_err());
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number(Span::new("0.25")).unwrap(), 0.25);
        assert_eq!(parse_number(Span::new("10")).unwrap(), 10.0);
        assert!(matches!(
            parse_number(Span::new("1x")),
            Err(PddlError::Syntax { .. })
        ));
    }
}
