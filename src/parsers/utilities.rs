//! Small combinators shared by the line-oriented plan parsers. Input reaching
//! them has already been through [`preprocess`](crate::parsers::preprocess).

use crate::parsers::{ParseResult, Span};
use nom::{
    character::complete::{char, multispace0, multispace1, space0},
    multi::separated_list0,
    sequence::delimited,
};

/// Wraps `inner` so that it also consumes surrounding whitespace, line
/// breaks included.
pub fn surrounding_whitespace<'a, F, O>(inner: F) -> impl FnMut(Span<'a>) -> ParseResult<'a, O>
where
    F: FnMut(Span<'a>) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Parses zero or more `inner` separated by whitespace.
pub fn space_separated_list0<'a, F, O>(inner: F) -> impl FnMut(Span<'a>) -> ParseResult<'a, Vec<O>>
where
    F: FnMut(Span<'a>) -> ParseResult<'a, O>,
{
    separated_list0(multispace1, inner)
}

/// Parses `inner` between parentheses. Spaces are allowed inside the
/// parentheses but line breaks are not.
pub fn parens<'a, F, O>(inner: F) -> impl FnMut(Span<'a>) -> ParseResult<'a, O>
where
    F: FnMut(Span<'a>) -> ParseResult<'a, O>,
{
    delimited(char('('), delimited(space0, inner, space0), char(')'))
}
