//! Balanced-parenthesis scanning and sibling segmentation.
//!
//! The scanner works on [`Span`]s so that every sub-expression still knows
//! its line and column in the source text.

use crate::error::{PddlError, Result};
use crate::parsers::{parse_token, Span};
use nom::Slice;

/// One element of a parenthesized expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    /// A bare token such as `and`, `?x` or `0.5`.
    Token(Span<'a>),
    /// A nested list, including its parentheses.
    List(Span<'a>),
}

impl<'a> Element<'a> {
    pub fn span(&self) -> Span<'a> {
        match self {
            Element::Token(span) | Element::List(span) => *span,
        }
    }

    pub fn as_token(&self) -> Option<&'a str> {
        match self {
            Element::Token(span) => Some(*span.fragment()),
            Element::List(_) => None,
        }
    }

    pub fn is_token(&self, token: &str) -> bool {
        self.as_token() == Some(token)
    }

    /// Returns the nested list, or a syntax error naming what was expected.
    pub fn expect_list(&self, what: &str) -> Result<Span<'a>> {
        match self {
            Element::List(span) => Ok(*span),
            Element::Token(span) => Err(PddlError::syntax(
                *span,
                format!("expected {what}, found `{}`", span.fragment()),
            )),
        }
    }

    /// Returns the token, or a syntax error naming what was expected.
    pub fn expect_token(&self, what: &str) -> Result<Span<'a>> {
        match self {
            Element::Token(span) => Ok(*span),
            Element::List(span) => Err(PddlError::syntax(*span, format!("expected {what}"))),
        }
    }
}

/// Returns the balanced expression of `text` that starts at byte `start`.
///
/// `start` must point at `(`, in which case everything up to the matching
/// `)` is returned, or at a digit, in which case the whole number is
/// returned.
pub fn find_balanced(text: Span, start: usize) -> Result<Span> {
    let bytes = text.fragment().as_bytes();
    match bytes.get(start) {
        Some(b'(') => {
            let mut depth = 0usize;
            for (offset, byte) in bytes[start..].iter().enumerate() {
                match byte {
                    b'(' => depth += 1,
                    b')' => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(text.slice(start..start + offset + 1));
                        }
                    }
                    _ => {}
                }
            }
            Err(PddlError::syntax(
                text.slice(start..),
                "unbalanced parentheses: missing `)`",
            ))
        }
        Some(byte) if byte.is_ascii_digit() => {
            let len = bytes[start..]
                .iter()
                .take_while(|b| b.is_ascii_digit() || **b == b'.')
                .count();
            Ok(text.slice(start..start + len))
        }
        _ => Err(PddlError::syntax(
            text.slice(start.min(bytes.len())..),
            "expected `(` or a number",
        )),
    }
}

/// Splits `text` into its top-level balanced expressions.
///
/// `text` must consist of nothing but parenthesized expressions separated by
/// whitespace.
pub fn find_all_siblings(text: Span) -> Result<Vec<Span>> {
    let bytes = text.fragment().as_bytes();
    let mut siblings = vec![];
    let mut index = 0;
    loop {
        while index < bytes.len() && bytes[index].is_ascii_whitespace() {
            index += 1;
        }
        if index == bytes.len() {
            break;
        }
        if bytes[index] != b'(' {
            return Err(PddlError::syntax(
                text.slice(index..),
                "expected `(` between expressions",
            ));
        }
        let sibling = find_balanced(text, index)?;
        index += sibling.fragment().len();
        siblings.push(sibling);
    }
    Ok(siblings)
}

/// Returns the single balanced expression that makes up `text`, ignoring
/// surrounding whitespace.
pub fn single_expression(text: Span) -> Result<Span> {
    let mut siblings = find_all_siblings(text)?;
    match siblings.len() {
        1 => Ok(siblings.remove(0)),
        0 => Err(PddlError::syntax(text, "expected an expression")),
        _ => Err(PddlError::syntax(
            siblings[1],
            "unexpected text after the expression",
        )),
    }
}

/// Splits the inside of the balanced expression `expr` into tokens and
/// nested lists.
pub fn elements(expr: Span) -> Result<Vec<Element>> {
    let fragment = expr.fragment();
    if !fragment.starts_with('(') || !fragment.ends_with(')') || fragment.len() < 2 {
        return Err(PddlError::syntax(expr, "expected a parenthesized expression"));
    }

    let inner = expr.slice(1..fragment.len() - 1);
    let bytes = inner.fragment().as_bytes();
    let mut elements = vec![];
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            byte if byte.is_ascii_whitespace() => index += 1,
            b'(' => {
                let list = find_balanced(inner, index)?;
                index += list.fragment().len();
                elements.push(Element::List(list));
            }
            b')' => {
                return Err(PddlError::syntax(
                    inner.slice(index..),
                    "unbalanced parentheses: unexpected `)`",
                ))
            }
            _ => {
                let rest = inner.slice(index..);
                let (_, token) = parse_token(rest)
                    .map_err(|_| PddlError::syntax(rest, "expected a token"))?;
                index += token.fragment().len();
                elements.push(Element::Token(token));
            }
        }
    }
    Ok(elements)
}
