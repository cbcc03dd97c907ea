//! Parsers for PDDL domains, problems and plans.
//!
//! Domains and problems are scanned into balanced expressions first (see
//! [`elements`]) and then parsed by recursive descent with name resolution.
//! Plans and plan steps are context free and parsed with `nom` directly.

mod comments;
mod domain;
mod formula;
mod name;
mod operator;
mod plan;
mod plan_step;
mod problem;
mod scanner;
mod typed_list;
mod utilities;

use crate::error::{PddlError, Result};

pub trait Parser {
    type Item;

    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item>;

    /// Parse a string slice into the desired type. Discards any remaining
    /// input.
    fn from_str(input: &str) -> Result<Self::Item, nom::Err<ParseError>> {
        let (_, value) = Self::parse(input)?;
        Ok(value)
    }
}

pub type Span<'a> = nom_locate::LocatedSpan<&'a str>;

pub type ParseError<'a> = nom_greedyerror::GreedyError<Span<'a>, nom::error::ErrorKind>;

pub type ParseResult<'a, T, E = ParseError<'a>> = nom::IResult<Span<'a>, T, E>;

/// Turns the result of a `nom` parser into a [`PddlError::Syntax`] pointing
/// at the furthest position the parser reached.
pub(crate) fn finish<'a, T>(result: ParseResult<'a, T>, input: Span<'a>) -> Result<T> {
    match result {
        Ok((_, value)) => Ok(value),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            let at = e.errors.first().map(|(span, _)| *span).unwrap_or(input);
            let near = at.fragment().lines().next().unwrap_or_default();
            Err(PddlError::syntax(at, format!("unrecognized input near `{near}`")))
        }
        Err(nom::Err::Incomplete(_)) => Err(PddlError::syntax(input, "unexpected end of input")),
    }
}

// Parsers
pub use comments::preprocess;
pub use domain::parse_domain;
pub use formula::{
    parse_atom, parse_formula, parse_function_term, parse_numeric, scope_of, Mode, Scope,
};
pub use name::{parse_name, parse_number, parse_token};
pub use operator::parse_operator;
pub use plan::parse_plan;
pub use plan_step::{parse_action_name, parse_plan_step};
pub use problem::parse_problem;
pub use scanner::{elements, find_all_siblings, find_balanced, single_expression, Element};
pub use typed_list::{resolve_type, typed_entities, typed_list, UndeclaredType};

pub(crate) use utilities::{parens, space_separated_list0, surrounding_whitespace};
