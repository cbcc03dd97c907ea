//! Provides parsers for parsing a plan.

use crate::{
    error::{PddlError, Result},
    parsed_types::Plan,
    parsers::{
        finish, parse_plan_step, preprocess, space_separated_list0, surrounding_whitespace,
        ParseResult, Span,
    },
};
use nom::combinator::{all_consuming, map};
use std::fs;
use std::path::Path;

/// Parses a plan: one step per line. Comments have to be removed with
/// [`preprocess`](crate::parsers::preprocess) beforehand, as
/// [`Plan::from_text`] does.
///
/// ## Example
/// ```
/// # use pddl_ground::parsed_types::*;
/// # use pddl_ground::parsers::{parse_plan, Span};
/// let input = r#"(pickup b1)
/// (stack b1 b2)
/// "#;
/// let (_, plan) = parse_plan(Span::new(input)).unwrap();
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan.steps()[1].name().name().as_str(), "stack");
/// ```
pub fn parse_plan<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, Plan> {
    map(
        surrounding_whitespace(space_separated_list0(parse_plan_step)),
        Plan::new,
    )(input.into())
}

impl crate::parsers::Parser for Plan {
    type Item = Plan;

    /// Parses a plan.
    ///
    /// ## See also
    /// See [`parse_plan`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_plan(input)
    }
}

impl Plan {
    /// Parses planner output into a plan. Unlike
    /// [`Parser::from_str`](crate::parsers::Parser::from_str), every line
    /// must be a step, a comment or blank.
    pub fn from_text(text: &str) -> Result<Self> {
        let text = preprocess(text);
        let input = Span::new(&text);
        let result = all_consuming(parse_plan)(input);
        finish(result, input)
    }

    /// Reads and parses a plan file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PddlError::io(path, e))?;
        Self::from_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::Parser;
    use crate::test_utils::BLOCKSWORLD_PLAN_TEXT;

    #[test]
    fn parses_a_plan_with_comments() {
        let plan = Plan::from_text(BLOCKSWORLD_PLAN_TEXT).unwrap();
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.steps()[0].name().name().as_str(), "unstack");
    }

    #[test]
    fn timed_plans() {
        let text = "0.000: (drive t1 a b) [D:2.00; C:1.00]\n2.001: (unload t1 p1 b) [D:1.00; C:1.00]\n";
        let plan = Plan::from_text(text).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.steps()[1].time(), Some(2.001));
    }

    #[test]
    fn empty_plans() {
        assert!(Plan::from_text("; no steps\n\n").unwrap().is_empty());
    }

    #[test]
    fn from_str_discards_trailing_input() {
        let plan = Plan::from_str("(a x)\n(b y)\n)))").unwrap();
        assert_eq!(plan.len(), 2);
        assert!(matches!(
            Plan::from_text("(a x)\n)))"),
            Err(PddlError::Syntax { line: 2, .. })
        ));
    }
}
