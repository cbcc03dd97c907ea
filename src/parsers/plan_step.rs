//! Provides parsers for a single step of a plan.

use crate::{
    error::Result,
    parsed_types::{ActionName, Name, PlanStep},
    parsers::{finish, parens, parse_name, preprocess, ParseResult, Span},
};
use nom::{
    branch::alt,
    character::complete::{char, multispace0, one_of, space0, space1},
    combinator::{all_consuming, map, opt},
    multi::{many0, separated_list0},
    number::complete::double,
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
};

/// Parses an action name.
pub fn parse_action_name<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, ActionName> {
    map(parse_name, ActionName::new)(input.into())
}

/// Parses the `<time>:` prefix of a timed plan step.
fn time_prefix(input: Span) -> ParseResult<f64> {
    terminated(double, preceded(space0, char(':')))(input)
}

/// Parses `name arg1 arg2 ...` on a single line.
fn step_body(input: Span) -> ParseResult<(ActionName, Vec<Name>)> {
    pair(parse_action_name, many0(preceded(space1, parse_name)))(input)
}

/// Parses LPG-style annotations such as `[d:1.00; c:1.00]`.
fn annotations(input: Span) -> ParseResult<Vec<(char, f64)>> {
    delimited(
        char('['),
        separated_list0(
            preceded(space0, char(';')),
            preceded(space0, separated_pair(one_of("dc"), char(':'), double)),
        ),
        preceded(space0, char(']')),
    )(input)
}

/// Parses a single step of a plan.
///
/// The step may be parenthesized, prefixed by a `<time>:` index and
/// followed by `[d:<duration>; c:<cost>]` annotations.
///
/// ## Example
/// ```
/// # use pddl_ground::parsed_types::*;
/// # use pddl_ground::parsers::{parse_plan_step, Span};
/// let (_, step) = parse_plan_step(Span::new("0: (stack b1 b2) [d:1.00; c:2.00]")).unwrap();
/// assert_eq!(step.name().name().as_str(), "stack");
/// assert_eq!(step.parameters(), &[Name::new("b1"), Name::new("b2")]);
/// assert_eq!(step.time(), Some(0.0));
/// assert_eq!(step.cost(), Some(2.0));
/// ```
pub fn parse_plan_step<'a, T: Into<Span<'a>>>(input: T) -> ParseResult<'a, PlanStep> {
    map(
        tuple((
            opt(terminated(time_prefix, space0)),
            alt((parens(step_body), step_body)),
            opt(preceded(space0, annotations)),
        )),
        |(time, (name, parameters), annotations)| {
            let mut step = PlanStep::new(name, parameters);
            if let Some(time) = time {
                step = step.with_time(time);
            }
            for (key, value) in annotations.unwrap_or_default() {
                step = match key {
                    'd' => step.with_duration(value),
                    _ => step.with_cost(value),
                };
            }
            step
        },
    )(input.into())
}

impl crate::parsers::Parser for PlanStep {
    type Item = PlanStep;

    /// Parses a plan step.
    ///
    /// ## See also
    /// See [`parse_plan_step`].
    fn parse<'a, S: Into<Span<'a>>>(input: S) -> ParseResult<'a, Self::Item> {
        parse_plan_step(input)
    }
}

impl PlanStep {
    /// Parses one line of planner output into a step. The line is
    /// lowercased first; trailing input is an error.
    pub fn from_line(line: &str) -> Result<Self> {
        let text = preprocess(line);
        let input = Span::new(&text);
        let result = all_consuming(delimited(multispace0, parse_plan_step, multispace0))(input);
        finish(result, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PddlError;
    use crate::parsers::Parser;

    #[test]
    fn plain_and_parenthesized_steps() {
        let step = PlanStep::from_str("(pick-up a)").unwrap();
        assert_eq!(step.name().name().as_str(), "pick-up");
        assert_eq!(step.parameters(), &[Name::new("a")]);

        let step = PlanStep::from_line("STACK A B").unwrap();
        assert_eq!(step.name().name().as_str(), "stack");
        assert_eq!(step.parameters(), &[Name::new("a"), Name::new("b")]);
        assert_eq!(step.time(), None);
    }

    #[test]
    fn lpg_annotations() {
        let step = PlanStep::from_line("  12.5:   (drive t1 a b)   [D:3.00; C:1.50]").unwrap();
        assert_eq!(step.time(), Some(12.5));
        assert_eq!(step.duration(), Some(3.0));
        assert_eq!(step.cost(), Some(1.5));
        assert_eq!(step.parameters().len(), 3);
    }

    #[test]
    fn nullary_steps() {
        let step = PlanStep::from_line("(reset)").unwrap();
        assert!(step.parameters().is_empty());
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(matches!(
            PlanStep::from_line("(stack a b) )"),
            Err(PddlError::Syntax { .. })
        ));
    }
}
