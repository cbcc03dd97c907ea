//! Provides parsers for problem definitions.

use crate::error::{PddlError, Result};
use crate::parsed_types::{Domain, Fact, Formula, Name, Problem};
use crate::parsers::{
    elements, parse_atom, parse_formula, parse_function_term, parse_number, preprocess, scope_of,
    single_expression, typed_entities, Element, Mode, Scope, Span, UndeclaredType,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Parses a problem definition against its `domain`.
///
/// Objects of undeclared types are accepted with a warning. Initial-state
/// entries that name an action predicate are dropped.
///
/// ## Errors
/// [`PddlError::DomainMismatch`] if the problem names a different domain,
/// plus any error of the initial state or goal.
///
/// ## Example
/// ```
/// # use pddl_ground::parsers::parse_problem;
/// # use pddl_ground::{Domain, ParserConfig};
/// let domain = Domain::from_str(
///     "(define (domain d) (:predicates (on ?x ?y) (clear ?x)))",
///     &ParserConfig::default(),
/// ).unwrap();
/// let problem = parse_problem(
///     "(define (problem p) (:domain d) (:objects a b)
///         (:init (on a b) (clear a)) (:goal (on b a)))",
///     &domain,
/// ).unwrap();
/// assert_eq!(problem.objects().len(), 2);
/// assert_eq!(problem.initial_state().len(), 2);
/// ```
pub fn parse_problem(input: &str, domain: &Domain) -> Result<Problem> {
    let text = preprocess(input);
    let define = single_expression(Span::new(&text))?;
    let items = elements(define)?;
    let Some((head, sections)) = items.split_first() else {
        return Err(PddlError::syntax(define, "expected `(define ...)`"));
    };
    if !head.is_token("define") {
        return Err(PddlError::syntax(head.span(), "expected `define`"));
    }

    let mut name = None;
    let mut domain_name = None;
    let mut objects = vec![];
    let mut init = vec![];
    let mut goal = None;
    for section in sections {
        let expr = section.expect_list("a problem section")?;
        let items = elements(expr)?;
        let Some((keyword, body)) = items.split_first() else {
            return Err(PddlError::syntax(expr, "empty problem section"));
        };
        match keyword.as_token() {
            Some("problem") => name = Some(single_name(expr, body)?),
            Some(":domain") => domain_name = Some(single_name(expr, body)?),
            Some(":objects") => {
                objects = typed_entities(body, domain.types(), UndeclaredType::Warn)?
            }
            Some(":init") => init = body.to_vec(),
            Some(":goal") => {
                let [formula] = body else {
                    return Err(PddlError::syntax(expr, "expected `(:goal <formula>)`"));
                };
                goal = Some(formula.expect_list("a goal formula")?);
            }
            _ => warn!(
                section = *keyword.span().fragment(),
                line = expr.location_line(),
                "skipping unsupported problem section"
            ),
        }
    }

    let name = name.ok_or_else(|| PddlError::syntax(define, "missing `(problem <name>)`"))?;
    let domain_name =
        domain_name.ok_or_else(|| PddlError::syntax(define, "missing `(:domain <name>)`"))?;
    if domain_name != *domain.name() {
        return Err(PddlError::DomainMismatch {
            expected: domain.name().to_string(),
            found: domain_name.to_string(),
        });
    }

    let objects: BTreeSet<_> = objects.into_iter().collect();
    let scope = scope_of(domain.constants().iter().chain(&objects));
    let initial_state = parse_initial_state(&init, domain, &scope)?;
    let goal = match goal {
        Some(expr) => parse_formula(expr, domain, &scope, Mode::Condition)?,
        None => Formula::empty(),
    };

    debug!(
        problem = %name,
        objects = objects.len(),
        facts = initial_state.len(),
        "parsed problem"
    );
    Ok(Problem::new(name, domain_name, objects, initial_state, goal))
}

fn single_name(expr: Span, body: &[Element]) -> Result<Name> {
    match body {
        [name] => Ok(Name::new(name.expect_token("a name")?.fragment())),
        _ => Err(PddlError::syntax(expr, "expected a single name")),
    }
}

fn parse_initial_state(
    entries: &[Element],
    domain: &Domain,
    scope: &Scope,
) -> Result<BTreeSet<Fact>> {
    let mut facts = BTreeSet::new();
    for entry in entries {
        let expr = entry.expect_list("an initial fact")?;
        let items = elements(expr)?;
        let Some((head, args)) = items.split_first() else {
            return Err(PddlError::syntax(expr, "empty initial fact"));
        };
        let head = head.expect_token("a predicate name")?;

        if *head.fragment() == "=" {
            let [term, value] = args else {
                return Err(PddlError::syntax(expr, "expected `(= (<function> ...) <number>)`"));
            };
            let term = term.expect_list("a function term")?;
            if let Some(function) = elements(term)?.first().and_then(Element::as_token) {
                if domain.is_action_predicate(function) {
                    continue;
                }
            }
            let term = parse_function_term(term, domain, scope)?;
            let value = parse_number(value.expect_token("a number")?)?;
            facts.insert(Fact::fluent(term, value));
            continue;
        }

        if domain.is_action_predicate(head.fragment()) {
            continue;
        }
        facts.insert(Fact::Atom(parse_atom(head, args, domain, scope)?));
    }
    Ok(facts)
}

impl Problem {
    /// Parses a problem from PDDL text.
    ///
    /// ## See also
    /// See [`parse_problem`].
    pub fn from_str(input: &str, domain: &Domain) -> Result<Self> {
        parse_problem(input, domain)
    }

    /// Reads and parses a problem file.
    pub fn from_path<P: AsRef<Path>>(path: P, domain: &Domain) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PddlError::io(path, e))?;
        parse_problem(&text, domain)
    }
}
