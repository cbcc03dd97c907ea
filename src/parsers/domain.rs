//! Provides parsers for domain definitions.

use crate::config::ParserConfig;
use crate::error::{PddlError, Result};
use crate::parsed_types::{
    Domain, FunctionDefinition, Name, PredicateDefinition, Type, Types, DEFAULT_TYPE_NAME,
};
use crate::parsers::operator::is_operator_section;
use crate::parsers::{
    elements, parse_operator, preprocess, single_expression, typed_entities, typed_list, Element,
    Span, UndeclaredType,
};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// The sections of a domain, in the order they were found.
#[derive(Debug, Default)]
struct Sections<'a> {
    name: Option<Span<'a>>,
    requirements: Vec<Name>,
    types: Option<Vec<Element<'a>>>,
    constants: Option<Vec<Element<'a>>>,
    predicates: Option<Vec<Element<'a>>>,
    functions: Option<Vec<Element<'a>>>,
    operators: Vec<Span<'a>>,
    action_predicates: Option<Vec<Element<'a>>>,
}

/// Parses a domain definition.
///
/// Sections are processed in dependency order: types, constants, predicates,
/// functions, then operators in file order. Action predicates are set up
/// last.
///
/// ## Example
/// ```
/// # use pddl_ground::parsers::parse_domain;
/// # use pddl_ground::{Name, ParserConfig};
/// let input = r#"
/// (define
///     (domain sokoban)
///     (:requirements :typing)
///     (:types location direction box)
///     (:predicates
///          (at-robot ?l - location)
///          (clear ?l - location)
///          (adjacent ?l1 - location ?l2 - location ?d - direction))
///     (:action move
///         :parameters (?from - location ?to - location ?dir - direction)
///         :precondition (and (clear ?to) (at-robot ?from) (adjacent ?from ?to ?dir))
///         :effect (and (at-robot ?to) (not (at-robot ?from)))))"#;
///
/// let domain = parse_domain(input, &ParserConfig::default()).unwrap();
/// assert_eq!(domain.name(), &Name::new("sokoban"));
/// assert_eq!(domain.predicates().len(), 3);
/// assert_eq!(domain.operators().len(), 1);
/// ```
pub fn parse_domain(input: &str, config: &ParserConfig) -> Result<Domain> {
    config.validate()?;
    let text = preprocess(input);
    let define = single_expression(Span::new(&text))?;
    let sections = split_sections(define)?;

    let name = sections
        .name
        .ok_or_else(|| PddlError::syntax(define, "missing `(domain <name>)`"))?;
    let types = match &sections.types {
        Some(body) => parse_types(body)?,
        None => Types::untyped(),
    };
    let constants = match &sections.constants {
        Some(body) => typed_entities(body, &types, UndeclaredType::Reject)?,
        None => vec![],
    };
    let predicates = match &sections.predicates {
        Some(body) => parse_signatures(body, &types)?
            .into_iter()
            .map(|(name, parameter_types)| PredicateDefinition::new(name, parameter_types))
            .collect(),
        None => vec![],
    };
    let functions = match &sections.functions {
        Some(body) => parse_signatures(body, &types)?
            .into_iter()
            .map(|(name, parameter_types)| FunctionDefinition::new(name, parameter_types))
            .collect(),
        None => vec![],
    };
    debug!(
        domain = *name.fragment(),
        types = types.len(),
        constants = constants.len(),
        predicates = predicates.len(),
        functions = functions.len(),
        "parsed domain declarations"
    );

    let mut builder = Domain::builder(*name.fragment())
        .with_requirements(sections.requirements)
        .with_types(types)
        .with_constants(constants)
        .with_predicates(predicates)
        .with_functions(functions)
        .with_operators_as_actions(config.operators_as_actions);
    for expr in sections.operators {
        let operator = parse_operator(expr, &builder)?;
        builder.add_operator(operator);
    }

    match sections.action_predicates {
        Some(body) => {
            if config.operators_as_actions {
                warn!(
                    "the `(:actions ...)` section is used instead of synthesizing action predicates from operators"
                );
                builder = builder.with_operators_as_actions(false);
            }
            let names = body
                .iter()
                .map(|element| {
                    element
                        .expect_token("an action predicate name")
                        .map(|token| Name::new(token.fragment()))
                })
                .collect::<Result<Vec<_>>>()?;
            builder = builder.with_action_predicates(names);
        }
        None if config.expect_action_predicates => {
            return Err(PddlError::syntax(define, "missing `(:actions ...)` section"))
        }
        None => {}
    }

    builder.build()
}

fn split_sections(define: Span) -> Result<Sections> {
    let items = elements(define)?;
    let Some((head, rest)) = items.split_first() else {
        return Err(PddlError::syntax(define, "expected `(define ...)`"));
    };
    if !head.is_token("define") {
        return Err(PddlError::syntax(head.span(), "expected `define`"));
    }

    let mut sections = Sections::default();
    for section in rest {
        let expr = section.expect_list("a domain section")?;
        let items = elements(expr)?;
        let Some((keyword, body)) = items.split_first() else {
            return Err(PddlError::syntax(expr, "empty domain section"));
        };
        match keyword.as_token() {
            Some("domain") => {
                let [name] = body else {
                    return Err(PddlError::syntax(expr, "expected `(domain <name>)`"));
                };
                sections.name = Some(name.expect_token("a domain name")?);
            }
            Some(":requirements") => {
                for requirement in body {
                    let token = requirement.expect_token("a requirement")?;
                    sections.requirements.push(Name::new(token.fragment()));
                }
            }
            Some(":types") => sections.types = Some(body.to_vec()),
            Some(":constants") => sections.constants = Some(body.to_vec()),
            Some(":predicates") => sections.predicates = Some(body.to_vec()),
            Some(":functions") => sections.functions = Some(body.to_vec()),
            Some(":actions") => sections.action_predicates = Some(body.to_vec()),
            _ if is_operator_section(keyword) => sections.operators.push(expr),
            _ => warn!(
                section = *keyword.span().fragment(),
                line = expr.location_line(),
                "skipping unsupported domain section"
            ),
        }
    }
    Ok(sections)
}

/// Parses the body of a `:types` section.
///
/// Either every name is followed by `- <supertype>` eventually
/// (hierarchical), or none is (flat).
fn parse_types(body: &[Element]) -> Result<Types> {
    let entries = typed_list(body)?;
    let hierarchical = entries.iter().any(|(_, supertype)| supertype.is_some());

    let mut types = Types::typed();
    for (name, supertype) in entries {
        let r#type = declared_type(name)?;
        match supertype {
            Some(supertype) => types.add_subtypes([r#type], declared_type(supertype)?),
            None if hierarchical => {
                return Err(PddlError::TypeMismatch(format!(
                    "type `{}` has no supertype, hierarchical and flat type declarations cannot be mixed",
                    name.fragment()
                )))
            }
            None => {
                types.declare(r#type);
            }
        }
    }
    Ok(types)
}

fn declared_type(name: Span) -> Result<Type> {
    if *name.fragment() == DEFAULT_TYPE_NAME {
        return Err(PddlError::TypeMismatch(format!(
            "`{DEFAULT_TYPE_NAME}` is reserved for untyped domains"
        )));
    }
    Ok(Type::new(*name.fragment()))
}

/// Parses predicate or function signatures like `(at ?x - truck ?y - place)`.
/// A `- number` return type after a function signature is skipped.
fn parse_signatures(body: &[Element], types: &Types) -> Result<Vec<(Name, Vec<Type>)>> {
    let mut signatures = vec![];
    let mut iter = body.iter();
    while let Some(element) = iter.next() {
        if element.is_token("-") {
            match iter.next() {
                Some(kind) if kind.is_token("number") => continue,
                _ => return Err(PddlError::syntax(element.span(), "expected `- number`")),
            }
        }

        let expr = element.expect_list("a signature")?;
        let items = elements(expr)?;
        let Some((head, parameters)) = items.split_first() else {
            return Err(PddlError::syntax(expr, "empty signature"));
        };
        let name = head.expect_token("a name")?;
        let parameter_types = typed_entities(parameters, types, UndeclaredType::Reject)?
            .into_iter()
            .map(|parameter| *parameter.type_())
            .collect();
        signatures.push((Name::new(name.fragment()), parameter_types));
    }
    Ok(signatures)
}

impl Domain {
    /// Parses a domain from PDDL text.
    ///
    /// ## See also
    /// See [`parse_domain`].
    pub fn from_str(input: &str, config: &ParserConfig) -> Result<Self> {
        parse_domain(input, config)
    }

    /// Reads and parses a domain file.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &ParserConfig) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PddlError::io(path, e))?;
        parse_domain(&text, config)
    }
}
