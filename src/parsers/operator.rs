//! Provides parsing for `(:action ...)` and `(:durative-action ...)`.

use crate::error::{PddlError, Result};
use crate::parsed_types::{ActionName, ComparisonKind, Duration, Formula, Operator, SymbolTable};
use crate::parsers::{
    elements, parse_formula, parse_numeric, scope_of, typed_entities, Element, Mode, Scope, Span,
    UndeclaredType,
};
use std::str::FromStr;
use tracing::debug;

/// Parses an operator definition against the symbols declared so far.
///
/// ## Errors
/// Fails on malformed fields, on parameters declared twice and on any error
/// of the precondition, effect or duration.
pub fn parse_operator<S: SymbolTable + ?Sized>(expr: Span, symbols: &S) -> Result<Operator> {
    let items = elements(expr)?;
    let [keyword, name, fields @ ..] = items.as_slice() else {
        return Err(PddlError::syntax(expr, "expected an operator name"));
    };
    let durative = keyword.is_token(":durative-action");
    let name = name.expect_token("an operator name")?;

    let mut parameters = None;
    let mut precondition = None;
    let mut effect = None;
    let mut duration = None;
    let mut fields = fields.iter();
    while let Some(field) = fields.next() {
        let field = field.expect_token("an operator field such as `:parameters`")?;
        let value = fields
            .next()
            .ok_or_else(|| PddlError::syntax(field, "missing value"))?;
        match *field.fragment() {
            ":parameters" => parameters = Some(value.expect_list("a parameter list")?),
            ":precondition" if !durative => precondition = Some(value.expect_list("a formula")?),
            ":condition" if durative => precondition = Some(value.expect_list("a formula")?),
            ":duration" if durative => duration = Some(value.expect_list("a duration constraint")?),
            ":effect" => effect = Some(value.expect_list("a formula")?),
            other => {
                return Err(PddlError::syntax(
                    field,
                    format!("unexpected field `{other}` in `{}`", name.fragment()),
                ))
            }
        }
    }

    let parameters = match parameters {
        Some(list) => typed_entities(&elements(list)?, symbols.types(), UndeclaredType::Reject)?,
        None => vec![],
    };
    let mut scope = scope_of(symbols.constants());
    for parameter in &parameters {
        if scope.insert(*parameter.name(), *parameter.type_()).is_some() {
            return Err(PddlError::VariableRedeclared {
                name: parameter.name().to_string(),
            });
        }
    }

    let precondition = match precondition {
        Some(expr) => parse_formula(expr, symbols, &scope, Mode::Condition)?,
        None => Formula::empty(),
    };
    let effect = match effect {
        Some(expr) => parse_formula(expr, symbols, &scope, Mode::Effect)?,
        None => Formula::empty(),
    };

    let mut operator = Operator::new(
        ActionName::from(*name.fragment()),
        parameters,
        precondition,
        effect,
    );
    if durative {
        let expr = duration.ok_or_else(|| PddlError::syntax(name, "missing `:duration`"))?;
        operator = operator.with_duration(parse_duration(expr, symbols, &scope)?);
    }

    debug!(
        operator = %operator.name(),
        parameters = operator.arity(),
        durative,
        "parsed operator"
    );
    Ok(operator)
}

/// Parses a duration constraint such as `(= ?duration 5)`.
fn parse_duration<S: SymbolTable + ?Sized>(
    expr: Span,
    symbols: &S,
    scope: &Scope,
) -> Result<Duration> {
    let items = elements(expr)?;
    let [relation, variable, value] = items.as_slice() else {
        return Err(PddlError::syntax(expr, "expected `(<relation> ?duration <value>)`"));
    };
    let relation = relation.expect_token("a comparison")?;
    let kind = ComparisonKind::from_str(relation.fragment()).map_err(|_| {
        PddlError::syntax(
            relation,
            format!("unknown duration relation `{}`", relation.fragment()),
        )
    })?;
    if !variable.is_token("?duration") {
        return Err(PddlError::syntax(variable.span(), "expected `?duration`"));
    }
    Ok(Duration::new(kind, parse_numeric(value, symbols, scope)?))
}

/// Whether a domain section holds an operator definition.
pub(crate) fn is_operator_section(keyword: &Element) -> bool {
    keyword.is_token(":action") || keyword.is_token(":durative-action")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_types::{
        Domain, DomainBuilder, FunctionDefinition, PredicateDefinition, TimeSpecifier, ToTyped,
        Type, Types,
    };

    fn symbols() -> DomainBuilder {
        let mut types = Types::typed();
        types.declare(Type::from("block"));
        Domain::builder("blocks")
            .with_types(types)
            .with_constants(vec!["table".to_typed("block")])
            .with_predicates(vec![
                PredicateDefinition::new("on", vec!["block".into(), "block".into()]),
                PredicateDefinition::new("clear", vec!["block".into()]),
            ])
            .with_functions(vec![FunctionDefinition::new("weight", vec!["block".into()])])
    }

    #[test]
    fn parses_a_classical_action() {
        let text = "(:action move
            :parameters (?b - block ?to - block)
            :precondition (and (clear ?b) (clear ?to) (not (on ?b table)))
            :effect (and (on ?b ?to) (not (clear ?to))))";
        let operator = parse_operator(Span::new(text), &symbols()).unwrap();
        assert_eq!(operator.name().name().as_str(), "move");
        assert_eq!(operator.parameters(), &["?b".to_typed("block"), "?to".to_typed("block")]);
        assert_eq!(operator.precondition().conjuncts().len(), 3);
        assert!(operator.effect().conjuncts()[1].is_anti());
        assert!(!operator.is_durative());
    }

    #[test]
    fn parses_a_durative_action() {
        let text = "(:durative-action lift
            :parameters (?b - block)
            :duration (= ?duration (weight ?b))
            :condition (and (at start (clear ?b)))
            :effect (and (at end (not (clear ?b)))))";
        let operator = parse_operator(Span::new(text), &symbols()).unwrap();
        let duration = operator.duration().unwrap();
        assert_eq!(duration.kind(), ComparisonKind::Equal);
        assert!(duration.value().is_function());
        assert!(matches!(
            operator.precondition().conjuncts()[0],
            Formula::Timed(TimeSpecifier::AtStart, _)
        ));
    }

    #[test]
    fn duplicate_parameters_are_rejected() {
        let text = "(:action a :parameters (?x ?x - block) :effect (clear ?x))";
        assert!(matches!(
            parse_operator(Span::new(text), &symbols()),
            Err(PddlError::VariableRedeclared { .. })
        ));
    }

    #[test]
    fn durative_actions_need_a_duration() {
        let text = "(:durative-action a :parameters () :condition () :effect ())";
        assert!(matches!(
            parse_operator(Span::new(text), &symbols()),
            Err(PddlError::Syntax { .. })
        ));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let text = "(:action noop :parameters ())";
        let operator = parse_operator(Span::new(text), &symbols()).unwrap();
        assert_eq!(operator.precondition(), &Formula::empty());
        assert_eq!(operator.effect(), &Formula::empty());
    }
}
