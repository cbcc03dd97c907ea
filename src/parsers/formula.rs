//! Provides the recursive-descent parser for condition, effect and goal
//! trees.
//!
//! Input is expected to be preprocessed, i.e. lowercased with comments
//! removed. Every name is resolved against a [`SymbolTable`] and a variable
//! [`Scope`] while parsing.

use crate::error::{PddlError, Result, SymbolKind};
use crate::parsed_types::{
    ArithmeticOp, AssignOp, Assignment, Atom, Comparison, ComparisonKind, Formula, FunctionTerm,
    Name, NumericExpr, ProbabilisticEffect, SymbolTable, TimeSpecifier, Type, TypedEntity,
};
use crate::parsers::{elements, parse_number, typed_entities, Element, Span, UndeclaredType};
use std::str::FromStr;

/// Tolerance when checking that outcome probabilities sum to at most one.
const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// The names visible while parsing a formula, mapped to their types.
///
/// Scopes are persistent maps: extending one for a quantifier body is cheap
/// and never affects the enclosing scope.
pub type Scope = im::OrdMap<Name, Type>;

/// Builds a scope from typed entities.
pub fn scope_of<'e, I: IntoIterator<Item = &'e TypedEntity>>(entities: I) -> Scope {
    entities
        .into_iter()
        .map(|entity| (*entity.name(), *entity.type_()))
        .collect()
}

/// Whether a formula is parsed as a condition or as an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Preconditions, durative conditions and goals.
    Condition,
    /// Effects: `not` means delete, and `when`, `probabilistic` and numeric
    /// updates are allowed.
    Effect,
}

/// Parses the balanced expression `expr` into a [`Formula`].
///
/// ## Errors
/// [`PddlError::Syntax`] for malformed expressions or keywords used in the
/// wrong [`Mode`], [`PddlError::UndefinedSymbol`] for unknown predicates and
/// functions, [`PddlError::ArityMismatch`], [`PddlError::UnboundVariable`]
/// for arguments missing from `scope`, [`PddlError::TypeMismatch`] and
/// [`PddlError::VariableRedeclared`] for quantifiers that rebind a name.
pub fn parse_formula<S: SymbolTable + ?Sized>(
    expr: Span,
    symbols: &S,
    scope: &Scope,
    mode: Mode,
) -> Result<Formula> {
    let items = elements(expr)?;
    let Some((head, args)) = items.split_first() else {
        return Ok(Formula::empty());
    };
    let keyword = head.expect_token("a keyword or predicate name")?;

    match *keyword.fragment() {
        "and" => Ok(Formula::And(parse_all(args, symbols, scope, mode)?)),
        "or" => Ok(Formula::Or(parse_all(args, symbols, scope, mode)?)),
        "forall" | "exists" => parse_quantified(keyword, args, symbols, scope, mode),
        "not" => {
            let [inner] = expect_args::<1>(keyword, args)?;
            let inner = parse_formula(inner.expect_list("a formula")?, symbols, scope, mode)?;
            Ok(match mode {
                Mode::Effect => Formula::new_anti(inner),
                Mode::Condition => Formula::new_not(inner),
            })
        }
        "imply" => {
            require_mode(keyword, mode, Mode::Condition)?;
            let [lhs, rhs] = expect_args::<2>(keyword, args)?;
            Ok(Formula::new_imply(
                parse_formula(lhs.expect_list("a formula")?, symbols, scope, mode)?,
                parse_formula(rhs.expect_list("a formula")?, symbols, scope, mode)?,
            ))
        }
        "when" => {
            require_mode(keyword, mode, Mode::Effect)?;
            let [condition, effect] = expect_args::<2>(keyword, args)?;
            Ok(Formula::new_when(
                parse_formula(condition.expect_list("a condition")?, symbols, scope, Mode::Condition)?,
                parse_formula(effect.expect_list("an effect")?, symbols, scope, Mode::Effect)?,
            ))
        }
        "probabilistic" => {
            require_mode(keyword, mode, Mode::Effect)?;
            parse_probabilistic(keyword, args, symbols, scope)
        }
        "at" if is_timed(args, "start") => parse_timed(TimeSpecifier::AtStart, args, symbols, scope, mode),
        "at" if is_timed(args, "end") => parse_timed(TimeSpecifier::AtEnd, args, symbols, scope, mode),
        "over" if is_timed(args, "all") => parse_timed(TimeSpecifier::OverAll, args, symbols, scope, mode),
        "different" if symbols.predicate("different").is_none() => {
            let [a, b] = expect_args::<2>(keyword, args)?;
            Ok(Formula::Different(
                resolve_argument(a, scope)?,
                resolve_argument(b, scope)?,
            ))
        }
        word => {
            if let Ok(kind) = ComparisonKind::from_str(word) {
                parse_comparison(kind, keyword, args, symbols, scope)
            } else if let Ok(op) = AssignOp::from_str(word) {
                require_mode(keyword, mode, Mode::Effect)?;
                let [target, value] = expect_args::<2>(keyword, args)?;
                Ok(Formula::Assign(Assignment::new(
                    op,
                    parse_function_term(target.expect_list("a function term")?, symbols, scope)?,
                    parse_numeric(value, symbols, scope)?,
                )))
            } else {
                parse_atom(keyword, args, symbols, scope).map(Formula::Atom)
            }
        }
    }
}

fn parse_all<S: SymbolTable + ?Sized>(
    args: &[Element],
    symbols: &S,
    scope: &Scope,
    mode: Mode,
) -> Result<Vec<Formula>> {
    args.iter()
        .map(|arg| parse_formula(arg.expect_list("a formula")?, symbols, scope, mode))
        .collect()
}

fn parse_quantified<S: SymbolTable + ?Sized>(
    keyword: Span,
    args: &[Element],
    symbols: &S,
    scope: &Scope,
    mode: Mode,
) -> Result<Formula> {
    let [bindings, body] = expect_args::<2>(keyword, args)?;
    let bindings = elements(bindings.expect_list("a variable list")?)?;
    let variables = typed_entities(&bindings, symbols.types(), UndeclaredType::Reject)?;
    let body = body.expect_list("a formula")?;
    if variables.is_empty() {
        return parse_formula(body, symbols, scope, mode);
    }

    let mut inner = scope.clone();
    for variable in &variables {
        if inner.contains_key(variable.name()) {
            return Err(PddlError::VariableRedeclared {
                name: variable.name().to_string(),
            });
        }
        inner.insert(*variable.name(), *variable.type_());
    }

    let body = parse_formula(body, symbols, &inner, mode)?;
    Ok(if *keyword.fragment() == "forall" {
        Formula::new_forall(variables, body)
    } else {
        Formula::new_exists(variables, body)
    })
}

fn parse_probabilistic<S: SymbolTable + ?Sized>(
    keyword: Span,
    args: &[Element],
    symbols: &S,
    scope: &Scope,
) -> Result<Formula> {
    if args.len() % 2 != 0 {
        return Err(PddlError::syntax(
            keyword,
            "`probabilistic` expects pairs of a probability and an outcome",
        ));
    }

    let outcomes = args
        .chunks(2)
        .map(|pair| {
            let token = pair[0].expect_token("a probability")?;
            let probability = parse_number(token)?;
            if !(0.0..=1.0).contains(&probability) {
                return Err(PddlError::syntax(
                    token,
                    format!("probability {probability} is not between 0 and 1"),
                ));
            }
            let outcome = parse_formula(pair[1].expect_list("an outcome")?, symbols, scope, Mode::Effect)?;
            Ok((probability, outcome))
        })
        .collect::<Result<Vec<_>>>()?;

    let effect = ProbabilisticEffect::new(outcomes);
    let total = effect.total_probability();
    if total > 1.0 + PROBABILITY_TOLERANCE {
        return Err(PddlError::syntax(
            keyword,
            format!("outcome probabilities sum to {total}, which is more than 1"),
        ));
    }
    Ok(Formula::Probabilistic(effect))
}

fn is_timed(args: &[Element], qualifier: &str) -> bool {
    matches!(args, [word, Element::List(_)] if word.is_token(qualifier))
}

fn parse_timed<S: SymbolTable + ?Sized>(
    time: TimeSpecifier,
    args: &[Element],
    symbols: &S,
    scope: &Scope,
    mode: Mode,
) -> Result<Formula> {
    let body = args[1].expect_list("a formula")?;
    Ok(Formula::new_timed(time, parse_formula(body, symbols, scope, mode)?))
}

fn parse_comparison<S: SymbolTable + ?Sized>(
    kind: ComparisonKind,
    keyword: Span,
    args: &[Element],
    symbols: &S,
    scope: &Scope,
) -> Result<Formula> {
    let [lhs, rhs] = expect_args::<2>(keyword, args)?;
    match (lhs, rhs) {
        (Element::List(term), _) => Ok(Formula::Comparison(Comparison::new(
            kind,
            parse_function_term(*term, symbols, scope)?,
            parse_numeric(rhs, symbols, scope)?,
        ))),
        (Element::Token(_), Element::Token(_)) if kind == ComparisonKind::Equal => Ok(
            Formula::Equality(resolve_argument(lhs, scope)?, resolve_argument(rhs, scope)?),
        ),
        _ => Err(PddlError::syntax(
            lhs.span(),
            format!("expected a function term on the left of `{kind}`"),
        )),
    }
}

/// Parses a numeric value: a number, a function term or arithmetic over
/// numeric values.
pub fn parse_numeric<S: SymbolTable + ?Sized>(
    element: &Element,
    symbols: &S,
    scope: &Scope,
) -> Result<NumericExpr> {
    let expr = match element {
        Element::Token(token) => return Ok(NumericExpr::number(parse_number(*token)?)),
        Element::List(expr) => *expr,
    };

    let items = elements(expr)?;
    let Some((head, args)) = items.split_first() else {
        return Err(PddlError::syntax(expr, "empty numeric expression"));
    };
    let head = head.expect_token("a function or arithmetic operator")?;
    let Ok(op) = ArithmeticOp::from_str(head.fragment()) else {
        return parse_function_application(head, args, symbols, scope).map(NumericExpr::Function);
    };

    let operands = args
        .iter()
        .map(|arg| parse_numeric(arg, symbols, scope))
        .collect::<Result<Vec<_>>>()?;
    let mut operands = operands.into_iter();
    match (operands.next(), operands.len()) {
        (Some(operand), 0) if op == ArithmeticOp::Subtract => Ok(NumericExpr::binary(
            op,
            NumericExpr::number(0.0),
            operand,
        )),
        (Some(first), rest) if rest > 0 => {
            Ok(operands.fold(first, |lhs, rhs| NumericExpr::binary(op, lhs, rhs)))
        }
        _ => Err(PddlError::syntax(
            head,
            format!("`{op}` expects at least two operands"),
        )),
    }
}

/// Parses `(<function> <args>...)` into a [`FunctionTerm`].
pub fn parse_function_term<S: SymbolTable + ?Sized>(
    expr: Span,
    symbols: &S,
    scope: &Scope,
) -> Result<FunctionTerm> {
    let items = elements(expr)?;
    let Some((head, args)) = items.split_first() else {
        return Err(PddlError::syntax(expr, "expected a function term"));
    };
    parse_function_application(head.expect_token("a function name")?, args, symbols, scope)
}

fn parse_function_application<S: SymbolTable + ?Sized>(
    head: Span,
    args: &[Element],
    symbols: &S,
    scope: &Scope,
) -> Result<FunctionTerm> {
    let name = *head.fragment();
    let definition = symbols
        .function(name)
        .ok_or_else(|| PddlError::undefined(SymbolKind::Function, name))?;
    check_arity(name, definition.arity(), args.len())?;
    let arguments = resolve_arguments(args, scope)?;
    definition.apply(arguments, symbols.types())
}

/// Parses a predicate application `head args...` into an [`Atom`].
pub fn parse_atom<S: SymbolTable + ?Sized>(
    head: Span,
    args: &[Element],
    symbols: &S,
    scope: &Scope,
) -> Result<Atom> {
    let name = *head.fragment();
    let definition = symbols
        .predicate(name)
        .ok_or_else(|| PddlError::undefined(SymbolKind::Predicate, name))?;
    check_arity(name, definition.arity(), args.len())?;
    let arguments = resolve_arguments(args, scope)?;
    definition.apply(arguments, symbols.types())
}

fn check_arity(name: &str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(PddlError::ArityMismatch {
            name: name.to_string(),
            expected,
            found,
        })
    }
}

fn resolve_arguments(args: &[Element], scope: &Scope) -> Result<Vec<TypedEntity>> {
    args.iter().map(|arg| resolve_argument(arg, scope)).collect()
}

/// Resolves a bare name to the entity it denotes in `scope`.
fn resolve_argument(arg: &Element, scope: &Scope) -> Result<TypedEntity> {
    let name = Name::new(arg.expect_token("an argument")?.fragment());
    scope
        .get(&name)
        .map(|r#type| TypedEntity::new(name, *r#type))
        .ok_or_else(|| PddlError::UnboundVariable {
            name: name.to_string(),
        })
}

fn expect_args<'s, 'a, const N: usize>(
    keyword: Span,
    args: &'s [Element<'a>],
) -> Result<&'s [Element<'a>; N]> {
    args.try_into().map_err(|_| {
        PddlError::syntax(
            keyword,
            format!(
                "`{}` expects {N} argument(s) but was given {}",
                keyword.fragment(),
                args.len()
            ),
        )
    })
}

fn require_mode(keyword: Span, mode: Mode, required: Mode) -> Result<()> {
    if mode == required {
        return Ok(());
    }
    let place = match required {
        Mode::Condition => "conditions",
        Mode::Effect => "effects",
    };
    Err(PddlError::syntax(
        keyword,
        format!("`{}` is only allowed in {place}", keyword.fragment()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_types::{
        Domain, DomainBuilder, FunctionDefinition, PredicateDefinition, ToTyped, Types,
    };

    fn symbols() -> DomainBuilder {
        let mut types = Types::typed();
        types.add_subtypes([Type::from("truck")], "vehicle".into());
        types.declare("place".into());
        Domain::builder("transport")
            .with_types(types)
            .with_predicates(vec![
                PredicateDefinition::new("at", vec!["vehicle".into(), "place".into()]),
                PredicateDefinition::new("road", vec!["place".into(), "place".into()]),
                PredicateDefinition::new("ready", vec![]),
            ])
            .with_functions(vec![
                FunctionDefinition::new("fuel", vec!["vehicle".into()]),
                FunctionDefinition::new("total-cost", vec![]),
            ])
    }

    fn scope() -> Scope {
        scope_of(&[
            "?t".to_typed("truck"),
            "?from".to_typed("place"),
            "?to".to_typed("place"),
        ])
    }

    fn parse(text: &str, mode: Mode) -> Result<Formula> {
        parse_formula(Span::new(text), &symbols(), &scope(), mode)
    }

    fn atom(name: &str, args: &[(&str, &str)]) -> Formula {
        Formula::Atom(Atom::new(
            name.into(),
            args.iter().map(|(n, t)| (*n).to_typed(*t)).collect(),
        ))
    }

    #[test]
    fn conjunction_of_atoms() {
        let formula = parse("(and (at ?t ?from) (road ?from ?to) (ready))", Mode::Condition).unwrap();
        assert_eq!(
            formula,
            Formula::new_and([
                atom("at", &[("?t", "truck"), ("?from", "place")]),
                atom("road", &[("?from", "place"), ("?to", "place")]),
                atom("ready", &[]),
            ])
        );
    }

    #[test]
    fn not_depends_on_mode() {
        assert!(parse("(not (ready))", Mode::Condition).unwrap().is_not());
        assert!(parse("(not (ready))", Mode::Effect).unwrap().is_anti());
    }

    #[test]
    fn quantifier_bindings_do_not_leak() {
        let formula = parse(
            "(and (forall (?p - place) (road ?from ?p)) (at ?t ?to))",
            Mode::Condition,
        )
        .unwrap();
        assert!(formula.conjuncts()[0].is_for_all());

        let leaked = parse(
            "(and (forall (?p - place) (road ?from ?p)) (road ?p ?to))",
            Mode::Condition,
        );
        assert!(matches!(leaked, Err(PddlError::UnboundVariable { name }) if name == "?p"));
    }

    #[test]
    fn quantifiers_may_not_rebind_names() {
        let result = parse("(exists (?to - place) (road ?from ?to))", Mode::Condition);
        assert!(matches!(result, Err(PddlError::VariableRedeclared { name }) if name == "?to"));
    }

    #[test]
    fn empty_binding_list_yields_the_body() {
        let formula = parse("(exists () (ready))", Mode::Condition).unwrap();
        assert_eq!(formula, atom("ready", &[]));
    }

    #[test]
    fn probabilistic_effects() {
        let formula = parse(
            "(probabilistic 0.8 (at ?t ?to) 0.2 (and))",
            Mode::Effect,
        )
        .unwrap();
        let Formula::Probabilistic(effect) = formula else {
            panic!("expected a probabilistic effect");
        };
        assert_eq!(effect.outcomes().len(), 2);
        assert!(parse("(probabilistic 0.5 (ready))", Mode::Condition).is_err());
        assert!(matches!(
            parse("(probabilistic 0.8 (ready) 0.7 (and))", Mode::Effect),
            Err(PddlError::Syntax { .. })
        ));
    }

    #[test]
    fn probabilities_must_lie_between_zero_and_one() {
        for probability in ["nan", "inf", "1.5", "-0.1"] {
            let text = format!("(probabilistic {probability} (ready))");
            assert!(
                matches!(parse(&text, Mode::Effect), Err(PddlError::Syntax { .. })),
                "{probability} was accepted"
            );
        }
        assert!(parse("(probabilistic 1 (ready))", Mode::Effect).is_ok());
    }

    #[test]
    fn timed_conditions_keep_their_qualifier() {
        let formula = parse(
            "(and (at start (at ?t ?from)) (over all (ready)))",
            Mode::Condition,
        )
        .unwrap();
        assert_eq!(
            formula.conjuncts()[0],
            Formula::new_timed(
                TimeSpecifier::AtStart,
                atom("at", &[("?t", "truck"), ("?from", "place")])
            )
        );
        assert!(matches!(
            formula.conjuncts()[1],
            Formula::Timed(TimeSpecifier::OverAll, _)
        ));
    }

    #[test]
    fn comparisons_and_equality() {
        let formula = parse("(>= (fuel ?t) (+ 1 (total-cost)))", Mode::Condition).unwrap();
        let Formula::Comparison(comparison) = formula else {
            panic!("expected a comparison");
        };
        assert_eq!(comparison.kind(), ComparisonKind::GreaterOrEqual);
        assert!(comparison.value().is_binary());

        let formula = parse("(not (= ?from ?to))", Mode::Condition).unwrap();
        assert_eq!(
            formula,
            Formula::new_not(Formula::Equality(
                "?from".to_typed("place"),
                "?to".to_typed("place")
            ))
        );
    }

    #[test]
    fn numeric_effects_need_effect_mode() {
        let formula = parse("(decrease (fuel ?t) 10)", Mode::Effect).unwrap();
        let Formula::Assign(assignment) = formula else {
            panic!("expected an assignment");
        };
        assert_eq!(assignment.op(), AssignOp::Decrease);
        assert_eq!(assignment.value().as_number(), Some(10.0));
        assert!(parse("(increase (fuel ?t) 1)", Mode::Condition).is_err());
    }

    #[test]
    fn plain_assignment() {
        let formula = parse("(assign (fuel ?t) (total-cost))", Mode::Effect).unwrap();
        let Formula::Assign(assignment) = formula else {
            panic!("expected an assignment");
        };
        assert_eq!(assignment.op(), AssignOp::Assign);
        assert_eq!(assignment.target().to_string(), "(fuel ?t)");
        assert_eq!(assignment.value().to_string(), "(total-cost)");
        assert!(parse("(assign (fuel ?t) 3)", Mode::Condition).is_err());
    }

    #[test]
    fn implications_are_conditions_only() {
        let formula = parse("(imply (ready) (at ?t ?to))", Mode::Condition).unwrap();
        assert_eq!(
            formula,
            Formula::new_imply(
                atom("ready", &[]),
                atom("at", &[("?t", "truck"), ("?to", "place")])
            )
        );
        assert!(parse("(imply (ready) (ready))", Mode::Effect).is_err());
    }

    #[test]
    fn conditional_effects_parse_their_condition_as_a_condition() {
        let formula = parse("(when (not (ready)) (not (ready)))", Mode::Effect).unwrap();
        assert_eq!(
            formula,
            Formula::new_when(
                Formula::new_not(atom("ready", &[])),
                Formula::new_anti(atom("ready", &[]))
            )
        );
    }

    #[test]
    fn different_is_built_in() {
        let formula = parse("(different ?from ?to)", Mode::Condition).unwrap();
        assert!(formula.is_different());
    }

    #[test]
    fn atoms_are_validated() {
        assert!(matches!(
            parse("(parked ?t)", Mode::Condition),
            Err(PddlError::UndefinedSymbol { kind: SymbolKind::Predicate, .. })
        ));
        assert!(matches!(
            parse("(at ?t)", Mode::Condition),
            Err(PddlError::ArityMismatch { expected: 2, found: 1, .. })
        ));
        assert!(matches!(
            parse("(at ?t ?nowhere)", Mode::Condition),
            Err(PddlError::UnboundVariable { .. })
        ));
        assert!(matches!(
            parse("(at ?from ?to)", Mode::Condition),
            Err(PddlError::TypeMismatch(_))
        ));
    }
}
