//! Renders atoms, numeric expressions and formulas as PDDL.

use crate::parsed_types::{
    Assignment, Atom, Comparison, Fact, Formula, FunctionTerm, NumericExpr, ProbabilisticEffect,
    TypedEntity,
};
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// Writes `(head arg1 arg2 ...)`, or `(head)` without arguments.
fn write_application(f: &mut Formatter<'_>, head: &str, arguments: &[TypedEntity]) -> fmt::Result {
    if arguments.is_empty() {
        write!(f, "({head})")
    } else {
        write!(
            f,
            "({head} {})",
            arguments.iter().map(TypedEntity::name).join(" ")
        )
    }
}

/// Renders entities as a typed list, e.g. `?x - truck ?y - place`.
pub(crate) fn typed_list(entities: &[TypedEntity]) -> String {
    entities.iter().map(TypedEntity::to_typed_string).join(" ")
}

impl Display for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_application(f, self.predicate().name().as_str(), self.arguments())
    }
}

impl Display for FunctionTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write_application(f, self.function().as_str(), self.arguments())
    }
}

impl Display for NumericExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NumericExpr::Number(value) => write!(f, "{value}"),
            NumericExpr::Function(term) => write!(f, "{term}"),
            NumericExpr::Binary(op, lhs, rhs) => write!(f, "({op} {lhs} {rhs})"),
        }
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.kind(), self.term(), self.value())
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.op(), self.target(), self.value())
    }
}

impl Display for ProbabilisticEffect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(probabilistic {})",
            self.outcomes()
                .iter()
                .map(|(p, outcome)| format!("{p} {outcome}"))
                .join(" ")
        )
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Atom(atom) => write!(f, "{atom}"),
            Formula::Not(inner) | Formula::Anti(inner) => write!(f, "(not {inner})"),
            Formula::And(terms) => write!(f, "(and {})", terms.iter().join(" ")),
            Formula::Or(terms) => write!(f, "(or {})", terms.iter().join(" ")),
            Formula::Imply(a, b) => write!(f, "(imply {a} {b})"),
            Formula::ForAll(variables, body) => {
                write!(f, "(forall ({}) {body})", typed_list(variables))
            }
            Formula::Exists(variables, body) => {
                write!(f, "(exists ({}) {body})", typed_list(variables))
            }
            Formula::When(condition, effect) => write!(f, "(when {condition} {effect})"),
            Formula::Assign(assignment) => write!(f, "{assignment}"),
            Formula::Probabilistic(effect) => write!(f, "{effect}"),
            Formula::Comparison(comparison) => write!(f, "{comparison}"),
            Formula::Equality(a, b) => write!(f, "(= {} {})", a.name(), b.name()),
            Formula::Different(a, b) => write!(f, "(Different {} {})", a.name(), b.name()),
            Formula::Timed(time, body) => write!(f, "({time} {body})"),
        }
    }
}

impl Display for Fact {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Fact::Atom(atom) => write!(f, "{atom}"),
            Fact::Fluent(term, value) => write!(f, "(= {term} {value})"),
        }
    }
}
