//! Contains the literal tree via the [`Formula`] type.

use crate::parsed_types::{Assignment, Atom, Bindings, Comparison, Name, TypedEntity};
use ordered_float::OrderedFloat;
use std::collections::BTreeSet;
use strum_macros::{Display, EnumIs};

/// The time qualifier of a durative-action condition or effect.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display)]
pub enum TimeSpecifier {
    #[strum(serialize = "at start")]
    AtStart,
    #[strum(serialize = "at end")]
    AtEnd,
    #[strum(serialize = "over all")]
    OverAll,
}

/// A node of the literal tree used for preconditions, effects and goals.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, EnumIs)]
pub enum Formula {
    Atom(Atom),
    /// Open-world negation: the formula must not hold.
    Not(Box<Formula>),
    /// Closed-world negation in effects: delete on execution.
    Anti(Box<Formula>),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Imply(Box<Formula>, Box<Formula>),
    ForAll(Vec<TypedEntity>, Box<Formula>),
    Exists(Vec<TypedEntity>, Box<Formula>),
    /// Conditional effect `(when <condition> <effect>)`.
    When(Box<Formula>, Box<Formula>),
    Assign(Assignment),
    Probabilistic(ProbabilisticEffect),
    Comparison(Comparison),
    /// Object equality `(= ?a ?b)`.
    Equality(TypedEntity, TypedEntity),
    /// Built-in disequality guard emitted by the negation-as-failure
    /// expansion, rendered as `(Different ?a ?b)`.
    Different(TypedEntity, TypedEntity),
    Timed(TimeSpecifier, Box<Formula>),
}

impl Formula {
    #[inline(always)]
    pub fn new_and<T: IntoIterator<Item = Formula>>(values: T) -> Self {
        Self::And(values.into_iter().collect())
    }

    #[inline(always)]
    pub fn new_or<T: IntoIterator<Item = Formula>>(values: T) -> Self {
        Self::Or(values.into_iter().collect())
    }

    #[inline(always)]
    pub fn new_not(value: Formula) -> Self {
        Self::Not(Box::new(value))
    }

    #[inline(always)]
    pub fn new_anti(value: Formula) -> Self {
        Self::Anti(Box::new(value))
    }

    #[inline(always)]
    pub fn new_imply(a: Formula, b: Formula) -> Self {
        Self::Imply(Box::new(a), Box::new(b))
    }

    #[inline(always)]
    pub fn new_forall(variables: Vec<TypedEntity>, body: Formula) -> Self {
        Self::ForAll(variables, Box::new(body))
    }

    #[inline(always)]
    pub fn new_exists(variables: Vec<TypedEntity>, body: Formula) -> Self {
        Self::Exists(variables, Box::new(body))
    }

    #[inline(always)]
    pub fn new_when(condition: Formula, effect: Formula) -> Self {
        Self::When(Box::new(condition), Box::new(effect))
    }

    #[inline(always)]
    pub fn new_timed(time: TimeSpecifier, body: Formula) -> Self {
        Self::Timed(time, Box::new(body))
    }

    /// The empty conjunction, i.e. "true" as a condition and "no change" as
    /// an effect.
    pub fn empty() -> Self {
        Self::And(vec![])
    }

    /// The top-level terms of a conjunction, or the formula itself otherwise.
    pub fn conjuncts(&self) -> &[Formula] {
        match self {
            Formula::And(terms) => terms,
            _ => std::slice::from_ref(self),
        }
    }

    /// Returns the variables that occur free in this formula.
    pub fn free_variables(&self) -> BTreeSet<TypedEntity> {
        let mut found = Vec::new();
        self.collect_free_variables(&BTreeSet::new(), &mut found);
        found.into_iter().collect()
    }

    fn collect_free_variables(&self, bound: &BTreeSet<Name>, into: &mut Vec<TypedEntity>) {
        let free = |entity: &&TypedEntity| entity.is_variable() && !bound.contains(entity.name());
        match self {
            Formula::Atom(atom) => into.extend(atom.iter().filter(free)),
            Formula::Equality(a, b) | Formula::Different(a, b) => {
                into.extend([a, b].into_iter().filter(free))
            }
            Formula::Comparison(comparison) => {
                let mut variables = comparison.term().variables().copied().collect();
                comparison.value().collect_variables(&mut variables);
                into.extend(variables.iter().filter(free));
            }
            Formula::Assign(assignment) => {
                let mut variables = assignment.target().variables().copied().collect();
                assignment.value().collect_variables(&mut variables);
                into.extend(variables.iter().filter(free));
            }
            Formula::Not(inner) | Formula::Anti(inner) | Formula::Timed(_, inner) => {
                inner.collect_free_variables(bound, into)
            }
            Formula::And(terms) | Formula::Or(terms) => terms
                .iter()
                .for_each(|term| term.collect_free_variables(bound, into)),
            Formula::Imply(a, b) | Formula::When(a, b) => {
                a.collect_free_variables(bound, into);
                b.collect_free_variables(bound, into);
            }
            Formula::ForAll(variables, body) | Formula::Exists(variables, body) => {
                let mut bound = bound.clone();
                bound.extend(variables.iter().map(|v| *v.name()));
                body.collect_free_variables(&bound, into);
            }
            Formula::Probabilistic(effect) => effect
                .outcomes()
                .iter()
                .for_each(|(_, outcome)| outcome.collect_free_variables(bound, into)),
        }
    }

    /// Replaces free variables according to `bindings`. Variables bound by an
    /// inner quantifier shadow the outer binding.
    pub fn substitute(&self, bindings: &Bindings) -> Self {
        match self {
            Formula::Atom(atom) => Formula::Atom(atom.substitute(bindings)),
            Formula::Not(inner) => Formula::new_not(inner.substitute(bindings)),
            Formula::Anti(inner) => Formula::new_anti(inner.substitute(bindings)),
            Formula::And(terms) => Formula::new_and(terms.iter().map(|t| t.substitute(bindings))),
            Formula::Or(terms) => Formula::new_or(terms.iter().map(|t| t.substitute(bindings))),
            Formula::Imply(a, b) => Formula::new_imply(a.substitute(bindings), b.substitute(bindings)),
            Formula::ForAll(variables, body) => {
                Formula::new_forall(variables.clone(), body.substitute(&shadow(bindings, variables)))
            }
            Formula::Exists(variables, body) => {
                Formula::new_exists(variables.clone(), body.substitute(&shadow(bindings, variables)))
            }
            Formula::When(condition, effect) => {
                Formula::new_when(condition.substitute(bindings), effect.substitute(bindings))
            }
            Formula::Assign(assignment) => Formula::Assign(assignment.substitute(bindings)),
            Formula::Probabilistic(effect) => Formula::Probabilistic(ProbabilisticEffect::new(
                effect
                    .outcomes()
                    .iter()
                    .map(|(p, outcome)| (p.into_inner(), outcome.substitute(bindings))),
            )),
            Formula::Comparison(comparison) => Formula::Comparison(comparison.substitute(bindings)),
            Formula::Equality(a, b) => Formula::Equality(bind(a, bindings), bind(b, bindings)),
            Formula::Different(a, b) => Formula::Different(bind(a, bindings), bind(b, bindings)),
            Formula::Timed(time, body) => Formula::new_timed(*time, body.substitute(bindings)),
        }
    }

    /// Whether any node of this formula is a probabilistic effect.
    pub fn contains_probabilistic(&self) -> bool {
        match self {
            Formula::Probabilistic(_) => true,
            Formula::Not(inner) | Formula::Anti(inner) | Formula::Timed(_, inner) => {
                inner.contains_probabilistic()
            }
            Formula::And(terms) | Formula::Or(terms) => {
                terms.iter().any(Formula::contains_probabilistic)
            }
            Formula::Imply(a, b) | Formula::When(a, b) => {
                a.contains_probabilistic() || b.contains_probabilistic()
            }
            Formula::ForAll(_, body) | Formula::Exists(_, body) => body.contains_probabilistic(),
            Formula::Atom(_)
            | Formula::Assign(_)
            | Formula::Comparison(_)
            | Formula::Equality(_, _)
            | Formula::Different(_, _) => false,
        }
    }

    /// Returns the atoms that appear as top-level conjuncts.
    pub fn top_level_atoms(&self) -> impl Iterator<Item = &Atom> {
        self.conjuncts().iter().filter_map(|term| match term {
            Formula::Atom(atom) => Some(atom),
            _ => None,
        })
    }
}

impl From<Atom> for Formula {
    fn from(value: Atom) -> Self {
        Formula::Atom(value)
    }
}

fn bind(entity: &TypedEntity, bindings: &Bindings) -> TypedEntity {
    bindings.get(entity.name()).copied().unwrap_or(*entity)
}

fn shadow(bindings: &Bindings, variables: &[TypedEntity]) -> Bindings {
    let mut inner = bindings.clone();
    for variable in variables {
        inner.remove(variable.name());
    }
    inner
}

/// A probabilistic effect: weighted alternative outcomes. The probability
/// mass not assigned to any outcome is the implicit "no change" outcome.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ProbabilisticEffect {
    outcomes: Vec<(OrderedFloat<f64>, Formula)>,
}

impl ProbabilisticEffect {
    pub fn new<I: IntoIterator<Item = (f64, Formula)>>(outcomes: I) -> Self {
        Self {
            outcomes: outcomes
                .into_iter()
                .map(|(p, outcome)| (OrderedFloat(p), outcome))
                .collect(),
        }
    }

    pub fn outcomes(&self) -> &[(OrderedFloat<f64>, Formula)] {
        &self.outcomes
    }

    pub fn total_probability(&self) -> f64 {
        self.outcomes.iter().map(|(p, _)| p.into_inner()).sum()
    }

    /// Probability of the implicit "no change" outcome.
    pub fn no_change_probability(&self) -> f64 {
        (1.0 - self.total_probability()).max(0.0)
    }

    /// Returns the most likely outcome, or `None` when "no change" is
    /// strictly more likely than every listed outcome. Among equally likely
    /// outcomes the first listed wins.
    pub fn most_likely(&self) -> Option<&Formula> {
        let mut best: Option<&(OrderedFloat<f64>, Formula)> = None;
        for outcome in &self.outcomes {
            if best.map_or(true, |(p, _)| outcome.0 > *p) {
                best = Some(outcome);
            }
        }
        match best {
            Some((p, outcome)) if p.into_inner() >= self.no_change_probability() => Some(outcome),
            _ => None,
        }
    }
}
