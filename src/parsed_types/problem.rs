//! Contains the [`Problem`] type and initial-state [`Fact`]s.

use crate::parsed_types::{Atom, Formula, FunctionTerm, Name, TypedEntity};
use ordered_float::OrderedFloat;
use std::collections::BTreeSet;
use strum_macros::EnumIs;

/// A single entry of the initial state.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, EnumIs)]
pub enum Fact {
    /// A ground atom that holds initially.
    Atom(Atom),
    /// A numeric fluent value, e.g. `(= (fuel truck1) 10)`.
    Fluent(FunctionTerm, OrderedFloat<f64>),
}

impl Fact {
    pub fn fluent(term: FunctionTerm, value: f64) -> Self {
        Self::Fluent(term, OrderedFloat(value))
    }

    /// The predicate or function name of the fact.
    pub fn head(&self) -> &Name {
        match self {
            Fact::Atom(atom) => atom.predicate().name(),
            Fact::Fluent(term, _) => term.function(),
        }
    }
}

impl From<Atom> for Fact {
    fn from(value: Atom) -> Self {
        Fact::Atom(value)
    }
}

/// A domain-specific problem declaration.
///
/// ## Usages
/// This is the top-level type of a problem description within a
/// [`Domain`](crate::Domain).
///
/// ## Example
/// ```
/// # use pddl_ground::{Domain, ParserConfig, Problem};
/// let domain = Domain::from_str(r#"(define (domain briefcase-world)
///         (:predicates (place ?x) (at ?x ?y) (in ?x)))"#,
///     &ParserConfig::default(),
/// ).unwrap();
///
/// let problem = Problem::from_str(r#"(define (problem get-paid)
///         (:domain briefcase-world)
///         (:objects home office p d b)
///         (:init (place home) (place office)
///                (at b home) (at p home) (at d home) (in p))
///         (:goal (and (at b office) (at d office) (at p home)))
///     )"#,
///     &domain,
/// ).unwrap();
///
/// assert_eq!(problem.name().as_str(), "get-paid");
/// assert_eq!(problem.domain_name().as_str(), "briefcase-world");
/// assert_eq!(problem.objects().len(), 5);
/// assert_eq!(problem.initial_state().len(), 6);
/// assert_eq!(problem.goal().conjuncts().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    // The problem name.
    name: Name,
    /// The name of the [`Domain`](crate::Domain) this problem belongs to.
    domain_name: Name,
    /// The declared objects, deduplicated and ordered by name.
    objects: BTreeSet<TypedEntity>,
    /// The initial state definition.
    initial_state: BTreeSet<Fact>,
    /// The goal definition.
    goal: Formula,
}

impl Problem {
    /// Creates a new [`Problem`] instance.
    pub const fn new(
        name: Name,
        domain_name: Name,
        objects: BTreeSet<TypedEntity>,
        initial_state: BTreeSet<Fact>,
        goal: Formula,
    ) -> Self {
        Self {
            name,
            domain_name,
            objects,
            initial_state,
            goal,
        }
    }

    /// Returns the problem name.
    pub const fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the domain name.
    pub const fn domain_name(&self) -> &Name {
        &self.domain_name
    }

    pub const fn objects(&self) -> &BTreeSet<TypedEntity> {
        &self.objects
    }

    pub const fn initial_state(&self) -> &BTreeSet<Fact> {
        &self.initial_state
    }

    /// Returns the goal statement of the problem.
    pub const fn goal(&self) -> &Formula {
        &self.goal
    }

    /// Returns every object named `name`.
    pub fn objects_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TypedEntity> {
        self.objects
            .iter()
            .filter(move |object| object.name().as_str() == name)
    }

    pub fn set_objects(&mut self, objects: BTreeSet<TypedEntity>) {
        self.objects = objects;
    }

    pub fn set_initial_state(&mut self, initial_state: BTreeSet<Fact>) {
        self.initial_state = initial_state;
    }

    pub fn set_goal(&mut self, goal: Formula) {
        self.goal = goal;
    }
}
