use crate::error::{PddlError, Result};
use crate::grounding::GroundAction;
use crate::parsed_types::{Atom, Bindings, Domain, Operator, Plan, PlanStep, Problem, TypedEntity};
use std::collections::BTreeSet;
use tracing::debug;

/// Grounds plan steps against a domain and the objects of one of its
/// problems.
///
/// ## Example
/// ```
/// # use pddl_ground::{Domain, Grounder, ParserConfig, PlanStep, Problem};
/// let domain = Domain::from_str(r#"
///     (define (domain lights)
///         (:predicates (on ?l) (switch ?l))
///         (:actions switch)
///         (:action toggle
///             :parameters (?l)
///             :precondition (and (switch ?l))
///             :effect (on ?l)))"#, &ParserConfig::default()).unwrap();
/// let problem = Problem::from_str(r#"
///     (define (problem one) (:domain lights)
///         (:objects lamp)
///         (:init)
///         (:goal (on lamp)))"#, &domain).unwrap();
///
/// let grounder = Grounder::new(&domain, &problem);
/// let step = PlanStep::from_line("(toggle lamp)").unwrap();
/// assert_eq!(grounder.ground_step(&step).unwrap().to_string(), "(switch lamp)");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Grounder<'a> {
    domain: &'a Domain,
    problem: &'a Problem,
}

impl<'a> Grounder<'a> {
    pub const fn new(domain: &'a Domain, problem: &'a Problem) -> Self {
        Self { domain, problem }
    }

    /// Resolves `step` to the ground atom of its action predicate.
    ///
    /// When operators double as actions, the action predicate of the same
    /// name is applied to the step's objects. Otherwise the step is bound to
    /// its operator and the first top-level precondition atom over an action
    /// predicate is grounded.
    ///
    /// ## Errors
    /// - [`PddlError::UnresolvedPlanStep`] if no operator or action predicate
    ///   matches, or the operator has no action predicate precondition.
    /// - [`PddlError::ArityMismatch`] if the step has the wrong number of
    ///   objects.
    /// - [`PddlError::AmbiguousObjectName`] if an object name matches zero
    ///   or several objects.
    pub fn ground_step(&self, step: &PlanStep) -> Result<Atom> {
        let atom = if self.domain.operators_as_actions() {
            self.apply_action_predicate(step)?
        } else {
            let (operator, bindings) = self.bind(step)?;
            operator
                .precondition()
                .top_level_atoms()
                .find(|atom| self.domain.is_action_predicate(atom.predicate().name()))
                .map(|atom| atom.substitute(&bindings))
                .ok_or_else(|| {
                    PddlError::UnresolvedPlanStep(format!(
                        "operator `{}` has no action predicate in its precondition",
                        operator.name()
                    ))
                })?
        };
        debug!(step = %step.name(), %atom, "grounded plan step");
        Ok(atom)
    }

    /// Grounds every step of `plan` in order, stopping at the first failure.
    pub fn ground_plan(&self, plan: &Plan) -> Result<Vec<Atom>> {
        plan.steps()
            .iter()
            .map(|step| self.ground_step(step))
            .collect()
    }

    /// Binds `step` to its operator and substitutes the objects into the
    /// operator's precondition and effect.
    pub fn instantiate(&self, step: &PlanStep) -> Result<GroundAction> {
        let (operator, bindings) = self.bind(step)?;
        let arguments = operator
            .parameters()
            .iter()
            .filter_map(|parameter| bindings.get(parameter.name()).copied())
            .collect();
        Ok(GroundAction::new(
            *operator.name(),
            arguments,
            operator.precondition().substitute(&bindings),
            operator.effect().substitute(&bindings),
        ))
    }

    fn apply_action_predicate(&self, step: &PlanStep) -> Result<Atom> {
        let definition = self
            .domain
            .predicates()
            .iter()
            .find(|p| {
                p.name().as_str() == step.name().name().as_str()
                    && self.domain.is_action_predicate(p.name())
            })
            .ok_or_else(|| unresolved(step))?;
        let objects = self.resolve_objects(step)?;
        definition.apply(objects, self.domain.types())
    }

    fn bind(&self, step: &PlanStep) -> Result<(&'a Operator, Bindings)> {
        let operator = self
            .domain
            .operator(step.name().name())
            .ok_or_else(|| unresolved(step))?;
        if operator.arity() != step.parameters().len() {
            return Err(PddlError::ArityMismatch {
                name: operator.name().to_string(),
                expected: operator.arity(),
                found: step.parameters().len(),
            });
        }

        let objects = self.resolve_objects(step)?;
        let bindings = operator
            .parameters()
            .iter()
            .map(|parameter| *parameter.name())
            .zip(objects)
            .collect();
        Ok((operator, bindings))
    }

    /// Looks up every object named by `step` among the problem objects and
    /// the domain constants.
    fn resolve_objects(&self, step: &PlanStep) -> Result<Vec<TypedEntity>> {
        step.parameters()
            .iter()
            .map(|name| {
                let matches: BTreeSet<TypedEntity> = self
                    .problem
                    .objects_named(name)
                    .chain(self.domain.constants().iter().filter(|c| c.name() == name))
                    .copied()
                    .collect();
                match matches.iter().collect::<Vec<_>>().as_slice() {
                    [object] => Ok(**object),
                    found => Err(PddlError::AmbiguousObjectName {
                        name: name.to_string(),
                        matches: found.len(),
                    }),
                }
            })
            .collect()
    }
}

fn unresolved(step: &PlanStep) -> PddlError {
    PddlError::UnresolvedPlanStep(format!("no operator or action named `{}`", step.name()))
}
