//! Resolves planner output against a parsed domain and problem.
//!
//! A [`Grounder`] maps each [`PlanStep`](crate::PlanStep) either to the
//! ground atom of its action predicate or to a fully instantiated
//! [`GroundAction`].

mod ground_action;
mod grounder;

pub use ground_action::GroundAction;
pub use grounder::Grounder;
