//! Renders parsed domains and problems back to PDDL text.
//!
//! Formulas, atoms and facts implement [`Display`](std::fmt::Display);
//! domains and problems can additionally be written to a file.

mod domain;
mod formula;
mod negation;
mod problem;

pub use negation::expand_negations;
