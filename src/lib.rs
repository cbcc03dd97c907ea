//! Parsing, serialization, determinization and plan grounding for PDDL
//! domains and problems.
//!
//! ## Example
//! ```
//! # use pddl_ground::{Domain, Grounder, ParserConfig, PlanStep, Problem};
//! let config = ParserConfig::default().with_operators_as_actions(true);
//! let domain = Domain::from_str(r#"
//!     (define (domain doors)
//!         (:requirements :typing)
//!         (:types door)
//!         (:predicates (open ?d - door))
//!         (:action push
//!             :parameters (?d - door)
//!             :precondition (and (not (open ?d)))
//!             :effect (open ?d)))"#, &config).unwrap();
//! let problem = Problem::from_str(r#"
//!     (define (problem front) (:domain doors)
//!         (:objects front-door - door)
//!         (:init)
//!         (:goal (open front-door)))"#, &domain).unwrap();
//!
//! let step = PlanStep::from_line("0: (push front-door)").unwrap();
//! let atom = Grounder::new(&domain, &problem).ground_step(&step).unwrap();
//! assert_eq!(atom.to_string(), "(push front-door)");
//! ```

#![warn(missing_debug_implementations)]
#![deny(non_ascii_idents)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unit_bindings)]
#![warn(unused_crate_dependencies)]
#![warn(unused_qualifications)]

// Crate dependencies used in binary but not in library. Unfortunately cargo
// does not yet allow specifying dependencies for binaries only.
use tracing_subscriber as _;

mod config;
mod determinize;
mod error;
pub mod grounding;
pub mod parsed_types;
pub mod parsers;
mod verbosity;
pub mod writers;

pub use config::{ParserConfig, ProblemLayout};
pub use error::{PddlError, Result, SymbolKind};
pub use grounding::{GroundAction, Grounder};
pub use parsed_types::*;
pub use verbosity::Verbosity;

#[cfg(test)]
mod test_utils;
