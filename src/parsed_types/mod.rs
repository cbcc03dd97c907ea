//! Contains the in-memory representation of parsed PDDL.

mod action_name;
mod atom;
mod domain;
mod formula;
mod name;
mod numeric;
mod operator;
mod plan;
mod plan_step;
mod predicate_definition;
mod predicate_name;
mod problem;
mod symbol_table;
mod r#type;
mod typed_entity;
mod types;

pub use action_name::ActionName;
pub use atom::{Atom, Bindings, FunctionTerm};
pub use domain::{Domain, DomainBuilder};
pub use formula::{Formula, ProbabilisticEffect, TimeSpecifier};
pub use name::Name;
pub use numeric::{
    ArithmeticOp, AssignOp, Assignment, Comparison, ComparisonKind, NumericExpr,
};
pub use operator::{Duration, Operator};
pub use plan::Plan;
pub use plan_step::PlanStep;
pub use predicate_definition::{FunctionDefinition, PredicateDefinition};
pub use predicate_name::PredicateName;
pub use problem::{Fact, Problem};
pub use r#type::{Type, DEFAULT_TYPE_NAME};
pub use symbol_table::SymbolTable;
pub use typed_entity::{ToTyped, TypedEntity};
pub use types::Types;
