//! Provides the read-only [`SymbolTable`] view the formula parser resolves
//! names against.

use crate::parsed_types::{FunctionDefinition, PredicateDefinition, TypedEntity, Types};

/// Name resolution for predicates, functions, types and constants.
///
/// Implemented by [`DomainBuilder`](crate::DomainBuilder) while a domain is
/// still being parsed and by [`Domain`](crate::Domain) once it is complete.
pub trait SymbolTable {
    fn types(&self) -> &Types;

    fn predicate(&self, name: &str) -> Option<&PredicateDefinition>;

    fn function(&self, name: &str) -> Option<&FunctionDefinition>;

    fn constants(&self) -> &[TypedEntity];
}
