//! Provides predicate and function definitions, which act as arity- and
//! type-checked constructors for [`Atom`]s and [`FunctionTerm`]s.

use crate::error::{PddlError, Result};
use crate::parsed_types::{Atom, FunctionTerm, Name, PredicateName, Type, TypedEntity, Types};

/// The type name every declared type implicitly inherits from.
const OBJECT_TYPE_NAME: &str = "object";

/// Definition for a single predicate.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PredicateDefinition {
    predicate: PredicateName,
    parameter_types: Vec<Type>,
}

impl PredicateDefinition {
    pub fn new<P: Into<PredicateName>>(predicate: P, parameter_types: Vec<Type>) -> Self {
        Self {
            predicate: predicate.into(),
            parameter_types,
        }
    }

    pub fn name(&self) -> &Name {
        self.predicate.name()
    }

    pub const fn predicate(&self) -> &PredicateName {
        &self.predicate
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    pub fn parameter_types(&self) -> &[Type] {
        &self.parameter_types
    }

    /// Applies the predicate to `arguments`, producing an [`Atom`].
    ///
    /// ## Errors
    /// [`PddlError::ArityMismatch`] if the argument count differs from the
    /// arity, [`PddlError::TypeMismatch`] if an argument's type is not
    /// consistent with the declared parameter type.
    pub fn apply(&self, arguments: Vec<TypedEntity>, types: &Types) -> Result<Atom> {
        check_signature(self.name(), &self.parameter_types, &arguments, types)?;
        Ok(Atom::new(self.predicate, arguments))
    }
}

/// Definition for a single numeric function (fluent).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FunctionDefinition {
    name: Name,
    parameter_types: Vec<Type>,
}

impl FunctionDefinition {
    pub fn new<N: Into<Name>>(name: N, parameter_types: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            parameter_types,
        }
    }

    pub const fn name(&self) -> &Name {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    pub fn parameter_types(&self) -> &[Type] {
        &self.parameter_types
    }

    /// Applies the function to `arguments`, producing a [`FunctionTerm`].
    /// Fails like [`PredicateDefinition::apply`].
    pub fn apply(&self, arguments: Vec<TypedEntity>, types: &Types) -> Result<FunctionTerm> {
        check_signature(&self.name, &self.parameter_types, &arguments, types)?;
        Ok(FunctionTerm::new(self.name, arguments))
    }
}

fn check_signature(
    name: &Name,
    parameter_types: &[Type],
    arguments: &[TypedEntity],
    types: &Types,
) -> Result<()> {
    if parameter_types.len() != arguments.len() {
        return Err(PddlError::ArityMismatch {
            name: name.to_string(),
            expected: parameter_types.len(),
            found: arguments.len(),
        });
    }

    for (expected, argument) in parameter_types.iter().zip(arguments) {
        if !is_consistent(argument.type_(), expected, types) {
            return Err(PddlError::TypeMismatch(format!(
                "argument `{}` of `{}` has type `{}` but `{}` was expected",
                argument.name(),
                name,
                argument.type_(),
                expected
            )));
        }
    }

    Ok(())
}

fn is_consistent(actual: &Type, expected: &Type, types: &Types) -> bool {
    if types.is_subtype_of(actual, expected) {
        return true;
    }
    // Every declared type is an `object`, even if the hierarchy says nothing.
    expected.name() == OBJECT_TYPE_NAME && types.uses_typing() && !actual.is_implicit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_types::ToTyped;

    fn transport_types() -> Types {
        let mut types = Types::typed();
        types.add_subtypes([Type::from("train")], "agent".into());
        types.declare("location".into());
        types
    }

    fn at() -> PredicateDefinition {
        PredicateDefinition::new("at", vec!["agent".into(), "location".into()])
    }

    #[test]
    fn apply_accepts_subtypes() {
        let types = transport_types();
        let atom = at()
            .apply(
                vec!["train1".to_typed("train"), "a".to_typed("location")],
                &types,
            )
            .unwrap();
        assert_eq!(atom.predicate().name().as_str(), "at");
        assert!(atom.is_ground());
    }

    #[test]
    fn apply_rejects_wrong_arity() {
        let types = transport_types();
        let result = at().apply(vec!["?x".to_typed("agent")], &types);
        assert!(matches!(
            result,
            Err(PddlError::ArityMismatch {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn apply_rejects_untyped_objects_in_typed_domains() {
        let types = transport_types();
        let result = at().apply(
            vec!["train1".to_typed(Type::implicit()), "a".to_typed("location")],
            &types,
        );
        assert!(matches!(result, Err(PddlError::TypeMismatch(_))));
    }

    #[test]
    fn object_parameters_accept_any_declared_type() {
        let types = transport_types();
        let holds = PredicateDefinition::new("holds", vec!["object".into()]);
        assert!(holds.apply(vec!["a".to_typed("location")], &types).is_ok());
    }

    #[test]
    fn functions_are_checked_the_same_way() {
        let types = transport_types();
        let fuel = FunctionDefinition::new("fuel", vec!["agent".into()]);
        let term = fuel.apply(vec!["?t".to_typed("train")], &types).unwrap();
        assert_eq!(term.function().as_str(), "fuel");
        assert!(fuel.apply(vec![], &types).is_err());
    }
}
