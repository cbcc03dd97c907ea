//! Contains atoms via the [`Atom`] type and function applications via the
//! [`FunctionTerm`] type.

use crate::parsed_types::{Name, PredicateName, TypedEntity};
use std::collections::BTreeMap;
use std::ops::Deref;

/// Variable name -> the entity substituted for it.
pub type Bindings = BTreeMap<Name, TypedEntity>;

/// A predicate applied to an ordered list of arguments.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Atom {
    predicate: PredicateName,
    arguments: Vec<TypedEntity>,
}

impl Atom {
    pub const fn new(predicate: PredicateName, arguments: Vec<TypedEntity>) -> Self {
        Self {
            predicate,
            arguments,
        }
    }

    pub const fn predicate(&self) -> &PredicateName {
        &self.predicate
    }

    pub fn arguments(&self) -> &[TypedEntity] {
        &self.arguments
    }

    /// An atom is ground when none of its arguments is a variable.
    pub fn is_ground(&self) -> bool {
        self.arguments.iter().all(|arg| !arg.is_variable())
    }

    pub fn variables(&self) -> impl Iterator<Item = &TypedEntity> {
        self.arguments.iter().filter(|arg| arg.is_variable())
    }

    pub fn substitute(&self, bindings: &Bindings) -> Self {
        Self {
            predicate: self.predicate,
            arguments: substitute_all(&self.arguments, bindings),
        }
    }
}

impl Deref for Atom {
    type Target = [TypedEntity];

    fn deref(&self) -> &Self::Target {
        self.arguments()
    }
}

/// A numeric function applied to an ordered list of arguments.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct FunctionTerm {
    function: Name,
    arguments: Vec<TypedEntity>,
}

impl FunctionTerm {
    pub const fn new(function: Name, arguments: Vec<TypedEntity>) -> Self {
        Self {
            function,
            arguments,
        }
    }

    pub const fn function(&self) -> &Name {
        &self.function
    }

    pub fn arguments(&self) -> &[TypedEntity] {
        &self.arguments
    }

    pub fn is_ground(&self) -> bool {
        self.arguments.iter().all(|arg| !arg.is_variable())
    }

    pub fn variables(&self) -> impl Iterator<Item = &TypedEntity> {
        self.arguments.iter().filter(|arg| arg.is_variable())
    }

    pub fn substitute(&self, bindings: &Bindings) -> Self {
        Self {
            function: self.function,
            arguments: substitute_all(&self.arguments, bindings),
        }
    }
}

fn substitute_all(entities: &[TypedEntity], bindings: &Bindings) -> Vec<TypedEntity> {
    entities
        .iter()
        .map(|entity| bindings.get(entity.name()).copied().unwrap_or(*entity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_types::ToTyped;

    #[test]
    fn substitute_replaces_bound_variables_only() {
        let atom = Atom::new(
            "at".into(),
            vec!["?a".to_typed("agent"), "depot".to_typed("location")],
        );
        assert!(!atom.is_ground());

        let bindings = Bindings::from([(Name::from("?a"), "train1".to_typed("agent"))]);
        let ground = atom.substitute(&bindings);
        assert!(ground.is_ground());
        assert_eq!(ground[0].name(), &Name::from("train1"));
        assert_eq!(ground[1].name(), &Name::from("depot"));
    }
}
