use crate::parsed_types::{ActionName, Formula, TypedEntity};
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};

/// An operator with every parameter replaced by a concrete object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroundAction {
    name: ActionName,
    arguments: Vec<TypedEntity>,
    precondition: Formula,
    effect: Formula,
}

impl GroundAction {
    pub const fn new(
        name: ActionName,
        arguments: Vec<TypedEntity>,
        precondition: Formula,
        effect: Formula,
    ) -> Self {
        Self {
            name,
            arguments,
            precondition,
            effect,
        }
    }

    pub const fn name(&self) -> &ActionName {
        &self.name
    }

    pub fn arguments(&self) -> &[TypedEntity] {
        &self.arguments
    }

    pub const fn precondition(&self) -> &Formula {
        &self.precondition
    }

    pub const fn effect(&self) -> &Formula {
        &self.effect
    }
}

impl Display for GroundAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.arguments.is_empty() {
            write!(f, "({})", self.name)
        } else {
            write!(
                f,
                "({} {})",
                self.name,
                self.arguments.iter().map(TypedEntity::name).join(" ")
            )
        }
    }
}
