//! Contains operator (action schema) definitions via the [`Operator`] type.

use crate::parsed_types::{ActionName, ComparisonKind, Formula, NumericExpr, TypedEntity};

/// The duration constraint of a durative action, e.g. `(= ?duration 5)`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Duration {
    kind: ComparisonKind,
    value: NumericExpr,
}

impl Duration {
    pub const fn new(kind: ComparisonKind, value: NumericExpr) -> Self {
        Self { kind, value }
    }

    pub const fn kind(&self) -> ComparisonKind {
        self.kind
    }

    pub const fn value(&self) -> &NumericExpr {
        &self.value
    }
}

/// An operator: a parameterized action schema.
///
/// When [`Operator::duration`] is present the operator is a durative action
/// and [`Operator::precondition`] holds its `:condition` tree.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Operator {
    name: ActionName,
    parameters: Vec<TypedEntity>,
    precondition: Formula,
    effect: Formula,
    duration: Option<Duration>,
}

impl Operator {
    pub const fn new(
        name: ActionName,
        parameters: Vec<TypedEntity>,
        precondition: Formula,
        effect: Formula,
    ) -> Self {
        Self {
            name,
            parameters,
            precondition,
            effect,
            duration: None,
        }
    }

    /// Turns the operator into a durative action.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub const fn name(&self) -> &ActionName {
        &self.name
    }

    pub fn parameters(&self) -> &[TypedEntity] {
        &self.parameters
    }

    pub const fn precondition(&self) -> &Formula {
        &self.precondition
    }

    pub const fn effect(&self) -> &Formula {
        &self.effect
    }

    pub const fn duration(&self) -> Option<&Duration> {
        self.duration.as_ref()
    }

    pub const fn is_durative(&self) -> bool {
        self.duration.is_some()
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Returns a copy of this operator with its effect replaced.
    pub fn with_effect(&self, effect: Formula) -> Self {
        Self {
            effect,
            ..self.clone()
        }
    }
}

impl AsRef<ActionName> for Operator {
    fn as_ref(&self) -> &ActionName {
        &self.name
    }
}
