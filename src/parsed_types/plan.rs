//! Contains definitions for a plan via the [`Plan`] type.

use crate::parsed_types::PlanStep;

#[derive(Debug, Clone, PartialEq)]
pub struct Plan(Vec<PlanStep>);

impl Plan {
    pub const fn new(steps: Vec<PlanStep>) -> Self {
        Self(steps)
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Plan {
    type Item = PlanStep;
    type IntoIter = std::vec::IntoIter<PlanStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
