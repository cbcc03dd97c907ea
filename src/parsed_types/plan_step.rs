//! Contains definitions for a single step of a plan via the [`PlanStep`] type.

use super::{ActionName, Name};
use ordered_float::OrderedFloat;

/// A plan step as printed by a planner, e.g. `0: (move a b) [D:1.00; C:1.00]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanStep {
    name: ActionName,
    parameters: Vec<Name>,
    /// The `<time>:` prefix, if any.
    time: Option<OrderedFloat<f64>>,
    /// The `D:` annotation of LPG-style output.
    duration: Option<OrderedFloat<f64>>,
    /// The `C:` annotation of LPG-style output.
    cost: Option<OrderedFloat<f64>>,
}

impl PlanStep {
    pub const fn new(name: ActionName, parameters: Vec<Name>) -> Self {
        Self {
            name,
            parameters,
            time: None,
            duration: None,
            cost: None,
        }
    }

    pub fn with_time(mut self, time: f64) -> Self {
        self.time = Some(OrderedFloat(time));
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(OrderedFloat(duration));
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(OrderedFloat(cost));
        self
    }

    pub const fn name(&self) -> &ActionName {
        &self.name
    }

    pub fn parameters(&self) -> &[Name] {
        &self.parameters
    }

    pub fn time(&self) -> Option<f64> {
        self.time.map(OrderedFloat::into_inner)
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration.map(OrderedFloat::into_inner)
    }

    pub fn cost(&self) -> Option<f64> {
        self.cost.map(OrderedFloat::into_inner)
    }
}
