//! Turns a probabilistic domain into a deterministic one by keeping the most
//! likely outcome of every probabilistic effect.

use crate::error::{PddlError, Result};
use crate::parsed_types::{Domain, Formula, Operator};
use tracing::debug;

impl Domain {
    /// Returns a copy of this domain in which every probabilistic effect is
    /// replaced by its most likely outcome.
    ///
    /// Among equally likely outcomes the first listed one wins. When the
    /// implicit "no change" outcome is strictly more likely than every listed
    /// outcome, the effect is dropped.
    ///
    /// ## Errors
    /// [`PddlError::NotProbabilistic`] if no operator has a probabilistic
    /// effect.
    pub fn determinize(&self) -> Result<Domain> {
        if !self.is_probabilistic() {
            return Err(PddlError::NotProbabilistic(self.name().to_string()));
        }

        let operators: Vec<Operator> = self
            .operators()
            .iter()
            .map(|operator| {
                let effect = determinize_effect(operator.effect()).unwrap_or_else(Formula::empty);
                debug!(operator = %operator.name(), %effect, "determinized effect");
                operator.with_effect(effect)
            })
            .collect();
        Ok(self.with_operators(operators))
    }
}

/// Returns the deterministic version of `effect`, or `None` if nothing is
/// left of it.
fn determinize_effect(effect: &Formula) -> Option<Formula> {
    match effect {
        Formula::Probabilistic(probabilistic) => {
            probabilistic.most_likely().and_then(determinize_effect)
        }
        Formula::And(terms) => Some(Formula::new_and(
            terms.iter().filter_map(determinize_effect),
        )),
        Formula::ForAll(variables, body) => Some(Formula::new_forall(
            variables.clone(),
            determinize_effect(body).unwrap_or_else(Formula::empty),
        )),
        Formula::When(condition, body) => Some(Formula::new_when(
            condition.as_ref().clone(),
            determinize_effect(body).unwrap_or_else(Formula::empty),
        )),
        Formula::Timed(time, body) => {
            determinize_effect(body).map(|body| Formula::new_timed(*time, body))
        }
        _ => Some(effect.clone()),
    }
}
