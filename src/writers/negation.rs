//! Rewrites negated precondition atoms as negation-as-failure.
//!
//! A top-level `(not (p ?x ?y))` in a precondition becomes a universally
//! quantified disjunction over the variables of the atom that no earlier
//! positive term mentions:
//!
//! ```text
//! (forall (?y-1 - t)
//!     (or (not (Different ?x ?y-1)) (not (p ?x ?y-1))))
//! ```
//!
//! with one `Different` guard for each pair of quantified variable and
//! previously seen variable. Quantified variables are renamed so they never
//! shadow an operator parameter.

use crate::parsed_types::{Atom, Bindings, Formula, Name, TypedEntity};
use std::collections::BTreeSet;

/// Returns the top-level terms of `precondition` with every negated atom
/// expanded. Positive terms are returned unchanged.
pub fn expand_negations(precondition: &Formula, parameters: &[TypedEntity]) -> Vec<Formula> {
    let mut taken: BTreeSet<Name> = parameters.iter().map(|p| *p.name()).collect();
    taken.extend(precondition.free_variables().iter().map(|v| *v.name()));
    let mut seen = BTreeSet::new();

    precondition
        .conjuncts()
        .iter()
        .map(|term| match term {
            Formula::Not(inner) => match inner.as_ref() {
                Formula::Atom(atom) => expand_atom(atom, &seen, &mut taken),
                _ => term.clone(),
            },
            Formula::Timed(time, body) => match body.as_ref() {
                Formula::Not(inner) => match inner.as_ref() {
                    Formula::Atom(atom) => {
                        Formula::new_timed(*time, expand_atom(atom, &seen, &mut taken))
                    }
                    _ => term.clone(),
                },
                _ => {
                    seen.extend(term.free_variables());
                    term.clone()
                }
            },
            _ => {
                seen.extend(term.free_variables());
                term.clone()
            }
        })
        .collect()
}

fn expand_atom(
    atom: &Atom,
    seen: &BTreeSet<TypedEntity>,
    taken: &mut BTreeSet<Name>,
) -> Formula {
    let unseen: BTreeSet<TypedEntity> = atom
        .variables()
        .filter(|v| !seen.contains(*v))
        .copied()
        .collect();

    let mut bindings = Bindings::new();
    let mut quantified = Vec::with_capacity(unseen.len());
    for variable in &unseen {
        let fresh = TypedEntity::new(fresh_name(variable.name(), taken), *variable.type_());
        bindings.insert(*variable.name(), fresh);
        quantified.push(fresh);
    }

    let mut guards: Vec<Formula> = quantified
        .iter()
        .flat_map(|variable| {
            seen.iter().map(move |earlier| {
                Formula::new_not(Formula::Different(*earlier, *variable))
            })
        })
        .collect();
    guards.push(Formula::new_not(Formula::Atom(atom.substitute(&bindings))));

    quantified
        .into_iter()
        .rev()
        .fold(Formula::new_or(guards), |body, variable| {
            Formula::new_forall(vec![variable], body)
        })
}

/// Picks `<name>-<n>` for the smallest `n` that is not yet taken.
fn fresh_name(name: &Name, taken: &mut BTreeSet<Name>) -> Name {
    let fresh = (1..)
        .map(|n| Name::new(format!("{name}-{n}")))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or(*name);
    taken.insert(fresh);
    fresh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsed_types::{TimeSpecifier, ToTyped};

    fn atom(name: &str, args: &[&str]) -> Formula {
        Formula::Atom(Atom::new(
            name.into(),
            args.iter().map(|a| (*a).to_typed("block")).collect(),
        ))
    }

    fn render(terms: &[Formula]) -> Vec<String> {
        terms.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn positive_terms_pass_through() {
        let precondition = Formula::new_and([atom("clear", &["?x"]), atom("handempty", &[])]);
        let terms = expand_negations(&precondition, &[]);
        assert_eq!(render(&terms), ["(clear ?x)", "(handempty)"]);
    }

    #[test]
    fn negated_atom_is_guarded_by_seen_variables() {
        let parameters = ["?x".to_typed("block"), "?y".to_typed("block")];
        let precondition = Formula::new_and([
            atom("clear", &["?x"]),
            Formula::new_not(atom("on", &["?x", "?y"])),
        ]);
        let terms = expand_negations(&precondition, &parameters);
        assert_eq!(
            render(&terms),
            [
                "(clear ?x)",
                "(forall (?y-1 - block) (or (not (Different ?x ?y-1)) (not (on ?x ?y-1))))",
            ]
        );
    }

    #[test]
    fn fully_seen_atom_has_no_quantifier() {
        let precondition = Formula::new_and([
            atom("clear", &["?x"]),
            Formula::new_not(atom("holding", &["?x"])),
        ]);
        let terms = expand_negations(&precondition, &[]);
        assert_eq!(terms[1].to_string(), "(or (not (holding ?x)))");
    }

    #[test]
    fn quantifiers_nest_in_variable_order() {
        let precondition = Formula::new_not(atom("on", &["?b", "?a"]));
        let terms = expand_negations(&precondition, &[]);
        assert_eq!(
            render(&terms),
            ["(forall (?a-1 - block) (forall (?b-1 - block) (or (not (on ?b-1 ?a-1)))))"]
        );
    }

    #[test]
    fn fresh_names_avoid_existing_variables() {
        let parameters = ["?x".to_typed("block"), "?x-1".to_typed("block")];
        let precondition = Formula::new_not(atom("clear", &["?x"]));
        let terms = expand_negations(&precondition, &parameters);
        assert_eq!(
            render(&terms),
            ["(forall (?x-2 - block) (or (not (clear ?x-2))))"]
        );
    }

    #[test]
    fn timed_negations_are_expanded() {
        let precondition = Formula::new_and([
            Formula::new_timed(TimeSpecifier::AtStart, atom("clear", &["?x"])),
            Formula::new_timed(
                TimeSpecifier::OverAll,
                Formula::new_not(atom("on", &["?x", "?y"])),
            ),
        ]);
        let terms = expand_negations(&precondition, &[]);
        assert_eq!(
            terms[1].to_string(),
            "(over all (forall (?y-1 - block) (or (not (Different ?x ?y-1)) (not (on ?x ?y-1)))))"
        );
    }
}
