//! Writes [`Domain`]s and [`Operator`]s back to PDDL.

use crate::error::{PddlError, Result};
use crate::parsed_types::{Domain, Operator, Type, TypedEntity, Types};
use crate::writers::formula::typed_list;
use crate::writers::negation::expand_negations;
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Renders a signature with generated parameter names, e.g.
/// `(at ?v0 - truck ?v1 - place)`.
fn signature(name: &str, parameter_types: &[Type]) -> String {
    let parameters: Vec<TypedEntity> = parameter_types
        .iter()
        .enumerate()
        .map(|(i, t)| TypedEntity::new(format!("?v{i}"), *t))
        .collect();
    if parameters.is_empty() {
        format!("({name})")
    } else {
        format!("({name} {})", typed_list(&parameters))
    }
}

fn write_types(f: &mut Formatter<'_>, types: &Types) -> fmt::Result {
    if !types.uses_typing() {
        return Ok(());
    }
    if types.hierarchy().is_empty() {
        return writeln!(f, "\t(:types {})", types.values().iter().join(" "));
    }
    writeln!(f, "\t(:types")?;
    for (supertype, subtypes) in types.hierarchy() {
        writeln!(f, "\t\t{} - {supertype}", subtypes.iter().join(" "))?;
    }
    writeln!(f, "\t)")
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let keyword = if self.is_durative() {
            ":durative-action"
        } else {
            ":action"
        };
        writeln!(f, "\t({keyword} {}", self.name())?;
        writeln!(f, "\t\t:parameters ({})", typed_list(self.parameters()))?;
        if let Some(duration) = self.duration() {
            writeln!(f, "\t\t:duration ({} ?duration {})", duration.kind(), duration.value())?;
        }

        let section = if self.is_durative() {
            ":condition"
        } else {
            ":precondition"
        };
        let terms = expand_negations(self.precondition(), self.parameters());
        writeln!(f, "\t\t{section} (and")?;
        for term in terms {
            writeln!(f, "\t\t\t{term}")?;
        }
        writeln!(f, "\t\t)")?;
        writeln!(f, "\t\t:effect {}", self.effect())?;
        write!(f, "\t)")
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "(define (domain {})", self.name())?;
        if !self.requirements().is_empty() {
            writeln!(f, "\t(:requirements {})", self.requirements().iter().join(" "))?;
        }
        write_types(f, self.types())?;
        if !self.constants().is_empty() {
            writeln!(f, "\t(:constants {})", typed_list(self.constants()))?;
        }

        // Synthesized action predicates are recreated when parsing again.
        let predicates = self
            .predicates()
            .iter()
            .filter(|p| !(self.operators_as_actions() && self.is_action_predicate(p.name())));
        writeln!(f, "\t(:predicates")?;
        for predicate in predicates {
            writeln!(f, "\t\t{}", signature(predicate.name(), predicate.parameter_types()))?;
        }
        writeln!(f, "\t)")?;

        if !self.functions().is_empty() {
            writeln!(f, "\t(:functions")?;
            for function in self.functions() {
                writeln!(f, "\t\t{}", signature(function.name(), function.parameter_types()))?;
            }
            writeln!(f, "\t)")?;
        }
        if !self.operators_as_actions() && !self.action_predicates().is_empty() {
            writeln!(f, "\t(:actions {})", self.action_predicates().iter().join(" "))?;
        }

        for operator in self.operators() {
            writeln!(f)?;
            writeln!(f, "{operator}")?;
        }
        write!(f, ")")
    }
}

impl Domain {
    /// Writes the PDDL rendering of this domain to `path`.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!(domain = %self.name(), path = %path.display(), "writing domain");
        fs::write(path, self.to_string()).map_err(|e| PddlError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::*;
    use crate::{Domain, ParserConfig};

    fn parse(text: &str, config: &ParserConfig) -> Domain {
        Domain::from_str(text, config).unwrap()
    }

    #[test]
    fn serialization_is_idempotent() {
        let config = ParserConfig::default();
        for text in [
            BLOCKSWORLD_DOMAIN_TEXT,
            TRANSPORT_DOMAIN_TEXT,
            TIREWORLD_DOMAIN_TEXT,
            ROVER_DOMAIN_TEXT,
        ] {
            let first = parse(text, &config).to_string();
            let second = parse(&first, &config).to_string();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn reparsing_preserves_the_domain_shape() {
        let config = ParserConfig::default();
        let domain = parse(TRANSPORT_DOMAIN_TEXT, &config);
        let reparsed = parse(&domain.to_string(), &config);
        assert_eq!(reparsed.name(), domain.name());
        assert_eq!(reparsed.requirements(), domain.requirements());
        assert_eq!(reparsed.predicates(), domain.predicates());
        assert_eq!(reparsed.functions(), domain.functions());
        assert_eq!(reparsed.operators().len(), domain.operators().len());
        assert_eq!(reparsed.types().hierarchy(), domain.types().hierarchy());
    }

    #[test]
    fn preconditions_are_always_conjunctions() {
        let domain = parse(BLOCKSWORLD_DOMAIN_TEXT, &ParserConfig::default());
        let text = domain.to_string();
        assert!(text.contains(":precondition (and"));
        assert!(text.contains("(:action pick-up"));
        assert!(text.contains("\t\t:parameters (?x)"));
    }

    #[test]
    fn negated_preconditions_are_quantified() {
        let domain = parse(TRANSPORT_DOMAIN_TEXT, &ParserConfig::default());
        let text = domain.to_string();
        assert!(text.contains("(forall ("), "{text}");
        assert!(text.contains("(not (Different "), "{text}");
    }

    #[test]
    fn synthesized_action_predicates_are_not_written() {
        let config = ParserConfig::default().with_operators_as_actions(true);
        let domain = parse(TRANSPORT_DOMAIN_TEXT, &config);
        let text = domain.to_string();
        assert!(!text.contains("(drive ?v0"));
        assert!(!text.contains("(:actions"));
        assert_eq!(parse(&text, &config).to_string(), text);
    }

    #[test]
    fn explicit_action_predicates_are_written() {
        let config = ParserConfig::default().with_expect_action_predicates(true);
        let domain = parse(TRAINS_DOMAIN_TEXT, &config);
        let text = domain.to_string();
        assert!(text.contains("(:actions "));
        assert_eq!(parse(&text, &config).to_string(), text);
    }

    #[test]
    fn durative_actions_keep_their_duration() {
        let domain = parse(ROVER_DOMAIN_TEXT, &ParserConfig::default());
        let text = domain.to_string();
        assert!(text.contains("(:durative-action navigate"));
        assert!(text.contains(":duration (= ?duration 5)"));
        assert!(text.contains("(at start "));
    }

    #[test]
    fn writes_to_a_file() {
        let domain = parse(BLOCKSWORLD_DOMAIN_TEXT, &ParserConfig::default());
        let file = tempfile::NamedTempFile::new().unwrap();
        domain.write_to(file.path()).unwrap();
        let written = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(written, domain.to_string());
    }
}
