//! Writes [`Problem`]s back to PDDL in either [`ProblemLayout`].

use crate::config::ProblemLayout;
use crate::error::{PddlError, Result};
use crate::parsed_types::Problem;
use std::fmt::{self, Display, Formatter, Write};
use std::fs;
use std::path::Path;
use tracing::debug;

impl Problem {
    /// Renders this problem with its sections in the given order.
    pub fn to_pddl(&self, layout: ProblemLayout) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_pddl(&mut out, layout);
        out
    }

    fn write_pddl<W: Write>(&self, out: &mut W, layout: ProblemLayout) -> fmt::Result {
        writeln!(
            out,
            "(define (problem {}) (:domain {})",
            self.name(),
            self.domain_name()
        )?;
        writeln!(out, "\t(:objects")?;
        for object in self.objects() {
            writeln!(out, "\t\t{}", object.to_typed_string())?;
        }
        writeln!(out, "\t)")?;
        match layout {
            ProblemLayout::FastDownward => {
                self.write_init(out)?;
                self.write_goal(out)?;
            }
            ProblemLayout::GoalFirst => {
                self.write_goal(out)?;
                self.write_init(out)?;
            }
        }
        write!(out, ")")
    }

    fn write_init<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "\t(:init")?;
        for fact in self.initial_state() {
            writeln!(out, "\t\t{fact}")?;
        }
        writeln!(out, "\t)")
    }

    fn write_goal<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "\t(:goal {})", self.goal())
    }

    /// Writes the PDDL rendering of this problem to `path`.
    pub fn write_to<P: AsRef<Path>>(&self, path: P, layout: ProblemLayout) -> Result<()> {
        let path = path.as_ref();
        debug!(problem = %self.name(), path = %path.display(), ?layout, "writing problem");
        fs::write(path, self.to_pddl(layout)).map_err(|e| PddlError::io(path, e))
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_pddl(f, ProblemLayout::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use crate::{Domain, ParserConfig};

    fn blocksworld() -> (Domain, Problem) {
        let domain = Domain::from_str(BLOCKSWORLD_DOMAIN_TEXT, &ParserConfig::default()).unwrap();
        let problem = Problem::from_str(BLOCKSWORLD_PROBLEM_TEXT, &domain).unwrap();
        (domain, problem)
    }

    fn section_positions(text: &str) -> (usize, usize, usize) {
        (
            text.find("(:objects").unwrap(),
            text.find("(:init").unwrap(),
            text.find("(:goal").unwrap(),
        )
    }

    #[test]
    fn fast_downward_layout_puts_init_before_goal() {
        let (_, problem) = blocksworld();
        let (objects, init, goal) = section_positions(&problem.to_pddl(ProblemLayout::FastDownward));
        assert!(objects < init && init < goal);
        assert_eq!(problem.to_string(), problem.to_pddl(ProblemLayout::FastDownward));
    }

    #[test]
    fn goal_first_layout_puts_goal_before_init() {
        let (_, problem) = blocksworld();
        let (objects, init, goal) = section_positions(&problem.to_pddl(ProblemLayout::GoalFirst));
        assert!(objects < goal && goal < init);
    }

    #[test]
    fn written_problems_parse_back() {
        let (domain, problem) = blocksworld();
        for layout in [ProblemLayout::FastDownward, ProblemLayout::GoalFirst] {
            let reparsed = Problem::from_str(&problem.to_pddl(layout), &domain).unwrap();
            assert_eq!(reparsed, problem);
        }
    }

    #[test]
    fn objects_and_facts_are_sorted() {
        let (_, problem) = blocksworld();
        let text = problem.to_string();
        let a = text.find("\t\ta\n").unwrap();
        let b = text.find("\t\tb\n").unwrap();
        assert!(a < b);
        assert!(text.find("(clear ").unwrap() < text.find("(on ").unwrap());
    }

    #[test]
    fn fluents_are_written_as_equalities() {
        let domain = Domain::from_str(TRANSPORT_DOMAIN_TEXT, &ParserConfig::default()).unwrap();
        let problem = Problem::from_str(TRANSPORT_PROBLEM_TEXT, &domain).unwrap();
        let text = problem.to_string();
        assert!(text.contains("(= (road-length l1 l2) 22)"), "{text}");
        assert_eq!(Problem::from_str(&text, &domain).unwrap(), problem);
    }

    #[test]
    fn writes_to_a_file() {
        let (_, problem) = blocksworld();
        let file = tempfile::NamedTempFile::new().unwrap();
        problem.write_to(file.path(), ProblemLayout::GoalFirst).unwrap();
        let written = fs::read_to_string(file.path()).unwrap();
        assert_eq!(written, problem.to_pddl(ProblemLayout::GoalFirst));
    }
}
