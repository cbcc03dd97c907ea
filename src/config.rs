//! Parser and writer options via the [`ParserConfig`] type.

use crate::error::{PddlError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// The section order used when writing a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemLayout {
    /// `:objects`, `:init`, `:goal`, as Fast Downward expects.
    FastDownward,
    /// `:objects`, `:goal`, `:init`.
    GoalFirst,
}

impl Default for ProblemLayout {
    fn default() -> Self {
        Self::FastDownward
    }
}

/// Options for parsing domains and writing problems.
///
/// ## Example
/// ```
/// # use pddl_ground::{ParserConfig, ProblemLayout};
/// let config: ParserConfig = toml::from_str(r#"
///     operators-as-actions = true
///     problem-layout = "goal-first"
/// "#).unwrap();
/// assert!(config.operators_as_actions);
/// assert!(!config.expect_action_predicates);
/// assert_eq!(config.problem_layout, ProblemLayout::GoalFirst);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ParserConfig {
    /// Every operator doubles as an action predicate of the same name.
    #[serde(default)]
    pub operators_as_actions: bool,
    /// The domain names its action predicates in an `(:actions ...)`
    /// section.
    #[serde(default)]
    pub expect_action_predicates: bool,
    #[serde(default)]
    pub problem_layout: ProblemLayout,
}

impl ParserConfig {
    /// Loads a configuration from a TOML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PddlError::io(path, e))?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_operators_as_actions(self, operators_as_actions: bool) -> Self {
        Self {
            operators_as_actions,
            ..self
        }
    }

    pub fn with_expect_action_predicates(self, expect_action_predicates: bool) -> Self {
        Self {
            expect_action_predicates,
            ..self
        }
    }

    pub fn with_problem_layout(self, problem_layout: ProblemLayout) -> Self {
        Self {
            problem_layout,
            ..self
        }
    }

    /// Rejects option combinations that contradict each other.
    pub fn validate(&self) -> Result<()> {
        if self.operators_as_actions && self.expect_action_predicates {
            return Err(PddlError::InvalidConfig(
                "`operators-as-actions` and `expect-action-predicates` are mutually exclusive"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config: ParserConfig = toml::from_str("").unwrap();
        assert_eq!(config, ParserConfig::default());
        assert_eq!(config.problem_layout, ProblemLayout::FastDownward);
    }

    #[test]
    fn from_path_reads_and_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "operators-as-actions = true").unwrap();
        writeln!(file, "expect-action-predicates = true").unwrap();
        assert!(matches!(
            ParserConfig::from_path(file.path()),
            Err(PddlError::InvalidConfig(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "problem-layout = \"goal-first\"").unwrap();
        let config = ParserConfig::from_path(file.path()).unwrap();
        assert_eq!(config.problem_layout, ProblemLayout::GoalFirst);
    }

    #[test]
    fn unknown_layouts_are_rejected() {
        let result: std::result::Result<ParserConfig, _> =
            toml::from_str("problem-layout = \"sideways\"");
        assert!(result.is_err());
        assert!(matches!(
            ParserConfig::from_path("/nonexistent/config.toml"),
            Err(PddlError::Io { .. })
        ));
    }
}
