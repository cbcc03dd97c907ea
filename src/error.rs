//! Contains the crate-wide error type [`PddlError`].

use crate::parsers::Span;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing, serializing or grounding PDDL.
///
/// Every failure is fatal for the text being processed; there is no partial
/// success mode.
#[derive(Debug, Error)]
pub enum PddlError {
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: u32,
        column: usize,
        message: String,
    },

    #[error("undefined {kind} `{name}`")]
    UndefinedSymbol { kind: SymbolKind, name: String },

    #[error("`{name}` expects {expected} argument(s) but was given {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("argument `{name}` is not bound in the current scope")]
    UnboundVariable { name: String },

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("variable `{name}` is already bound in an enclosing scope")]
    VariableRedeclared { name: String },

    #[error("`{name}` is declared both as a predicate and as an action")]
    NameCollision { name: String },

    #[error("problem refers to domain `{found}` but was paired with domain `{expected}`")]
    DomainMismatch { expected: String, found: String },

    #[error("unrecognized plan step `{0}`")]
    UnresolvedPlanStep(String),

    #[error("object name `{name}` matched {matches} objects, expected exactly one")]
    AmbiguousObjectName { name: String, matches: usize },

    #[error("domain `{0}` has no probabilistic effects to determinize")]
    NotProbabilistic(String),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// The kind of symbol that failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SymbolKind {
    Predicate,
    Function,
    Type,
    Operator,
}

impl PddlError {
    /// Builds a [`PddlError::Syntax`] pointing at the start of `at`.
    pub fn syntax<S: Into<String>>(at: Span, message: S) -> Self {
        Self::Syntax {
            line: at.location_line(),
            column: at.get_utf8_column(),
            message: message.into(),
        }
    }

    pub fn undefined<S: Into<String>>(kind: SymbolKind, name: S) -> Self {
        Self::UndefinedSymbol {
            kind,
            name: name.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = PddlError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_reports_position() {
        let input = Span::new("(define\n  (domain x)");
        let at = nom::Slice::slice(&input, 10..);
        let err = PddlError::syntax(at, "boom");
        match err {
            PddlError::Syntax { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 3);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn symbol_kind_is_lowercase() {
        let err = PddlError::undefined(SymbolKind::Predicate, "at");
        assert_eq!(err.to_string(), "undefined predicate `at`");
    }
}
