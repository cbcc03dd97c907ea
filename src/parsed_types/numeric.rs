//! Contains numeric expressions, comparisons and assignments over
//! [`FunctionTerm`]s.

use crate::parsed_types::{Bindings, FunctionTerm, TypedEntity};
use ordered_float::OrderedFloat;
use strum_macros::{Display, EnumIs, EnumString};

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display, EnumString)]
pub enum ArithmeticOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
}

/// A numeric value: a literal number, a function term, or arithmetic over
/// other numeric expressions.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, EnumIs)]
pub enum NumericExpr {
    Number(OrderedFloat<f64>),
    Function(FunctionTerm),
    Binary(ArithmeticOp, Box<NumericExpr>, Box<NumericExpr>),
}

impl NumericExpr {
    pub fn number(value: f64) -> Self {
        Self::Number(OrderedFloat(value))
    }

    pub fn binary(op: ArithmeticOp, lhs: NumericExpr, rhs: NumericExpr) -> Self {
        Self::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            NumericExpr::Number(value) => Some(value.into_inner()),
            _ => None,
        }
    }

    pub fn substitute(&self, bindings: &Bindings) -> Self {
        match self {
            NumericExpr::Number(_) => self.clone(),
            NumericExpr::Function(term) => NumericExpr::Function(term.substitute(bindings)),
            NumericExpr::Binary(op, lhs, rhs) => {
                NumericExpr::binary(*op, lhs.substitute(bindings), rhs.substitute(bindings))
            }
        }
    }

    pub(crate) fn collect_variables(&self, into: &mut Vec<TypedEntity>) {
        match self {
            NumericExpr::Number(_) => {}
            NumericExpr::Function(term) => into.extend(term.variables().copied()),
            NumericExpr::Binary(_, lhs, rhs) => {
                lhs.collect_variables(into);
                rhs.collect_variables(into);
            }
        }
    }
}

/// The relation of a numeric comparison.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display, EnumString)]
pub enum ComparisonKind {
    #[strum(serialize = "=")]
    Equal,
    #[strum(serialize = ">")]
    Greater,
    #[strum(serialize = "<")]
    Less,
    #[strum(serialize = ">=")]
    GreaterOrEqual,
    #[strum(serialize = "<=")]
    LessOrEqual,
}

/// A comparison between a function term and a value, e.g.
/// `(> (fuel ?t) 10)`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Comparison {
    kind: ComparisonKind,
    term: FunctionTerm,
    value: NumericExpr,
}

impl Comparison {
    pub const fn new(kind: ComparisonKind, term: FunctionTerm, value: NumericExpr) -> Self {
        Self { kind, term, value }
    }

    pub const fn kind(&self) -> ComparisonKind {
        self.kind
    }

    pub const fn term(&self) -> &FunctionTerm {
        &self.term
    }

    pub const fn value(&self) -> &NumericExpr {
        &self.value
    }

    pub fn substitute(&self, bindings: &Bindings) -> Self {
        Self {
            kind: self.kind,
            term: self.term.substitute(bindings),
            value: self.value.substitute(bindings),
        }
    }
}

/// The update applied by a numeric effect.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum AssignOp {
    Assign,
    Increase,
    Decrease,
    ScaleUp,
    ScaleDown,
}

/// A numeric effect, e.g. `(assign (fuel ?t) 10)`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Assignment {
    op: AssignOp,
    target: FunctionTerm,
    value: NumericExpr,
}

impl Assignment {
    pub const fn new(op: AssignOp, target: FunctionTerm, value: NumericExpr) -> Self {
        Self { op, target, value }
    }

    pub const fn op(&self) -> AssignOp {
        self.op
    }

    pub const fn target(&self) -> &FunctionTerm {
        &self.target
    }

    pub const fn value(&self) -> &NumericExpr {
        &self.value
    }

    pub fn substitute(&self, bindings: &Bindings) -> Self {
        Self {
            op: self.op,
            target: self.target.substitute(bindings),
            value: self.value.substitute(bindings),
        }
    }
}
