//! Operator descriptors
//!
//! An operator is a token, a one-line description and a tagged function.
//! Most operators are built with one of the generic constructors
//! (`constant`, `unary`, `binary`, `ternary`) around a plain `f64` function;
//! the rest supply a `custom` body that works on the stack directly.

use crate::error::CalcError;
use crate::stack::Stack;

/// Body of a custom operator: consumes operands, returns values to push
pub type OperatorFn = fn(&mut Stack) -> Result<Vec<f64>, CalcError>;

/// How many operands an operator consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Pops exactly this many values
    Fixed(usize),
    /// Reads the top value without popping it
    Peek,
    /// Reads or rearranges the whole stack; never short of operands
    Whole,
}

#[derive(Clone, Copy)]
pub enum OperatorKind {
    Constant(f64),
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
    Ternary(fn(f64, f64, f64) -> f64),
    Custom { arity: Arity, body: OperatorFn },
}

impl std::fmt::Debug for OperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperatorKind::Constant(v) => write!(f, "Constant({})", v),
            OperatorKind::Unary(_) => write!(f, "Unary"),
            OperatorKind::Binary(_) => write!(f, "Binary"),
            OperatorKind::Ternary(_) => write!(f, "Ternary"),
            OperatorKind::Custom { arity, .. } => write!(f, "Custom({:?})", arity),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Operator {
    pub name: &'static str,
    pub doc: &'static str,
    pub kind: OperatorKind,
}

impl Operator {
    /// Pushes a fixed value; consumes nothing
    pub const fn constant(name: &'static str, doc: &'static str, value: f64) -> Self {
        Operator {
            name,
            doc,
            kind: OperatorKind::Constant(value),
        }
    }

    /// Pops one value, pushes `f(x)`
    pub const fn unary(name: &'static str, doc: &'static str, f: fn(f64) -> f64) -> Self {
        Operator {
            name,
            doc,
            kind: OperatorKind::Unary(f),
        }
    }

    /// Pops two values, pushes `f(a, b)` where `a` was pushed first
    pub const fn binary(name: &'static str, doc: &'static str, f: fn(f64, f64) -> f64) -> Self {
        Operator {
            name,
            doc,
            kind: OperatorKind::Binary(f),
        }
    }

    /// Pops three values, pushes `f(a, b, c)` where `a` was pushed first
    pub const fn ternary(
        name: &'static str,
        doc: &'static str,
        f: fn(f64, f64, f64) -> f64,
    ) -> Self {
        Operator {
            name,
            doc,
            kind: OperatorKind::Ternary(f),
        }
    }

    pub const fn custom(
        name: &'static str,
        doc: &'static str,
        arity: Arity,
        body: OperatorFn,
    ) -> Self {
        Operator {
            name,
            doc,
            kind: OperatorKind::Custom { arity, body },
        }
    }

    pub fn arity(&self) -> Arity {
        match self.kind {
            OperatorKind::Constant(_) => Arity::Fixed(0),
            OperatorKind::Unary(_) => Arity::Fixed(1),
            OperatorKind::Binary(_) => Arity::Fixed(2),
            OperatorKind::Ternary(_) => Arity::Fixed(3),
            OperatorKind::Custom { arity, .. } => arity,
        }
    }

    /// Run the operator body, returning the values to push
    ///
    /// Does not push the results itself; see `Registry::run`.
    pub fn invoke(&self, stack: &mut Stack) -> Result<Vec<f64>, CalcError> {
        match self.kind {
            OperatorKind::Constant(value) => Ok(vec![value]),
            OperatorKind::Unary(f) => {
                let x = stack.pop()?;
                Ok(vec![f(x)])
            }
            OperatorKind::Binary(f) => {
                let elems = stack.pop_reversed(2)?;
                Ok(vec![f(elems[0], elems[1])])
            }
            OperatorKind::Ternary(f) => {
                let elems = stack.pop_reversed(3)?;
                Ok(vec![f(elems[0], elems[1], elems[2])])
            }
            OperatorKind::Custom { body, .. } => body(stack),
        }
    }
}
