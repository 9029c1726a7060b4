//! Infix expression evaluation against the stack
//!
//! A line is parsed as a single expression. The variable `s` holds a copy of
//! the stack with the most recently pushed value first, so `s[0]` is the top.
//! The stack itself is never modified here except to push a numeric result.

mod eval;
mod parser;

pub use eval::Value;

use crate::error::CalcError;
use crate::stack::Stack;
use tracing::trace;

/// Evaluate `line` with `stack` in scope, without touching the stack
pub fn evaluate(line: &str, stack: &Stack) -> Result<Value, CalcError> {
    let expr = parser::parse(line).map_err(CalcError::Expression)?;
    let mut view = stack.copy();
    view.reverse();
    eval::eval(&expr, &eval::Env { stack: &view }).map_err(CalcError::Expression)
}

/// Evaluate `line` and push the result if it is a number
///
/// Non-numeric results (bools, arrays) are reported as `Expression` errors
/// so the caller can try other interpretations of the line.
pub fn push_result(line: &str, stack: &mut Stack) -> Result<(), CalcError> {
    match evaluate(line, stack)? {
        Value::Number(n) => {
            trace!("expression '{}' = {}", line, n);
            stack.push(n);
            Ok(())
        }
        other => Err(CalcError::Expression(format!(
            "result {:?} is not a number",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_number() {
        let mut stack = Stack::new();
        push_result("2+3*4", &mut stack).unwrap();
        assert_eq!(stack.as_slice(), &[14.0]);
    }

    #[test]
    fn test_literal_push() {
        let mut stack = Stack::from(vec![1.0]);
        push_result("1_234.5", &mut stack).unwrap();
        assert_eq!(stack.as_slice(), &[1.0, 1234.5]);
    }

    #[test]
    fn test_stack_reference_leaves_stack_intact() {
        let mut stack = Stack::from(vec![1.0, 2.0, 3.0]);
        push_result("s[0] * 10", &mut stack).unwrap();
        assert_eq!(stack.as_slice(), &[1.0, 2.0, 3.0, 30.0]);
    }

    #[test]
    fn test_bool_result_not_pushed() {
        let mut stack = Stack::from(vec![5.0]);
        let err = push_result("s[0] > 1", &mut stack).unwrap_err();
        assert!(matches!(err, CalcError::Expression(_)));
        assert_eq!(stack.as_slice(), &[5.0]);
    }

    #[test]
    fn test_operator_tokens_fall_through() {
        let mut stack = Stack::from(vec![1.0, 2.0]);
        for token in ["+", "sw", "pi", "sum", "help", "q"] {
            assert!(
                push_result(token, &mut stack).unwrap_err().is_fall_through(),
                "'{}' should not evaluate",
                token
            );
        }
        assert_eq!(stack.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_evaluate_does_not_mutate() {
        let stack = Stack::from(vec![4.0]);
        assert_eq!(evaluate("s[0] ** 2", &stack).unwrap(), Value::Number(16.0));
        assert_eq!(stack.len(), 1);
    }
}
