//! Dispatch of one input line
//!
//! Stages run in a fixed order and the first one that accepts the line
//! wins:
//!
//! 1. infix expression, result pushed
//! 2. registered operator token
//! 3. REPL command (unrecognized input is a silent no-op)
//!
//! A stage rejects a line with a fall-through error (`Expression`,
//! `UnknownOperator`). Any other error stops the cascade and is returned.

use crate::commands::{self, Control};
use crate::error::CalcError;
use crate::expr;
use crate::registry::Registry;
use crate::stack::Stack;
use std::io::Write;
use tracing::trace;

pub fn dispatch(
    line: &str,
    stack: &mut Stack,
    registry: &Registry,
    out: &mut dyn Write,
) -> Result<Control, CalcError> {
    match expr::push_result(line, stack) {
        Ok(()) => return Ok(Control::Continue),
        Err(e) if e.is_fall_through() => trace!("'{}' is not an expression: {}", line, e),
        Err(e) => return Err(e),
    }

    match registry.run(line, stack) {
        Ok(()) => return Ok(Control::Continue),
        Err(e) if e.is_fall_through() => trace!("'{}' is not an operator", line),
        Err(e) => return Err(e),
    }

    commands::execute(line, stack, registry, out)
}
