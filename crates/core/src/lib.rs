//! rpnc core: the stack machine behind the `rpnc` calculator
//!
//! A line of input is handed to [`cascade::dispatch`], which tries it as an
//! infix expression, then as an operator token, then as a REPL command.
//!
//! # Modules
//!
//! - `stack`: operand stack and its rendering
//! - `operator`: operator descriptors and generic wrappers
//! - `builtins`: the builtin operator tables
//! - `registry`: token to operator lookup, invocation, help text
//! - `expr`: infix expression tokenizer, parser and evaluator
//! - `commands`: help, clear, print and quit
//! - `cascade`: the three-stage line dispatch
//! - `special`, `stats`, `random`: numeric support
//! - `format`: `%g`/`%f` style number rendering
//! - `error`: the shared error type

pub mod builtins;
pub mod cascade;
pub mod commands;
pub mod error;
pub mod expr;
pub mod format;
pub mod operator;
pub mod random;
pub mod registry;
pub mod special;
pub mod stack;
pub mod stats;

pub use cascade::dispatch;
pub use commands::Control;
pub use error::CalcError;
pub use operator::{Arity, Operator};
pub use registry::Registry;
pub use stack::Stack;
