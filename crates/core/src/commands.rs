//! REPL commands
//!
//! The last stage of the cascade. Commands are exact tokens with no
//! arguments; anything unrecognized is accepted as a no-op.

use crate::error::CalcError;
use crate::registry::Registry;
use crate::stack::Stack;
use std::io::Write;

/// What the session loop should do after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Command tokens and their descriptions, in display order
pub const COMMANDS: &[(&str, &str)] = &[
    ("? h help", "show this help"),
    ("sort", "sort the stack ascending"),
    ("f", "print the stack in fixed-point form"),
    ("cl clr clear", "clear the stack"),
    ("sw swap", "swap the top two values"),
    ("p pop", "discard the top value"),
    ("q exit", "quit"),
];

/// Run `line` as a command
///
/// Output (help text, fixed-point stack) goes to `out`.
pub fn execute(
    line: &str,
    stack: &mut Stack,
    registry: &Registry,
    out: &mut dyn Write,
) -> Result<Control, CalcError> {
    match line {
        "?" | "h" | "he" | "hel" | "help" => {
            write!(out, "{}", registry.help())?;
            writeln!(out)?;
            write!(out, "{}", command_help())?;
        }
        "sort" => stack.sort(),
        "f" => writeln!(out, "{}", stack.render_fixed())?,
        "cl" | "clr" | "clear" => stack.clear(),
        "sw" | "swap" => stack.swap()?,
        "p" | "pop" => {
            stack.pop()?;
        }
        "q" | "exit" => return Ok(Control::Quit),
        _ => {}
    }
    Ok(Control::Continue)
}

/// The command table, columns aligned like the operator help
pub fn command_help() -> String {
    let width = COMMANDS.iter().map(|(t, _)| t.len()).max().unwrap_or(0);
    let mut text = String::from("commands:\n");
    for (tokens, doc) in COMMANDS {
        text.push_str(&format!("  {:<width$} - {}\n", tokens, doc, width = width));
    }
    text
}
