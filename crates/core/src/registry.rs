//! Operator registry
//!
//! Maps command tokens to operators. Built once at startup from the
//! builtin tables and read-only afterwards.

use crate::builtins;
use crate::error::CalcError;
use crate::operator::Operator;
use crate::stack::Stack;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Registry {
    ops: HashMap<&'static str, Operator>,
}

impl Registry {
    /// Registry with every builtin installed
    pub fn new() -> Self {
        let mut registry = Registry::empty();
        registry.install(builtins::NAMED);
        registry.install(builtins::UNARY);
        registry.install(builtins::BINARY);
        registry.install(builtins::TERNARY);
        registry.install(builtins::CONSTANTS);
        debug!("operator registry built with {} entries", registry.len());
        registry
    }

    pub fn empty() -> Self {
        Registry {
            ops: HashMap::new(),
        }
    }

    /// Add operators; a token already present is replaced
    pub fn install(&mut self, ops: &[Operator]) {
        for op in ops {
            self.ops.insert(op.name, *op);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Operator> {
        self.ops.get(name)
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// All tokens, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.ops.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Invoke the operator registered under `token` and push its results
    ///
    /// On failure nothing is pushed and the stack keeps its pre-call
    /// contents. An unregistered token yields `UnknownOperator`.
    pub fn run(&self, token: &str, stack: &mut Stack) -> Result<(), CalcError> {
        let op = self
            .get(token)
            .ok_or_else(|| CalcError::UnknownOperator(token.to_string()))?;

        let snapshot = stack.copy();
        match op.invoke(stack) {
            Ok(results) => {
                debug!("{} -> {:?}", op.name, results);
                for value in results {
                    stack.push(value);
                }
                Ok(())
            }
            Err(e) => {
                stack.restore(snapshot);
                Err(e)
            }
        }
    }

    /// One line per operator, sorted by token, descriptions aligned
    pub fn help(&self) -> String {
        let names = self.names();
        let width = names.iter().map(|n| n.len()).max().unwrap_or(0);
        let mut out = String::new();
        for name in names {
            let doc = self.ops.get(name).map(|op| op.doc).unwrap_or_default();
            out.push_str(&format!("{:<width$} - {}\n", name, doc, width = width));
        }
        out
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}
