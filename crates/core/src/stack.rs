//! Operand stack for the calculator
//!
//! An ordered sequence of `f64` values; the top is the last element.
//! Every popping operation checks depth first, so a failed pop never
//! mutates the stack.

use crate::error::CalcError;
use crate::format;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    storage: Vec<f64>,
}

impl Stack {
    pub fn new() -> Self {
        Stack::default()
    }

    pub fn push(&mut self, value: f64) {
        self.storage.push(value);
    }

    /// Remove and return the top value
    pub fn pop(&mut self) -> Result<f64, CalcError> {
        let elems = self.pop_n(1)?;
        Ok(elems[0])
    }

    /// Remove the top `n` values, returned top-first (LIFO order)
    pub fn pop_n(&mut self, n: usize) -> Result<Vec<f64>, CalcError> {
        let mut elems = self.pop_reversed(n)?;
        elems.reverse();
        Ok(elems)
    }

    /// Remove the top `n` values, returned in push order (oldest first)
    ///
    /// Binary operators use this so that `a b -` computes `a - b`.
    pub fn pop_reversed(&mut self, n: usize) -> Result<Vec<f64>, CalcError> {
        self.require(n)?;
        let split = self.storage.len() - n;
        Ok(self.storage.split_off(split))
    }

    /// Exchange the top two values
    pub fn swap(&mut self) -> Result<(), CalcError> {
        self.require(2)?;
        let len = self.storage.len();
        self.storage.swap(len - 1, len - 2);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Sort ascending in place; NaNs sort to the ends per `f64::total_cmp`
    pub fn sort(&mut self) {
        self.storage.sort_by(f64::total_cmp);
    }

    /// The top value without removing it, or `0.0` when empty
    pub fn top(&self) -> f64 {
        self.storage.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Snapshot of the current contents, bottom first
    pub fn copy(&self) -> Vec<f64> {
        self.storage.clone()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.storage
    }

    /// Replace the contents wholesale (used to roll back failed operators)
    pub(crate) fn restore(&mut self, snapshot: Vec<f64>) {
        self.storage = snapshot;
    }

    /// Render as `[ v1  v2 ]` with shortest round-trip numbers
    pub fn render(&self) -> String {
        format::bracketed(&self.storage, format::general)
    }

    /// Render as `[ v1  v2 ]` with six fixed decimals
    pub fn render_fixed(&self) -> String {
        format::bracketed(&self.storage, format::fixed)
    }

    fn require(&self, needed: usize) -> Result<(), CalcError> {
        let available = self.storage.len();
        if available < needed {
            return Err(CalcError::InsufficientStack { needed, available });
        }
        Ok(())
    }
}

impl std::fmt::Display for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<Vec<f64>> for Stack {
    fn from(storage: Vec<f64>) -> Self {
        Stack { storage }
    }
}
