//! Parser module for building the tree handed to code generation.
//!
//! This module contains the two halves of the front end:
//!
//! - Expression parsing: a shunting-yard pass reorders one line's tokens into
//!   postfix order (`postfix`), and a stack machine reduces that to one tree
//!   (`expr`). Calls, indexing, grouping and array literals share their
//!   brackets and are told apart with a sentinel designator.
//! - Block structuring (`stmt`): lines are grouped by indentation into
//!   statements with bodies, and `if`/`elif`/`else` style continuations are
//!   spliced into nested chains.
//!
//! Operator ranks and token roles live in `lookups`.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod postfix;
pub mod stmt;

#[cfg(test)]
mod tests;
