//! Parser module for building the parse tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a concrete parse tree of [`crate::cst::cst::Node`]s. It uses a
//! Pratt parser for expressions with proper operator precedence and handles:
//!
//! - Statement parsing (declarations, functions, assignments, control flow)
//! - Expression parsing (binary ops, calls, indexing, casts, literals)
//! - Type parsing for type annotations
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
