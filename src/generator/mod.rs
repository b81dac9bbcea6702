//! JavaScript code generation.
//!
//! Lowers the (optionally optimized) IR to JavaScript source, one statement
//! per line with four spaces of indentation per block. Every entity is given
//! a single `name_N` spelling for the whole output so that shadowed names stay
//! distinct.

pub mod expr;
pub mod generator;
pub mod stmt;
