//! Semantic analysis.
//!
//! The analyzer walks the parse tree produced by the parser, resolves every
//! identifier against a chain of lexical scopes, checks the typing rules and
//! builds the typed IR. Analysis stops at the first violated rule.

pub mod analyzer;
pub mod context;
pub mod expr;
pub mod stmt;
