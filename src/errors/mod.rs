//! Error types and error handling for the compiler.
//!
//! This module defines the single error type shared by every stage:
//!
//! - Error structures with source position information
//! - Syntax variants raised by the lexer and parser
//! - Semantic variants raised by the analyzer
//! - Error names and suggestions used when rendering diagnostics

pub mod errors;

#[cfg(test)]
mod tests;
