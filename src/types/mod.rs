//! Type and entity model.
//!
//! This module defines the closed set of Convaneo types along with the
//! compatibility rules between them, and the entities that declared names
//! resolve to:
//!
//! - Variables and arrays
//! - Functions and their signatures
//! - The standard library seeded into the outermost scope

pub mod entities;
pub mod types;

#[cfg(test)]
mod tests;
