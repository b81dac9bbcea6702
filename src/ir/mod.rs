//! Typed intermediate representation produced by the analyzer.
//!
//! Every expression carries its resolved type. Names are replaced by
//! [`crate::types::entities::EntityId`]s into the program's entity table.

pub mod ir;
