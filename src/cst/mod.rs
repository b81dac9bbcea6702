//! Concrete syntax tree produced by the parser.
//!
//! Every node carries the grammar rule it matched, the exact source text it
//! covers, its ordered children and a span. The analyzer consumes the tree
//! only through this interface and matches exhaustively on [`cst::Rule`].

pub mod cst;
