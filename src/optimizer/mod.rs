//! IR optimizer.
//!
//! A single bottom-up pass over the IR that folds constant expressions and
//! drops self-assignments. The pass preserves every expression's type and
//! running it twice gives the same result as running it once.

pub mod optimizer;

#[cfg(test)]
mod tests;
