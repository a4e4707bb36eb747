//! HIR layer tests
//!
//! Tests for the semantic model over an `AnalysisHost`:
//! - Name resolution, shadowing and trait inheritance
//! - Type inference and unknown propagation
//! - Memoization and invalidation after edits

pub mod tests_inference;
pub mod tests_invalidation;
pub mod tests_name_resolution;
