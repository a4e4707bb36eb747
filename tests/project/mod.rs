//! Project loading tests
//!
//! Tests for:
//! - Loading workspace directories from disk
//! - Loading the standard library and stubs from configured roots

pub mod tests_loading;
