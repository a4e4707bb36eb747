//! Parser tests
//!
//! Tests for the Tact lexer and recursive-descent parser:
//! - Valid programs parse without errors
//! - Tree shape and field names
//! - Error recovery

pub mod tests_parse;
