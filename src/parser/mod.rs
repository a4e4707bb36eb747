//! Tact parser
//!
//! - **logos** for fast lexing
//! - a hand-written recursive-descent parser with error recovery
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → start/token/finish events (checkpoints allow wrapping)
//!     ↓
//! TreeBuilder → RawTree (flat node vector, fields on children)
//!     ↓
//! syntax::SyntaxTree → generation-tagged tree with navigation
//! ```
//!
//! Whitespace is dropped; comments are kept as leaves so declarations can
//! find their documentation.

#[allow(clippy::module_inception)]
mod parser;

mod builder;
mod grammar;
mod lexer;
mod syntax_kind;

pub use builder::{NodeIndex, RawNode, RawTree, TreeBuilder};
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{Field, SyntaxKind};

pub use text_size::{TextRange, TextSize};
