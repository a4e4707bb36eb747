//! Grammar rules for Tact
//!
//! The rules are split by construct and implemented directly on the parser:
//! - `items` - Top-level declarations and contract/trait members
//! - `statements` - Function bodies and blocks
//! - `expressions` - Precedence-climbing expression parser
//! - `types` - Type references with optional markers and serialization

mod expressions;
mod items;
mod statements;
mod types;

use super::syntax_kind::SyntaxKind;

/// Tokens that may start a top-level item; used for error recovery.
const ITEM_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::IMPORT_KW,
    SyntaxKind::PRIMITIVE_KW,
    SyntaxKind::STRUCT_KW,
    SyntaxKind::MESSAGE_KW,
    SyntaxKind::CONTRACT_KW,
    SyntaxKind::TRAIT_KW,
    SyntaxKind::FUN_KW,
    SyntaxKind::NATIVE_KW,
    SyntaxKind::ASM_KW,
    SyntaxKind::CONST_KW,
    SyntaxKind::AT,
];

/// Tokens that may start a contract or trait member.
const MEMBER_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::R_BRACE,
    SyntaxKind::FUN_KW,
    SyntaxKind::CONST_KW,
    SyntaxKind::INIT_KW,
    SyntaxKind::RECEIVE_KW,
    SyntaxKind::BOUNCED_KW,
    SyntaxKind::EXTERNAL_KW,
    SyntaxKind::GET_KW,
    SyntaxKind::VIRTUAL_KW,
    SyntaxKind::OVERRIDE_KW,
    SyntaxKind::ABSTRACT_KW,
    SyntaxKind::INLINE_KW,
    SyntaxKind::MUTATES_KW,
];

/// Tokens after which a statement can resume.
const STATEMENT_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::SEMICOLON,
    SyntaxKind::R_BRACE,
    SyntaxKind::LET_KW,
    SyntaxKind::RETURN_KW,
    SyntaxKind::IF_KW,
    SyntaxKind::WHILE_KW,
    SyntaxKind::REPEAT_KW,
    SyntaxKind::DO_KW,
    SyntaxKind::FOREACH_KW,
    SyntaxKind::TRY_KW,
];

/// Keywords that may precede `fun`, `native` or `const`.
const ATTRIBUTE_KEYWORDS: &[SyntaxKind] = &[
    SyntaxKind::GET_KW,
    SyntaxKind::MUTATES_KW,
    SyntaxKind::EXTENDS_KW,
    SyntaxKind::VIRTUAL_KW,
    SyntaxKind::OVERRIDE_KW,
    SyntaxKind::ABSTRACT_KW,
    SyntaxKind::INLINE_KW,
];
