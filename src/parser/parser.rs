//! Recursive descent parser for Tact
//!
//! Builds a flat [`RawTree`] from tokens.
//! Supports error recovery: unexpected input is wrapped in `ERROR` nodes and
//! reported in [`Parse::errors`], parsing itself never fails.

use super::builder::{Checkpoint, RawTree, TreeBuilder};
use super::lexer::{Lexer, Token};
use super::syntax_kind::{Field, SyntaxKind};
use text_size::{TextRange, TextSize};

/// Parse result containing the tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub tree: RawTree,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse Tact source code into a tree
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input)
        .filter(|t| t.kind != SyntaxKind::WHITESPACE)
        .collect();
    let mut parser = Parser::new(&tokens, TextSize::of(input));
    parser.parse_source_file();
    parser.finish()
}

/// The parser state
pub(super) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: TreeBuilder,
    errors: Vec<SyntaxError>,
    eof: TextSize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], eof: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: TreeBuilder::new(),
            errors: Vec::new(),
            eof,
        }
    }

    fn finish(self) -> Parse {
        Parse {
            tree: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection (trivia is transparent)
    // =========================================================================

    fn nth_token(&self, n: usize) -> Option<&Token<'a>> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
    }

    pub(super) fn current_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(super) fn current_text(&self) -> &str {
        self.nth_token(0).map(|t| t.text).unwrap_or("")
    }

    pub(super) fn nth_text(&self, n: usize) -> &str {
        self.nth_token(n).map(|t| t.text).unwrap_or("")
    }

    pub(super) fn nth(&self, n: usize) -> SyntaxKind {
        self.nth_token(n).map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.nth_token(0).is_some_and(|t| t.kind == kind)
    }

    pub(super) fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    pub(super) fn at_eof(&self) -> bool {
        self.nth_token(0).is_none()
    }

    pub(super) fn pos(&self) -> usize {
        self.pos
    }

    /// Identifier, or a keyword that is only reserved in some positions
    /// (`get`, `init`, `virtual`, …) and may name a member elsewhere.
    pub(super) fn at_name(&self) -> bool {
        is_name_kind(self.current_kind())
    }

    pub(super) fn nth_is_name(&self, n: usize) -> bool {
        is_name_kind(self.nth(n))
    }

    pub(super) fn at_uppercase_ident(&self) -> bool {
        self.at(SyntaxKind::IDENT)
            && self
                .current_text()
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_uppercase())
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Emits pending comments into the currently open node.
    pub(super) fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder
                .token(token.kind, TextRange::at(token.offset, TextSize::of(token.text)));
            self.pos += 1;
        }
    }

    pub(super) fn bump(&mut self) {
        let kind = self.current_kind();
        self.bump_as(kind);
    }

    pub(super) fn bump_as(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder
                .token(kind, TextRange::at(token.offset, TextSize::of(token.text)));
            self.pos += 1;
        }
    }

    pub(super) fn bump_any(&mut self) {
        self.bump();
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}", describe(kind)));
            false
        }
    }

    /// Consumes a name token as `kind` under `field`.
    pub(super) fn name(&mut self, kind: SyntaxKind, field: Field) -> bool {
        if self.at_name() {
            self.builder.field(field);
            self.bump_as(kind);
            true
        } else {
            self.error("expected identifier");
            false
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    pub(super) fn error(&mut self, message: impl Into<String>) {
        let range = self
            .nth_token(0)
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(self.eof));
        self.errors.push(SyntaxError::new(message, range));
    }

    pub(super) fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.clear_field();
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump_any();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump_any();
        }
        self.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    pub(super) fn field(&mut self, field: Field) {
        self.builder.field(field);
    }

    pub(super) fn clear_field(&mut self) {
        self.builder.clear_field();
    }

    /// Starts a node at the next significant token; preceding comments stay
    /// in the enclosing node.
    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind);
    }

    /// Starts a node before any pending comments, so they become its children.
    pub(super) fn start_root(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind);
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind, inner: Field) {
        self.builder.start_node_at(checkpoint, kind, Some(inner));
    }

    pub(super) fn wrap_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind, None);
    }
}

fn is_name_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT
            | SyntaxKind::GET_KW
            | SyntaxKind::INIT_KW
            | SyntaxKind::RECEIVE_KW
            | SyntaxKind::BOUNCED_KW
            | SyntaxKind::EXTERNAL_KW
            | SyntaxKind::MUTATES_KW
            | SyntaxKind::EXTENDS_KW
            | SyntaxKind::VIRTUAL_KW
            | SyntaxKind::OVERRIDE_KW
            | SyntaxKind::ABSTRACT_KW
            | SyntaxKind::INLINE_KW
            | SyntaxKind::NATIVE_KW
            | SyntaxKind::ASM_KW
            | SyntaxKind::MAP_KW
            | SyntaxKind::AS_KW
    )
}

fn describe(kind: SyntaxKind) -> &'static str {
    match kind {
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::LT => "'<'",
        SyntaxKind::GT => "'>'",
        SyntaxKind::SEMICOLON => "';'",
        SyntaxKind::COLON => "':'",
        SyntaxKind::COMMA => "','",
        SyntaxKind::EQ => "'='",
        SyntaxKind::STRING => "string literal",
        SyntaxKind::FUN_KW => "'fun'",
        SyntaxKind::NATIVE_KW => "'native'",
        SyntaxKind::UNTIL_KW => "'until'",
        SyntaxKind::IN_KW => "'in'",
        other => other.as_str(),
    }
}
