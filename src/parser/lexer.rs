//! Logos-based lexer for Tact
//!
//! Fast tokenization using the logos crate.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Consumes a block comment body up to the closing `*/`. An unterminated
/// comment runs to the end of input and lexes as an error.
fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*")]
    #[regex(r"0[bB][01][01_]*")]
    #[regex(r"0[oO][0-7][0-7_]*")]
    Integer,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("&&=")]
    AmpAmpEq,
    #[token("||=")]
    PipePipeEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("!!")]
    BangBang,
    #[token("..")]
    DotDot,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("=")]
    Eq,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("@")]
    At,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("import")]
    ImportKw,
    #[token("primitive")]
    PrimitiveKw,
    #[token("struct")]
    StructKw,
    #[token("message")]
    MessageKw,
    #[token("contract")]
    ContractKw,
    #[token("trait")]
    TraitKw,
    #[token("with")]
    WithKw,
    #[token("fun")]
    FunKw,
    #[token("native")]
    NativeKw,
    #[token("asm")]
    AsmKw,
    #[token("const")]
    ConstKw,
    #[token("let")]
    LetKw,
    #[token("return")]
    ReturnKw,
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("while")]
    WhileKw,
    #[token("repeat")]
    RepeatKw,
    #[token("do")]
    DoKw,
    #[token("until")]
    UntilKw,
    #[token("foreach")]
    ForeachKw,
    #[token("in")]
    InKw,
    #[token("try")]
    TryKw,
    #[token("catch")]
    CatchKw,
    #[token("init")]
    InitKw,
    #[token("receive")]
    ReceiveKw,
    #[token("bounced")]
    BouncedKw,
    #[token("external")]
    ExternalKw,
    #[token("get")]
    GetKw,
    #[token("mutates")]
    MutatesKw,
    #[token("extends")]
    ExtendsKw,
    #[token("virtual")]
    VirtualKw,
    #[token("override")]
    OverrideKw,
    #[token("abstract")]
    AbstractKw,
    #[token("inline")]
    InlineKw,
    #[token("as")]
    AsKw,
    #[token("map")]
    MapKw,
    #[token("self")]
    SelfKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("null")]
    NullKw,
    #[token("initOf")]
    InitOfKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken as T;
        match token {
            T::Whitespace => SyntaxKind::WHITESPACE,
            T::LineComment | T::BlockComment => SyntaxKind::COMMENT,
            T::Ident => SyntaxKind::IDENT,
            T::Integer => SyntaxKind::INTEGER,
            T::String => SyntaxKind::STRING,

            T::AmpAmpEq => SyntaxKind::AMP_AMP_EQ,
            T::PipePipeEq => SyntaxKind::PIPE_PIPE_EQ,
            T::ShlEq => SyntaxKind::SHL_EQ,
            T::ShrEq => SyntaxKind::SHR_EQ,
            T::PlusEq => SyntaxKind::PLUS_EQ,
            T::MinusEq => SyntaxKind::MINUS_EQ,
            T::StarEq => SyntaxKind::STAR_EQ,
            T::SlashEq => SyntaxKind::SLASH_EQ,
            T::PercentEq => SyntaxKind::PERCENT_EQ,
            T::AmpEq => SyntaxKind::AMP_EQ,
            T::PipeEq => SyntaxKind::PIPE_EQ,
            T::CaretEq => SyntaxKind::CARET_EQ,
            T::AmpAmp => SyntaxKind::AMP_AMP,
            T::PipePipe => SyntaxKind::PIPE_PIPE,
            T::EqEq => SyntaxKind::EQ_EQ,
            T::BangEq => SyntaxKind::BANG_EQ,
            T::LtEq => SyntaxKind::LT_EQ,
            T::GtEq => SyntaxKind::GT_EQ,
            T::Shl => SyntaxKind::SHL,
            T::Shr => SyntaxKind::SHR,
            T::BangBang => SyntaxKind::BANG_BANG,
            T::DotDot => SyntaxKind::DOT_DOT,

            T::LBrace => SyntaxKind::L_BRACE,
            T::RBrace => SyntaxKind::R_BRACE,
            T::LParen => SyntaxKind::L_PAREN,
            T::RParen => SyntaxKind::R_PAREN,
            T::Lt => SyntaxKind::LT,
            T::Gt => SyntaxKind::GT,
            T::Comma => SyntaxKind::COMMA,
            T::Semicolon => SyntaxKind::SEMICOLON,
            T::Colon => SyntaxKind::COLON,
            T::Dot => SyntaxKind::DOT,
            T::Eq => SyntaxKind::EQ,
            T::Question => SyntaxKind::QUESTION,
            T::Bang => SyntaxKind::BANG,
            T::Plus => SyntaxKind::PLUS,
            T::Minus => SyntaxKind::MINUS,
            T::Star => SyntaxKind::STAR,
            T::Slash => SyntaxKind::SLASH,
            T::Percent => SyntaxKind::PERCENT,
            T::Amp => SyntaxKind::AMP,
            T::Pipe => SyntaxKind::PIPE,
            T::Caret => SyntaxKind::CARET,
            T::Tilde => SyntaxKind::TILDE,
            T::At => SyntaxKind::AT,

            T::ImportKw => SyntaxKind::IMPORT_KW,
            T::PrimitiveKw => SyntaxKind::PRIMITIVE_KW,
            T::StructKw => SyntaxKind::STRUCT_KW,
            T::MessageKw => SyntaxKind::MESSAGE_KW,
            T::ContractKw => SyntaxKind::CONTRACT_KW,
            T::TraitKw => SyntaxKind::TRAIT_KW,
            T::WithKw => SyntaxKind::WITH_KW,
            T::FunKw => SyntaxKind::FUN_KW,
            T::NativeKw => SyntaxKind::NATIVE_KW,
            T::AsmKw => SyntaxKind::ASM_KW,
            T::ConstKw => SyntaxKind::CONST_KW,
            T::LetKw => SyntaxKind::LET_KW,
            T::ReturnKw => SyntaxKind::RETURN_KW,
            T::IfKw => SyntaxKind::IF_KW,
            T::ElseKw => SyntaxKind::ELSE_KW,
            T::WhileKw => SyntaxKind::WHILE_KW,
            T::RepeatKw => SyntaxKind::REPEAT_KW,
            T::DoKw => SyntaxKind::DO_KW,
            T::UntilKw => SyntaxKind::UNTIL_KW,
            T::ForeachKw => SyntaxKind::FOREACH_KW,
            T::InKw => SyntaxKind::IN_KW,
            T::TryKw => SyntaxKind::TRY_KW,
            T::CatchKw => SyntaxKind::CATCH_KW,
            T::InitKw => SyntaxKind::INIT_KW,
            T::ReceiveKw => SyntaxKind::RECEIVE_KW,
            T::BouncedKw => SyntaxKind::BOUNCED_KW,
            T::ExternalKw => SyntaxKind::EXTERNAL_KW,
            T::GetKw => SyntaxKind::GET_KW,
            T::MutatesKw => SyntaxKind::MUTATES_KW,
            T::ExtendsKw => SyntaxKind::EXTENDS_KW,
            T::VirtualKw => SyntaxKind::VIRTUAL_KW,
            T::OverrideKw => SyntaxKind::OVERRIDE_KW,
            T::AbstractKw => SyntaxKind::ABSTRACT_KW,
            T::InlineKw => SyntaxKind::INLINE_KW,
            T::AsKw => SyntaxKind::AS_KW,
            T::MapKw => SyntaxKind::MAP_KW,
            T::SelfKw => SyntaxKind::SELF_KW,
            T::TrueKw => SyntaxKind::TRUE_KW,
            T::FalseKw => SyntaxKind::FALSE_KW,
            T::NullKw => SyntaxKind::NULL_KW,
            T::InitOfKw => SyntaxKind::INIT_OF_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| *k != SyntaxKind::WHITESPACE)
            .collect()
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("contract Counter with Deployable"),
            vec![
                SyntaxKind::CONTRACT_KW,
                SyntaxKind::IDENT,
                SyntaxKind::WITH_KW,
                SyntaxKind::IDENT,
            ]
        );
        assert_eq!(kinds("contracts"), vec![SyntaxKind::IDENT]);
        assert_eq!(kinds("initOf"), vec![SyntaxKind::INIT_OF_KW]);
    }

    #[test]
    fn operators_prefer_longest_match() {
        assert_eq!(
            kinds("a <<= b!! >> c"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::SHL_EQ,
                SyntaxKind::IDENT,
                SyntaxKind::BANG_BANG,
                SyntaxKind::SHR,
                SyntaxKind::IDENT,
            ]
        );
    }

    #[test]
    fn comments_and_literals() {
        let tokens = tokenize("/// doc\nlet x = 0x1F_2; /* c */ \"s\\\"q\"");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds[0], SyntaxKind::COMMENT);
        assert!(kinds.contains(&SyntaxKind::INTEGER));
        assert!(kinds.contains(&SyntaxKind::STRING));
        assert_eq!(kinds.iter().filter(|k| **k == SyntaxKind::COMMENT).count(), 2);
    }

    #[test]
    fn block_comments_span_lines_and_stars() {
        let tokens = tokenize("/** a\n * b **/ x /* */");
        let comments: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::COMMENT)
            .map(|t| t.text)
            .collect();
        assert_eq!(comments, ["/** a\n * b **/", "/* */"]);
        assert!(tokens.iter().any(|t| t.kind == SyntaxKind::IDENT && t.text == "x"));
    }

    #[test]
    fn unterminated_block_comment_is_an_error() {
        let tokens = tokenize("a /* open");
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, SyntaxKind::ERROR);
        assert_eq!(last.text, "/* open");
    }

    #[test]
    fn offsets_are_contiguous() {
        let tokens = tokenize("let a = 1;");
        let mut expected = 0u32;
        for token in tokens {
            assert_eq!(u32::from(token.offset), expected);
            expected += token.text.len() as u32;
        }
        assert_eq!(expected, 10);
    }
}
