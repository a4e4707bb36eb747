//! Expression parsing
//!
//! Precedence chain, loosest first:
//!
//! ```text
//! Ternary → || → && → | → ^ → & → (== !=) → (< > <= >=) → (<< >>)
//!     → (+ -) → (* / %) → Unary → Postfix (. call !!) → Primary
//! ```

use crate::parser::parser::Parser;
use crate::parser::syntax_kind::{Field, SyntaxKind};

fn binding_power(kind: SyntaxKind) -> Option<u8> {
    let bp = match kind {
        SyntaxKind::PIPE_PIPE => 1,
        SyntaxKind::AMP_AMP => 2,
        SyntaxKind::PIPE => 3,
        SyntaxKind::CARET => 4,
        SyntaxKind::AMP => 5,
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ => 6,
        SyntaxKind::LT | SyntaxKind::GT | SyntaxKind::LT_EQ | SyntaxKind::GT_EQ => 7,
        SyntaxKind::SHL | SyntaxKind::SHR => 8,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 9,
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 10,
        _ => return None,
    };
    Some(bp)
}

impl Parser<'_> {
    /// Parses an expression, reporting an error when none starts here.
    pub(super) fn parse_expression_or_error(&mut self) {
        if !self.parse_expression() {
            self.error("expected expression");
        }
    }

    /// Returns false (and emits nothing) when no expression starts here.
    pub(super) fn parse_expression(&mut self) -> bool {
        let cp = self.checkpoint();
        if !self.parse_binary(0) {
            self.clear_field();
            return false;
        }
        if self.at(SyntaxKind::QUESTION) {
            self.start_node_at(cp, SyntaxKind::TERNARY_EXPRESSION, Field::Condition);
            self.bump();
            self.field(Field::Consequence);
            self.parse_expression_or_error();
            self.expect(SyntaxKind::COLON);
            self.field(Field::Alternative);
            self.parse_expression_or_error();
            self.finish_node();
        }
        true
    }

    fn parse_binary(&mut self, min_bp: u8) -> bool {
        let cp = self.checkpoint();
        if !self.parse_unary() {
            return false;
        }
        while let Some(bp) = binding_power(self.current_kind()) {
            if bp < min_bp {
                break;
            }
            self.start_node_at(cp, SyntaxKind::BINARY_EXPRESSION, Field::Left);
            self.field(Field::Operator);
            self.bump();
            self.field(Field::Right);
            if !self.parse_binary(bp + 1) {
                self.clear_field();
                self.error("expected expression");
            }
            self.finish_node();
        }
        true
    }

    fn parse_unary(&mut self) -> bool {
        if self.at_any(&[
            SyntaxKind::BANG,
            SyntaxKind::BANG_BANG,
            SyntaxKind::MINUS,
            SyntaxKind::PLUS,
            SyntaxKind::TILDE,
        ]) {
            self.start_node(SyntaxKind::UNARY_EXPRESSION);
            self.field(Field::Operator);
            self.bump();
            self.field(Field::Argument);
            if !self.parse_unary() {
                self.clear_field();
                self.error("expected expression");
            }
            self.finish_node();
            return true;
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> bool {
        let cp = self.checkpoint();
        if !self.parse_primary() {
            return false;
        }
        loop {
            match self.current_kind() {
                SyntaxKind::DOT => {
                    let is_call = self.nth_is_name(1) && self.nth(2) == SyntaxKind::L_PAREN;
                    let kind = if is_call {
                        SyntaxKind::METHOD_CALL_EXPRESSION
                    } else {
                        SyntaxKind::FIELD_ACCESS_EXPRESSION
                    };
                    self.start_node_at(cp, kind, Field::Object);
                    self.bump();
                    if self.at(SyntaxKind::SELF_KW) {
                        self.field(Field::Name);
                        self.bump_as(SyntaxKind::IDENTIFIER);
                    } else {
                        self.name(SyntaxKind::IDENTIFIER, Field::Name);
                    }
                    if is_call {
                        self.parse_argument_list();
                    }
                    self.finish_node();
                }
                SyntaxKind::BANG_BANG => {
                    self.start_node_at(cp, SyntaxKind::NON_NULL_ASSERT_EXPRESSION, Field::Argument);
                    self.bump();
                    self.finish_node();
                }
                _ => break,
            }
        }
        true
    }

    fn parse_primary(&mut self) -> bool {
        match self.current_kind() {
            SyntaxKind::INTEGER | SyntaxKind::STRING => self.bump(),
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => self.bump_as(SyntaxKind::BOOLEAN),
            SyntaxKind::NULL_KW => self.bump_as(SyntaxKind::NULL),
            SyntaxKind::SELF_KW => self.bump_as(SyntaxKind::SELF),
            SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::PARENTHESIZED_EXPRESSION);
                self.bump();
                self.field(Field::Value);
                self.parse_expression_or_error();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            }
            SyntaxKind::INIT_OF_KW => {
                self.start_node(SyntaxKind::INIT_OF);
                self.bump();
                self.name(SyntaxKind::TYPE_IDENTIFIER, Field::Name);
                if self.at(SyntaxKind::L_PAREN) {
                    self.parse_argument_list();
                } else {
                    self.error("expected arguments");
                }
                self.finish_node();
            }
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::L_PAREN => {
                self.start_node(SyntaxKind::STATIC_CALL_EXPRESSION);
                self.name(SyntaxKind::IDENTIFIER, Field::Name);
                self.parse_argument_list();
                self.finish_node();
            }
            SyntaxKind::IDENT if self.at_uppercase_ident() && self.nth(1) == SyntaxKind::L_BRACE => {
                self.start_node(SyntaxKind::INSTANCE_EXPRESSION);
                self.name(SyntaxKind::TYPE_IDENTIFIER, Field::Name);
                self.parse_instance_argument_list();
                self.finish_node();
            }
            SyntaxKind::IDENT => self.bump_as(SyntaxKind::IDENTIFIER),
            _ => return false,
        }
        true
    }

    /// ArgumentList = '(' (Expression (',' Expression)* ','?)? ')'
    fn parse_argument_list(&mut self) {
        self.field(Field::Arguments);
        self.start_node(SyntaxKind::ARGUMENT_LIST);
        self.expect(SyntaxKind::L_PAREN);
        while !self.at_eof() && !self.at(SyntaxKind::R_PAREN) {
            self.start_node(SyntaxKind::ARGUMENT);
            self.field(Field::Value);
            let parsed = self.parse_expression();
            self.finish_node();
            if !parsed {
                self.error("expected argument");
                break;
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// InstanceArguments = '{' (Name (':' Expression)? (',' ...)* ','?)? '}'
    fn parse_instance_argument_list(&mut self) {
        self.field(Field::Arguments);
        self.start_node(SyntaxKind::INSTANCE_ARGUMENT_LIST);
        self.expect(SyntaxKind::L_BRACE);
        while self.at_name() {
            self.start_node(SyntaxKind::INSTANCE_ARGUMENT);
            self.name(SyntaxKind::IDENTIFIER, Field::Name);
            if self.eat(SyntaxKind::COLON) {
                self.field(Field::Value);
                self.parse_expression_or_error();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }
}
