//! Statements and blocks.

use super::STATEMENT_RECOVERY;
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::{Field, SyntaxKind};

impl Parser<'_> {
    /// '{' Statement* '}' into the node the caller has opened.
    pub(super) fn parse_statement_list(&mut self) {
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos();
            self.parse_statement();
            if self.pos() == pos_before {
                self.error(format!("unexpected token: {}", self.current_kind().as_str()));
                self.bump_any();
            }
        }
        self.expect(SyntaxKind::R_BRACE);
    }

    fn parse_block(&mut self, field: Field) {
        self.field(field);
        self.start_node(SyntaxKind::BLOCK_STATEMENT);
        self.parse_statement_list();
        self.finish_node();
    }

    fn parse_statement(&mut self) {
        match self.current_kind() {
            SyntaxKind::L_BRACE => {
                self.start_node(SyntaxKind::BLOCK_STATEMENT);
                self.parse_statement_list();
                self.finish_node();
            }
            SyntaxKind::LET_KW => {
                if self.nth(1) == SyntaxKind::IDENT && self.nth(2) == SyntaxKind::L_BRACE {
                    self.parse_destruct_statement();
                } else {
                    self.parse_let_statement();
                }
            }
            SyntaxKind::RETURN_KW => self.parse_return_statement(),
            SyntaxKind::IF_KW => self.parse_if_statement(),
            SyntaxKind::WHILE_KW => self.parse_loop(SyntaxKind::WHILE_STATEMENT),
            SyntaxKind::REPEAT_KW => self.parse_loop(SyntaxKind::REPEAT_STATEMENT),
            SyntaxKind::DO_KW => self.parse_do_until_statement(),
            SyntaxKind::FOREACH_KW => self.parse_foreach_statement(),
            SyntaxKind::TRY_KW => self.parse_try_statement(),
            SyntaxKind::SEMICOLON => self.bump(),
            _ => self.parse_expression_statement(),
        }
    }

    /// Let = 'let' Name (':' Type)? '=' Expression ';'
    fn parse_let_statement(&mut self) {
        self.start_node(SyntaxKind::LET_STATEMENT);
        self.bump();
        self.name(SyntaxKind::IDENTIFIER, Field::Name);
        if self.eat(SyntaxKind::COLON) {
            self.parse_type_ref(Field::Type);
        }
        if self.expect(SyntaxKind::EQ) {
            self.field(Field::Value);
            self.parse_expression_or_error();
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Destruct = 'let' TypeName '{' (Bind (',' Bind)* ','? '..'?)? '}' '=' Expression ';'
    fn parse_destruct_statement(&mut self) {
        self.start_node(SyntaxKind::DESTRUCT_STATEMENT);
        self.bump();
        self.name(SyntaxKind::TYPE_IDENTIFIER, Field::Name);

        self.field(Field::Binds);
        self.start_node(SyntaxKind::DESTRUCT_BIND_LIST);
        self.expect(SyntaxKind::L_BRACE);
        loop {
            if self.at(SyntaxKind::DOT_DOT) {
                self.start_node(SyntaxKind::REST_ARGUMENT);
                self.bump();
                self.finish_node();
            } else if self.at_name() {
                self.start_node(SyntaxKind::DESTRUCT_BIND);
                self.name(SyntaxKind::IDENTIFIER, Field::Name);
                if self.eat(SyntaxKind::COLON) {
                    self.name(SyntaxKind::IDENTIFIER, Field::Bind);
                }
                self.finish_node();
            } else {
                break;
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();

        if self.expect(SyntaxKind::EQ) {
            self.field(Field::Value);
            self.parse_expression_or_error();
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    fn parse_return_statement(&mut self) {
        self.start_node(SyntaxKind::RETURN_STATEMENT);
        self.bump();
        if !self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]) {
            self.field(Field::Result);
            self.parse_expression_or_error();
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// If = 'if' Expression Block ('else' (If | Block))?
    fn parse_if_statement(&mut self) {
        self.start_node(SyntaxKind::IF_STATEMENT);
        self.bump();
        self.field(Field::Condition);
        self.parse_expression_or_error();
        self.parse_block(Field::Consequence);
        if self.at(SyntaxKind::ELSE_KW) {
            self.field(Field::Alternative);
            self.start_node(SyntaxKind::ELSE_CLAUSE);
            self.bump();
            if self.at(SyntaxKind::IF_KW) {
                self.parse_if_statement();
            } else {
                self.parse_block(Field::Body);
            }
            self.finish_node();
        }
        self.finish_node();
    }

    /// While/Repeat = ('while' | 'repeat') Expression Block
    fn parse_loop(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.field(Field::Condition);
        self.parse_expression_or_error();
        self.parse_block(Field::Body);
        self.finish_node();
    }

    /// DoUntil = 'do' Block 'until' Expression ';'
    fn parse_do_until_statement(&mut self) {
        self.start_node(SyntaxKind::DO_UNTIL_STATEMENT);
        self.bump();
        self.parse_block(Field::Body);
        self.expect(SyntaxKind::UNTIL_KW);
        self.field(Field::Condition);
        self.parse_expression_or_error();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Foreach = 'foreach' '(' Name ',' Name 'in' Expression ')' Block
    fn parse_foreach_statement(&mut self) {
        self.start_node(SyntaxKind::FOREACH_STATEMENT);
        self.bump();
        self.expect(SyntaxKind::L_PAREN);
        self.name(SyntaxKind::IDENTIFIER, Field::Key);
        self.expect(SyntaxKind::COMMA);
        self.name(SyntaxKind::IDENTIFIER, Field::Value);
        self.expect(SyntaxKind::IN_KW);
        self.field(Field::Map);
        self.parse_expression_or_error();
        self.expect(SyntaxKind::R_PAREN);
        self.parse_block(Field::Body);
        self.finish_node();
    }

    /// Try = 'try' Block ('catch' '(' Name ')' Block)?
    fn parse_try_statement(&mut self) {
        self.start_node(SyntaxKind::TRY_STATEMENT);
        self.bump();
        self.parse_block(Field::Body);
        if self.at(SyntaxKind::CATCH_KW) {
            self.field(Field::Handler);
            self.start_node(SyntaxKind::CATCH_CLAUSE);
            self.bump();
            self.expect(SyntaxKind::L_PAREN);
            self.name(SyntaxKind::IDENTIFIER, Field::Name);
            self.expect(SyntaxKind::R_PAREN);
            self.parse_block(Field::Body);
            self.finish_node();
        }
        self.finish_node();
    }

    /// ExpressionStatement | Assignment | AugmentedAssignment
    fn parse_expression_statement(&mut self) {
        let cp = self.checkpoint();
        if !self.parse_expression() {
            self.error_recover("expected statement", STATEMENT_RECOVERY);
            self.eat(SyntaxKind::SEMICOLON);
            return;
        }

        if self.at(SyntaxKind::EQ) {
            self.start_node_at(cp, SyntaxKind::ASSIGNMENT_STATEMENT, Field::Left);
            self.bump();
            self.field(Field::Right);
            self.parse_expression_or_error();
        } else if self.current_kind().is_augmented_assign() {
            self.start_node_at(cp, SyntaxKind::AUGMENTED_ASSIGNMENT_STATEMENT, Field::Left);
            self.field(Field::Operator);
            self.bump();
            self.field(Field::Right);
            self.parse_expression_or_error();
        } else {
            self.wrap_node_at(cp, SyntaxKind::EXPRESSION_STATEMENT);
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }
}
