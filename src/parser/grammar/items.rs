//! Top-level items and contract/trait members.

use super::{ATTRIBUTE_KEYWORDS, ITEM_RECOVERY, MEMBER_RECOVERY};
use crate::parser::parser::Parser;
use crate::parser::syntax_kind::{Field, SyntaxKind};

impl Parser<'_> {
    /// SourceFile = (Import | Item)*
    pub(in crate::parser) fn parse_source_file(&mut self) {
        // leading comments belong to the root
        self.start_root(SyntaxKind::SOURCE_FILE);

        loop {
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            let pos_before = self.pos();
            self.parse_item();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos() == pos_before && !self.at_eof() {
                self.error(format!("unexpected token: {}", self.current_kind().as_str()));
                self.bump_any();
            }
        }
        self.skip_trivia();

        self.finish_node();
    }

    fn parse_item(&mut self) {
        match self.current_kind() {
            SyntaxKind::IMPORT_KW => self.parse_import(),
            SyntaxKind::PRIMITIVE_KW => self.parse_primitive(),
            SyntaxKind::STRUCT_KW => self.parse_struct(),
            SyntaxKind::MESSAGE_KW => self.parse_message(),
            SyntaxKind::CONTRACT_KW => self.parse_contract_or_trait(SyntaxKind::CONTRACT),
            SyntaxKind::TRAIT_KW => self.parse_contract_or_trait(SyntaxKind::TRAIT),
            SyntaxKind::ASM_KW => self.parse_asm_function(),
            SyntaxKind::NATIVE_KW => self.parse_native_function(),
            SyntaxKind::AT => {
                if self.nth(1) == SyntaxKind::IDENT && self.nth_text(1) == "name" {
                    self.parse_native_function();
                } else {
                    self.parse_attributed_contract_or_trait();
                }
            }
            SyntaxKind::CONST_KW => self.parse_constant(SyntaxKind::GLOBAL_CONSTANT),
            SyntaxKind::FUN_KW => self.parse_function(SyntaxKind::GLOBAL_FUNCTION),
            kind if ATTRIBUTE_KEYWORDS.contains(&kind) => match self.kind_after_attributes() {
                SyntaxKind::CONST_KW => self.parse_constant(SyntaxKind::GLOBAL_CONSTANT),
                SyntaxKind::NATIVE_KW => self.parse_native_function(),
                _ => self.parse_function(SyntaxKind::GLOBAL_FUNCTION),
            },
            kind => self.error_recover(format!("unexpected token: {}", kind.as_str()), ITEM_RECOVERY),
        }
    }

    /// Import = 'import' STRING ';'
    fn parse_import(&mut self) {
        self.start_node(SyntaxKind::IMPORT);
        self.bump();
        if self.at(SyntaxKind::STRING) {
            self.field(Field::Library);
            self.bump();
        } else {
            self.error("expected import path");
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Primitive = 'primitive' TypeName ';'
    fn parse_primitive(&mut self) {
        self.start_node(SyntaxKind::PRIMITIVE);
        self.bump();
        self.name(SyntaxKind::TYPE_IDENTIFIER, Field::Name);
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Struct = 'struct' TypeName StructBody
    fn parse_struct(&mut self) {
        self.start_node(SyntaxKind::STRUCT);
        self.bump();
        self.name(SyntaxKind::TYPE_IDENTIFIER, Field::Name);
        self.parse_struct_body();
        self.finish_node();
    }

    /// Message = 'message' ('(' Expression ')')? TypeName StructBody
    fn parse_message(&mut self) {
        self.start_node(SyntaxKind::MESSAGE);
        self.bump();
        if self.at(SyntaxKind::L_PAREN) {
            self.field(Field::Value);
            self.start_node(SyntaxKind::MESSAGE_VALUE);
            self.bump();
            self.parse_expression_or_error();
            self.expect(SyntaxKind::R_PAREN);
            self.finish_node();
        }
        self.name(SyntaxKind::TYPE_IDENTIFIER, Field::Name);
        self.parse_struct_body();
        self.finish_node();
    }

    fn parse_struct_body(&mut self) {
        self.field(Field::Body);
        self.start_node(SyntaxKind::STRUCT_BODY);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            if self.at_name() {
                self.parse_field_decl(SyntaxKind::FIELD);
            } else {
                self.error_recover("expected field", &[SyntaxKind::R_BRACE, SyntaxKind::IDENT]);
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// Field = Name ':' Type ('=' Expression)? (';' | ',')?
    fn parse_field_decl(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.name(SyntaxKind::IDENTIFIER, Field::Name);
        self.expect(SyntaxKind::COLON);
        self.parse_type_ref(Field::Type);
        if self.eat(SyntaxKind::EQ) {
            self.field(Field::Value);
            self.parse_expression_or_error();
        }
        if kind == SyntaxKind::STORAGE_VARIABLE {
            self.expect(SyntaxKind::SEMICOLON);
        } else if !self.eat(SyntaxKind::SEMICOLON) {
            self.eat(SyntaxKind::COMMA);
        }
        self.finish_node();
    }

    fn parse_attributed_contract_or_trait(&mut self) {
        let mut n = 0;
        // @interface("...") lists are skipped to find the declaration keyword
        while self.nth(n) == SyntaxKind::AT {
            n += 1;
            while !matches!(self.nth(n), SyntaxKind::R_PAREN | SyntaxKind::ERROR) {
                n += 1;
            }
            n += 1;
        }
        match self.nth(n) {
            SyntaxKind::TRAIT_KW => self.parse_contract_or_trait(SyntaxKind::TRAIT),
            SyntaxKind::CONTRACT_KW => self.parse_contract_or_trait(SyntaxKind::CONTRACT),
            _ => self.error_recover("expected contract or trait", ITEM_RECOVERY),
        }
    }

    /// Contract = Attributes? 'contract' TypeName Parameters? TraitList? ContractBody
    /// Trait    = Attributes? 'trait' TypeName TraitList? TraitBody
    fn parse_contract_or_trait(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        if self.at(SyntaxKind::AT) {
            self.field(Field::Attributes);
            self.start_node(SyntaxKind::CONTRACT_ATTRIBUTES);
            while self.at(SyntaxKind::AT) {
                self.bump();
                self.eat(SyntaxKind::IDENT);
                if self.eat(SyntaxKind::L_PAREN) {
                    self.eat(SyntaxKind::STRING);
                    self.expect(SyntaxKind::R_PAREN);
                }
            }
            self.finish_node();
        }
        self.bump();
        self.name(SyntaxKind::TYPE_IDENTIFIER, Field::Name);

        if kind == SyntaxKind::CONTRACT && self.at(SyntaxKind::L_PAREN) {
            self.parse_parameter_list();
        }

        if self.at(SyntaxKind::WITH_KW) {
            self.field(Field::Traits);
            self.start_node(SyntaxKind::TRAIT_LIST);
            self.bump();
            loop {
                if self.at(SyntaxKind::IDENT) {
                    self.bump_as(SyntaxKind::TYPE_IDENTIFIER);
                } else {
                    self.error("expected trait name");
                    break;
                }
                if !self.eat(SyntaxKind::COMMA) {
                    break;
                }
            }
            self.finish_node();
        }

        let body = if kind == SyntaxKind::CONTRACT {
            SyntaxKind::CONTRACT_BODY
        } else {
            SyntaxKind::TRAIT_BODY
        };
        self.field(Field::Body);
        self.start_node(body);
        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let pos_before = self.pos();
            self.parse_member();
            if self.pos() == pos_before {
                self.error_recover("unexpected token in body", MEMBER_RECOVERY);
            }
        }
        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();

        self.finish_node();
    }

    fn parse_member(&mut self) {
        let next_is_paren = self.nth(1) == SyntaxKind::L_PAREN;
        match self.current_kind() {
            SyntaxKind::CONST_KW => self.parse_constant(SyntaxKind::STORAGE_CONSTANT),
            SyntaxKind::INIT_KW if next_is_paren => self.parse_init_function(),
            SyntaxKind::RECEIVE_KW if next_is_paren => {
                self.parse_handler(SyntaxKind::RECEIVE_FUNCTION)
            }
            SyntaxKind::BOUNCED_KW if next_is_paren => {
                self.parse_handler(SyntaxKind::BOUNCED_FUNCTION)
            }
            SyntaxKind::EXTERNAL_KW if next_is_paren => {
                self.parse_handler(SyntaxKind::EXTERNAL_FUNCTION)
            }
            SyntaxKind::FUN_KW => self.parse_function(SyntaxKind::STORAGE_FUNCTION),
            kind if ATTRIBUTE_KEYWORDS.contains(&kind) && self.nth(1) != SyntaxKind::COLON => {
                match self.kind_after_attributes() {
                    SyntaxKind::CONST_KW => self.parse_constant(SyntaxKind::STORAGE_CONSTANT),
                    _ => self.parse_function(SyntaxKind::STORAGE_FUNCTION),
                }
            }
            _ if self.at_name() && self.nth(1) == SyntaxKind::COLON => {
                self.parse_field_decl(SyntaxKind::STORAGE_VARIABLE)
            }
            kind => self.error_recover(
                format!("unexpected token in body: {}", kind.as_str()),
                MEMBER_RECOVERY,
            ),
        }
    }

    /// Looks past function/constant attributes (including `get(expr)`).
    fn kind_after_attributes(&self) -> SyntaxKind {
        let mut n = 0;
        loop {
            let kind = self.nth(n);
            if ATTRIBUTE_KEYWORDS.contains(&kind) {
                n += 1;
                if kind == SyntaxKind::GET_KW && self.nth(n) == SyntaxKind::L_PAREN {
                    let mut depth = 0;
                    loop {
                        match self.nth(n) {
                            SyntaxKind::L_PAREN => depth += 1,
                            SyntaxKind::R_PAREN => depth -= 1,
                            SyntaxKind::ERROR => return SyntaxKind::ERROR,
                            _ => {}
                        }
                        n += 1;
                        if depth == 0 {
                            break;
                        }
                    }
                }
            } else {
                return kind;
            }
        }
    }

    fn parse_function_attributes(&mut self) {
        if !self.at_any(super::ATTRIBUTE_KEYWORDS) {
            return;
        }
        self.field(Field::Attributes);
        self.start_node(SyntaxKind::FUNCTION_ATTRIBUTES);
        while self.at_any(super::ATTRIBUTE_KEYWORDS) {
            if self.at(SyntaxKind::GET_KW) && self.nth(1) == SyntaxKind::L_PAREN {
                self.start_node(SyntaxKind::GET_ATTRIBUTE);
                self.bump();
                self.bump();
                self.field(Field::Value);
                self.parse_expression_or_error();
                self.expect(SyntaxKind::R_PAREN);
                self.finish_node();
            } else {
                self.bump();
            }
        }
        self.finish_node();
    }

    fn parse_constant_attributes(&mut self) {
        if !self.at_any(super::ATTRIBUTE_KEYWORDS) {
            return;
        }
        self.field(Field::Attributes);
        self.start_node(SyntaxKind::CONSTANT_ATTRIBUTES);
        while self.at_any(super::ATTRIBUTE_KEYWORDS) {
            self.bump();
        }
        self.finish_node();
    }

    /// Constant = Attributes? 'const' Name ':' Type ('=' Expression)? ';'
    fn parse_constant(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.parse_constant_attributes();
        self.expect(SyntaxKind::CONST_KW);
        self.name(SyntaxKind::IDENTIFIER, Field::Name);
        if self.expect(SyntaxKind::COLON) {
            self.parse_type_ref(Field::Type);
        }
        if self.eat(SyntaxKind::EQ) {
            self.field(Field::Value);
            self.parse_expression_or_error();
        }
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Function = Attributes? 'fun' Name Parameters (':' Type)? (FunctionBody | ';')
    fn parse_function(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.parse_function_attributes();
        self.expect(SyntaxKind::FUN_KW);
        self.name(SyntaxKind::IDENTIFIER, Field::Name);
        self.parse_signature_tail();
        if self.at(SyntaxKind::L_BRACE) {
            self.parse_function_body();
        } else {
            self.expect(SyntaxKind::SEMICOLON);
        }
        self.finish_node();
    }

    fn parse_signature_tail(&mut self) {
        if self.at(SyntaxKind::L_PAREN) {
            self.parse_parameter_list();
        } else {
            self.error("expected parameter list");
        }
        if self.eat(SyntaxKind::COLON) {
            self.parse_type_ref(Field::Result);
        }
    }

    /// NativeFunction = '@name' '(' FuncName ')' Attributes? 'native' Name Parameters (':' Type)? ';'
    fn parse_native_function(&mut self) {
        self.start_node(SyntaxKind::NATIVE_FUNCTION);
        if self.eat(SyntaxKind::AT) {
            self.bump();
            self.expect(SyntaxKind::L_PAREN);
            self.start_node(SyntaxKind::NATIVE_NAME);
            while !self.at_eof() && !self.at_any(&[SyntaxKind::R_PAREN, SyntaxKind::SEMICOLON]) {
                self.bump_any();
            }
            self.finish_node();
            self.expect(SyntaxKind::R_PAREN);
        }
        self.parse_function_attributes();
        self.expect(SyntaxKind::NATIVE_KW);
        self.name(SyntaxKind::IDENTIFIER, Field::Name);
        self.parse_signature_tail();
        self.expect(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// AsmFunction = 'asm' Arrangement? Attributes? 'fun' Name Parameters (':' Type)? AsmBody
    fn parse_asm_function(&mut self) {
        self.start_node(SyntaxKind::ASM_FUNCTION);
        self.bump();
        if self.at(SyntaxKind::L_PAREN) {
            self.start_node(SyntaxKind::ASM_ARRANGEMENT);
            self.bump_balanced(SyntaxKind::L_PAREN, SyntaxKind::R_PAREN);
            self.finish_node();
        }
        self.parse_function_attributes();
        self.expect(SyntaxKind::FUN_KW);
        self.name(SyntaxKind::IDENTIFIER, Field::Name);
        self.parse_signature_tail();
        if self.at(SyntaxKind::L_BRACE) {
            self.field(Field::Body);
            self.start_node(SyntaxKind::ASM_FUNCTION_BODY);
            self.bump_balanced(SyntaxKind::L_BRACE, SyntaxKind::R_BRACE);
            self.finish_node();
        } else {
            self.error("expected asm body");
        }
        self.finish_node();
    }

    /// Consumes an `open ... close` group verbatim, nesting included.
    fn bump_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) {
        let mut depth = 0usize;
        while !self.at_eof() {
            let kind = self.current_kind();
            self.bump_any();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
        }
        self.error(format!("unterminated {}", open.as_str()));
    }

    /// Init = 'init' Parameters FunctionBody
    fn parse_init_function(&mut self) {
        self.start_node(SyntaxKind::INIT_FUNCTION);
        self.bump();
        self.parse_parameter_list();
        self.parse_function_body();
        self.finish_node();
    }

    /// Handler = ('receive' | 'bounced' | 'external') '(' (Parameter | STRING)? ')' FunctionBody
    fn parse_handler(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.expect(SyntaxKind::L_PAREN);
        if self.at(SyntaxKind::STRING) {
            self.field(Field::Parameter);
            self.bump();
        } else if self.at_name() {
            self.field(Field::Parameter);
            self.parse_parameter();
        }
        self.expect(SyntaxKind::R_PAREN);
        self.parse_function_body();
        self.finish_node();
    }

    pub(super) fn parse_parameter_list(&mut self) {
        self.field(Field::Parameters);
        self.start_node(SyntaxKind::PARAMETER_LIST);
        self.expect(SyntaxKind::L_PAREN);
        while !self.at_eof() && !self.at(SyntaxKind::R_PAREN) {
            if self.at_name() || self.at(SyntaxKind::SELF_KW) {
                self.parse_parameter();
            } else {
                self.error_recover(
                    "expected parameter",
                    &[SyntaxKind::COMMA, SyntaxKind::R_PAREN, SyntaxKind::L_BRACE],
                );
                if self.at(SyntaxKind::L_BRACE) {
                    break;
                }
            }
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// Parameter = Name ':' Type
    fn parse_parameter(&mut self) {
        self.start_node(SyntaxKind::PARAMETER);
        if self.at(SyntaxKind::SELF_KW) {
            self.field(Field::Name);
            self.bump_as(SyntaxKind::IDENTIFIER);
        } else {
            self.name(SyntaxKind::IDENTIFIER, Field::Name);
        }
        if self.expect(SyntaxKind::COLON) {
            self.parse_type_ref(Field::Type);
        }
        self.finish_node();
    }

    pub(super) fn parse_function_body(&mut self) {
        self.field(Field::Body);
        self.start_node(SyntaxKind::FUNCTION_BODY);
        self.parse_statement_list();
        self.finish_node();
    }
}
