//! Type references.
//!
//! The type node carries the caller's field; an optional `?` marker and an
//! `as <serialization>` suffix follow it as siblings inside the owner node.

use crate::parser::parser::Parser;
use crate::parser::syntax_kind::{Field, SyntaxKind};

impl Parser<'_> {
    /// TypeRef = (MapType | BouncedType | TypeName) '?'? ('as' Name)?
    pub(super) fn parse_type_ref(&mut self, field: Field) {
        if !self.parse_type(field) {
            return;
        }
        self.eat(SyntaxKind::QUESTION);
        self.parse_tlb_serialization(Field::Tlb);
    }

    fn parse_type(&mut self, field: Field) -> bool {
        match self.current_kind() {
            SyntaxKind::MAP_KW if self.nth(1) == SyntaxKind::LT => {
                self.field(field);
                self.parse_map_type();
                true
            }
            SyntaxKind::BOUNCED_KW if self.nth(1) == SyntaxKind::LT => {
                self.field(field);
                self.start_node(SyntaxKind::BOUNCED_TYPE);
                self.bump();
                self.bump();
                self.name(SyntaxKind::TYPE_IDENTIFIER, Field::Message);
                self.expect(SyntaxKind::GT);
                self.finish_node();
                true
            }
            _ if self.at_name() => {
                self.name(SyntaxKind::TYPE_IDENTIFIER, field);
                true
            }
            _ => {
                self.error("expected type");
                false
            }
        }
    }

    /// MapType = 'map' '<' TypeName ('as' Name)? ',' TypeName ('as' Name)? '>'
    fn parse_map_type(&mut self) {
        self.start_node(SyntaxKind::MAP_TYPE);
        self.bump();
        self.expect(SyntaxKind::LT);
        self.name(SyntaxKind::TYPE_IDENTIFIER, Field::Key);
        self.parse_tlb_serialization(Field::KeyTlb);
        self.expect(SyntaxKind::COMMA);
        self.name(SyntaxKind::TYPE_IDENTIFIER, Field::Value);
        self.parse_tlb_serialization(Field::ValueTlb);
        self.expect(SyntaxKind::GT);
        self.finish_node();
    }

    fn parse_tlb_serialization(&mut self, field: Field) {
        if !self.at(SyntaxKind::AS_KW) {
            return;
        }
        self.field(field);
        self.start_node(SyntaxKind::TLB_SERIALIZATION);
        self.bump();
        self.name(SyntaxKind::IDENTIFIER, Field::Name);
        self.finish_node();
    }
}
