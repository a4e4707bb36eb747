//! Syntax kinds for the Tact syntax tree
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! Node names follow the grammar used by the editor tooling (`let_statement`,
//! `field_access_expression`, …) so `as_str` output matches what users see
//! in syntax-tree dumps.

/// All syntax kinds (tokens and nodes) in Tact
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (contracts, functions, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,

    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    IDENT,
    /// Identifier in value position (`foo`)
    IDENTIFIER,
    /// Identifier in type position (`Foo`)
    TYPE_IDENTIFIER,
    INTEGER,
    STRING,
    BOOLEAN,
    NULL,
    SELF,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,
    R_BRACE,
    L_PAREN,
    R_PAREN,
    LT,
    GT,
    COMMA,
    SEMICOLON,
    COLON,
    DOT,
    DOT_DOT,
    EQ,
    QUESTION,
    BANG,
    BANG_BANG,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    AMP,
    PIPE,
    CARET,
    TILDE,
    AT,
    AMP_AMP,
    PIPE_PIPE,
    EQ_EQ,
    BANG_EQ,
    LT_EQ,
    GT_EQ,
    SHL,
    SHR,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
    SHL_EQ,
    SHR_EQ,
    AMP_AMP_EQ,
    PIPE_PIPE_EQ,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    IMPORT_KW,
    PRIMITIVE_KW,
    STRUCT_KW,
    MESSAGE_KW,
    CONTRACT_KW,
    TRAIT_KW,
    WITH_KW,
    FUN_KW,
    NATIVE_KW,
    ASM_KW,
    CONST_KW,
    LET_KW,
    RETURN_KW,
    IF_KW,
    ELSE_KW,
    WHILE_KW,
    REPEAT_KW,
    DO_KW,
    UNTIL_KW,
    FOREACH_KW,
    IN_KW,
    TRY_KW,
    CATCH_KW,
    INIT_KW,
    RECEIVE_KW,
    BOUNCED_KW,
    EXTERNAL_KW,
    GET_KW,
    MUTATES_KW,
    EXTENDS_KW,
    VIRTUAL_KW,
    OVERRIDE_KW,
    ABSTRACT_KW,
    INLINE_KW,
    AS_KW,
    MAP_KW,
    SELF_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    INIT_OF_KW,

    // =========================================================================
    // NODES - ITEMS
    // =========================================================================
    SOURCE_FILE,
    IMPORT,
    PRIMITIVE,
    STRUCT,
    MESSAGE,
    MESSAGE_VALUE,
    STRUCT_BODY,
    FIELD,
    CONTRACT,
    TRAIT,
    CONTRACT_ATTRIBUTES,
    TRAIT_LIST,
    CONTRACT_BODY,
    TRAIT_BODY,
    GLOBAL_FUNCTION,
    NATIVE_FUNCTION,
    NATIVE_NAME,
    ASM_FUNCTION,
    ASM_ARRANGEMENT,
    ASM_FUNCTION_BODY,
    GLOBAL_CONSTANT,
    CONSTANT_ATTRIBUTES,
    FUNCTION_ATTRIBUTES,
    GET_ATTRIBUTE,
    PARAMETER_LIST,
    PARAMETER,
    FUNCTION_BODY,
    STORAGE_VARIABLE,
    STORAGE_CONSTANT,
    STORAGE_FUNCTION,
    INIT_FUNCTION,
    RECEIVE_FUNCTION,
    BOUNCED_FUNCTION,
    EXTERNAL_FUNCTION,

    // =========================================================================
    // NODES - TYPES
    // =========================================================================
    MAP_TYPE,
    BOUNCED_TYPE,
    TLB_SERIALIZATION,

    // =========================================================================
    // NODES - STATEMENTS
    // =========================================================================
    BLOCK_STATEMENT,
    LET_STATEMENT,
    DESTRUCT_STATEMENT,
    DESTRUCT_BIND_LIST,
    DESTRUCT_BIND,
    REST_ARGUMENT,
    RETURN_STATEMENT,
    EXPRESSION_STATEMENT,
    ASSIGNMENT_STATEMENT,
    AUGMENTED_ASSIGNMENT_STATEMENT,
    IF_STATEMENT,
    ELSE_CLAUSE,
    WHILE_STATEMENT,
    REPEAT_STATEMENT,
    DO_UNTIL_STATEMENT,
    FOREACH_STATEMENT,
    TRY_STATEMENT,
    CATCH_CLAUSE,

    // =========================================================================
    // NODES - EXPRESSIONS
    // =========================================================================
    TERNARY_EXPRESSION,
    BINARY_EXPRESSION,
    UNARY_EXPRESSION,
    NON_NULL_ASSERT_EXPRESSION,
    FIELD_ACCESS_EXPRESSION,
    METHOD_CALL_EXPRESSION,
    STATIC_CALL_EXPRESSION,
    ARGUMENT_LIST,
    ARGUMENT,
    INSTANCE_EXPRESSION,
    INSTANCE_ARGUMENT_LIST,
    INSTANCE_ARGUMENT,
    INIT_OF,
    PARENTHESIZED_EXPRESSION,

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is trivia (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::IMPORT_KW as u16) && (self as u16) <= (Self::INIT_OF_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::PIPE_PIPE_EQ as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER | Self::STRING | Self::BOOLEAN | Self::NULL
        )
    }

    /// Leaf kinds that only carry syntax (keywords, punctuation, trivia).
    pub fn is_anonymous(self) -> bool {
        self.is_keyword() || self.is_punct() || self.is_trivia()
    }

    /// Statement kinds. Type inference never walks upward past these.
    pub fn is_statement(self) -> bool {
        (self as u16) >= (Self::BLOCK_STATEMENT as u16)
            && (self as u16) <= (Self::CATCH_CLAUSE as u16)
    }

    /// Every kind that introduces a callable body with parameters.
    pub fn is_function(self) -> bool {
        matches!(
            self,
            Self::GLOBAL_FUNCTION
                | Self::NATIVE_FUNCTION
                | Self::ASM_FUNCTION
                | Self::STORAGE_FUNCTION
                | Self::INIT_FUNCTION
                | Self::RECEIVE_FUNCTION
                | Self::BOUNCED_FUNCTION
                | Self::EXTERNAL_FUNCTION
        )
    }

    /// Binary operator tokens.
    pub fn is_binary_op(self) -> bool {
        matches!(
            self,
            Self::PLUS
                | Self::MINUS
                | Self::STAR
                | Self::SLASH
                | Self::PERCENT
                | Self::AMP
                | Self::PIPE
                | Self::CARET
                | Self::AMP_AMP
                | Self::PIPE_PIPE
                | Self::EQ_EQ
                | Self::BANG_EQ
                | Self::LT
                | Self::GT
                | Self::LT_EQ
                | Self::GT_EQ
                | Self::SHL
                | Self::SHR
        )
    }

    /// Compound assignment operator tokens (`+=`, `<<=`, …).
    pub fn is_augmented_assign(self) -> bool {
        (self as u16) >= (Self::PLUS_EQ as u16) && (self as u16) <= (Self::PIPE_PIPE_EQ as u16)
    }

    /// Grammar name of the kind as shown in syntax-tree dumps.
    pub fn as_str(self) -> &'static str {
        use SyntaxKind::*;
        match self {
            WHITESPACE => "whitespace",
            COMMENT => "comment",
            IDENT | IDENTIFIER => "identifier",
            TYPE_IDENTIFIER => "type_identifier",
            INTEGER => "integer",
            STRING => "string",
            BOOLEAN => "boolean",
            NULL => "null",
            SELF => "self",
            SOURCE_FILE => "source_file",
            IMPORT => "import",
            PRIMITIVE => "primitive",
            STRUCT => "struct",
            MESSAGE => "message",
            MESSAGE_VALUE => "message_value",
            STRUCT_BODY => "struct_body",
            FIELD => "field",
            CONTRACT => "contract",
            TRAIT => "trait",
            CONTRACT_ATTRIBUTES => "contract_attributes",
            TRAIT_LIST => "trait_list",
            CONTRACT_BODY => "contract_body",
            TRAIT_BODY => "trait_body",
            GLOBAL_FUNCTION => "global_function",
            NATIVE_FUNCTION => "native_function",
            NATIVE_NAME => "func_identifier",
            ASM_FUNCTION => "asm_function",
            ASM_ARRANGEMENT => "asm_arrangement",
            ASM_FUNCTION_BODY => "asm_function_body",
            GLOBAL_CONSTANT => "global_constant",
            CONSTANT_ATTRIBUTES => "constant_attributes",
            FUNCTION_ATTRIBUTES => "function_attributes",
            GET_ATTRIBUTE => "get_attribute",
            PARAMETER_LIST => "parameter_list",
            PARAMETER => "parameter",
            FUNCTION_BODY => "function_body",
            STORAGE_VARIABLE => "storage_variable",
            STORAGE_CONSTANT => "storage_constant",
            STORAGE_FUNCTION => "storage_function",
            INIT_FUNCTION => "init_function",
            RECEIVE_FUNCTION => "receive_function",
            BOUNCED_FUNCTION => "bounced_function",
            EXTERNAL_FUNCTION => "external_function",
            MAP_TYPE => "map_type",
            BOUNCED_TYPE => "bounced_type",
            TLB_SERIALIZATION => "tlb_serialization",
            BLOCK_STATEMENT => "block_statement",
            LET_STATEMENT => "let_statement",
            DESTRUCT_STATEMENT => "destruct_statement",
            DESTRUCT_BIND_LIST => "destruct_bind_list",
            DESTRUCT_BIND => "destruct_bind",
            REST_ARGUMENT => "rest_argument",
            RETURN_STATEMENT => "return_statement",
            EXPRESSION_STATEMENT => "expression_statement",
            ASSIGNMENT_STATEMENT => "assignment_statement",
            AUGMENTED_ASSIGNMENT_STATEMENT => "augmented_assignment_statement",
            IF_STATEMENT => "if_statement",
            ELSE_CLAUSE => "else_clause",
            WHILE_STATEMENT => "while_statement",
            REPEAT_STATEMENT => "repeat_statement",
            DO_UNTIL_STATEMENT => "do_until_statement",
            FOREACH_STATEMENT => "foreach_statement",
            TRY_STATEMENT => "try_statement",
            CATCH_CLAUSE => "catch_clause",
            TERNARY_EXPRESSION => "ternary_expression",
            BINARY_EXPRESSION => "binary_expression",
            UNARY_EXPRESSION => "unary_expression",
            NON_NULL_ASSERT_EXPRESSION => "non_null_assert_expression",
            FIELD_ACCESS_EXPRESSION => "field_access_expression",
            METHOD_CALL_EXPRESSION => "method_call_expression",
            STATIC_CALL_EXPRESSION => "static_call_expression",
            ARGUMENT_LIST => "argument_list",
            ARGUMENT => "argument",
            INSTANCE_EXPRESSION => "instance_expression",
            INSTANCE_ARGUMENT_LIST => "instance_argument_list",
            INSTANCE_ARGUMENT => "instance_argument",
            INIT_OF => "initOf",
            PARENTHESIZED_EXPRESSION => "parenthesized_expression",
            ERROR => "ERROR",
            _ => "token",
        }
    }
}

/// Named child slots. A child node or token carries at most one field,
/// assigned by the parser when the child is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Value,
    Type,
    Tlb,
    Body,
    Parameters,
    Parameter,
    Result,
    Traits,
    Attributes,
    Arguments,
    Argument,
    Object,
    Left,
    Right,
    Operator,
    Condition,
    Consequence,
    Alternative,
    Key,
    KeyTlb,
    ValueTlb,
    Map,
    Message,
    Binds,
    Bind,
    Library,
    Handler,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Value => "value",
            Field::Type => "type",
            Field::Tlb => "tlb",
            Field::Body => "body",
            Field::Parameters => "parameters",
            Field::Parameter => "parameter",
            Field::Result => "result",
            Field::Traits => "traits",
            Field::Attributes => "attributes",
            Field::Arguments => "arguments",
            Field::Argument => "argument",
            Field::Object => "object",
            Field::Left => "left",
            Field::Right => "right",
            Field::Operator => "operator",
            Field::Condition => "condition",
            Field::Consequence => "consequence",
            Field::Alternative => "alternative",
            Field::Key => "key",
            Field::KeyTlb => "tlb_key",
            Field::ValueTlb => "tlb_value",
            Field::Map => "map",
            Field::Message => "message",
            Field::Binds => "binds",
            Field::Bind => "bind",
            Field::Library => "library",
            Field::Handler => "handler",
        }
    }
}
