//! Syntax kinds for the Rowan-based raw tree
//!
//! This enum defines all possible node and token kinds in the raw syntax tree.
//! It follows the Antimony grammar structure.

/// All syntax kinds (tokens and nodes) in Antimony
///
/// Tokens are leaf nodes (names, keywords, punctuation).
/// Nodes are composite (models, reactions, declarations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // STATEMENT SEPARATORS
    // =========================================================================
    NEWLINE,            // \n
    SEMICOLON,          // ;

    // =========================================================================
    // LITERALS
    // =========================================================================
    NAME,               // identifier
    NUMBER,             // 42, 3.14, 1e-3
    STRING,             // "http://identifiers.org/..."

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    ARROW,              // -> or =>
    EQ,                 // =
    COLON,              // :
    COMMA,              // ,
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    SLASH,              // /
    CARET,              // ^
    DOLLAR,             // $
    L_PAREN,            // (
    R_PAREN,            // )

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    MODEL_KW,           // model, module
    END_KW,
    FUNCTION_KW,
    UNIT_KW,
    HAS_KW,
    IN_KW,
    VAR_MODIFIER,       // var, const
    TYPE_MODIFIER,      // species, compartment, formula
    ANNOT_KEYWORD,      // identity, isPartOf, ...

    // =========================================================================
    // ERROR TOKENS
    // =========================================================================
    /// Characters the lexer could not classify
    LEX_ERROR,
    /// A token the parser skipped while recovering
    ERROR_TOKEN,

    // =========================================================================
    // NODES
    // =========================================================================
    ROOT,
    ERROR_NODE,

    MODEL,
    MODULAR_MODEL,
    FUNCTION,
    PARAMETERS,
    SIMPLE_STMT_LIST,
    SIMPLE_STMT,

    REACTION,
    REACTION_NAME,
    SPECIES_LIST,
    SPECIES,
    ASSIGNMENT,
    DECLARATION,
    DECL_MODIFIERS,
    DECL_ITEM,
    DECL_ASSIGNMENT,
    ANNOTATION,
    UNIT_DECLARATION,
    UNIT_ASSIGNMENT,

    MAYBE_IN,
    VAR_NAME,
    IN_COMP,

    // Arithmetic expressions
    SUM,
    PRODUCT,
    POWER,
    ATOM,
    FUNCTION_CALL,

    // Unit expressions
    UNIT_SUM,
    UNIT_PRODUCT,
    UNIT,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this token ends a statement
    pub fn is_separator(self) -> bool {
        matches!(self, Self::NEWLINE | Self::SEMICOLON)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::MODEL_KW as u16) && (self as u16) <= (Self::ANNOT_KEYWORD as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::ARROW as u16) && (self as u16) <= (Self::R_PAREN as u16)
    }

    /// Check if this kind only ever appears as a leaf
    pub fn is_token(self) -> bool {
        (self as u16) < (Self::ROOT as u16)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16, "unknown raw syntax kind {}", raw.0);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AntimonyLanguage {}

impl rowan::Language for AntimonyLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<AntimonyLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<AntimonyLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<AntimonyLanguage>;
