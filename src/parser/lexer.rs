//! Logos-based lexer for Antimony
//!
//! Fast tokenization using the logos crate.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

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
            Err(()) => SyntaxKind::LEX_ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    #[regex(r"#[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // =========================================================================
    // SEPARATORS
    // =========================================================================
    #[token("\n")]
    Newline,

    #[token(";")]
    Semicolon,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("->")]
    #[token("=>")]
    Arrow,
    #[token("=")]
    Eq,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("$")]
    Dollar,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("model")]
    #[token("module")]
    ModelKw,
    #[token("end")]
    EndKw,
    #[token("function")]
    FunctionKw,
    #[token("unit")]
    UnitKw,
    #[token("has")]
    HasKw,
    #[token("in")]
    InKw,

    #[token("var")]
    #[token("const")]
    VarModifier,

    #[token("species")]
    #[token("compartment")]
    #[token("formula")]
    TypeModifier,

    #[token("identity")]
    #[token("biological_entity_is")]
    #[token("hasPart")]
    #[token("part")]
    #[token("isPartOf")]
    #[token("parthood")]
    #[token("isVersionOf")]
    #[token("version")]
    #[token("hasVersion")]
    #[token("homolog")]
    #[token("isHomologTo")]
    #[token("description")]
    #[token("isDescribedBy")]
    #[token("encoder")]
    #[token("encodes")]
    #[token("encodement")]
    #[token("isEncodedBy")]
    #[token("property")]
    #[token("hasProperty")]
    #[token("isPropertyOf")]
    #[token("taxon")]
    #[token("hasTaxon")]
    #[token("sboTerm")]
    AnnotKeyword,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Separators
            Newline => SyntaxKind::NEWLINE,
            Semicolon => SyntaxKind::SEMICOLON,

            // Literals
            Name => SyntaxKind::NAME,
            Number => SyntaxKind::NUMBER,
            String => SyntaxKind::STRING,

            // Punctuation
            Arrow => SyntaxKind::ARROW,
            Eq => SyntaxKind::EQ,
            Colon => SyntaxKind::COLON,
            Comma => SyntaxKind::COMMA,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Caret => SyntaxKind::CARET,
            Dollar => SyntaxKind::DOLLAR,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,

            // Keywords
            ModelKw => SyntaxKind::MODEL_KW,
            EndKw => SyntaxKind::END_KW,
            FunctionKw => SyntaxKind::FUNCTION_KW,
            UnitKw => SyntaxKind::UNIT_KW,
            HasKw => SyntaxKind::HAS_KW,
            InKw => SyntaxKind::IN_KW,
            VarModifier => SyntaxKind::VAR_MODIFIER,
            TypeModifier => SyntaxKind::TYPE_MODIFIER,
            AnnotKeyword => SyntaxKind::ANNOT_KEYWORD,
        }
    }
}
