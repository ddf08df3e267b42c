//! Recursive descent parser for Antimony
//!
//! Records a flat event buffer while parsing, then replays it into a rowan
//! GreenNode tree. Keeping events (instead of feeding the builder directly)
//! lets error recovery rewind to a [`Checkpoint`] by truncating the buffer.

use super::checkpoint::{Checkpoint, is_checkpoint};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

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

/// Parse Antimony source code into a raw tree
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_root();
    let parse = parser.finish();
    tracing::debug!(
        tokens = tokens.len(),
        errors = parse.errors.len(),
        "parsed Antimony source"
    );
    parse
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Start(SyntaxKind),
    /// Token at `index`, emitted with `kind` (which differs from the lexed
    /// kind only for skipped error tokens)
    Token { index: usize, kind: SyntaxKind },
    /// Zero-width `ERROR_TOKEN` where the input ran out
    Missing,
    Finish,
}

/// Index of a `Start` event, or of the position a node may later be
/// wrapped around.
#[derive(Debug, Clone, Copy)]
struct Marker(usize);

/// Failure inside a rule: `at` is the index of the offending token, or the
/// token count at end of input.
#[derive(Debug, Clone, Copy)]
struct Unexpected {
    at: usize,
}

type PResult<T> = Result<T, Unexpected>;

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    events: Vec<Event>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        let mut builder = GreenNodeBuilder::new();
        for event in &self.events {
            match *event {
                Event::Start(kind) => builder.start_node(kind.into()),
                Event::Token { index, kind } => builder.token(kind.into(), self.tokens[index].text),
                Event::Missing => builder.token(SyntaxKind::ERROR_TOKEN.into(), ""),
                Event::Finish => builder.finish_node(),
            }
        }
        Parse {
            green: builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// Index of the `n`th significant token at or after the cursor
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens[self.pos..]
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(i, _)| self.pos + i)
    }

    fn nth(&self, n: usize) -> Option<SyntaxKind> {
        self.nth_index(n).map(|i| self.tokens[i].kind)
    }

    fn current(&self) -> Option<SyntaxKind> {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == Some(kind)
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        self.current().is_some_and(|k| kinds.contains(&k))
    }

    fn at_separator(&self) -> bool {
        self.current().is_some_and(SyntaxKind::is_separator)
    }

    fn at_eof(&self) -> bool {
        self.current().is_none()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Emit pending trivia so the next node starts at a significant token
    fn flush_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.events.push(Event::Token {
                index: self.pos,
                kind: token.kind,
            });
            self.pos += 1;
        }
    }

    fn bump_as(&mut self, kind: Option<SyntaxKind>) {
        self.flush_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.events.push(Event::Token {
                index: self.pos,
                kind: kind.unwrap_or(token.kind),
            });
            self.pos += 1;
        }
    }

    fn bump(&mut self) {
        self.bump_as(None);
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> PResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn unexpected(&self) -> Unexpected {
        Unexpected {
            at: self.nth_index(0).unwrap_or(self.tokens.len()),
        }
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn open(&mut self) -> Marker {
        self.flush_trivia();
        let marker = Marker(self.events.len());
        // Placeholder kind, overwritten by `close`
        self.events.push(Event::Start(SyntaxKind::ERROR_NODE));
        marker
    }

    fn close(&mut self, marker: Marker, kind: SyntaxKind) {
        self.events[marker.0] = Event::Start(kind);
        self.events.push(Event::Finish);
    }

    /// Position a node may later be wrapped around with [`Self::wrap`]
    fn marker(&mut self) -> Marker {
        self.flush_trivia();
        Marker(self.events.len())
    }

    fn wrap(&mut self, marker: Marker, kind: SyntaxKind) {
        self.events.insert(marker.0, Event::Start(kind));
        self.events.push(Event::Finish);
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            events: self.events.len(),
        }
    }

    fn push_error(&mut self, at: usize) {
        let (message, range) = match self.tokens.get(at) {
            Some(token) if token.kind == SyntaxKind::NEWLINE => (
                "unexpected newline".to_string(),
                TextRange::at(token.offset, TextSize::of(token.text)),
            ),
            Some(token) => (
                format!("unexpected token '{}'", token.text),
                TextRange::at(token.offset, TextSize::of(token.text)),
            ),
            None => {
                let end = self
                    .tokens
                    .last()
                    .map(|t| t.offset + TextSize::of(t.text))
                    .unwrap_or_default();
                ("unexpected end of input".to_string(), TextRange::empty(end))
            }
        };
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Rewind to `checkpoint`, turn everything consumed since into an
    /// `ERROR_NODE`, emit the offending token as an `ERROR_TOKEN` and skip to
    /// the end of its line.
    fn recover(&mut self, checkpoint: Checkpoint, error: Unexpected) {
        tracing::trace!(
            restore_to = checkpoint.pos,
            error_at = error.at,
            "restoring parser checkpoint"
        );
        self.push_error(error.at);
        self.events.truncate(checkpoint.events);

        let consumed = checkpoint.pos..error.at;
        let wrapped = self.tokens[consumed.clone()]
            .iter()
            .any(|t| !t.kind.is_trivia());
        if wrapped {
            self.events.push(Event::Start(SyntaxKind::ERROR_NODE));
        }
        for index in consumed {
            self.events.push(Event::Token {
                index,
                kind: self.tokens[index].kind,
            });
        }
        if wrapped {
            self.events.push(Event::Finish);
        }
        self.pos = error.at;

        if self.pos >= self.tokens.len() {
            if !wrapped {
                self.wrap_last_token();
            }
            return;
        }

        let offending = self.tokens[self.pos].kind;
        self.bump_as(Some(SyntaxKind::ERROR_TOKEN));
        if offending.is_separator() {
            return;
        }
        while let Some(kind) = self.current() {
            if kind.is_separator() {
                self.bump();
                break;
            }
            self.bump_as(Some(SyntaxKind::ERROR_TOKEN));
        }
    }

    /// At end of input with nothing consumed since the last checkpoint, give
    /// the truncated construct a trailing `ERROR_NODE` to report on.
    ///
    /// Separators after the last statement (and the trivia after them) move
    /// into that node. A completed statement keeps all of its tokens; the
    /// node then holds a zero-width `ERROR_TOKEN` at the end of the text.
    fn wrap_last_token(&mut self) {
        let movable = self
            .events
            .iter()
            .rposition(|event| matches!(event, Event::Token { kind, .. } if !kind.is_trivia()))
            .filter(|&start| {
                matches!(self.events[start], Event::Token { kind, .. } if kind.is_separator())
                    && !self.events[start..]
                        .iter()
                        .any(|event| matches!(event, Event::Start(_)))
            });

        let Some(start) = movable else {
            self.events.push(Event::Start(SyntaxKind::ERROR_NODE));
            self.events.push(Event::Missing);
            self.events.push(Event::Finish);
            return;
        };
        let mut moved = Vec::new();
        let mut kept = Vec::new();
        for event in self.events.drain(start..) {
            match event {
                Event::Token { .. } => moved.push(event),
                _ => kept.push(event),
            }
        }
        self.events.extend(kept);
        self.events.push(Event::Start(SyntaxKind::ERROR_NODE));
        self.events.extend(moved);
        self.events.push(Event::Finish);
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// Root = (SimpleStmt | Model | ModularModel | Function)*
    fn parse_root(&mut self) {
        self.events.push(Event::Start(SyntaxKind::ROOT));
        self.item_list(false);
        // Trailing trivia
        while self.pos < self.tokens.len() {
            self.bump();
        }
        self.events.push(Event::Finish);
    }

    /// Items of the file (`in_block == false`) or of a model body. Each list
    /// starts with its own checkpoint.
    fn item_list(&mut self, in_block: bool) {
        let mut checkpoint = self.checkpoint();
        loop {
            match self.current() {
                None if in_block => {
                    // Block never closed
                    self.recover(checkpoint, self.unexpected());
                    break;
                }
                None => break,
                Some(SyntaxKind::END_KW) if in_block => break,
                Some(_) => {}
            }

            let result = if in_block {
                self.simple_stmt()
            } else {
                self.file_item()
            };
            match result {
                Ok(kind) if is_checkpoint(kind) => {
                    checkpoint = self.checkpoint();
                    tracing::trace!(?kind, pos = self.pos, "saved parser checkpoint");
                }
                Ok(_) => {}
                Err(error) => {
                    self.recover(checkpoint, error);
                    checkpoint = self.checkpoint();
                }
            }
        }
    }

    fn file_item(&mut self) -> PResult<SyntaxKind> {
        match self.current() {
            Some(SyntaxKind::MODEL_KW) => self.model(),
            Some(SyntaxKind::FUNCTION_KW) => self.function(),
            _ => self.simple_stmt(),
        }
    }

    /// Model = 'model' '*'? NAME ('(' Parameters? ')')? SimpleStmtList 'end'
    fn model(&mut self) -> PResult<SyntaxKind> {
        let m = self.open();
        self.bump(); // model
        self.eat(SyntaxKind::STAR);
        self.expect(SyntaxKind::NAME)?;
        let kind = if self.eat(SyntaxKind::L_PAREN) {
            if self.at(SyntaxKind::NAME) {
                self.parameters()?;
            }
            self.expect(SyntaxKind::R_PAREN)?;
            SyntaxKind::MODULAR_MODEL
        } else {
            SyntaxKind::MODEL
        };

        let list = self.open();
        self.item_list(true);
        self.close(list, SyntaxKind::SIMPLE_STMT_LIST);
        self.eat(SyntaxKind::END_KW);
        self.close(m, kind);
        Ok(kind)
    }

    /// Function = 'function' NAME '(' Parameters? ')' SEP* Sum SEP* 'end'
    fn function(&mut self) -> PResult<SyntaxKind> {
        let m = self.open();
        self.bump(); // function
        self.expect(SyntaxKind::NAME)?;
        self.expect(SyntaxKind::L_PAREN)?;
        if self.at(SyntaxKind::NAME) {
            self.parameters()?;
        }
        self.expect(SyntaxKind::R_PAREN)?;
        while self.at_separator() {
            self.bump();
        }
        self.sum()?;
        while self.at_separator() {
            self.bump();
        }
        self.expect(SyntaxKind::END_KW)?;
        self.close(m, SyntaxKind::FUNCTION);
        Ok(SyntaxKind::FUNCTION)
    }

    /// Parameters = NAME (',' NAME)*
    fn parameters(&mut self) -> PResult<()> {
        let m = self.open();
        self.expect(SyntaxKind::NAME)?;
        while self.eat(SyntaxKind::COMMA) {
            self.expect(SyntaxKind::NAME)?;
        }
        self.close(m, SyntaxKind::PARAMETERS);
        Ok(())
    }

    /// SimpleStmt = Stmt? SEPARATOR
    ///
    /// Returns the kind of the statement inside, which is what the checkpoint
    /// predicate classifies.
    fn simple_stmt(&mut self) -> PResult<SyntaxKind> {
        let m = self.open();
        let kind = if self.at_separator() {
            SyntaxKind::SIMPLE_STMT
        } else {
            self.stmt()?
        };
        match self.current() {
            Some(k) if k.is_separator() => self.bump(),
            None => {}
            Some(_) => return Err(self.unexpected()),
        }
        self.close(m, SyntaxKind::SIMPLE_STMT);
        Ok(kind)
    }

    fn stmt(&mut self) -> PResult<SyntaxKind> {
        match self.current() {
            Some(SyntaxKind::VAR_MODIFIER | SyntaxKind::TYPE_MODIFIER) => self.declaration(),
            Some(SyntaxKind::UNIT_KW) => self.unit_declaration(),
            Some(SyntaxKind::ARROW | SyntaxKind::NUMBER) => self.reaction(false),
            Some(SyntaxKind::NAME | SyntaxKind::DOLLAR) => {
                let name_at = usize::from(self.at(SyntaxKind::DOLLAR)) + 1;
                match self.nth(name_at) {
                    Some(SyntaxKind::ANNOT_KEYWORD) => self.annotation(),
                    Some(SyntaxKind::HAS_KW) => self.unit_assignment(),
                    _ if self.is_bare_name(name_at) => self.bare_declaration(),
                    _ => match self.first_on_line(&[
                        SyntaxKind::ARROW,
                        SyntaxKind::EQ,
                        SyntaxKind::COLON,
                    ]) {
                        Some(SyntaxKind::EQ) => self.assignment(),
                        Some(SyntaxKind::COLON) => self.reaction(true),
                        _ => self.reaction(false),
                    },
                }
            }
            _ => Err(self.unexpected()),
        }
    }

    /// `$? NAME ('in' NAME)?` filling the whole statement. `name_at` is the
    /// lookahead index just past the name.
    fn is_bare_name(&self, name_at: usize) -> bool {
        let ends = |n: usize| self.nth(n).is_none_or(|k| k.is_separator());
        if self.nth(name_at - 1) != Some(SyntaxKind::NAME) {
            return false;
        }
        ends(name_at)
            || (self.nth(name_at) == Some(SyntaxKind::IN_KW)
                && self.nth(name_at + 1) == Some(SyntaxKind::NAME)
                && ends(name_at + 2))
    }

    /// First of `kinds` appearing before the end of the current statement
    fn first_on_line(&self, kinds: &[SyntaxKind]) -> Option<SyntaxKind> {
        (0..)
            .map_while(|n| self.nth(n))
            .take_while(|k| !k.is_separator())
            .find(|k| kinds.contains(k))
    }

    /// Reaction = (MaybeIn ':')? SpeciesList ARROW SpeciesList ';' Sum? InComp?
    fn reaction(&mut self, named: bool) -> PResult<SyntaxKind> {
        let m = self.open();
        if named {
            let name = self.open();
            self.maybe_in()?;
            self.expect(SyntaxKind::COLON)?;
            self.close(name, SyntaxKind::REACTION_NAME);
        }
        self.species_list()?;
        self.expect(SyntaxKind::ARROW)?;
        self.species_list()?;
        self.expect(SyntaxKind::SEMICOLON)?;
        if !self.at_eof() && !self.at_separator() && !self.at(SyntaxKind::IN_KW) {
            self.sum()?;
        }
        if self.at(SyntaxKind::IN_KW) {
            self.in_comp()?;
        }
        self.close(m, SyntaxKind::REACTION);
        Ok(SyntaxKind::REACTION)
    }

    /// SpeciesList = (Species ('+' Species)*)?
    fn species_list(&mut self) -> PResult<()> {
        let m = self.open();
        if self.at_any(&[SyntaxKind::NUMBER, SyntaxKind::DOLLAR, SyntaxKind::NAME]) {
            self.species()?;
            while self.eat(SyntaxKind::PLUS) {
                self.species()?;
            }
        }
        self.close(m, SyntaxKind::SPECIES_LIST);
        Ok(())
    }

    /// Species = NUMBER? '$'? NAME
    fn species(&mut self) -> PResult<()> {
        let m = self.open();
        self.eat(SyntaxKind::NUMBER);
        self.eat(SyntaxKind::DOLLAR);
        self.expect(SyntaxKind::NAME)?;
        self.close(m, SyntaxKind::SPECIES);
        Ok(())
    }

    /// Assignment = MaybeIn '=' Sum
    fn assignment(&mut self) -> PResult<SyntaxKind> {
        let m = self.open();
        self.maybe_in()?;
        self.expect(SyntaxKind::EQ)?;
        self.sum()?;
        self.close(m, SyntaxKind::ASSIGNMENT);
        Ok(SyntaxKind::ASSIGNMENT)
    }

    /// Declaration = DeclModifiers DeclItem (',' DeclItem)*
    fn declaration(&mut self) -> PResult<SyntaxKind> {
        let m = self.open();
        let modifiers = self.open();
        self.eat(SyntaxKind::VAR_MODIFIER);
        self.eat(SyntaxKind::TYPE_MODIFIER);
        self.close(modifiers, SyntaxKind::DECL_MODIFIERS);
        self.decl_item()?;
        while self.eat(SyntaxKind::COMMA) {
            self.decl_item()?;
        }
        self.close(m, SyntaxKind::DECLARATION);
        Ok(SyntaxKind::DECLARATION)
    }

    /// A name alone on its line declares it with no modifiers and no value
    fn bare_declaration(&mut self) -> PResult<SyntaxKind> {
        let m = self.open();
        let modifiers = self.open();
        self.close(modifiers, SyntaxKind::DECL_MODIFIERS);
        self.decl_item()?;
        self.close(m, SyntaxKind::DECLARATION);
        Ok(SyntaxKind::DECLARATION)
    }

    /// DeclItem = MaybeIn ('=' Sum)?
    fn decl_item(&mut self) -> PResult<()> {
        let m = self.open();
        self.maybe_in()?;
        if self.at(SyntaxKind::EQ) {
            let assignment = self.open();
            self.bump();
            self.sum()?;
            self.close(assignment, SyntaxKind::DECL_ASSIGNMENT);
        }
        self.close(m, SyntaxKind::DECL_ITEM);
        Ok(())
    }

    /// Annotation = VarName ANNOT_KEYWORD STRING
    fn annotation(&mut self) -> PResult<SyntaxKind> {
        let m = self.open();
        self.var_name()?;
        self.expect(SyntaxKind::ANNOT_KEYWORD)?;
        self.expect(SyntaxKind::STRING)?;
        self.close(m, SyntaxKind::ANNOTATION);
        Ok(SyntaxKind::ANNOTATION)
    }

    /// UnitDeclaration = 'unit' NAME '=' UnitSum
    fn unit_declaration(&mut self) -> PResult<SyntaxKind> {
        let m = self.open();
        self.bump(); // unit
        self.expect(SyntaxKind::NAME)?;
        self.expect(SyntaxKind::EQ)?;
        self.unit_sum()?;
        self.close(m, SyntaxKind::UNIT_DECLARATION);
        Ok(SyntaxKind::UNIT_DECLARATION)
    }

    /// UnitAssignment = VarName 'has' UnitSum
    fn unit_assignment(&mut self) -> PResult<SyntaxKind> {
        let m = self.open();
        self.var_name()?;
        self.expect(SyntaxKind::HAS_KW)?;
        self.unit_sum()?;
        self.close(m, SyntaxKind::UNIT_ASSIGNMENT);
        Ok(SyntaxKind::UNIT_ASSIGNMENT)
    }

    /// MaybeIn = VarName InComp?
    fn maybe_in(&mut self) -> PResult<()> {
        let m = self.open();
        self.var_name()?;
        if self.at(SyntaxKind::IN_KW) {
            self.in_comp()?;
        }
        self.close(m, SyntaxKind::MAYBE_IN);
        Ok(())
    }

    /// VarName = '$'? NAME
    fn var_name(&mut self) -> PResult<()> {
        let m = self.open();
        self.eat(SyntaxKind::DOLLAR);
        self.expect(SyntaxKind::NAME)?;
        self.close(m, SyntaxKind::VAR_NAME);
        Ok(())
    }

    /// InComp = 'in' NAME
    fn in_comp(&mut self) -> PResult<()> {
        let m = self.open();
        self.bump(); // in
        self.expect(SyntaxKind::NAME)?;
        self.close(m, SyntaxKind::IN_COMP);
        Ok(())
    }

    // =========================================================================
    // Expressions (single-operand rules collapse into their operand)
    // =========================================================================

    fn binary(
        &mut self,
        kind: SyntaxKind,
        operators: &[SyntaxKind],
        operand: fn(&mut Self) -> PResult<()>,
    ) -> PResult<()> {
        let lhs = self.marker();
        operand(self)?;
        if self.at_any(operators) {
            while self.at_any(operators) {
                self.bump();
                operand(self)?;
            }
            self.wrap(lhs, kind);
        }
        Ok(())
    }

    /// Sum = Product (('+' | '-') Product)*
    fn sum(&mut self) -> PResult<()> {
        self.binary(
            SyntaxKind::SUM,
            &[SyntaxKind::PLUS, SyntaxKind::MINUS],
            Self::product,
        )
    }

    /// Product = Power (('*' | '/') Power)*
    fn product(&mut self) -> PResult<()> {
        self.binary(
            SyntaxKind::PRODUCT,
            &[SyntaxKind::STAR, SyntaxKind::SLASH],
            Self::power,
        )
    }

    /// Power = Atom ('^' Atom)*
    fn power(&mut self) -> PResult<()> {
        self.binary(SyntaxKind::POWER, &[SyntaxKind::CARET], Self::atom)
    }

    /// Atom = NUMBER | NAME | FunctionCall | '(' Sum ')' | ('+' | '-') Atom
    fn atom(&mut self) -> PResult<()> {
        match self.current() {
            Some(SyntaxKind::NUMBER) => {
                self.bump();
                Ok(())
            }
            Some(SyntaxKind::NAME) if self.nth(1) == Some(SyntaxKind::L_PAREN) => {
                let m = self.open();
                self.bump(); // callee
                self.bump(); // (
                if !self.at(SyntaxKind::R_PAREN) {
                    self.sum()?;
                    while self.eat(SyntaxKind::COMMA) {
                        self.sum()?;
                    }
                }
                self.expect(SyntaxKind::R_PAREN)?;
                self.close(m, SyntaxKind::FUNCTION_CALL);
                Ok(())
            }
            Some(SyntaxKind::NAME) => {
                self.bump();
                Ok(())
            }
            Some(SyntaxKind::L_PAREN) => {
                let m = self.open();
                self.bump();
                self.sum()?;
                self.expect(SyntaxKind::R_PAREN)?;
                self.close(m, SyntaxKind::ATOM);
                Ok(())
            }
            Some(SyntaxKind::PLUS | SyntaxKind::MINUS) => {
                let m = self.open();
                self.bump();
                self.atom()?;
                self.close(m, SyntaxKind::ATOM);
                Ok(())
            }
            _ => Err(self.unexpected()),
        }
    }

    /// UnitSum = UnitProduct (('+' | '-') UnitProduct)*, always a node
    fn unit_sum(&mut self) -> PResult<()> {
        let m = self.open();
        self.unit_product()?;
        while self.at_any(&[SyntaxKind::PLUS, SyntaxKind::MINUS]) {
            self.bump();
            self.unit_product()?;
        }
        self.close(m, SyntaxKind::UNIT_SUM);
        Ok(())
    }

    /// UnitProduct = Unit (('*' | '/' | '^') Unit)*
    fn unit_product(&mut self) -> PResult<()> {
        self.binary(
            SyntaxKind::UNIT_PRODUCT,
            &[SyntaxKind::STAR, SyntaxKind::SLASH, SyntaxKind::CARET],
            Self::unit,
        )
    }

    /// Unit = NAME | NUMBER | '(' UnitSum ')'
    fn unit(&mut self) -> PResult<()> {
        match self.current() {
            Some(SyntaxKind::NAME | SyntaxKind::NUMBER) => {
                self.bump();
                Ok(())
            }
            Some(SyntaxKind::L_PAREN) => {
                let m = self.open();
                self.bump();
                self.unit_sum()?;
                self.expect(SyntaxKind::R_PAREN)?;
                self.close(m, SyntaxKind::UNIT);
                Ok(())
            }
            _ => Err(self.unexpected()),
        }
    }
}
