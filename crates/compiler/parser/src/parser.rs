//! # Move Parser
//!
//! Hand-written recursive descent parser producing a lossless
//! [`SyntaxTree`]. Every token of the input, trivia included, ends up as a
//! leaf of the tree.
//!
//! ## Error recovery
//!
//! The parser never fails. A missing construct is reported and parsing
//! carries on as if it were present; unexpected tokens are wrapped in
//! [`SyntaxKind::Error`] nodes and skipped. Recovery points are:
//!
//! - top level: the next `module`, `script`, `use`, `address` or attribute
//! - module bodies: the next item keyword or the closing `}`
//! - blocks: the next statement start, the closing `}`, or an item keyword
//!   (the user most likely forgot a `}`)
//!
//! Each loop iteration consumes at least one token, so parsing terminates on
//! any input.
//!
//! ## Nesting
//!
//! Recursion is bounded by [`MAX_DEPTH`]. Input nested deeper than that is
//! swallowed into an `Error` node by an iterative bracket matcher.
//!
//! ## Trivia placement
//!
//! Whitespace, comments and unrecognized characters are attached to the node
//! that is open when the next significant token or node starts. Trailing
//! trivia therefore lands in the enclosing node and the file node collects
//! whatever follows the last item.

use crate::lexer::{lex, Token, TokenKind};
use crate::syntax_kind::SyntaxKind;
use crate::tree::{Checkpoint, SyntaxTree, TreeBuilder};
use chumsky::span::SimpleSpan;
use move_ide_diagnostics::Diagnostic;
use tracing::debug;

/// Maximum syntactic nesting before input is consumed without recursing.
pub const MAX_DEPTH: usize = 128;

/// Result of parsing one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse {
    pub tree: SyntaxTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse `text` into a syntax tree. Never fails.
pub fn parse(text: &str) -> Parse {
    let tokens: Vec<Token<'_>> = lex(text).collect();
    let mut diagnostics: Vec<Diagnostic> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::BadCharacter)
        .map(|token| Diagnostic::lexical_error(token.text, token.span))
        .collect();

    let mut parser = Parser::new(text, tokens);
    parser.file();
    diagnostics.append(&mut parser.diagnostics);

    Parse {
        tree: parser.builder.finish(),
        diagnostics,
    }
}

/// Tokens the parser steps over without looking at them.
const fn is_skipped(kind: TokenKind) -> bool {
    kind.is_trivia() || matches!(kind, TokenKind::BadCharacter)
}

const fn is_literal_start(kind: TokenKind) -> bool {
    kind.is_literal()
}

/// Tokens that begin a module member
const fn is_item_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Fun
            | TokenKind::Struct
            | TokenKind::Const
            | TokenKind::Use
            | TokenKind::Friend
            | TokenKind::Spec
            | TokenKind::Public
            | TokenKind::Native
            | TokenKind::Entry
            | TokenKind::Inline
            | TokenKind::Hash
    )
}

/// Tokens that begin a file-level item
const fn is_top_level_start(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Module | TokenKind::Script | TokenKind::Address
    )
}

/// Tokens that end a block early during recovery
const fn is_block_breaker(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Fun
            | TokenKind::Struct
            | TokenKind::Const
            | TokenKind::Public
            | TokenKind::Native
            | TokenKind::Friend
            | TokenKind::Module
            | TokenKind::Hash
    )
}

/// Tokens that begin an expression
const fn is_expr_start(kind: TokenKind) -> bool {
    is_literal_start(kind)
        || kind.is_name_like()
        || matches!(
            kind,
            TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Loop
                | TokenKind::Return
                | TokenKind::Abort
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Bang
                | TokenKind::Amp
                | TokenKind::Star
                | TokenKind::Minus
                | TokenKind::Move
                | TokenKind::Copy
        )
}

/// Tokens an expression parser must not swallow while recovering
const fn is_expr_terminator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Semicolon
            | TokenKind::RBrace
            | TokenKind::RParen
            | TokenKind::RBrack
            | TokenKind::Comma
    ) || is_block_breaker(kind)
}

/// Binding power of a binary operator, `(left, right)`.
const fn infix_binding_power(kind: TokenKind) -> Option<(u8, u8)> {
    let bp = match kind {
        TokenKind::EqEqGreater => (1, 2),
        TokenKind::PipePipe => (3, 4),
        TokenKind::AmpAmp => (5, 6),
        TokenKind::EqEq
        | TokenKind::Neq
        | TokenKind::Less
        | TokenKind::Greater
        | TokenKind::LessEq
        | TokenKind::GreaterEq => (7, 8),
        TokenKind::Pipe => (9, 10),
        TokenKind::Caret => (11, 12),
        TokenKind::Amp => (13, 14),
        TokenKind::Shl | TokenKind::Shr => (15, 16),
        TokenKind::Plus | TokenKind::Minus => (17, 18),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => (19, 20),
        _ => return None,
    };
    Some(bp)
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token<'src>>,
    /// Index of the next token (trivia or not) to hand to the builder
    pos: usize,
    builder: TreeBuilder,
    diagnostics: Vec<Diagnostic>,
    depth: usize,
    depth_reported: bool,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, tokens: Vec<Token<'src>>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            builder: TreeBuilder::new(source),
            diagnostics: Vec::new(),
            depth: 0,
            depth_reported: false,
        }
    }

    // ---- Token access ------------------------------------------------------

    /// Raw index of the `n`-th significant token from the cursor
    fn nth_index(&self, n: usize) -> Option<usize> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.pos)
            .filter(|(_, token)| !is_skipped(token.kind))
            .nth(n)
            .map(|(index, _)| index)
    }

    /// Significant token kinds from the cursor on
    fn lookahead(&self) -> impl Iterator<Item = TokenKind> + '_ {
        self.tokens[self.pos..]
            .iter()
            .map(|token| token.kind)
            .filter(|kind| !is_skipped(*kind))
    }

    fn nth(&self, n: usize) -> Option<TokenKind> {
        self.nth_index(n).map(|index| self.tokens[index].kind)
    }

    fn peek(&self) -> Option<TokenKind> {
        self.nth(0)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    fn at_eof(&self) -> bool {
        self.peek().is_none()
    }

    fn at_name(&self) -> bool {
        self.peek().is_some_and(TokenKind::is_name_like)
    }

    fn current_text(&self) -> &'src str {
        self.nth_index(0)
            .map_or("", |index| self.tokens[index].text)
    }

    fn current_span(&self) -> SimpleSpan<usize> {
        self.nth_index(0).map_or_else(
            || SimpleSpan::from(self.source.len()..self.source.len()),
            |index| self.tokens[index].span,
        )
    }

    /// Hand pending trivia to the node that is currently open
    fn flush_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !is_skipped(token.kind) {
                break;
            }
            self.builder.token(token.kind, token.span);
            self.pos += 1;
        }
    }

    /// Append the next significant token to the open node
    fn bump(&mut self) {
        self.flush_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind, token.span);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        self.error_expected(&format!("'{kind}'"));
        false
    }

    fn expect_name(&mut self, what: &str) -> bool {
        if self.at_name() {
            self.bump();
            true
        } else {
            self.error_expected(what);
            false
        }
    }

    /// `>>` closing two type argument lists at once is split in two `>`
    fn expect_closing_angle(&mut self) -> bool {
        if self.at(TokenKind::Shr) {
            if let Some(index) = self.nth_index(0) {
                let token = self.tokens[index];
                let mid = token.span.start + 1;
                let first = Token {
                    kind: TokenKind::Greater,
                    span: SimpleSpan::from(token.span.start..mid),
                    text: token.text.get(..1).unwrap_or_default(),
                };
                let second = Token {
                    kind: TokenKind::Greater,
                    span: SimpleSpan::from(mid..token.span.end),
                    text: token.text.get(1..).unwrap_or_default(),
                };
                self.tokens[index] = first;
                self.tokens.insert(index + 1, second);
            }
        }
        self.expect(TokenKind::Greater)
    }

    // ---- Node construction -------------------------------------------------

    fn start(&mut self, kind: SyntaxKind) -> crate::tree::NodeId {
        self.flush_trivia();
        self.builder.start_node(kind)
    }

    fn finish(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.flush_trivia();
        self.builder.checkpoint()
    }

    fn start_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind);
    }

    // ---- Diagnostics -------------------------------------------------------

    fn error_expected(&mut self, expected: &str) {
        let diagnostic = if self.at_eof() {
            Diagnostic::unexpected_eof(expected, self.source.len())
        } else {
            Diagnostic::unexpected_token(
                expected,
                &format!("'{}'", self.current_text()),
                self.current_span(),
            )
        };
        debug!("parse error: {}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    /// Report and wrap tokens in an `Error` node until `stop` holds.
    /// Always consumes at least one token.
    fn recover_until(&mut self, expected: &str, stop: impl Fn(TokenKind) -> bool) {
        self.error_expected(expected);
        self.start(SyntaxKind::Error);
        self.bump();
        while let Some(kind) = self.peek() {
            if stop(kind) {
                break;
            }
            self.bump();
        }
        self.finish();
    }

    // ---- Nesting guard -----------------------------------------------------

    /// Run `f` one level deeper, or swallow the next token group into an
    /// `Error` node when the nesting limit is reached.
    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        if self.depth >= MAX_DEPTH {
            self.swallow_too_deep();
            return;
        }
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn swallow_too_deep(&mut self) {
        if !self.depth_reported {
            self.depth_reported = true;
            self.diagnostics.push(Diagnostic::error(
                move_ide_diagnostics::DiagnosticCode::NestingTooDeep,
                format!("Nesting exceeds the maximum depth of {MAX_DEPTH}"),
            )
            .with_location(self.current_span()));
        }

        self.start(SyntaxKind::Error);
        let mut open = 0usize;
        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBrack => open += 1,
                TokenKind::RParen | TokenKind::RBrace | TokenKind::RBrack => {
                    if open == 0 {
                        break;
                    }
                    open -= 1;
                }
                _ => {}
            }
            self.bump();
            if open == 0 {
                break;
            }
        }
        self.finish();
    }

    // ---- Top level ---------------------------------------------------------

    fn file(&mut self) {
        let _span = tracing::trace_span!("parse").entered();
        // Opened before any trivia is flushed so leading comments belong to it.
        self.builder.start_node(SyntaxKind::File);
        while !self.at_eof() {
            self.top_level_item();
        }
        self.flush_trivia();
        self.finish();
    }

    fn top_level_item(&mut self) {
        let cp = self.checkpoint();
        let had_attributes = self.attributes();
        match self.peek() {
            Some(TokenKind::Module) => self.module(cp),
            Some(TokenKind::Script) => self.script(cp),
            Some(TokenKind::Use) => self.use_decl(cp),
            Some(TokenKind::Address) => self.address_block(cp),
            _ if had_attributes => {
                self.error_expected("'module' or 'script' after attributes");
                self.start_at(cp, SyntaxKind::Error);
                self.finish();
            }
            _ => {
                debug!("skipping unexpected top-level token");
                self.recover_until("'module', 'script', 'use' or 'address'", |kind| {
                    matches!(
                        kind,
                        TokenKind::Module
                            | TokenKind::Script
                            | TokenKind::Use
                            | TokenKind::Address
                            | TokenKind::Hash
                    )
                });
            }
        }
    }

    /// `#[...]` attributes; returns whether any were parsed
    fn attributes(&mut self) -> bool {
        let mut any = false;
        while self.at(TokenKind::Hash) && self.nth(1) == Some(TokenKind::LBrack) {
            any = true;
            self.start(SyntaxKind::Attribute);
            self.bump();
            self.bump();
            let mut open = 0usize;
            while let Some(kind) = self.peek() {
                match kind {
                    TokenKind::LBrack | TokenKind::LParen => open += 1,
                    TokenKind::RBrack if open == 0 => break,
                    TokenKind::RBrack | TokenKind::RParen => open = open.saturating_sub(1),
                    TokenKind::RBrace | TokenKind::LBrace => break,
                    // An unclosed attribute must not eat the item it annotates.
                    kind if is_item_start(kind) || is_top_level_start(kind) => break,
                    _ => {}
                }
                self.bump();
            }
            self.expect(TokenKind::RBrack);
            self.finish();
        }
        any
    }

    /// `address 0x1 { module ... }`
    fn address_block(&mut self, cp: Checkpoint) {
        self.start_at(cp, SyntaxKind::AddressBlock);
        self.bump();
        match self.peek() {
            Some(TokenKind::HexLiteral | TokenKind::IntegerLiteral) => self.bump(),
            Some(kind) if kind.is_name_like() => self.bump(),
            _ => self.error_expected("address"),
        }
        if self.expect(TokenKind::LBrace) {
            while !self.at(TokenKind::RBrace) && !self.at_eof() {
                let cp = self.checkpoint();
                let had_attributes = self.attributes();
                if self.at(TokenKind::Module) {
                    self.module(cp);
                } else if had_attributes {
                    self.error_expected("'module' after attributes");
                    self.start_at(cp, SyntaxKind::Error);
                    self.finish();
                } else {
                    self.recover_until("'module'", |kind| {
                        matches!(
                            kind,
                            TokenKind::Module | TokenKind::RBrace | TokenKind::Hash
                        )
                    });
                }
            }
            self.expect(TokenKind::RBrace);
        }
        self.finish();
    }

    /// `module <addr>::<name> { items }` or `module <name> { items }`
    fn module(&mut self, cp: Checkpoint) {
        self.start_at(cp, SyntaxKind::Module);
        self.bump();

        let address_first = matches!(
            self.peek(),
            Some(TokenKind::HexLiteral | TokenKind::IntegerLiteral)
        ) || self.at_name();
        if address_first && self.nth(1) == Some(TokenKind::ColonColon) {
            self.bump();
            self.bump();
        }
        self.expect_name("module name");

        if self.eat(TokenKind::Semicolon) {
            // Single-module file form: items run to the end of the input.
            while !self.at_eof() {
                self.module_item();
            }
        } else if self.expect(TokenKind::LBrace) {
            while !self.at(TokenKind::RBrace) && !self.at_eof() {
                self.module_item();
            }
            self.expect(TokenKind::RBrace);
        }
        self.finish();
    }

    /// `script { items }`
    fn script(&mut self, cp: Checkpoint) {
        self.start_at(cp, SyntaxKind::Script);
        self.bump();
        if self.expect(TokenKind::LBrace) {
            while !self.at(TokenKind::RBrace) && !self.at_eof() {
                self.module_item();
            }
            self.expect(TokenKind::RBrace);
        }
        self.finish();
    }

    // ---- Module items ------------------------------------------------------

    fn module_item(&mut self) {
        let cp = self.checkpoint();
        let had_attributes = self.attributes();
        let had_modifiers = self.modifiers();

        match self.peek() {
            Some(TokenKind::Fun) => self.function(cp),
            Some(TokenKind::Struct) => self.struct_decl(cp),
            Some(TokenKind::Const) => self.const_decl(cp),
            Some(TokenKind::Use) => self.use_decl(cp),
            Some(TokenKind::Friend) => self.friend_decl(cp),
            Some(TokenKind::Spec) => self.spec_block(cp),
            _ if had_attributes || had_modifiers => {
                self.error_expected("'fun', 'struct' or 'const'");
                self.start_at(cp, SyntaxKind::Error);
                self.finish();
            }
            _ => {
                debug!("skipping unexpected module item token");
                self.recover_until(
                    "'fun', 'struct', 'const', 'use', 'friend' or 'spec'",
                    |kind| is_item_start(kind) || kind == TokenKind::RBrace,
                );
            }
        }
    }

    /// Visibility and function modifiers, accepted in any order
    fn modifiers(&mut self) -> bool {
        let mut any = false;
        loop {
            match self.peek() {
                Some(TokenKind::Public) => {
                    self.bump();
                    if self.at(TokenKind::LParen)
                        && self.nth(1).is_some_and(TokenKind::is_name_like)
                        && self.nth(2) == Some(TokenKind::RParen)
                    {
                        self.bump();
                        self.bump();
                        self.bump();
                    }
                }
                Some(TokenKind::Entry | TokenKind::Native | TokenKind::Inline)
                    if self.nth(1) != Some(TokenKind::Colon) =>
                {
                    self.bump();
                }
                _ => return any,
            }
            any = true;
        }
    }

    fn function(&mut self, cp: Checkpoint) {
        self.start_at(cp, SyntaxKind::Function);
        self.bump();
        self.expect_name("function name");
        if self.at(TokenKind::Less) {
            self.type_params();
        }
        self.param_list();

        if self.at(TokenKind::Colon) {
            self.start(SyntaxKind::RetType);
            self.bump();
            self.type_();
            self.finish();
        }

        if self.at(TokenKind::Acquires) {
            self.start(SyntaxKind::Acquires);
            self.bump();
            loop {
                self.path();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.finish();
        }

        if self.at(TokenKind::LBrace) {
            self.block();
        } else {
            self.expect(TokenKind::Semicolon);
        }
        self.finish();
    }

    fn type_params(&mut self) {
        self.start(SyntaxKind::TypeParams);
        self.bump();
        while !self.at(TokenKind::Greater) && !self.at_eof() {
            if !self.at_name() && !self.at(TokenKind::Phantom) {
                self.error_expected("type parameter");
                break;
            }
            self.start(SyntaxKind::TypeParam);
            self.eat(TokenKind::Phantom);
            self.expect_name("type parameter name");
            if self.eat(TokenKind::Colon) {
                loop {
                    if self.at_name() || self.at(TokenKind::Copy) {
                        self.bump();
                    } else {
                        self.error_expected("ability");
                    }
                    if !self.eat(TokenKind::Plus) {
                        break;
                    }
                }
            }
            self.finish();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing_angle();
        self.finish();
    }

    fn param_list(&mut self) {
        self.start(SyntaxKind::ParamList);
        if self.expect(TokenKind::LParen) {
            while !self.at(TokenKind::RParen) && !self.at_eof() {
                if self.at_name() || self.at(TokenKind::Mut) {
                    self.start(SyntaxKind::Param);
                    self.eat(TokenKind::Mut);
                    self.expect_name("parameter name");
                    self.expect(TokenKind::Colon);
                    self.type_();
                    self.finish();
                } else if self
                    .peek()
                    .is_some_and(|kind| kind == TokenKind::LBrace || is_block_breaker(kind))
                {
                    break;
                } else {
                    self.recover_until("parameter", |kind| {
                        matches!(
                            kind,
                            TokenKind::Comma | TokenKind::RParen | TokenKind::LBrace
                        )
                    });
                }
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RParen);
        }
        self.finish();
    }

    fn struct_decl(&mut self, cp: Checkpoint) {
        self.start_at(cp, SyntaxKind::Struct);
        self.bump();
        self.expect_name("struct name");
        if self.at(TokenKind::Less) {
            self.type_params();
        }
        if self.at(TokenKind::Has) {
            self.abilities();
        }
        if self.at(TokenKind::LBrace) {
            self.field_list();
            if self.at(TokenKind::Has) {
                self.abilities();
                self.expect(TokenKind::Semicolon);
            }
        } else {
            self.expect(TokenKind::Semicolon);
        }
        self.finish();
    }

    fn abilities(&mut self) {
        self.start(SyntaxKind::Abilities);
        self.bump();
        loop {
            if self.at_name() || self.at(TokenKind::Copy) {
                self.bump();
            } else {
                self.error_expected("ability");
                break;
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.finish();
    }

    fn field_list(&mut self) {
        self.start(SyntaxKind::FieldList);
        self.bump();
        while !self.at(TokenKind::RBrace) && !self.at_eof() {
            if self.at_name() {
                self.start(SyntaxKind::Field);
                self.bump();
                self.expect(TokenKind::Colon);
                self.type_();
                self.finish();
            } else if self.peek().is_some_and(is_block_breaker) {
                break;
            } else {
                self.recover_until("field", |kind| {
                    matches!(kind, TokenKind::Comma | TokenKind::RBrace)
                });
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace);
        self.finish();
    }

    fn const_decl(&mut self, cp: Checkpoint) {
        self.start_at(cp, SyntaxKind::Const);
        self.bump();
        self.expect_name("constant name");
        self.expect(TokenKind::Colon);
        self.type_();
        if self.expect(TokenKind::Eq) {
            self.expr();
        }
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    /// `use a::m;`, `use a::m::X;`, `use a::m as n;`, `use a::m::{X, Y as Z};`
    fn use_decl(&mut self, cp: Checkpoint) {
        self.start_at(cp, SyntaxKind::Use);
        self.bump();

        self.start(SyntaxKind::Path);
        match self.peek() {
            Some(TokenKind::HexLiteral | TokenKind::IntegerLiteral | TokenKind::AddressLiteral) => {
                self.bump();
            }
            _ => {
                self.expect_name("module path");
            }
        }
        while self.at(TokenKind::ColonColon) && self.nth(1) != Some(TokenKind::LBrace) {
            self.bump();
            self.expect_name("path segment");
        }
        self.finish();

        if self.at(TokenKind::ColonColon) {
            self.bump();
            self.start(SyntaxKind::UseGroup);
            self.bump();
            while !self.at(TokenKind::RBrace) && !self.at_eof() {
                if !self.at_name() {
                    self.error_expected("imported name");
                    break;
                }
                self.start(SyntaxKind::UseMember);
                self.bump();
                if self.eat(TokenKind::As) {
                    self.expect_name("alias");
                }
                self.finish();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RBrace);
            self.finish();
        } else if self.eat(TokenKind::As) {
            self.expect_name("alias");
        }
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    fn friend_decl(&mut self, cp: Checkpoint) {
        self.start_at(cp, SyntaxKind::Friend);
        self.bump();
        self.path();
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    /// `spec` blocks are kept as opaque balanced token groups
    fn spec_block(&mut self, cp: Checkpoint) {
        self.start_at(cp, SyntaxKind::SpecBlock);
        self.bump();
        // `spec module { ... }` may declare helper functions of its own.
        let module_spec = self.at(TokenKind::Module);
        while let Some(kind) = self.peek() {
            match kind {
                TokenKind::LBrace => {
                    self.skip_balanced_braces(!module_spec);
                    break;
                }
                TokenKind::Semicolon => {
                    self.bump();
                    break;
                }
                TokenKind::RBrace => break,
                _ => self.bump(),
            }
        }
        self.finish();
    }

    /// Skips a `{ ... }` group. With `stop_at_items`, an item keyword directly
    /// inside the outer braces ends an unclosed group.
    fn skip_balanced_braces(&mut self, stop_at_items: bool) {
        let mut open = 0usize;
        while let Some(kind) = self.peek() {
            if stop_at_items && open == 1 && (is_item_start(kind) || is_top_level_start(kind)) {
                debug!("unclosed spec block ends before {kind:?}");
                break;
            }
            self.bump();
            match kind {
                TokenKind::LBrace => open += 1,
                TokenKind::RBrace => {
                    open = open.saturating_sub(1);
                    if open == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
        self.error_expected("'}'");
    }

    /// `a::b::c` as a `Path` node
    fn path(&mut self) {
        self.start(SyntaxKind::Path);
        match self.peek() {
            Some(TokenKind::HexLiteral | TokenKind::IntegerLiteral | TokenKind::AddressLiteral) => {
                self.bump();
            }
            _ => {
                self.expect_name("path");
            }
        }
        while self.at(TokenKind::ColonColon) {
            self.bump();
            self.expect_name("path segment");
        }
        if self.at(TokenKind::Less) {
            self.type_args();
        }
        self.finish();
    }

    // ---- Types -------------------------------------------------------------

    fn type_(&mut self) {
        self.nested(Self::type_inner);
    }

    fn type_inner(&mut self) {
        match self.peek() {
            Some(TokenKind::Amp) => {
                self.start(SyntaxKind::RefType);
                self.bump();
                self.eat(TokenKind::Mut);
                self.type_();
                self.finish();
            }
            Some(TokenKind::LParen) => {
                self.start(SyntaxKind::TupleType);
                self.bump();
                while !self.at(TokenKind::RParen) && !self.at_eof() {
                    self.type_();
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RParen);
                self.finish();
            }
            Some(TokenKind::HexLiteral | TokenKind::IntegerLiteral)
                if self.nth(1) == Some(TokenKind::ColonColon) =>
            {
                self.path_type();
            }
            Some(kind) if kind.is_name_like() => self.path_type(),
            _ => self.error_expected("type"),
        }
    }

    fn path_type(&mut self) {
        self.start(SyntaxKind::PathType);
        self.bump();
        while self.at(TokenKind::ColonColon) {
            self.bump();
            self.expect_name("type name");
        }
        if self.at(TokenKind::Less) {
            self.type_args();
        }
        self.finish();
    }

    fn type_args(&mut self) {
        self.start(SyntaxKind::TypeArgs);
        self.bump();
        while !self.at(TokenKind::Greater) && !self.at(TokenKind::Shr) && !self.at_eof() {
            self.type_();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_closing_angle();
        self.finish();
    }

    /// Whether the `<` at the cursor opens a type argument list rather than
    /// a comparison: a balanced run of type tokens followed by a call, a
    /// struct literal, a vector literal or `::`.
    fn looks_like_type_args(&self) -> bool {
        let mut open = 0usize;
        let mut tokens = self.lookahead();
        while let Some(kind) = tokens.next() {
            match kind {
                TokenKind::Less => open += 1,
                TokenKind::Greater => open = open.saturating_sub(1),
                TokenKind::Shr => open = open.saturating_sub(2),
                TokenKind::Comma
                | TokenKind::ColonColon
                | TokenKind::Amp
                | TokenKind::Mut
                | TokenKind::HexLiteral
                | TokenKind::IntegerLiteral => {}
                kind if kind.is_name_like() => {}
                _ => return false,
            }
            if open == 0 {
                return matches!(
                    tokens.next(),
                    Some(
                        TokenKind::LParen
                            | TokenKind::LBrace
                            | TokenKind::LBrack
                            | TokenKind::ColonColon
                    )
                );
            }
        }
        false
    }

    // ---- Statements --------------------------------------------------------

    fn block(&mut self) {
        self.nested(Self::block_inner);
    }

    fn block_inner(&mut self) {
        self.start(SyntaxKind::Block);
        if self.expect(TokenKind::LBrace) {
            while let Some(kind) = self.peek() {
                if kind == TokenKind::RBrace {
                    break;
                }
                if is_block_breaker(kind) {
                    debug!("leaving block at item keyword");
                    break;
                }
                self.statement();
            }
            self.expect(TokenKind::RBrace);
        }
        self.finish();
    }

    fn statement(&mut self) {
        match self.peek() {
            Some(TokenKind::Let) => self.let_stmt(),
            Some(TokenKind::Use) => {
                let cp = self.checkpoint();
                self.use_decl(cp);
            }
            Some(TokenKind::Spec) => {
                let cp = self.checkpoint();
                self.spec_block(cp);
            }
            Some(TokenKind::Semicolon) => self.bump(),
            Some(kind) if is_expr_start(kind) => {
                let cp = self.checkpoint();
                let ends_with_block = matches!(
                    kind,
                    TokenKind::If | TokenKind::While | TokenKind::Loop | TokenKind::LBrace
                );
                self.expr();
                if self.at(TokenKind::Semicolon) {
                    self.start_at(cp, SyntaxKind::ExprStmt);
                    self.bump();
                    self.finish();
                } else if !self.at(TokenKind::RBrace) && !ends_with_block {
                    self.error_expected("';'");
                    self.start_at(cp, SyntaxKind::ExprStmt);
                    self.finish();
                }
            }
            _ => {
                self.recover_until("statement", |kind| {
                    kind == TokenKind::Let
                        || kind == TokenKind::RBrace
                        || is_expr_start(kind)
                        || is_block_breaker(kind)
                });
            }
        }
    }

    fn let_stmt(&mut self) {
        self.start(SyntaxKind::LetStmt);
        self.bump();
        self.pattern();
        if self.eat(TokenKind::Colon) {
            self.type_();
        }
        if self.eat(TokenKind::Eq) {
            self.expr();
        }
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    fn pattern(&mut self) {
        self.nested(Self::pattern_inner);
    }

    fn pattern_inner(&mut self) {
        self.start(SyntaxKind::Pattern);
        match self.peek() {
            Some(TokenKind::LParen) => {
                self.bump();
                while !self.at(TokenKind::RParen) && !self.at_eof() {
                    self.pattern();
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect(TokenKind::RParen);
            }
            Some(TokenKind::Mut) => {
                self.bump();
                self.expect_name("binding name");
            }
            Some(kind) if kind.is_name_like() || kind == TokenKind::HexLiteral => {
                self.bump();
                while self.at(TokenKind::ColonColon) {
                    self.bump();
                    self.expect_name("path segment");
                }
                if self.at(TokenKind::Less) && self.looks_like_type_args() {
                    self.type_args();
                }
                if self.at(TokenKind::LBrace) {
                    self.bump();
                    while !self.at(TokenKind::RBrace) && !self.at_eof() {
                        if self.eat(TokenKind::DotDot) {
                            continue;
                        }
                        if !self.at_name() {
                            self.error_expected("field name");
                            break;
                        }
                        if self.nth(1) == Some(TokenKind::Colon) {
                            self.bump();
                            self.bump();
                            self.pattern();
                        } else {
                            self.pattern();
                        }
                        if !self.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                    self.expect(TokenKind::RBrace);
                } else if self.at(TokenKind::LParen) {
                    self.bump();
                    while !self.at(TokenKind::RParen) && !self.at_eof() {
                        self.pattern();
                        if !self.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                    self.expect(TokenKind::RParen);
                }
            }
            _ => self.error_expected("pattern"),
        }
        self.finish();
    }

    // ---- Expressions -------------------------------------------------------

    fn expr(&mut self) {
        self.nested(Self::expr_inner);
    }

    fn expr_inner(&mut self) {
        let cp = self.checkpoint();
        self.binary_expr(0);
        if self.at(TokenKind::Eq) {
            self.start_at(cp, SyntaxKind::AssignExpr);
            self.bump();
            self.expr();
            self.finish();
        }
    }

    /// Precedence climbing over binary operators. Casts bind tighter than
    /// every binary operator.
    fn binary_expr(&mut self, min_bp: u8) {
        let cp = self.checkpoint();
        self.unary_expr();
        loop {
            let Some(kind) = self.peek() else { break };
            if kind == TokenKind::As {
                self.start_at(cp, SyntaxKind::CastExpr);
                self.bump();
                self.type_();
                self.finish();
                continue;
            }
            let Some((left_bp, right_bp)) = infix_binding_power(kind) else {
                break;
            };
            if left_bp < min_bp {
                break;
            }
            self.start_at(cp, SyntaxKind::BinaryExpr);
            self.bump();
            self.nested(|p| p.binary_expr(right_bp));
            self.finish();
        }
    }

    fn unary_expr(&mut self) {
        self.nested(Self::unary_inner);
    }

    fn unary_inner(&mut self) {
        match self.peek() {
            Some(TokenKind::Bang | TokenKind::Star | TokenKind::Minus) => {
                self.start(SyntaxKind::UnaryExpr);
                self.bump();
                self.unary_expr();
                self.finish();
            }
            Some(TokenKind::Amp) => {
                self.start(SyntaxKind::UnaryExpr);
                self.bump();
                self.eat(TokenKind::Mut);
                self.unary_expr();
                self.finish();
            }
            Some(TokenKind::Move | TokenKind::Copy) if self.nth(1).is_some_and(TokenKind::is_name_like) => {
                self.start(SyntaxKind::UnaryExpr);
                self.bump();
                self.unary_expr();
                self.finish();
            }
            _ => self.postfix_expr(),
        }
    }

    fn postfix_expr(&mut self) {
        let cp = self.checkpoint();
        self.primary_expr();
        loop {
            match self.peek() {
                Some(TokenKind::Dot) => {
                    self.start_at(cp, SyntaxKind::FieldExpr);
                    self.bump();
                    self.expect_name("field name");
                    if self.at(TokenKind::Less) && self.looks_like_type_args() {
                        self.type_args();
                    }
                    self.finish();
                    if self.at(TokenKind::LParen) {
                        self.start_at(cp, SyntaxKind::CallExpr);
                        self.arg_list();
                        self.finish();
                    }
                }
                Some(TokenKind::LBrack) => {
                    self.start_at(cp, SyntaxKind::IndexExpr);
                    self.bump();
                    self.expr();
                    self.expect(TokenKind::RBrack);
                    self.finish();
                }
                _ => break,
            }
        }
    }

    fn primary_expr(&mut self) {
        let Some(kind) = self.peek() else {
            self.error_expected("expression");
            return;
        };
        match kind {
            kind if is_literal_start(kind)
                && !(kind == TokenKind::HexLiteral
                    && self.nth(1) == Some(TokenKind::ColonColon)) =>
            {
                self.start(SyntaxKind::Literal);
                self.bump();
                self.finish();
            }
            TokenKind::LParen => self.paren_expr(),
            TokenKind::LBrace => self.block(),
            TokenKind::If => {
                self.start(SyntaxKind::IfExpr);
                self.bump();
                self.expr();
                self.expr();
                if self.eat(TokenKind::Else) {
                    self.expr();
                }
                self.finish();
            }
            TokenKind::While => {
                self.start(SyntaxKind::WhileExpr);
                self.bump();
                self.expr();
                self.expr();
                self.finish();
            }
            TokenKind::Loop => {
                self.start(SyntaxKind::LoopExpr);
                self.bump();
                self.expr();
                self.finish();
            }
            TokenKind::Return => {
                self.start(SyntaxKind::ReturnExpr);
                self.bump();
                if self.peek().is_some_and(|k| is_expr_start(k) && !is_expr_terminator(k)) {
                    self.expr();
                }
                self.finish();
            }
            TokenKind::Abort if self.nth(1) == Some(TokenKind::LParen) => {
                // `abort(code)` reads as a call to the `abort` built-in
                let cp = self.checkpoint();
                self.start(SyntaxKind::PathExpr);
                self.bump();
                self.finish();
                self.start_at(cp, SyntaxKind::CallExpr);
                self.arg_list();
                self.finish();
            }
            TokenKind::Abort => {
                self.start(SyntaxKind::AbortExpr);
                self.bump();
                self.expr();
                self.finish();
            }
            TokenKind::Break => {
                self.start(SyntaxKind::BreakExpr);
                self.bump();
                self.finish();
            }
            TokenKind::Continue => {
                self.start(SyntaxKind::ContinueExpr);
                self.bump();
                self.finish();
            }
            TokenKind::Vector
                if self.nth(1) == Some(TokenKind::LBrack)
                    || (self.nth(1) == Some(TokenKind::Less) && self.vector_literal_ahead()) =>
            {
                self.vector_lit();
            }
            TokenKind::HexLiteral => self.path_expr(),
            kind if kind.is_name_like() => self.path_expr(),
            _ if is_expr_terminator(kind) => self.error_expected("expression"),
            _ => self.recover_until("expression", is_expr_terminator),
        }
    }

    /// `vector<T>[...]` as opposed to a path like `vector<T>::f`
    fn vector_literal_ahead(&self) -> bool {
        let mut open = 0usize;
        let mut tokens = self.lookahead().skip(1);
        while let Some(kind) = tokens.next() {
            match kind {
                TokenKind::Less => open += 1,
                TokenKind::Greater => open = open.saturating_sub(1),
                TokenKind::Shr => open = open.saturating_sub(2),
                TokenKind::Semicolon | TokenKind::LBrace | TokenKind::RBrace => return false,
                _ => {}
            }
            if open == 0 {
                return tokens.next() == Some(TokenKind::LBrack);
            }
        }
        false
    }

    fn vector_lit(&mut self) {
        self.start(SyntaxKind::VectorLit);
        self.bump();
        if self.at(TokenKind::Less) {
            self.type_args();
        }
        if self.expect(TokenKind::LBrack) {
            while !self.at(TokenKind::RBrack) && !self.at_eof() {
                self.expr();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RBrack);
        }
        self.finish();
    }

    /// `()`, `(e)` or `(a, b, ...)`
    fn paren_expr(&mut self) {
        let node = self.start(SyntaxKind::ParenExpr);
        self.bump();
        if self.at(TokenKind::RParen) {
            self.builder.retag(node, SyntaxKind::TupleExpr);
        } else {
            self.expr();
            if self.at(TokenKind::Comma) {
                self.builder.retag(node, SyntaxKind::TupleExpr);
                while self.eat(TokenKind::Comma) {
                    if self.at(TokenKind::RParen) {
                        break;
                    }
                    self.expr();
                }
            }
        }
        self.expect(TokenKind::RParen);
        self.finish();
    }

    /// Paths, with what may follow them: a call, a macro call or a struct
    /// literal.
    fn path_expr(&mut self) {
        let cp = self.checkpoint();
        self.start(SyntaxKind::PathExpr);
        let mut last_segment = self.current_text();
        self.bump();
        while self.at(TokenKind::ColonColon) && self.nth(1).is_some_and(TokenKind::is_name_like)
        {
            self.bump();
            last_segment = self.current_text();
            self.bump();
        }
        if self.at(TokenKind::Bang) && self.nth(1) == Some(TokenKind::LParen) {
            self.bump();
        }
        if self.at(TokenKind::Less) && self.looks_like_type_args() {
            self.type_args();
        }
        self.finish();

        if self.at(TokenKind::LParen) {
            self.start_at(cp, SyntaxKind::CallExpr);
            self.arg_list();
            self.finish();
        } else if self.at(TokenKind::LBrace)
            && last_segment.starts_with(|c: char| c.is_ascii_uppercase())
        {
            self.start_at(cp, SyntaxKind::StructLit);
            self.bump();
            while !self.at(TokenKind::RBrace) && !self.at_eof() {
                if !self.at_name() {
                    self.error_expected("field name");
                    break;
                }
                self.start(SyntaxKind::StructLitField);
                self.bump();
                if self.eat(TokenKind::Colon) {
                    self.expr();
                }
                self.finish();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::RBrace);
            self.finish();
        }
    }

    fn arg_list(&mut self) {
        self.start(SyntaxKind::ArgList);
        self.bump();
        while !self.at(TokenKind::RParen) && !self.at_eof() {
            self.expr();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen);
        self.finish();
    }
}
