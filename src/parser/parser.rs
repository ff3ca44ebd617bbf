//! Parser implementation for building µGo syntax trees.
//!
//! This module contains the main Parser struct and the file/package entry
//! points. Expressions go through a Pratt parser with NUD/LED handlers;
//! top-level declarations dispatch on their leading keyword.
//!
//! It maintains lookup tables for:
//! - Declaration handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{
        builder::{FileBuilder, PackageBuilder},
        declarations::{File, Package, PackageSpec},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    Pos, Span, MK_TOKEN,
};

use super::{
    decl::parse_import_decl,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, DeclHandler, DeclLookup, LEDHandler,
        LEDLookup, NUDHandler, NUDLookup,
    },
};

/// Deepest expression tree the parser builds before giving up with
/// `NestingTooDeep`. Parsing, walking and dropping a tree all recurse once
/// per level.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The main parser structure that maintains parsing state.
///
/// Holds the token stream of one file and the lookup tables used to parse
/// declarations and expressions.
pub struct Parser {
    /// The list of tokens to parse, always ending with `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the file being parsed
    filename: String,
    /// Current expression nesting
    depth: usize,
    decl_lookup: DeclLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a parser over `tokens`. An `EOF` token is appended if the
    /// stream does not already end with one.
    pub fn new(mut tokens: Vec<Token>, filename: impl Into<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map(|token| token.span.end).unwrap_or_default();
            tokens.push(MK_TOKEN!(
                TokenKind::EOF,
                String::from("EOF"),
                Span::new(end, end)
            ));
        }

        Parser {
            tokens,
            pos: 0,
            filename: filename.into(),
            depth: 0,
            decl_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous one. Stays on
    /// `EOF` once it is reached.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance().clone());
        }

        match error {
            Some(error) => Err(error),
            None => Err(self.unexpected(format!("expected {}", expected_kind))),
        }
    }

    /// Expects a token of the specified kind with the default error.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Builds an `UnexpectedTokenDetailed` error at the current token.
    pub fn unexpected(&self, message: impl Into<String>) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: describe_token(self.current_token()),
                message: message.into(),
            },
            self.get_position(),
        )
    }

    /// Enters one level of expression nesting.
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn nesting(&self) -> usize {
        self.depth
    }

    pub fn reset_nesting(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_decl_lookup(&self) -> &DeclLookup {
        &self.decl_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Binding power of the current token, `Default` if it has no LED.
    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power_lookup
            .get(&self.current_token_kind())
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Leaves the binding power table alone: `-` is both a prefix and an
    /// infix operator and keeps its additive power.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a top-level declaration handler for a keyword.
    pub fn decl(&mut self, kind: TokenKind, decl_fn: DeclHandler) {
        self.decl_lookup.insert(kind, decl_fn);
    }

    /// Returns the offset of the current token.
    pub fn get_position(&self) -> Pos {
        self.current_token().span.start
    }

    pub fn get_filename(&self) -> &str {
        &self.filename
    }
}

/// Text of a token for diagnostics. Inserted semicolons read as what they
/// stand for.
pub fn describe_token(token: &Token) -> String {
    match (token.kind, token.value.as_str()) {
        (TokenKind::Semicolon, "\n") => String::from("newline"),
        (TokenKind::Semicolon, "") | (TokenKind::EOF, _) => String::from("end of file"),
        _ => token.value.clone(),
    }
}

/// Parses the source of one file into a [`File`].
///
/// The package clause comes first, then imports, then any mix of `const`,
/// `var` and `func` declarations. The finished file is range checked.
pub fn parse_file(filename: &str, source: &str) -> Result<File, Error> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(tokens, filename);
    create_token_lookups(&mut parser);

    let pkg_pos = parser.expect(TokenKind::Package)?.span.start;
    let error = parser.unexpected("expected package name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;
    let pkg = PackageSpec::new(pkg_pos, name.span.start, name.value)?;
    parser.expect(TokenKind::Semicolon)?;

    let mut builder = FileBuilder::new(filename, source, pkg);

    while parser.current_token_kind() == TokenKind::Import {
        parse_import_decl(&mut parser, &mut builder)?;
        parser.expect(TokenKind::Semicolon)?;
    }

    while parser.has_tokens() {
        let kind = parser.current_token_kind();
        let Some(handler) = parser.get_decl_lookup().get(&kind).copied() else {
            let message = if kind == TokenKind::Import {
                "imports must come before other declarations"
            } else {
                "expected declaration"
            };
            return Err(parser.unexpected(message));
        };

        handler(&mut parser, &mut builder)?;
        parser.expect(TokenKind::Semicolon)?;
    }

    let file = builder.finish()?;
    debug!(
        filename = %parser.get_filename(),
        package = %file.pkg.name,
        decls = file.imports.len() + file.consts.len() + file.globals.len() + file.funcs.len(),
        "parsed file"
    );
    Ok(file)
}

/// Parses `(filename, source)` pairs and assembles them into one package.
///
/// Every file must declare package `name`; file names must be bare and
/// unique.
pub fn parse_package(name: &str, sources: &[(&str, &str)]) -> Result<Package, Error> {
    let mut builder = PackageBuilder::new(name);

    for (filename, source) in sources {
        trace!(package = %name, filename = %filename, "parsing");
        builder.add_file(parse_file(filename, source)?)?;
    }

    let package = builder.build();
    debug!(package = %package.name, files = package.len(), "parsed package");
    Ok(package)
}
