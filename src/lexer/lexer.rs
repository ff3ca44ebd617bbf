use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Pos, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

/// Called with the lexer positioned at the start of `matched`.
pub type RegexHandler = fn(&mut Lexer, &str);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

fn pattern(regex: &str, handler: RegexHandler) -> RegexPattern {
    RegexPattern {
        // Patterns are fixed at compile time; a bad one is a programming error.
        regex: Regex::new(&format!("^(?:{})", regex)).unwrap(),
        handler,
    }
}

lazy_static! {
    // Order matters: the first pattern matching at the current position wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern("[0-9][0-9_]*\\.[0-9_]*(?:[eE][+-]?[0-9]+)?|[0-9][0-9_]*[eE][+-]?[0-9]+|\\.[0-9][0-9_]*(?:[eE][+-]?[0-9]+)?", float_handler),
        pattern("0[xX][0-9a-fA-F_]+|0[oO][0-7_]+|0[bB][01_]+|[0-9][0-9_]*", int_handler),
        pattern("\\s+", whitespace_handler),
        pattern("\"(?:[^\"\\\\\\n]|\\\\.)*\"", string_handler),
        pattern("`[^`]*`", string_handler),
        pattern("//[^\\n]*", skip_handler),
        pattern("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern(":=", MK_DEFAULT_HANDLER!(TokenKind::Define, ":=")),
        pattern("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern("\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern("&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern("%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer {
            tokens: vec![],
            source: source.into(),
            pos: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn position(&self) -> Pos {
        Pos::from_offset(self.pos)
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|token| token.kind)
    }

    /// Pushes a token of `kind` covering `matched` and moves past it.
    fn push_matched(&mut self, kind: TokenKind, matched: &str) {
        let start = self.position();
        self.push(MK_TOKEN!(
            kind,
            String::from(matched),
            Span::new(start, start.offset(matched.len()))
        ));
        self.advance_n(matched.len());
    }
}

fn int_handler(lexer: &mut Lexer, matched: &str) {
    lexer.push_matched(TokenKind::Int, matched);
}

fn float_handler(lexer: &mut Lexer, matched: &str) {
    lexer.push_matched(TokenKind::Float, matched);
}

// Literal text is kept as written; decoding happens when the AST node is built.
fn string_handler(lexer: &mut Lexer, matched: &str) {
    lexer.push_matched(TokenKind::String, matched);
}

fn skip_handler(lexer: &mut Lexer, matched: &str) {
    lexer.advance_n(matched.len());
}

/// Skips whitespace, inserting a `;` at the first newline if the previous
/// token can end a statement.
fn whitespace_handler(lexer: &mut Lexer, matched: &str) {
    if let Some(newline) = matched.find('\n') {
        if lexer.last_kind().is_some_and(|kind| kind.ends_statement()) {
            let start = lexer.position().offset(newline);
            lexer.push(MK_TOKEN!(
                TokenKind::Semicolon,
                String::from("\n"),
                Span::new(start, start.offset(1))
            ));
        }
    }
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, matched: &str) {
    let kind = RESERVED_LOOKUP
        .get(matched)
        .copied()
        .unwrap_or(TokenKind::Identifier);
    lexer.push_matched(kind, matched);
}

/// Splits `source` into tokens, ending with `EOF`.
///
/// Token values are the exact source text, so string and number literals
/// still carry their quotes, prefixes and escapes.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    if u32::try_from(source.len()).is_err() {
        return Err(Error::new(
            ErrorImpl::SourceTooLarge {
                bytes: source.len(),
            },
            Pos::null(),
        ));
    }

    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let matched = PATTERNS.iter().find_map(|pattern| {
            pattern
                .regex
                .find(lex.remainder())
                .map(|found| (pattern.handler, found.as_str().to_string()))
        });

        match matched {
            Some((handler, text)) => {
                trace!(pos = lex.pos, text = %text, "matched");
                handler(&mut lex, &text);
            }
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: lex.at().to_string(),
                    },
                    lex.position(),
                ))
            }
        }
    }

    let end = lex.position();
    if lex.last_kind().is_some_and(|kind| kind.ends_statement()) {
        lex.push(MK_TOKEN!(TokenKind::Semicolon, String::new(), Span::new(end, end)));
    }
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span::new(end, end)));

    debug!(tokens = lex.tokens.len(), bytes = source.len(), "tokenized");
    Ok(lex.tokens)
}
