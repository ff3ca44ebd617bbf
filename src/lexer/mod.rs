//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts µGo source into
//! a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Automatic semicolons at line ends
//! - Decoding of literal text into values
//! - Token position tracking for error reporting

pub mod lexer;
pub mod literals;
pub mod tokens;
