//! Parser module for building µGo syntax trees.
//!
//! This module contains the parser that transforms a stream of tokens into
//! a [`File`](crate::ast::declarations::File). It uses a Pratt parser for
//! expressions with proper operator precedence and handles:
//!
//! - The package clause and imports
//! - Top-level `const`, `var` and `func` declarations
//! - Blocks of expression and assignment statements
//! - Expression parsing (binary and unary ops, calls, selectors, literals)
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

pub use parser::{parse_file, parse_package};

#[cfg(test)]
mod tests;
