//! Error types and error handling for the AST core.
//!
//! This module defines the error types shared by the lexer, the parser and
//! the AST builders. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and tree construction
//! - Error names and tips used when rendering diagnostics

pub mod errors;
