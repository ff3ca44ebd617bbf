use std::fmt::Display;

use thiserror::Error;

use crate::Pos;

/// A positioned error produced by the lexer, the parser or the AST builders.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Pos,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Pos) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> Pos {
        self.position
    }

    pub fn get_internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidStringLiteral { .. } => "InvalidStringLiteral",
            ErrorImpl::InvalidAssignOperator { .. } => "InvalidAssignOperator",
            ErrorImpl::InvalidAssignTarget { .. } => "InvalidAssignTarget",
            ErrorImpl::CallTargetNotIdent { .. } => "CallTargetNotIdent",
            ErrorImpl::LiteralKindMismatch { .. } => "LiteralKindMismatch",
            ErrorImpl::InvalidRange { .. } => "InvalidRange",
            ErrorImpl::ChildOutsideParent { .. } => "ChildOutsideParent",
            ErrorImpl::SiblingsOverlap { .. } => "SiblingsOverlap",
            ErrorImpl::DuplicateFile { .. } => "DuplicateFile",
            ErrorImpl::InvalidFilename { .. } => "InvalidFilename",
            ErrorImpl::PackageNameMismatch { .. } => "PackageNameMismatch",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::SourceTooLarge { .. } => "SourceTooLarge",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::InvalidStringLiteral { literal, reason } => {
                ErrorTip::Suggestion(format!("Invalid string literal {}: {}", literal, reason))
            }
            ErrorImpl::InvalidAssignOperator { operator } => ErrorTip::Suggestion(format!(
                "`{}` cannot assign, use `=` or `:=`",
                operator
            )),
            ErrorImpl::InvalidAssignTarget { target } => ErrorTip::Suggestion(format!(
                "Cannot assign to {}, only identifiers and selectors can be assigned",
                target
            )),
            ErrorImpl::CallTargetNotIdent { target } => ErrorTip::Suggestion(format!(
                "Cannot call {}, only plain function names can be called",
                target
            )),
            ErrorImpl::LiteralKindMismatch { kind, value } => ErrorTip::Suggestion(format!(
                "Literal of kind `{}` cannot hold {}",
                kind, value
            )),
            ErrorImpl::InvalidRange { node, .. } => ErrorTip::Suggestion(format!(
                "{} ends before it starts",
                node
            )),
            ErrorImpl::ChildOutsideParent { parent, child } => ErrorTip::Suggestion(format!(
                "{} is not inside its parent {}",
                child, parent
            )),
            ErrorImpl::SiblingsOverlap { node } => {
                ErrorTip::Suggestion(format!("{} overlaps the node before it", node))
            }
            ErrorImpl::DuplicateFile { filename } => {
                ErrorTip::Suggestion(format!("File `{}` already added to the package", filename))
            }
            ErrorImpl::InvalidFilename { filename } => ErrorTip::Suggestion(format!(
                "Package files are keyed by bare file name, `{}` is not one",
                filename
            )),
            ErrorImpl::PackageNameMismatch { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected package `{}`, file declares `{}`",
                    expected, received
                ))
            }
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Expressions may nest at most {} levels deep, split this one up",
                limit
            )),
            ErrorImpl::SourceTooLarge { bytes } => ErrorTip::Suggestion(format!(
                "Source is {} bytes, offsets only reach {} bytes",
                bytes,
                u32::MAX
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("invalid string literal {literal}: {reason}")]
    InvalidStringLiteral { literal: String, reason: String },
    #[error("invalid assignment operator {operator:?}")]
    InvalidAssignOperator { operator: String },
    #[error("cannot assign to {target}")]
    InvalidAssignTarget { target: String },
    #[error("call target must be an identifier, found {target}")]
    CallTargetNotIdent { target: String },
    #[error("literal kind {kind} does not match value {value}")]
    LiteralKindMismatch { kind: String, value: String },
    #[error("{node} has end {end} before start {start}")]
    InvalidRange { node: String, start: u32, end: u32 },
    #[error("{child} lies outside its parent {parent}")]
    ChildOutsideParent { parent: String, child: String },
    #[error("{node} overlaps its previous sibling")]
    SiblingsOverlap { node: String },
    #[error("duplicate file {filename:?} in package")]
    DuplicateFile { filename: String },
    #[error("invalid package file name {filename:?}")]
    InvalidFilename { filename: String },
    #[error("package name mismatch: expected {expected:?}, received {received:?}")]
    PackageNameMismatch { expected: String, received: String },
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("source of {bytes} bytes is too large")]
    SourceTooLarge { bytes: usize },
}
