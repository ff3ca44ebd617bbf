#![allow(clippy::module_inception)]

use std::fmt::Display;

use serde::Serialize;

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into a single source buffer.
///
/// Positions are opaque: they are never decoded into line/column here except
/// by [`line_at_position`], which exists for diagnostics rendering.
///
/// Offsets are `u32`, so a source buffer holds at most `u32::MAX` bytes.
/// `tokenize` rejects anything larger; arithmetic saturates at the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Pos(pub u32);

impl Pos {
    pub fn null() -> Self {
        Pos(0)
    }

    /// Position of byte `offset`, clamped to `u32::MAX`.
    pub fn from_offset(offset: usize) -> Self {
        Pos(u32::try_from(offset).unwrap_or(u32::MAX))
    }

    /// Returns the position `n` bytes after this one.
    pub fn offset(self, n: usize) -> Self {
        u32::try_from(n)
            .ok()
            .and_then(|n| self.0.checked_add(n))
            .map_or(Pos(u32::MAX), Pos)
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Half-open range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    pub fn new(start: Pos, end: Pos) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `other` lies entirely inside this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Maps an offset to `(line_number, line_text, column)`.
///
/// Lines are 1-based, columns are 0-based byte offsets within the line.
/// Returns `None` when the offset is past the end of `source` or not on a
/// char boundary.
pub fn line_at_position(source: &str, position: Pos) -> Option<(usize, String, usize)> {
    let pos = position.as_usize();
    let before = source.get(..pos)?;

    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = source[pos..]
        .find('\n')
        .map(|i| pos + i + 1)
        .unwrap_or(source.len());
    let line_number = before.matches('\n').count() + 1;

    Some((
        line_number,
        source[line_start..line_end].to_string(),
        pos - line_start,
    ))
}
