//! Literal decoding.
//!
//! Turns the source text of an `Int`, `Float` or `String` token into its
//! value. Kept apart from scanning so the parser, the AST constructors and
//! tests all decode through the same functions.

use crate::{
    ast::expressions::LitValue,
    errors::errors::{Error, ErrorImpl},
    Pos,
};

use super::tokens::TokenKind;

/// Decodes `literal` as a literal of kind `kind`.
pub fn decode_literal(kind: TokenKind, literal: &str, position: Pos) -> Result<LitValue, Error> {
    match kind {
        TokenKind::Int => decode_int(literal).map(LitValue::Int).ok_or_else(|| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: literal.to_string(),
                },
                position,
            )
        }),
        TokenKind::Float => decode_float(literal).map(LitValue::Float).ok_or_else(|| {
            Error::new(
                ErrorImpl::NumberParseError {
                    token: literal.to_string(),
                },
                position,
            )
        }),
        TokenKind::String => decode_string(literal).map(LitValue::String).map_err(|reason| {
            Error::new(
                ErrorImpl::InvalidStringLiteral {
                    literal: literal.to_string(),
                    reason,
                },
                position,
            )
        }),
        other => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: other.to_string(),
                message: String::from("not a literal kind"),
            },
            position,
        )),
    }
}

/// Decodes a decimal, `0x` hex, `0o` or leading-zero octal, or `0b` binary
/// integer. `_` separators are ignored. `None` on bad digits or overflow.
pub fn decode_int(literal: &str) -> Option<i64> {
    let digits: String = literal.chars().filter(|c| *c != '_').collect();

    let (radix, body) = if let Some(rest) = strip_prefix_ci(&digits, "0x") {
        (16, rest)
    } else if let Some(rest) = strip_prefix_ci(&digits, "0o") {
        (8, rest)
    } else if let Some(rest) = strip_prefix_ci(&digits, "0b") {
        (2, rest)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits.as_str())
    };

    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    i64::from_str_radix(body, radix).ok()
}

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    if text.len() >= prefix.len() && text[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

/// Decodes a decimal floating point literal, ignoring `_` separators.
pub fn decode_float(literal: &str) -> Option<f64> {
    let digits: String = literal.chars().filter(|c| *c != '_').collect();

    match digits.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '.' => digits.parse().ok(),
        _ => None,
    }
}

/// Decodes a double-quoted or back-quoted string literal.
///
/// Double-quoted strings understand `\n \t \r \a \b \f \v \\ \" \' \0`,
/// `\xHH` (one raw byte), `\uHHHH` and `\UHHHHHHHH`. The decoded bytes
/// must form valid UTF-8. Back-quoted strings are raw; carriage returns are
/// dropped.
pub fn decode_string(literal: &str) -> Result<String, String> {
    if literal.len() >= 2 && literal.starts_with('`') && literal.ends_with('`') {
        let body = &literal[1..literal.len() - 1];
        if body.contains('`') {
            return Err(String::from("unescaped ` inside raw string"));
        }
        return Ok(body.chars().filter(|c| *c != '\r').collect());
    }

    if literal.len() < 2 || !literal.starts_with('"') || !literal.ends_with('"') {
        return Err(String::from("missing quotes"));
    }

    let body = &literal[1..literal.len() - 1];
    let mut bytes: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                let Some(escape) = chars.next() else {
                    return Err(String::from("lone backslash at end of string"));
                };
                match escape {
                    'n' => bytes.push(b'\n'),
                    't' => bytes.push(b'\t'),
                    'r' => bytes.push(b'\r'),
                    'a' => bytes.push(0x07),
                    'b' => bytes.push(0x08),
                    'f' => bytes.push(0x0C),
                    'v' => bytes.push(0x0B),
                    '\\' => bytes.push(b'\\'),
                    '"' => bytes.push(b'"'),
                    '\'' => bytes.push(b'\''),
                    '0' => bytes.push(0),
                    // A raw byte; several of them may spell one UTF-8 character.
                    'x' => bytes.push(read_hex(&mut chars, 2)? as u8),
                    'u' => push_char(&mut bytes, read_code_point(&mut chars, 4)?),
                    'U' => push_char(&mut bytes, read_code_point(&mut chars, 8)?),
                    other => return Err(format!("unknown escape sequence \\{}", other)),
                }
            }
            '"' => return Err(String::from("unescaped quote inside string")),
            '\n' => return Err(String::from("newline inside string")),
            _ => push_char(&mut bytes, ch),
        }
    }

    String::from_utf8(bytes).map_err(|_| String::from("\\x escapes do not form valid UTF-8"))
}

fn push_char(bytes: &mut Vec<u8>, ch: char) {
    let mut buf = [0u8; 4];
    bytes.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

fn read_hex(chars: &mut std::str::Chars<'_>, count: usize) -> Result<u32, String> {
    let mut value = 0u32;
    for _ in 0..count {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| format!("expected {} hex digits", count))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

fn read_code_point(chars: &mut std::str::Chars<'_>, count: usize) -> Result<char, String> {
    let value = read_hex(chars, count)?;
    char::from_u32(value).ok_or_else(|| format!("invalid code point {:#x}", value))
}
