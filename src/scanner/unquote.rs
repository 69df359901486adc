//! Go string literal unquoting.

use crate::error::UnquoteError;

/// Interprets a Go string literal, either `"interpreted"` or `` `raw` ``,
/// and returns the string value it denotes.
pub fn unquote(literal: &str) -> Result<String, UnquoteError> {
    let quote = match literal.chars().next() {
        Some(c @ ('"' | '`')) => c,
        _ => return Err(UnquoteError::NotQuoted),
    };

    if literal.len() < 2 || !literal.ends_with(quote) {
        return Err(UnquoteError::Unterminated);
    }
    let body = &literal[1..literal.len() - 1];

    if quote == '`' {
        if body.contains('`') {
            return Err(UnquoteError::UnescapedQuote);
        }
        // Carriage returns are discarded from raw literals.
        return Ok(body.chars().filter(|&c| c != '\r').collect());
    }

    if body.contains('\n') {
        return Err(UnquoteError::Newline);
    }
    if !body.contains('\\') && !body.contains('"') {
        return Ok(body.to_string());
    }

    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Err(UnquoteError::UnescapedQuote),
            '\\' => unescape(&mut chars, &mut out)?,
            _ => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    String::from_utf8(out).map_err(|_| UnquoteError::InvalidCodePoint)
}

fn unescape(chars: &mut std::str::Chars<'_>, out: &mut Vec<u8>) -> Result<(), UnquoteError> {
    let c = chars.next().ok_or(UnquoteError::MalformedEscape)?;
    let simple = match c {
        'a' => Some(0x07),
        'b' => Some(0x08),
        'f' => Some(0x0c),
        'n' => Some(b'\n'),
        'r' => Some(b'\r'),
        't' => Some(b'\t'),
        'v' => Some(0x0b),
        '\\' => Some(b'\\'),
        '"' => Some(b'"'),
        _ => None,
    };
    if let Some(byte) = simple {
        out.push(byte);
        return Ok(());
    }

    match c {
        '0'..='7' => {
            let mut value = c.to_digit(8).unwrap_or(0);
            for _ in 0..2 {
                let d = chars
                    .next()
                    .and_then(|d| d.to_digit(8))
                    .ok_or(UnquoteError::MalformedEscape)?;
                value = value * 8 + d;
            }
            let byte = u8::try_from(value).map_err(|_| UnquoteError::MalformedEscape)?;
            out.push(byte);
        }
        'x' => {
            let value = hex_digits(chars, 2)?;
            out.push(value as u8);
        }
        'u' | 'U' => {
            let width = if c == 'u' { 4 } else { 8 };
            let value = hex_digits(chars, width)?;
            let ch = char::from_u32(value).ok_or(UnquoteError::InvalidCodePoint)?;
            let mut buf = [0u8; 4];
            out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        }
        other => return Err(UnquoteError::UnknownEscape(other)),
    }
    Ok(())
}

fn hex_digits(chars: &mut std::str::Chars<'_>, count: usize) -> Result<u32, UnquoteError> {
    let mut value: u32 = 0;
    for _ in 0..count {
        let d = chars
            .next()
            .and_then(|d| d.to_digit(16))
            .ok_or(UnquoteError::MalformedEscape)?;
        value = value * 16 + d;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_literal() {
        assert_eq!(unquote(r#""fmt""#).unwrap(), "fmt");
        assert_eq!(
            unquote(r#""github.com/foo/bar""#).unwrap(),
            "github.com/foo/bar"
        );
    }

    #[test]
    fn test_raw_literal() {
        assert_eq!(unquote("`net/http`").unwrap(), "net/http");
        assert_eq!(unquote("`a\r\nb`").unwrap(), "a\nb");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(unquote(r#""a\tb""#).unwrap(), "a\tb");
        assert_eq!(unquote(r#""\x61\142c""#).unwrap(), "abc");
        assert_eq!(unquote(r#""\U0001F600""#).unwrap(), "\u{1F600}");
        assert_eq!(unquote(r#""say \"hi\"""#).unwrap(), "say \"hi\"");
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(unquote(r#""fmt"#), Err(UnquoteError::Unterminated));
        assert_eq!(unquote(r#"""#), Err(UnquoteError::Unterminated));
        assert_eq!(unquote("`os"), Err(UnquoteError::Unterminated));
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(unquote("fmt"), Err(UnquoteError::NotQuoted));
        assert_eq!(unquote(r#""a\qb""#), Err(UnquoteError::UnknownEscape('q')));
        assert_eq!(unquote(r#""a\'b""#), Err(UnquoteError::UnknownEscape('\'')));
        assert_eq!(unquote(r#""\x6""#), Err(UnquoteError::MalformedEscape));
        assert_eq!(unquote(r#""\777""#), Err(UnquoteError::MalformedEscape));
        assert_eq!(unquote(r#""\uD800""#), Err(UnquoteError::InvalidCodePoint));
        assert_eq!(unquote(r#""a"b""#), Err(UnquoteError::UnescapedQuote));
        assert_eq!(unquote("\"a\nb\""), Err(UnquoteError::Newline));
    }
}
