//! Import-section parser for Go source files.
//!
//! Only the package clause and the import declarations that follow it are
//! read. Tokens are produced lazily, so the body of the file after the last
//! import declaration is never lexed.

use crate::error::{ParseError, ParseErrorKind};

const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// One import spec as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Local name: an identifier, `.` or `_`.
    pub name: Option<String>,
    /// The path literal exactly as written, quotes included.
    pub literal: String,
    pub line: usize,
    pub column: usize,
}

/// The package clause and import declarations of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSection {
    pub package: String,
    pub imports: Vec<ImportSpec>,
}

/// Parses the package clause and import declarations of `src`.
///
/// A source without any package clause fails with
/// [`ParseErrorKind::MissingPackage`]; every other failure is
/// [`ParseErrorKind::Syntax`].
pub fn parse_imports(src: &str) -> Result<ImportSection, ParseError> {
    let src = src.strip_prefix('\u{feff}').unwrap_or(src);
    let mut parser = Parser::new(src)?;
    parser.parse_file()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Ident(String),
    Keyword(&'static str),
    Str(String),
    Dot,
    LParen,
    RParen,
    Semi { newline: bool },
    Other(char),
    Eof,
}

impl TokenKind {
    fn describe(&self) -> String {
        match self {
            TokenKind::Ident(s) | TokenKind::Str(s) => s.clone(),
            TokenKind::Keyword(k) => format!("'{}'", k),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::Semi { newline: true } => "newline".to_string(),
            TokenKind::Semi { newline: false } => "';'".to_string(),
            TokenKind::Other(c) => format!("'{}'", c),
            TokenKind::Eof => "'EOF'".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    line: usize,
    column: usize,
}

struct Lexer<'a> {
    src: &'a str,
    idx: usize,
    line: usize,
    line_start: usize,
    insert_semi: bool,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            idx: 0,
            line: 1,
            line_start: 0,
            insert_semi: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.idx..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.idx..].chars();
        chars.next();
        chars.next()
    }

    fn column(&self) -> usize {
        self.idx - self.line_start + 1
    }

    fn token(&self, kind: TokenKind, line: usize, column: usize) -> Token {
        Token { kind, line, column }
    }

    /// Advances over one char, keeping line bookkeeping current.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.idx += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.line_start = self.idx;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>, line: usize, column: usize) -> ParseError {
        ParseError {
            kind: ParseErrorKind::Syntax,
            line,
            column,
            message: message.into(),
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        loop {
            while matches!(self.peek(), Some(' ' | '\t' | '\r')) {
                self.bump();
            }

            let (line, column) = (self.line, self.column());

            let c = match self.peek() {
                Some(c) => c,
                None => {
                    if std::mem::take(&mut self.insert_semi) {
                        return Ok(self.token(TokenKind::Semi { newline: true }, line, column));
                    }
                    return Ok(self.token(TokenKind::Eof, line, column));
                }
            };

            match c {
                '\n' => {
                    self.bump();
                    if std::mem::take(&mut self.insert_semi) {
                        return Ok(self.token(TokenKind::Semi { newline: true }, line, column));
                    }
                }
                '/' if self.peek_second() == Some('/') => {
                    if std::mem::take(&mut self.insert_semi) {
                        return Ok(self.token(TokenKind::Semi { newline: true }, line, column));
                    }
                    while !matches!(self.peek(), None | Some('\n')) {
                        self.bump();
                    }
                }
                '/' if self.peek_second() == Some('*') => {
                    let start = self.idx;
                    let end = match self.src[start + 2..].find("*/") {
                        Some(offset) => start + 2 + offset + 2,
                        None => return Err(self.error("comment not terminated", line, column)),
                    };
                    let spans_lines = self.src[start..end].contains('\n');
                    while self.idx < end {
                        self.bump();
                    }
                    if spans_lines && std::mem::take(&mut self.insert_semi) {
                        return Ok(self.token(TokenKind::Semi { newline: true }, line, column));
                    }
                }
                '"' => {
                    let literal = self.interpreted_string();
                    self.insert_semi = true;
                    return Ok(self.token(TokenKind::Str(literal), line, column));
                }
                '`' => {
                    let literal = self.raw_string();
                    self.insert_semi = true;
                    return Ok(self.token(TokenKind::Str(literal), line, column));
                }
                c if c == '_' || c.is_alphabetic() => {
                    let word = self.identifier();
                    let kind = match KEYWORDS.iter().find(|k| **k == word) {
                        Some(k) => {
                            self.insert_semi =
                                matches!(*k, "break" | "continue" | "fallthrough" | "return");
                            TokenKind::Keyword(*k)
                        }
                        None => {
                            self.insert_semi = true;
                            TokenKind::Ident(word)
                        }
                    };
                    return Ok(self.token(kind, line, column));
                }
                _ => {
                    self.bump();
                    let kind = match c {
                        '.' => TokenKind::Dot,
                        '(' => TokenKind::LParen,
                        ')' => TokenKind::RParen,
                        ';' => TokenKind::Semi { newline: false },
                        other => TokenKind::Other(other),
                    };
                    self.insert_semi = matches!(kind, TokenKind::RParen);
                    return Ok(self.token(kind, line, column));
                }
            }
        }
    }

    fn identifier(&mut self) -> String {
        let start = self.idx;
        while matches!(self.peek(), Some(c) if c == '_' || c.is_alphanumeric()) {
            self.bump();
        }
        self.src[start..self.idx].to_string()
    }

    /// Reads a double-quoted literal verbatim. An unterminated literal stops
    /// at the end of its line and is left for unquoting to reject.
    fn interpreted_string(&mut self) -> String {
        let start = self.idx;
        self.bump();
        loop {
            match self.peek() {
                None | Some('\n') => break,
                Some('"') => {
                    self.bump();
                    break;
                }
                Some('\\') => {
                    self.bump();
                    if !matches!(self.peek(), None | Some('\n')) {
                        self.bump();
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
        self.src[start..self.idx].to_string()
    }

    fn raw_string(&mut self) -> String {
        let start = self.idx;
        self.bump();
        while let Some(c) = self.bump() {
            if c == '`' {
                break;
            }
        }
        self.src[start..self.idx].to_string()
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    tok: Token,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(src);
        let tok = lexer.next_token()?;
        Ok(Self { lexer, tok })
    }

    fn next(&mut self) -> Result<(), ParseError> {
        self.tok = self.lexer.next_token()?;
        Ok(())
    }

    fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        ParseError {
            kind,
            line: self.tok.line,
            column: self.tok.column,
            message: message.into(),
        }
    }

    fn error_expected(&self, what: &str) -> ParseError {
        self.error(
            ParseErrorKind::Syntax,
            format!("expected {}, found {}", what, self.tok.kind.describe()),
        )
    }

    // A closing paren ends a statement without being consumed.
    fn expect_semi(&mut self) -> Result<(), ParseError> {
        match self.tok.kind {
            TokenKind::RParen => Ok(()),
            TokenKind::Semi { .. } => self.next(),
            _ => Err(self.error_expected("';'")),
        }
    }

    fn parse_file(&mut self) -> Result<ImportSection, ParseError> {
        match self.tok.kind {
            TokenKind::Keyword("package") => self.next()?,
            TokenKind::Eof => {
                return Err(self.error(
                    ParseErrorKind::MissingPackage,
                    "expected 'package', found 'EOF'",
                ))
            }
            _ => return Err(self.error_expected("'package'")),
        }

        let package = match &self.tok.kind {
            TokenKind::Ident(name) if name == "_" => {
                return Err(self.error(ParseErrorKind::Syntax, "invalid package name _"))
            }
            TokenKind::Ident(name) => name.clone(),
            _ => return Err(self.error_expected("'IDENT'")),
        };
        self.next()?;
        self.expect_semi()?;

        let mut imports = Vec::new();
        while self.tok.kind == TokenKind::Keyword("import") {
            self.next()?;
            if self.tok.kind == TokenKind::LParen {
                self.next()?;
                while !matches!(self.tok.kind, TokenKind::RParen | TokenKind::Eof) {
                    imports.push(self.parse_spec()?);
                    self.expect_semi()?;
                }
                if self.tok.kind != TokenKind::RParen {
                    return Err(self.error_expected("')'"));
                }
                self.next()?;
            } else {
                imports.push(self.parse_spec()?);
            }
            self.expect_semi()?;
        }

        Ok(ImportSection { package, imports })
    }

    fn parse_spec(&mut self) -> Result<ImportSpec, ParseError> {
        let name = match &self.tok.kind {
            TokenKind::Dot => Some(".".to_string()),
            TokenKind::Ident(name) => Some(name.clone()),
            _ => None,
        };
        if name.is_some() {
            self.next()?;
        }

        let literal = match &self.tok.kind {
            TokenKind::Str(literal) => literal.clone(),
            _ => return Err(self.error(ParseErrorKind::Syntax, "missing import path")),
        };
        let spec = ImportSpec {
            name,
            literal,
            line: self.tok.line,
            column: self.tok.column,
        };
        self.next()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(section: &ImportSection) -> Vec<&str> {
        section.imports.iter().map(|i| i.literal.as_str()).collect()
    }

    #[test]
    fn test_single_and_grouped_imports() {
        let src = r#"// Package main does things.
package main

import "fmt"

import (
	"os"
	str "strings"
	. "math"
	_ "embed"
)

func main() { fmt.Println("import \"not/this\"") }
"#;
        let section = parse_imports(src).unwrap();
        assert_eq!(section.package, "main");
        assert_eq!(
            literals(&section),
            vec![r#""fmt""#, r#""os""#, r#""strings""#, r#""math""#, r#""embed""#]
        );
        assert_eq!(section.imports[2].name.as_deref(), Some("str"));
        assert_eq!(section.imports[3].name.as_deref(), Some("."));
        assert_eq!(section.imports[4].name.as_deref(), Some("_"));
        assert_eq!(section.imports[0].line, 4);
        assert_eq!(section.imports[0].column, 8);
    }

    #[test]
    fn test_semicolons_and_comments() {
        let src = "package p; import (\"a\"; \"b\" /* c */ ); import `c/d` // trailing\n";
        let section = parse_imports(src).unwrap();
        assert_eq!(literals(&section), vec![r#""a""#, r#""b""#, "`c/d`"]);
    }

    #[test]
    fn test_no_imports() {
        let section = parse_imports("package lib\n\nvar x = 1\n").unwrap();
        assert!(section.imports.is_empty());
    }

    #[test]
    fn test_body_is_not_lexed() {
        let src = "package p\nimport \"a\"\nfunc f() { r := '\\'' ; _ = `unterminated }\n";
        let section = parse_imports(src).unwrap();
        assert_eq!(literals(&section), vec![r#""a""#]);
    }

    #[test]
    fn test_missing_package_is_classified() {
        for src in ["", "   \n\n", "// just a comment\n/* and a block */\n"] {
            let err = parse_imports(src).unwrap_err();
            assert!(err.is_missing_package(), "source {:?}", src);
            assert_eq!(err.message, "expected 'package', found 'EOF'");
        }
    }

    #[test]
    fn test_other_errors_are_syntax() {
        let err = parse_imports("func main() {}\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Syntax);
        assert_eq!(err.message, "expected 'package', found 'func'");

        let err = parse_imports("package\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Syntax);
        assert_eq!(err.message, "expected 'IDENT', found 'EOF'");

        let err = parse_imports("package p\nimport (\n\t\"a\"\n").unwrap_err();
        assert_eq!(err.message, "expected ')', found 'EOF'");

        let err = parse_imports("package p\nimport fmt\n").unwrap_err();
        assert_eq!(err.message, "missing import path");

        let err = parse_imports("package p /* open").unwrap_err();
        assert_eq!(err.message, "comment not terminated");
    }

    #[test]
    fn test_unterminated_literal_is_kept_verbatim() {
        let section = parse_imports("package p\nimport \"fmt\n").unwrap();
        assert_eq!(literals(&section), vec!["\"fmt"]);
    }

    #[test]
    fn test_error_position() {
        let err = parse_imports("package p\n\nimport (\n  42\n)\n").unwrap_err();
        assert_eq!((err.line, err.column), (4, 3));
    }

    #[test]
    fn test_stray_paren_ends_import_section() {
        let section = parse_imports("package p\nimport \"a\")\nfunc f() {}\n").unwrap();
        assert_eq!(literals(&section), vec!["a"]);

        let section = parse_imports("package p\nimport (\"a\"))\n").unwrap();
        assert_eq!(literals(&section), vec!["a"]);
    }
}
