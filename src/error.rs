//! Error types.
//!
//! Scanning distinguishes recoverable conditions (a source file without a
//! package clause, an unreadable directory entry) from fatal ones. Only the
//! fatal ones surface as [`ScanError`].

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scanning.
pub type ScanResult<T> = Result<T, ScanError>;

/// Fatal errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scan root is missing or cannot be listed.
    #[error("cannot scan {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A selected source file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The import section of a source file is malformed.
    #[error("{path}:{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// An import path literal is not a valid quoted string.
    #[error("{path}:{line}: invalid import path {literal}: {source}")]
    Unquote {
        path: PathBuf,
        line: usize,
        literal: String,
        #[source]
        source: UnquoteError,
    },

    /// An import path literal unquoted to the empty string.
    #[error("{path}:{line}: empty import path")]
    EmptyImportPath { path: PathBuf, line: usize },

    /// An import path contains whitespace, a non-printing character, or a
    /// character Go reserves.
    #[error("{path}:{line}: invalid import path: {import_path:?}")]
    InvalidImportPath {
        path: PathBuf,
        line: usize,
        import_path: String,
    },
}

/// Classification of import-section parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The file ends before any package clause; an empty or placeholder file.
    MissingPackage,
    /// Any other syntax error.
    Syntax,
}

/// A parse failure with its position in the source file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseError {
    pub fn is_missing_package(&self) -> bool {
        self.kind == ParseErrorKind::MissingPackage
    }
}

/// Reasons a quoted literal cannot be unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnquoteError {
    #[error("literal is not quoted")]
    NotQuoted,

    #[error("literal is not terminated")]
    Unterminated,

    #[error("newline in string literal")]
    Newline,

    #[error("unknown escape sequence \\{0}")]
    UnknownEscape(char),

    #[error("malformed escape sequence")]
    MalformedEscape,

    #[error("escape sequence is not a valid code point")]
    InvalidCodePoint,

    #[error("unescaped quote inside literal")]
    UnescapedQuote,
}

/// Errors from resolving a project's own import path.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to resolve project directory {path}: {source}")]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    ModFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no module directive in {path}")]
    MissingModule { path: PathBuf },

    #[error("{path} is not inside a Go module or GOPATH workspace")]
    NotInWorkspace { path: PathBuf },
}

/// Errors from selecting an output format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unsupported format: {0}")]
    Unsupported(String),
}
