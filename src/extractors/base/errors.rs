//! Per-file diagnostics
//!
//! # Error Philosophy
//!
//! Extraction never fails a batch. A file that cannot be read, parsed, or
//! mapped yields one `DetailedParseError` next to whatever partial
//! `ParsedFile` could be produced. Internal plumbing (grammar lookup, query
//! compilation, single extraction steps) uses `anyhow::Result` and is
//! swallowed at the step boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which stage of extraction a diagnostic came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseErrorKind {
    /// File unreadable; no tree was produced
    Filesystem,
    /// Syntax error or missing tree; partial results may still exist
    Parse,
    /// Unknown language or model inconsistency
    Mapping,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Filesystem => write!(f, "filesystem"),
            ParseErrorKind::Parse => write!(f, "parse"),
            ParseErrorKind::Mapping => write!(f, "mapping"),
        }
    }
}

/// Structured diagnostic for a single file
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}: {message}", location(.file, .line, .column))]
pub struct DetailedParseError {
    pub file: String,
    /// 1-based
    pub line: Option<u32>,
    /// 1-based
    pub column: Option<u32>,
    pub message: String,
    pub kind: ParseErrorKind,
}

fn location(file: &str, line: &Option<u32>, column: &Option<u32>) -> String {
    match line {
        Some(line) => format!("{}:{}:{}", file, line, column.unwrap_or(0)),
        None => file.to_string(),
    }
}

impl DetailedParseError {
    pub fn new(kind: ParseErrorKind, file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
            column: None,
            message: message.into(),
            kind,
        }
    }

    pub fn filesystem(file: impl Into<String>, source: &std::io::Error) -> Self {
        Self::new(
            ParseErrorKind::Filesystem,
            file,
            format!("failed to read file: {}", source),
        )
    }

    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::Parse, file, message)
    }

    pub fn mapping(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::Mapping, file, message)
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_location_when_known() {
        let err = DetailedParseError::parse("src/a.go", "syntax error in Go file").at(3, 7);
        assert_eq!(err.to_string(), "src/a.go:3:7: syntax error in Go file");
    }

    #[test]
    fn test_renders_path_only_without_location() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = DetailedParseError::filesystem("missing.py", &io);
        assert_eq!(err.kind, ParseErrorKind::Filesystem);
        assert_eq!(err.to_string(), "missing.py: failed to read file: no such file");
    }

    #[test]
    fn test_line_without_column_renders_zero_column() {
        let mut err = DetailedParseError::mapping("x.kt", "bad");
        err.line = Some(4);
        assert_eq!(err.to_string(), "x.kt:4:0: bad");
    }
}
