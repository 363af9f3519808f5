use std::path::PathBuf;

use thiserror::Error;

use crate::value::NumericKind;

#[derive(Debug, Error)]
pub enum NestconfError {
    #[error("Failed to open {path}: {source}")]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Syntax error at line {line}: {reason}")]
    Syntax { line: usize, reason: String },

    #[error("Semantic action failed: {0}")]
    SemanticAction(String),

    #[cfg(feature = "export")]
    #[error("Failed to export configuration: {0}")]
    Export(#[from] toml::ser::Error),
}

/// A value could not be read as the requested numeric kind.
///
/// Local to the typed getter that produced it; never aborts a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid {kind}")]
pub struct NumericParseError {
    pub value: String,
    pub kind: NumericKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_open_formats_correctly() {
        let err = NestconfError::FileOpen {
            path: "/etc/myapp/server.conf".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("server.conf"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn syntax_error_formats_line() {
        let err = NestconfError::Syntax {
            line: 42,
            reason: "unexpected '}'".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("42"));
        assert!(msg.contains("unexpected '}'"));
    }

    #[test]
    fn numeric_parse_error_names_kind() {
        let err = NumericParseError {
            value: "abc".into(),
            kind: NumericKind::Uint64,
        };
        assert_eq!(err.to_string(), "'abc' is not a valid uint64");
    }
}
