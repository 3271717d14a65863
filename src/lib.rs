pub mod bio;
pub mod cli;
pub mod core;
pub mod utils;

pub use crate::bio::taxonomy::{TaxonId, TaxonomyGraph};
pub use crate::core::filter::{filter_records, FilterOptions, FilterSummary};
pub use crate::core::whitelist::{Whitelist, WhitelistStats};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxFilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed reading {} at line {line}: {source}", .path.display())]
    Read {
        path: PathBuf,
        line: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed taxonomy line {line} ({reason}): {content:?}")]
    TaxonomyParse {
        line: u64,
        content: String,
        reason: String,
    },

    #[error("Malformed catalog record at line {line} ({reason}): {content:?}")]
    MalformedRecord {
        line: u64,
        content: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TaxFilterError>;

/// Placeholder path for read errors raised by stream-level parsers
pub const UNNAMED_INPUT: &str = "<input>";

impl TaxFilterError {
    /// Error for a failed read of `line`, before the input's path is known
    pub fn read_failure(line: u64, source: std::io::Error) -> Self {
        TaxFilterError::Read {
            path: PathBuf::from(UNNAMED_INPUT),
            line,
            source,
        }
    }

    /// Attach the file name to a read error raised while parsing a stream
    pub fn at_path<P: Into<PathBuf>>(self, file: P) -> Self {
        match self {
            TaxFilterError::Read { line, source, .. } => TaxFilterError::Read {
                path: file.into(),
                line,
                source,
            },
            other => other,
        }
    }

    /// Whether the error came from writing to a closed pipe
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, TaxFilterError::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let parse = TaxFilterError::TaxonomyParse {
            line: 7,
            content: "abc\t|\t1".to_string(),
            reason: "invalid taxon id".to_string(),
        };
        assert_eq!(
            parse.to_string(),
            "Malformed taxonomy line 7 (invalid taxon id): \"abc\\t|\\t1\""
        );

        let record = TaxFilterError::MalformedRecord {
            line: 3,
            content: "x".to_string(),
            reason: "expected 4 fields, found 1".to_string(),
        };
        assert!(record.to_string().contains("line 3"));

        let open = TaxFilterError::Open {
            path: PathBuf::from("/nonexistent/nodes.dmp"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(open.to_string().starts_with("Cannot open /nonexistent/nodes.dmp"));

        let read = TaxFilterError::read_failure(
            12,
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated gzip"),
        )
        .at_path("catalog.gz");
        assert_eq!(
            read.to_string(),
            "Failed reading catalog.gz at line 12: truncated gzip"
        );

        let config = TaxFilterError::Config("no include roots".to_string());
        assert_eq!(config.to_string(), "Invalid configuration: no include roots");
    }

    #[test]
    fn test_broken_pipe_detection() {
        let pipe: TaxFilterError =
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe").into();
        assert!(pipe.is_broken_pipe());

        let other = TaxFilterError::read_failure(
            1,
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe"),
        );
        assert!(!other.is_broken_pipe());
    }
}
