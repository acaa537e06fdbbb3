//! Reader error types

use thiserror::Error;

/// Result type for reader operations
pub type ReadResult<T> = std::result::Result<T, ReadError>;

/// Errors that can occur while extracting a workbook
#[derive(Debug, Error)]
pub enum ReadError {
    /// The input could not be tokenized as XML
    #[error("decode error while {operation}: {source}")]
    Decode {
        /// Stage that failed
        operation: &'static str,
        #[source]
        source: DecodeCause,
    },

    /// Well-formed input without a single `Worksheet` element
    #[error("no recognizable worksheet found: input is not an Excel XML spreadsheet")]
    SchemaMismatch,
}

impl ReadError {
    pub(crate) fn decode(operation: &'static str, cause: impl Into<DecodeCause>) -> Self {
        ReadError::Decode {
            operation,
            source: cause.into(),
        }
    }

    /// Check if this is a decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, ReadError::Decode { .. })
    }

    /// Check if this is a schema-mismatch error
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, ReadError::SchemaMismatch)
    }
}

/// Underlying cause of a [`ReadError::Decode`]
#[derive(Debug, Error)]
pub enum DecodeCause {
    /// Tokenizer error (malformed markup, bad escape, I/O failure mid-stream)
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute on an element
    #[error("attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// CDATA section that is not valid UTF-8
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// IO error outside the tokenizer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended while an element was still open
    #[error("unexpected end of input inside <{0}>")]
    UnexpectedEof(String),

    /// Non-whitespace text outside of the root element
    #[error("text outside of the root element")]
    StrayText,

    /// End tag without a matching start tag
    #[error("unexpected end tag </{0}>")]
    UnbalancedEnd(String),
}
