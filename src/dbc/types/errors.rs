use serde::Serialize;
use std::io;
use thiserror::Error;

/// Errors produced while loading a `.dbc` file from disk.
#[derive(Debug, Error)]
pub enum DbcParseError {
    #[error("Not a valid .dbc file: {path}")]
    InvalidExtension { path: String },
    #[error("Failed to open '{path}'. \nError: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed while reading '{path}'. \nError: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Why a single DBC record was rejected. The scan always continues with the next line.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum RecordError {
    #[error("{keyword} record: expected {expected} tokens, found {found}")]
    MalformedRecord {
        keyword: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Can't parse {field} from '{token}'")]
    FieldParseFailure { field: &'static str, token: String },
    #[error("Can't find signal {signal}")]
    UnresolvedReference { signal: String },
    #[error("Signal defined before any message")]
    OrphanSignal,
    #[error("Message id {id:#X} repeats the message being parsed")]
    DuplicateMessage { id: u32 },
}

impl RecordError {
    pub(crate) fn field(field: &'static str, token: &str) -> RecordError {
        RecordError::FieldParseFailure {
            field,
            token: token.to_string(),
        }
    }
}

/// A rejected record: where it was, what it was, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// 0-based line in the DBC text.
    pub line: usize,
    /// Leading keyword of the record (`BO_`, `SG_`, `VAL_`, `BA_`).
    pub keyword: &'static str,
    pub error: RecordError,
}
