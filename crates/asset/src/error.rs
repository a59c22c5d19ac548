//! Loader errors.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Failure while loading an OBJ file. Every variant aborts the whole load.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("OBJ file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to open OBJ file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Malformed OBJ on line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },
}

impl ObjError {
    pub(crate) fn parse(line: usize, kind: ParseErrorKind) -> Self {
        ObjError::Parse { line, kind }
    }

    /// The parse failure, if this is one.
    pub fn parse_kind(&self) -> Option<&ParseErrorKind> {
        match self {
            ObjError::Parse { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// What exactly was wrong with a record.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseErrorKind {
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid {field} '{value}'")]
    InvalidFloat { field: &'static str, value: String },

    #[error("invalid index '{0}'")]
    InvalidIndex(String),

    #[error("OBJ indices are 1-based; found 0")]
    ZeroIndex,

    #[error("{what} index {index} out of range (len={len})")]
    IndexOutOfRange {
        what: &'static str,
        index: u32,
        len: usize,
    },

    #[error("expected a triangle, found {0} corners")]
    CornerCount(usize),

    #[error("face corner has no normal index but the mesh uses normals")]
    MissingNormal,
}

pub type ObjResult<T> = Result<T, ObjError>;
