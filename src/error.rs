//! Error kinds for the unpacking pipeline.

use std::path::PathBuf;

/// Errors produced while resolving, extracting, or packing scene data.
///
/// Every variant is fatal: the tool aborts on the first failure and performs
/// no cleanup of files already written.
#[derive(Debug, thiserror::Error)]
pub enum UnpackError {
    /// A required key is absent, an index is out of range, or the document
    /// does not contain exactly one mesh with exactly one primitive.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// A declared accessor type or buffer-view target does not match what the
    /// extraction step expects.
    #[error("schema mismatch in {field}: expected {expected}, found {found}")]
    SchemaMismatch {
        field: &'static str,
        expected: String,
        found: String,
    },

    /// The source buffer file holds fewer bytes than the declared range.
    #[error("source buffer {path:?} truncated: needed {needed} bytes at offset {offset}")]
    TruncatedSource {
        path: PathBuf,
        offset: u64,
        needed: u64,
    },

    /// Fewer bytes reached the output file than were read from the source.
    /// Signals a filesystem or disk-space problem.
    #[error("short write to {path:?}: expected {expected} bytes")]
    ShortWrite { path: PathBuf, expected: u64 },

    /// Filesystem failure outside the truncation/short-write contracts.
    #[error("i/o error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
