//! Error types for vcard-cruncher.
//!
//! All errors are strongly typed using thiserror. Per-record codec
//! failures are kept separate from run-level failures so the loader can
//! attach the index of the offending block before aborting.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while parsing or validating a single vCard block.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The block does not start with `BEGIN:VCARD`.
    #[error("record block does not start with BEGIN:VCARD")]
    MissingBeginMarker,

    /// The block does not end with `END:VCARD`.
    #[error("record block does not end with END:VCARD")]
    MissingEndMarker,

    /// The block carries no `VERSION` property.
    #[error("record block has no VERSION property")]
    MissingVersion,

    /// The block declares a version other than 3.0.
    #[error("unsupported vCard version {found} (only 3.0 is supported)")]
    UnsupportedVersion {
        /// The version string found in the block.
        found: String,
    },

    /// A line inside the block is not a `NAME[;PARAMS]:VALUE` property.
    #[error("malformed property line: {line:?}")]
    MalformedProperty {
        /// The offending (unfolded) line.
        line: String,
    },
}

/// Top-level error type for a deduplication run.
///
/// Any of these aborts the whole run; there are no retries and no partial
/// output (an already-created output file may be left truncated).
#[derive(Debug, Error)]
pub enum CruncherError {
    /// A record block failed to parse. The index counts blocks in file
    /// order, starting at zero.
    #[error("record block {index} is invalid: {source}")]
    InvalidBlock {
        /// Zero-based index of the failing block.
        index: usize,
        /// The underlying codec failure.
        #[source]
        source: CodecError,
    },

    /// The input file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The input path as given.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The output file could not be created or written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// The output path.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Reading the operator's answer from the terminal failed.
    #[error("operator prompt failed: {0}")]
    Prompt(#[source] io::Error),

    /// Invariant violation that should not occur in normal operation.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the violated invariant.
        message: String,
    },
}

impl CruncherError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error originated in the record codec.
    #[must_use]
    pub const fn is_invalid_block(&self) -> bool {
        matches!(self, Self::InvalidBlock { .. })
    }

    /// Returns true if this is a file read/write failure.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Write { .. })
    }
}

/// Result type alias for vcard-cruncher operations.
pub type CruncherResult<T> = Result<T, CruncherError>;
