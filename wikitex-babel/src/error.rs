//! Error types for conversion runs

use std::io;
use thiserror::Error;

/// Errors that can occur while converting a wikitex stream.
///
/// Malformed markup is never an error: unmatched delimiters leave the
/// current math mode open and the rest of the input is passed through.
/// Only the surrounding I/O can fail.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Reading from the source stream failed
    #[error("failed to read source line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
    /// Writing to the destination stream failed
    #[error("failed to write output for line {line}: {source}")]
    Write {
        line: usize,
        #[source]
        source: io::Error,
    },
}
