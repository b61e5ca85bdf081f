/*!

  Error types

*/

use std::io;
use thiserror::Error;

/// Errors raised while translating a bdnet stream.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the input or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A `[` without a closing `]` in a port name.
    #[error("line {line}: unmatched `[` in `{text}`")]
    UnmatchedBracket { line: usize, text: String },
    /// A bit index that is not a decimal number.
    #[error("line {line}: bad bit index in `{text}`")]
    BadIndex { line: usize, text: String },
    /// A line inside a list block that is not a `name : value` record.
    /// Only raised in strict mode.
    #[error("line {line}: not a `name : value` record: `{text}`")]
    UnmatchedRecord { line: usize, text: String },
    /// A magnitude-suffixed value that could not be read.
    #[error("bad value `{0}`")]
    BadValue(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
