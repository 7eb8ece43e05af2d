use std::io;

use thiserror::Error;

/// Failures surfaced by a [`Tokenizer`](crate::Tokenizer).
///
/// End-of-data is not an error; it is reported through
/// [`complete`](crate::Tokenizer::complete) and empty runs. The first hard
/// failure is latched and every later scan behaves as if the source had no
/// more bytes.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The byte source failed with something other than end-of-data.
    #[error("source read failed: {0}")]
    Read(#[from] io::Error),
}
