use thiserror::Error;

/// Errors surfaced at the fallible boundaries of the signature/delta pipeline.
///
/// The original reference implementation degrades I/O failures to silent
/// no-ops (see the design notes on error handling); this crate instead
/// propagates them explicitly so the CLI can report a nonzero exit code.
#[derive(Error, Debug)]
pub enum RdiffError {
    /// Opening, reading from, or writing to a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding or decoding a signature/delta record with `bincode` failed.
    #[error("failed to (de)serialize signature data: {0}")]
    Serialization(#[from] bincode::Error),

    /// A rolling hash was initialized with fewer bytes than its window size.
    #[error("rolling hash initialization requires at least {window} bytes, got {got}")]
    InitTooShort { window: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, RdiffError>;
