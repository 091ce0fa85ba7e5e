use std::io;
use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid amount '{0}': expected a number")]
    InvalidAmount(String),

    #[error("no expenses recorded")]
    NoData,

    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    #[error("corrupt data on line {line}: {reason}")]
    CorruptData { line: u64, reason: String },

    #[error("value overflow")]
    ValueOverflow,
}

impl LedgerError {
    /// Classifies a csv error raised while reading: I/O stays I/O, anything
    /// else means the file content is bad.
    pub fn from_csv_read(err: csv::Error) -> Self {
        if err.is_io_error() {
            return LedgerError::Io(io::Error::from(err));
        }
        let line = err.position().map(|p| p.line()).unwrap_or_default();
        LedgerError::CorruptData {
            line,
            reason: err.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(err: csv::Error) -> Self {
        LedgerError::Io(io::Error::from(err))
    }
}
