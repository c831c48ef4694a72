use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    // Wire codec errors. These never escape the library surface: a record
    // that fails to decode is dropped, a message that fails validation
    // becomes an empty reply.
    #[error("insufficient data for base length type")]
    ErrBaseLen,
    #[error("insufficient data for calculated length type")]
    ErrCalcLen,
    #[error("segment prefix is reserved")]
    ErrReservedLabelBits,
    #[error("too many compression pointers")]
    ErrTooManyPointers,
    #[error("invalid compression pointer")]
    ErrInvalidPointer,
    #[error("name exceeds maximum length")]
    ErrNameTooLong,
    #[error("segment length too long")]
    ErrSegmentTooLong,
    #[error("record length does not match record type")]
    ErrRecordLength,

    // Reply validation.
    #[error("not a reply to our question")]
    ErrNotOurReply,
    #[error("too many questions")]
    ErrTooManyQuestions,
    #[error("question does not match the discovery name")]
    ErrQuestionMismatch,
    #[error("transaction id does not match the last query")]
    ErrTransactionIdMismatch,

    // Socket and performer errors, surfaced to callers.
    #[error("failed to open multicast socket")]
    ErrOpeningSocket,
    #[error("failed to send discovery packet")]
    ErrSendingDiscovery,
    #[error("failed to send query packet")]
    ErrSendingQuery,
    #[error("unknown interface address")]
    ErrUnknownInterface,

    #[error("{0}")]
    Io(#[source] IoError),
}

#[derive(Debug, Error)]
#[error("io error: {0}")]
pub struct IoError(#[from] pub io::Error);

// Workaround for wanting PartialEq for io::Error.
impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(IoError(e))
    }
}
