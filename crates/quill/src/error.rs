//! Error types for the record client.

use quill_core::CodecError;
use quill_ledger::LedgerError;
use thiserror::Error;

/// Errors surfaced by record client operations.
///
/// Every error is terminal for the call that produced it; the client never
/// retries on the caller's behalf.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An account the operation expected to observe could not be fetched
    /// after a confirmed submission.
    #[error("account unavailable after confirmation")]
    AccountUnavailable,

    /// The operation targets a record slot that does not exist.
    #[error("record not found")]
    RecordNotFound,

    /// The signer does not match the record's stored authority.
    #[error("unauthorized: signer does not match the record authority")]
    Unauthorized,

    /// The encoded payload does not fit the slot's capacity.
    #[error("payload needs {needed} bytes, slot capacity is {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// Stored bytes did not decode against the expected layout.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The ledger rejected a lookup or submission.
    #[error("ledger error: {0}")]
    Ledger(LedgerError),
}

impl From<LedgerError> for ClientError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Unauthorized => Self::Unauthorized,
            other => Self::Ledger(other),
        }
    }
}

/// Result type for record client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
