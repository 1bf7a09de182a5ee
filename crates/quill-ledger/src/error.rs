//! Error types for the ledger seam.

use quill_core::{CodecError, Pubkey};
use thiserror::Error;

/// Errors a ledger can return for lookups and submissions.
///
/// These are terminal for the call that produced them; nothing here is
/// retried by this crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The signer does not match the stored authority.
    #[error("unauthorized: signer does not match the stored authority")]
    Unauthorized,

    #[error("missing required signature for {0}")]
    MissingSignature(Pubkey),

    #[error("signature verification failed for {0}")]
    InvalidSignature(Pubkey),

    #[error("account {0} already in use")]
    AccountInUse(Pubkey),

    #[error("account {0} not found")]
    AccountNotFound(Pubkey),

    #[error("account {0} is not owned by the executing program")]
    InvalidOwner(Pubkey),

    #[error("account already initialized")]
    AlreadyInitialized,

    #[error("account not initialized")]
    NotInitialized,

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("derived address mismatch: expected {expected}, got {actual}")]
    AddressMismatch { expected: Pubkey, actual: Pubkey },

    #[error("unknown program: {0}")]
    UnknownProgram(Pubkey),

    #[error("write past end of account: end {end}, capacity {capacity}")]
    WriteOutOfBounds { end: usize, capacity: usize },

    #[error("instruction names {expected} accounts, {actual} provided")]
    MissingAccounts { expected: usize, actual: usize },

    #[error("malformed instruction: {0}")]
    MalformedInstruction(#[from] CodecError),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
