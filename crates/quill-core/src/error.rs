//! Error types for Quill Core.

use thiserror::Error;

/// Errors raised by the schema codec.
///
/// Decoding remote bytes must never terminate the process: malformed or
/// truncated input surfaces as one of these variants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("schema mismatch: next field needs {needed} bytes, {remaining} remain")]
    SchemaMismatch { needed: usize, remaining: usize },

    #[error("string field is not valid utf-8")]
    InvalidUtf8,

    #[error("unknown instruction discriminant: {0}")]
    UnknownDiscriminant(u8),
}

/// Errors raised when verifying signatures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("signature verification failed")]
    InvalidSignature,
}
