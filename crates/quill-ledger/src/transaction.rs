//! Transactions: an ordered list of instructions submitted atomically.
//!
//! The ledger applies all instructions in a transaction or none of them.
//! Signers sign the deterministic message encoding; there is no process-wide
//! signer list, every submission carries its own signer set.

use std::fmt;

use quill_core::{Instruction, Writer};

/// A 32-byte transaction identifier: Blake3 of the message bytes under a
/// domain prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(pub [u8; 32]);

const TX_DOMAIN: &[u8] = b"quill-tx-v0:";

impl TransactionId {
    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// An ordered list of instructions, applied atomically by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub instructions: Vec<Instruction>,
}

impl Transaction {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Deterministic message encoding: the bytes signers sign.
    pub fn message_bytes(&self) -> Vec<u8> {
        let mut w = Writer::new();
        w.write_u16(self.instructions.len() as u16);
        for ix in &self.instructions {
            w.write_pubkey(&ix.program_id);
            w.write_u16(ix.accounts.len() as u16);
            for meta in &ix.accounts {
                w.write_pubkey(&meta.pubkey);
                let flags = (meta.is_signer as u8) | ((meta.is_writable as u8) << 1);
                w.write_u8(flags);
            }
            w.write_bytes(&ix.data);
        }
        w.into_bytes()
    }

    /// The transaction's content-derived identifier.
    pub fn id(&self) -> TransactionId {
        let mut hasher = blake3::Hasher::new();
        hasher.update(TX_DOMAIN);
        hasher.update(&self.message_bytes());
        TransactionId(*hasher.finalize().as_bytes())
    }
}
