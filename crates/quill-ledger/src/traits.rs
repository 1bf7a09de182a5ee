//! The Ledger trait: the abstract interface to the remote ledger.
//!
//! The record protocol depends on exactly four operations plus opaque
//! identity types. Implementations include [`crate::MemoryLedger`] for
//! tests; a networked RPC client would implement the same trait.

use async_trait::async_trait;
use bytes::Bytes;
use quill_core::{Keypair, Pubkey};

use crate::error::Result;
use crate::transaction::{Transaction, TransactionId};

/// A point-in-time copy of an account's state.
///
/// This is a snapshot, not a live reference: the ledger owns the
/// authoritative bytes, and the snapshot can go stale between a fetch and
/// the next mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// The program permitted to interpret and mutate the account's bytes.
    pub owner_program: Pubkey,
    /// Balance in base units.
    pub balance: u64,
    /// The stored bytes; length equals the capacity fixed at creation.
    pub data: Bytes,
}

impl AccountSnapshot {
    /// Byte capacity reserved at creation.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }
}

/// Async interface to the ledger.
///
/// All submissions are atomic at the ledger boundary: every instruction in
/// the transaction applies, or none do. Failures are terminal for the call;
/// retry and backoff policy belongs to implementations, never to callers.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Look up an account. `None` means the address is absent; this is the
    /// sole authoritative way to discover whether a slot exists.
    async fn account_info(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>>;

    /// The minimum balance a freshly created account of `capacity` bytes
    /// must carry.
    async fn minimum_balance(&self, capacity: usize) -> Result<u64>;

    /// Submit a transaction signed by exactly `signers` and wait for it to
    /// be confirmed.
    async fn submit_and_confirm(
        &self,
        transaction: &Transaction,
        signers: &[&Keypair],
    ) -> Result<TransactionId>;

    /// Credit `amount` base units to `recipient` from the faucet.
    async fn request_faucet_funds(&self, recipient: &Pubkey, amount: u64) -> Result<()>;
}
