//! Ledger client seam for Quill.
//!
//! The record protocol treats the ledger as an external collaborator behind
//! the [`Ledger`] trait: look up an account, price an allocation, submit a
//! signed transaction, request faucet funds. [`MemoryLedger`] implements the
//! trait in-process, executing the record program's observable semantics so
//! the full lifecycle can be tested without a network.

pub mod error;
pub mod memory;
pub mod system;
pub mod traits;
pub mod transaction;

pub use error::{LedgerError, Result};
pub use memory::MemoryLedger;
pub use system::{create_account_with_seed, SystemInstruction, SYSTEM_PROGRAM_ID};
pub use traits::{AccountSnapshot, Ledger};
pub use transaction::{Transaction, TransactionId};
