//! # Quill
//!
//! Client for versioned, authority-gated binary records stored in
//! fixed-capacity ledger slots.
//!
//! ## Overview
//!
//! Quill manages the full record lifecycle against any [`Ledger`]:
//!
//! - **Records**: a one-byte version, a 32-byte authority, then the payload
//! - **Slots**: fixed-capacity accounts at addresses derived from
//!   (authority, seed, program)
//! - **Authority**: every mutation requires the stored authority's signature
//! - **Atomicity**: creation is allocate + initialize + first write in one
//!   transaction
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quill::{MemoryLedger, Pubkey, RecordClient, RecordClientConfig};
//! use quill::core::Keypair;
//! use quill::ledger::Ledger;
//!
//! async fn example() {
//!     let program_id = Pubkey::from_bytes([9; 32]);
//!     let ledger = Arc::new(MemoryLedger::new(program_id));
//!
//!     let payer = Keypair::generate();
//!     let authority = Keypair::generate();
//!     ledger
//!         .request_faucet_funds(&payer.pubkey(), 1_000_000_000)
//!         .await
//!         .unwrap();
//!
//!     let client = RecordClient::new(ledger, program_id, RecordClientConfig::default());
//!     let outcome = client
//!         .create_or_fetch(b"hello", &payer, &authority, "notes")
//!         .await
//!         .unwrap();
//!     assert!(!outcome.existed);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `quill::core` - Wire codec, addresses, keys, record layouts
//! - `quill::ledger` - The Ledger trait, transactions, the in-memory ledger

pub mod client;
pub mod error;

// Re-export component crates
pub use quill_core as core;
pub use quill_ledger as ledger;

// Re-export main types for convenience
pub use client::{CreateOutcome, RecordClient, RecordClientConfig};
pub use error::{ClientError, Result};

// Re-export commonly used component types
pub use quill_core::{
    derive_address, fixed_data, salted_seed, AssetMetadata, Keypair, NoteRecord, Pubkey,
    RecordData, RecordInstruction, Schema, DATA_LENGTH, HEADER_LENGTH,
};
pub use quill_ledger::{AccountSnapshot, Ledger, MemoryLedger, Transaction, TransactionId};
