//! # Quill Core
//!
//! Core primitives for the Quill record protocol:
//!
//! - **Identities**: 32-byte public keys with an ed25519 signing capability
//! - **Schema codec**: a declared-field-order binary encoding shared between
//!   client and on-ledger program
//! - **Slot addressing**: deterministic derivation of storage addresses from
//!   a base identity, a textual seed, and an owning program
//! - **Record layouts**: the fixed 65-byte record and caller-defined dynamic
//!   payloads stored behind a 33-byte header
//! - **Instructions**: the record program's wire messages and the pure
//!   builders that assemble them

pub mod address;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod instruction;
pub mod record;
pub mod types;

pub use address::{derive_address, salted_seed};
pub use codec::{Reader, Schema, Writer};
pub use crypto::{Keypair, Signature};
pub use error::{CodecError, SignatureError};
pub use instruction::{AccountMeta, Instruction, RecordInstruction};
pub use record::{
    fixed_data, AssetMetadata, NoteRecord, RecordData, DATA_LENGTH, HEADER_LENGTH,
};
pub use types::Pubkey;
