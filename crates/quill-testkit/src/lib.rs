//! # Quill Testkit
//!
//! Testing utilities for the Quill record protocol.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: pinned wire encodings for cross-implementation
//!   verification
//! - **Generators**: proptest strategies for property-based testing
//! - **Fixtures**: a funded in-memory ledger plus client for scenario tests
//!
//! ## Golden Vectors
//!
//! ```rust
//! use quill_testkit::vectors::all_vectors;
//!
//! for vector in all_vectors() {
//!     assert!(vector.matches(), "{} drifted", vector.name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use quill_testkit::generators::note_record;
//! use quill::Schema;
//!
//! proptest! {
//!     #[test]
//!     fn notes_roundtrip(note in note_record()) {
//!         let decoded = quill::NoteRecord::from_bytes(&note.to_vec()).unwrap();
//!         prop_assert_eq!(decoded, note);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use quill_testkit::fixtures::TestFixture;
//!
//! async fn example() {
//!     let fixture = TestFixture::new().await;
//!     let authority = fixture.funded_keypair().await;
//!     let outcome = fixture
//!         .client
//!         .create_or_fetch(b"hello", &fixture.payer, &authority, "notes")
//!         .await
//!         .unwrap();
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_keypairs, TestFixture};
