//! Golden test vectors for deterministic verification.
//!
//! These pin the exact byte layouts of instructions and records so any
//! other implementation of the protocol can be checked against them.

use quill_core::{fixed_data, NoteRecord, Pubkey, RecordData, RecordInstruction, Schema};
use serde::Serialize;

/// A golden test vector: a named encoding and its expected bytes.
#[derive(Debug, Clone, Serialize)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// What the vector pins down.
    pub description: &'static str,
    /// Expected encoding, hex.
    pub expected_hex: &'static str,
    /// The actual encoding produced by this implementation, hex.
    pub actual_hex: String,
}

impl GoldenVector {
    fn new<T: Schema>(
        name: &'static str,
        description: &'static str,
        expected_hex: &'static str,
        value: &T,
    ) -> Self {
        Self {
            name,
            description,
            expected_hex,
            actual_hex: hex::encode(value.to_vec()),
        }
    }

    /// Whether the implementation matches the pinned encoding.
    pub fn matches(&self) -> bool {
        self.actual_hex == self.expected_hex
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector::new(
            "initialize",
            "Initialize is a bare discriminant",
            "00",
            &RecordInstruction::Initialize,
        ),
        GoldenVector::new(
            "write",
            "Write carries offset (u64 LE) and length-prefixed bytes",
            "01050000000000000002000000abcd",
            &RecordInstruction::Write {
                offset: 5,
                data: vec![0xab, 0xcd],
            },
        ),
        GoldenVector::new(
            "set_authority",
            "SetAuthority is a bare discriminant",
            "02",
            &RecordInstruction::SetAuthority,
        ),
        GoldenVector::new(
            "close_account",
            "CloseAccount is a bare discriminant",
            "03",
            &RecordInstruction::CloseAccount,
        ),
        GoldenVector::new(
            "initialize_dynamic",
            "InitializeDynamic is a bare discriminant",
            "04",
            &RecordInstruction::InitializeDynamic,
        ),
        GoldenVector::new(
            "write_dynamic_empty",
            "WriteDynamic with offset 0 and no bytes",
            "05000000000000000000000000",
            &RecordInstruction::WriteDynamic {
                offset: 0,
                data: vec![],
            },
        ),
        GoldenVector::new(
            "fixed_record",
            "Version 0, authority 0x11*32, full 32-byte payload",
            "001111111111111111111111111111111111111111111111111111111111111111\
             696e697469616c206461746120736176656420746f20616e206163636f756e74",
            &RecordData::new(
                Pubkey::from_bytes([0x11; 32]),
                fixed_data(b"initial data saved to an account"),
            ),
        ),
        GoldenVector::new(
            "note_record",
            "Dynamic note payload: pubkey then length-prefixed string",
            "0707070707070707070707070707070707070707070707070707070707070707020000006869",
            &NoteRecord {
                key: Pubkey::from_bytes([0x07; 32]),
                message: "hi".to_string(),
            },
        ),
    ]
}
