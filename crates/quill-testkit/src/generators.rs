//! Proptest generators for property-based testing.

use proptest::prelude::*;

use quill_core::{
    fixed_data, AssetMetadata, Keypair, NoteRecord, Pubkey, RecordData, RecordInstruction,
};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random Pubkey.
pub fn pubkey() -> impl Strategy<Value = Pubkey> {
    any::<[u8; 32]>().prop_map(Pubkey::from_bytes)
}

/// Generate a seed string the address derivation accepts.
pub fn seed_string() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,31}".prop_map(String::from)
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a fixed record.
pub fn record_data() -> impl Strategy<Value = RecordData> {
    (pubkey(), payload(32)).prop_map(|(authority, content)| {
        RecordData::new(authority, fixed_data(&content))
    })
}

/// Generate a dynamic note payload.
pub fn note_record() -> impl Strategy<Value = NoteRecord> {
    (pubkey(), ".{0,64}").prop_map(|(key, message)| NoteRecord { key, message })
}

/// Generate a dynamic asset metadata payload.
pub fn asset_metadata() -> impl Strategy<Value = AssetMetadata> {
    (
        pubkey(),
        ".{0,32}",
        ".{0,64}",
        "[a-z]{0,16}",
        any::<bool>(),
        any::<u64>(),
        any::<u16>(),
    )
        .prop_map(
            |(parent_key, name, description, uri, is_mutable, amount, shares)| AssetMetadata {
                parent_key,
                name,
                description,
                uri,
                is_mutable,
                amount,
                shares,
            },
        )
}

/// Generate any record instruction variant.
pub fn record_instruction() -> impl Strategy<Value = RecordInstruction> {
    prop_oneof![
        Just(RecordInstruction::Initialize),
        (any::<u64>(), payload(128))
            .prop_map(|(offset, data)| RecordInstruction::Write { offset, data }),
        Just(RecordInstruction::SetAuthority),
        Just(RecordInstruction::CloseAccount),
        Just(RecordInstruction::InitializeDynamic),
        (any::<u64>(), payload(128))
            .prop_map(|(offset, data)| RecordInstruction::WriteDynamic { offset, data }),
    ]
}
