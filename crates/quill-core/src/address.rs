//! Slot addressing: deterministic derivation of storage addresses.
//!
//! An address is derived from Blake3(base || seed || owner_program) under a
//! domain prefix. Derivation is pure: the same inputs always produce the
//! same address, and any single-byte change to an input produces an
//! independent address. Derived addresses have no corresponding secret key.

use crate::types::Pubkey;

const ADDRESS_DOMAIN: &[u8] = b"quill-slot-v0:";

/// Derive the storage address for (base, seed, owner_program).
pub fn derive_address(base: &Pubkey, seed: &str, owner_program: &Pubkey) -> Pubkey {
    let mut hasher = blake3::Hasher::new();
    hasher.update(ADDRESS_DOMAIN);
    hasher.update(base.as_bytes());
    hasher.update(b":");
    hasher.update(seed.as_bytes());
    hasher.update(b":");
    hasher.update(owner_program.as_bytes());
    Pubkey(*hasher.finalize().as_bytes())
}

/// Salt a seed for callers that need several distinct slots under one
/// logical seed.
///
/// The salt is always appended as `"<seed>.<salt>"`. Derivation itself never
/// salts; choosing and remembering the salt is the caller's job.
pub fn salted_seed(seed: &str, salt: u64) -> String {
    format!("{seed}.{salt}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;

    #[test]
    fn test_derivation_deterministic() {
        let base = Keypair::from_seed(&[1; 32]).pubkey();
        let program = Pubkey::from_bytes([9; 32]);

        let a1 = derive_address(&base, "my-record", &program);
        let a2 = derive_address(&base, "my-record", &program);
        assert_eq!(a1, a2);
    }

    #[test]
    fn test_each_input_changes_address() {
        let base = Pubkey::from_bytes([1; 32]);
        let other_base = Pubkey::from_bytes([2; 32]);
        let program = Pubkey::from_bytes([9; 32]);
        let other_program = Pubkey::from_bytes([10; 32]);

        let addr = derive_address(&base, "seed", &program);
        assert_ne!(addr, derive_address(&other_base, "seed", &program));
        assert_ne!(addr, derive_address(&base, "seec", &program));
        assert_ne!(addr, derive_address(&base, "seed", &other_program));
    }

    #[test]
    fn test_no_collisions_across_seed_corpus() {
        let base = Pubkey::from_bytes([1; 32]);
        let program = Pubkey::from_bytes([9; 32]);

        let mut seen = std::collections::HashSet::new();
        for i in 0..512 {
            let addr = derive_address(&base, &format!("seed-{i}"), &program);
            assert!(seen.insert(addr), "collision at seed-{i}");
        }
    }

    #[test]
    fn test_salted_seed_is_deterministic() {
        assert_eq!(salted_seed("notes", 7), "notes.7");
        assert_eq!(salted_seed("notes", 7), salted_seed("notes", 7));
        assert_ne!(salted_seed("notes", 7), salted_seed("notes", 8));
    }
}
