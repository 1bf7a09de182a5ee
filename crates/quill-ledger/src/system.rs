//! The system program's account-creation instruction.
//!
//! Account allocation is the ledger's own concern, not the record
//! program's: a create-or-fetch transaction leads with this instruction and
//! follows with the record program's `Initialize` and first `Write`.

use quill_core::{AccountMeta, CodecError, Instruction, Pubkey, Reader, Schema, Writer};

/// The system program's well-known identity.
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::ZERO;

/// System program instructions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SystemInstruction {
    /// Allocate `capacity` zeroed bytes at the address derived from
    /// (base, seed, owner_program), funded with `balance` from the payer.
    CreateAccountWithSeed {
        base: Pubkey,
        seed: String,
        balance: u64,
        capacity: u64,
        owner_program: Pubkey,
    },
}

impl SystemInstruction {
    pub fn discriminant(&self) -> u8 {
        match self {
            Self::CreateAccountWithSeed { .. } => 0,
        }
    }
}

impl Schema for SystemInstruction {
    fn encode(&self, w: &mut Writer) {
        w.write_u8(self.discriminant());
        match self {
            Self::CreateAccountWithSeed {
                base,
                seed,
                balance,
                capacity,
                owner_program,
            } => {
                w.write_pubkey(base);
                w.write_string(seed);
                w.write_u64(*balance);
                w.write_u64(*capacity);
                w.write_pubkey(owner_program);
            }
        }
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        match r.read_u8()? {
            0 => Ok(Self::CreateAccountWithSeed {
                base: r.read_pubkey()?,
                seed: r.read_string()?,
                balance: r.read_u64()?,
                capacity: r.read_u64()?,
                owner_program: r.read_pubkey()?,
            }),
            other => Err(CodecError::UnknownDiscriminant(other)),
        }
    }
}

/// Build a `CreateAccountWithSeed` instruction.
///
/// `address` must equal `derive_address(base, seed, owner_program)`; the
/// ledger re-derives and rejects mismatches. The payer is debited `balance`
/// and must sign; the base identity must sign to claim the derivation.
#[allow(clippy::too_many_arguments)]
pub fn create_account_with_seed(
    payer: &Pubkey,
    base: &Pubkey,
    seed: &str,
    address: &Pubkey,
    balance: u64,
    capacity: u64,
    owner_program: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::writable_signer(*payer),
            AccountMeta::writable(*address),
            AccountMeta::signer(*base),
        ],
        data: SystemInstruction::CreateAccountWithSeed {
            base: *base,
            seed: seed.to_string(),
            balance,
            capacity,
            owner_program: *owner_program,
        }
        .to_vec(),
    }
}
