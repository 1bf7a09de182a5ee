//! Record program instructions and their builders.
//!
//! An instruction is a transient message: one discriminant byte followed by
//! the variant's own fields. The builders are pure functions that pair the
//! encoded payload with the account-reference list each variant expects.
//!
//! Account conventions: the slot is always listed first and writable; the
//! authority second as a non-writable signer. `SetAuthority` and
//! `CloseAccount` list the new authority / destination third, writable and
//! non-signing.

use crate::codec::{Reader, Result, Schema, Writer};
use crate::error::CodecError;
use crate::types::Pubkey;

/// A reference to an account named by an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    /// Writable, non-signing.
    pub fn writable(pubkey: Pubkey) -> Self {
        Self {
            pubkey,
            is_signer: false,
            is_writable: true,
        }
    }

    /// Signing, non-writable.
    pub fn signer(pubkey: Pubkey) -> Self {
        Self {
            pubkey,
            is_signer: true,
            is_writable: false,
        }
    }

    /// Signing and writable (e.g. a fee payer being debited).
    pub fn writable_signer(pubkey: Pubkey) -> Self {
        Self {
            pubkey,
            is_signer: true,
            is_writable: true,
        }
    }
}

/// A fully assembled instruction: target program, account references, and
/// the encoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Pubkey,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

/// The record program's instruction set.
///
/// One variant per discriminant, each carrying only its own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordInstruction {
    /// Claim a freshly created slot: write the header (version, authority).
    Initialize,
    /// Write `data` into the payload region at `offset`.
    Write { offset: u64, data: Vec<u8> },
    /// Replace the stored authority with the third listed account.
    SetAuthority,
    /// Transfer the slot's balance to the destination and free the slot.
    CloseAccount,
    /// Initialize, dynamic-capacity flavor.
    InitializeDynamic,
    /// Write, dynamic-capacity flavor.
    WriteDynamic { offset: u64, data: Vec<u8> },
}

impl RecordInstruction {
    /// The leading tag byte for this variant.
    pub fn discriminant(&self) -> u8 {
        match self {
            Self::Initialize => 0,
            Self::Write { .. } => 1,
            Self::SetAuthority => 2,
            Self::CloseAccount => 3,
            Self::InitializeDynamic => 4,
            Self::WriteDynamic { .. } => 5,
        }
    }
}

impl Schema for RecordInstruction {
    fn encode(&self, w: &mut Writer) {
        w.write_u8(self.discriminant());
        match self {
            Self::Write { offset, data } | Self::WriteDynamic { offset, data } => {
                w.write_u64(*offset);
                w.write_bytes(data);
            }
            Self::Initialize | Self::SetAuthority | Self::CloseAccount
            | Self::InitializeDynamic => {}
        }
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self> {
        match r.read_u8()? {
            0 => Ok(Self::Initialize),
            1 => Ok(Self::Write {
                offset: r.read_u64()?,
                data: r.read_bytes()?,
            }),
            2 => Ok(Self::SetAuthority),
            3 => Ok(Self::CloseAccount),
            4 => Ok(Self::InitializeDynamic),
            5 => Ok(Self::WriteDynamic {
                offset: r.read_u64()?,
                data: r.read_bytes()?,
            }),
            other => Err(CodecError::UnknownDiscriminant(other)),
        }
    }
}

/// Build an `Initialize` instruction.
pub fn initialize(account: &Pubkey, authority: &Pubkey, program_id: &Pubkey) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::writable(*account), AccountMeta::signer(*authority)],
        data: RecordInstruction::Initialize.to_vec(),
    }
}

/// Build a `Write` instruction.
pub fn write(
    account: &Pubkey,
    authority: &Pubkey,
    offset: u64,
    data: &[u8],
    program_id: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::writable(*account), AccountMeta::signer(*authority)],
        data: RecordInstruction::Write {
            offset,
            data: data.to_vec(),
        }
        .to_vec(),
    }
}

/// Build a `SetAuthority` instruction.
pub fn set_authority(
    account: &Pubkey,
    authority: &Pubkey,
    new_authority: &Pubkey,
    program_id: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::writable(*account),
            AccountMeta::signer(*authority),
            AccountMeta::writable(*new_authority),
        ],
        data: RecordInstruction::SetAuthority.to_vec(),
    }
}

/// Build a `CloseAccount` instruction.
pub fn close_account(
    account: &Pubkey,
    authority: &Pubkey,
    destination: &Pubkey,
    program_id: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::writable(*account),
            AccountMeta::signer(*authority),
            AccountMeta::writable(*destination),
        ],
        data: RecordInstruction::CloseAccount.to_vec(),
    }
}

/// Build an `InitializeDynamic` instruction.
pub fn initialize_dynamic(
    account: &Pubkey,
    authority: &Pubkey,
    program_id: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::writable(*account), AccountMeta::signer(*authority)],
        data: RecordInstruction::InitializeDynamic.to_vec(),
    }
}

/// Build a `WriteDynamic` instruction.
pub fn write_dynamic(
    account: &Pubkey,
    authority: &Pubkey,
    offset: u64,
    data: &[u8],
    program_id: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![AccountMeta::writable(*account), AccountMeta::signer(*authority)],
        data: RecordInstruction::WriteDynamic {
            offset,
            data: data.to_vec(),
        }
        .to_vec(),
    }
}
