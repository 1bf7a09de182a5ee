//! In-memory implementation of the Ledger trait.
//!
//! This is primarily for testing. It executes the observable semantics of
//! the system and record programs so the full record lifecycle can run
//! without a network. Thread-safe via RwLock; all state is lost on drop.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use quill_core::{
    derive_address, Instruction, Keypair, Pubkey, RecordData, RecordInstruction, Schema,
    HEADER_LENGTH,
};

use crate::error::{LedgerError, Result};
use crate::system::{SystemInstruction, SYSTEM_PROGRAM_ID};
use crate::traits::{AccountSnapshot, Ledger};
use crate::transaction::{Transaction, TransactionId};

/// Flat reserve charged for any account, independent of size.
const BASE_RESERVE: u64 = 890_880;
/// Additional reserve per byte of capacity.
const RESERVE_PER_BYTE: u64 = 6_960;

/// In-memory ledger implementation.
///
/// Executes two programs: the system program (account creation) and the
/// record program registered at construction. Transactions apply atomically;
/// any failing instruction leaves the ledger untouched.
pub struct MemoryLedger {
    record_program: Pubkey,
    inner: RwLock<MemoryLedgerInner>,
}

struct MemoryLedgerInner {
    accounts: HashMap<Pubkey, AccountEntry>,
}

#[derive(Debug, Clone)]
struct AccountEntry {
    owner_program: Pubkey,
    balance: u64,
    data: Vec<u8>,
}

impl MemoryLedger {
    /// Create an empty ledger that executes the record program at
    /// `record_program`.
    pub fn new(record_program: Pubkey) -> Self {
        Self {
            record_program,
            inner: RwLock::new(MemoryLedgerInner {
                accounts: HashMap::new(),
            }),
        }
    }

    /// The record program's address on this ledger.
    pub fn record_program(&self) -> Pubkey {
        self.record_program
    }

    fn execute(
        &self,
        accounts: &mut HashMap<Pubkey, AccountEntry>,
        instruction: &Instruction,
        signer_keys: &[Pubkey],
    ) -> Result<()> {
        for meta in &instruction.accounts {
            if meta.is_signer && !signer_keys.contains(&meta.pubkey) {
                return Err(LedgerError::MissingSignature(meta.pubkey));
            }
        }

        if instruction.program_id == SYSTEM_PROGRAM_ID {
            self.execute_system(accounts, instruction)
        } else if instruction.program_id == self.record_program {
            self.execute_record(accounts, instruction)
        } else {
            Err(LedgerError::UnknownProgram(instruction.program_id))
        }
    }

    fn execute_system(
        &self,
        accounts: &mut HashMap<Pubkey, AccountEntry>,
        instruction: &Instruction,
    ) -> Result<()> {
        expect_accounts(instruction, 3)?;
        let payer = instruction.accounts[0].pubkey;
        let address = instruction.accounts[1].pubkey;

        let SystemInstruction::CreateAccountWithSeed {
            base,
            seed,
            balance,
            capacity,
            owner_program,
        } = SystemInstruction::from_bytes(&instruction.data)?;

        let derived = derive_address(&base, &seed, &owner_program);
        if derived != address {
            return Err(LedgerError::AddressMismatch {
                expected: derived,
                actual: address,
            });
        }
        if accounts.contains_key(&address) {
            return Err(LedgerError::AccountInUse(address));
        }

        let payer_entry = accounts
            .get_mut(&payer)
            .ok_or(LedgerError::AccountNotFound(payer))?;
        if payer_entry.balance < balance {
            return Err(LedgerError::InsufficientFunds {
                needed: balance,
                available: payer_entry.balance,
            });
        }
        payer_entry.balance -= balance;

        accounts.insert(
            address,
            AccountEntry {
                owner_program,
                balance,
                data: vec![0u8; capacity as usize],
            },
        );
        debug!(address = %address, capacity, "account created");
        Ok(())
    }

    fn execute_record(
        &self,
        accounts: &mut HashMap<Pubkey, AccountEntry>,
        instruction: &Instruction,
    ) -> Result<()> {
        expect_accounts(instruction, 2)?;
        let slot = instruction.accounts[0].pubkey;
        let signer = instruction.accounts[1].pubkey;

        let decoded = RecordInstruction::from_bytes(&instruction.data)?;
        if matches!(
            decoded,
            RecordInstruction::SetAuthority | RecordInstruction::CloseAccount
        ) {
            expect_accounts(instruction, 3)?;
        }

        let entry = accounts
            .get_mut(&slot)
            .ok_or(LedgerError::AccountNotFound(slot))?;
        if entry.owner_program != self.record_program {
            return Err(LedgerError::InvalidOwner(slot));
        }

        match decoded {
            RecordInstruction::Initialize | RecordInstruction::InitializeDynamic => {
                if entry.data.len() < HEADER_LENGTH {
                    return Err(LedgerError::WriteOutOfBounds {
                        end: HEADER_LENGTH,
                        capacity: entry.data.len(),
                    });
                }
                // A freshly created slot is all zeros; a nonzero authority
                // means someone already claimed it.
                if !header_authority(entry).is_zero() {
                    return Err(LedgerError::AlreadyInitialized);
                }
                entry.data[0] = RecordData::CURRENT_VERSION;
                entry.data[1..HEADER_LENGTH].copy_from_slice(signer.as_bytes());
            }
            RecordInstruction::Write { offset, data }
            | RecordInstruction::WriteDynamic { offset, data } => {
                check_authority(entry, &signer)?;
                // The offset is caller-supplied; saturate instead of
                // overflowing so a huge value reads as out of bounds.
                let start = usize::try_from(offset)
                    .map_or(usize::MAX, |o| HEADER_LENGTH.saturating_add(o));
                let end = start.saturating_add(data.len());
                if end > entry.data.len() {
                    return Err(LedgerError::WriteOutOfBounds {
                        end,
                        capacity: entry.data.len(),
                    });
                }
                entry.data[start..end].copy_from_slice(&data);
            }
            RecordInstruction::SetAuthority => {
                check_authority(entry, &signer)?;
                let new_authority = instruction.accounts[2].pubkey;
                entry.data[1..HEADER_LENGTH].copy_from_slice(new_authority.as_bytes());
            }
            RecordInstruction::CloseAccount => {
                check_authority(entry, &signer)?;
                let destination = instruction.accounts[2].pubkey;
                let reclaimed = entry.balance;
                accounts.remove(&slot);
                accounts
                    .entry(destination)
                    .or_insert_with(|| AccountEntry {
                        owner_program: SYSTEM_PROGRAM_ID,
                        balance: 0,
                        data: Vec::new(),
                    })
                    .balance += reclaimed;
                debug!(slot = %slot, "record account closed");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn account_info(&self, address: &Pubkey) -> Result<Option<AccountSnapshot>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.accounts.get(address).map(|entry| AccountSnapshot {
            owner_program: entry.owner_program,
            balance: entry.balance,
            data: Bytes::from(entry.data.clone()),
        }))
    }

    async fn minimum_balance(&self, capacity: usize) -> Result<u64> {
        Ok(BASE_RESERVE + RESERVE_PER_BYTE * capacity as u64)
    }

    async fn submit_and_confirm(
        &self,
        transaction: &Transaction,
        signers: &[&Keypair],
    ) -> Result<TransactionId> {
        let message = transaction.message_bytes();

        let mut signer_keys = Vec::with_capacity(signers.len());
        for keypair in signers {
            let pubkey = keypair.pubkey();
            let signature = keypair.sign(&message);
            signature
                .verify(&pubkey, &message)
                .map_err(|_| LedgerError::InvalidSignature(pubkey))?;
            signer_keys.push(pubkey);
        }

        // Execute against a scratch copy; commit only if every instruction
        // succeeds.
        let mut inner = self.inner.write().unwrap();
        let mut scratch = inner.accounts.clone();
        for instruction in &transaction.instructions {
            self.execute(&mut scratch, instruction, &signer_keys)?;
        }
        inner.accounts = scratch;

        let id = transaction.id();
        debug!(tx = %id, instructions = transaction.instructions.len(), "transaction confirmed");
        Ok(id)
    }

    async fn request_faucet_funds(&self, recipient: &Pubkey, amount: u64) -> Result<()> {
        let mut inner = self.inner.write().unwrap();
        inner
            .accounts
            .entry(*recipient)
            .or_insert_with(|| AccountEntry {
                owner_program: SYSTEM_PROGRAM_ID,
                balance: 0,
                data: Vec::new(),
            })
            .balance += amount;
        Ok(())
    }
}

fn expect_accounts(instruction: &Instruction, expected: usize) -> Result<()> {
    if instruction.accounts.len() < expected {
        return Err(LedgerError::MissingAccounts {
            expected,
            actual: instruction.accounts.len(),
        });
    }
    Ok(())
}

fn header_authority(entry: &AccountEntry) -> Pubkey {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&entry.data[1..HEADER_LENGTH]);
    Pubkey::from_bytes(bytes)
}

fn check_authority(entry: &AccountEntry, signer: &Pubkey) -> Result<()> {
    if entry.data.len() < HEADER_LENGTH {
        return Err(LedgerError::NotInitialized);
    }
    let stored = header_authority(entry);
    if stored.is_zero() {
        return Err(LedgerError::NotInitialized);
    }
    if stored != *signer {
        return Err(LedgerError::Unauthorized);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::create_account_with_seed;
    use quill_core::instruction;

    async fn funded_keypair(ledger: &MemoryLedger) -> Keypair {
        let keypair = Keypair::generate();
        ledger
            .request_faucet_funds(&keypair.pubkey(), 1_000_000_000)
            .await
            .unwrap();
        keypair
    }

    async fn create_record_slot(
        ledger: &MemoryLedger,
        payer: &Keypair,
        authority: &Keypair,
        seed: &str,
        capacity: u64,
    ) -> Pubkey {
        let program = ledger.record_program();
        let address = derive_address(&authority.pubkey(), seed, &program);
        let balance = ledger.minimum_balance(capacity as usize).await.unwrap();
        let tx = Transaction::new(vec![
            create_account_with_seed(
                &payer.pubkey(),
                &authority.pubkey(),
                seed,
                &address,
                balance,
                capacity,
                &program,
            ),
            instruction::initialize(&address, &authority.pubkey(), &program),
        ]);
        ledger
            .submit_and_confirm(&tx, &[payer, authority])
            .await
            .unwrap();
        address
    }

    #[tokio::test]
    async fn test_create_and_initialize() {
        let ledger = MemoryLedger::new(Pubkey::from_bytes([9; 32]));
        let payer = funded_keypair(&ledger).await;
        let authority = funded_keypair(&ledger).await;

        let address = create_record_slot(&ledger, &payer, &authority, "notes", 65).await;

        let snapshot = ledger.account_info(&address).await.unwrap().unwrap();
        assert_eq!(snapshot.capacity(), 65);
        assert_eq!(snapshot.data[0], RecordData::CURRENT_VERSION);
        assert_eq!(&snapshot.data[1..33], authority.pubkey().as_bytes());
    }

    #[tokio::test]
    async fn test_initialize_twice_fails() {
        let ledger = MemoryLedger::new(Pubkey::from_bytes([9; 32]));
        let payer = funded_keypair(&ledger).await;
        let authority = funded_keypair(&ledger).await;
        let program = ledger.record_program();

        let address = create_record_slot(&ledger, &payer, &authority, "notes", 65).await;

        let tx = Transaction::new(vec![instruction::initialize(
            &address,
            &authority.pubkey(),
            &program,
        )]);
        let err = ledger
            .submit_and_confirm(&tx, &[&authority])
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::AlreadyInitialized);
    }

    #[tokio::test]
    async fn test_write_requires_authority() {
        let ledger = MemoryLedger::new(Pubkey::from_bytes([9; 32]));
        let payer = funded_keypair(&ledger).await;
        let authority = funded_keypair(&ledger).await;
        let intruder = funded_keypair(&ledger).await;
        let program = ledger.record_program();

        let address = create_record_slot(&ledger, &payer, &authority, "notes", 65).await;

        let tx = Transaction::new(vec![instruction::write(
            &address,
            &intruder.pubkey(),
            0,
            b"hijack",
            &program,
        )]);
        let err = ledger
            .submit_and_confirm(&tx, &[&intruder])
            .await
            .unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized);
    }

    #[tokio::test]
    async fn test_write_past_capacity_fails() {
        let ledger = MemoryLedger::new(Pubkey::from_bytes([9; 32]));
        let payer = funded_keypair(&ledger).await;
        let authority = funded_keypair(&ledger).await;
        let program = ledger.record_program();

        let address = create_record_slot(&ledger, &payer, &authority, "notes", 65).await;

        let tx = Transaction::new(vec![instruction::write(
            &address,
            &authority.pubkey(),
            0,
            &[0u8; 33],
            &program,
        )]);
        let err = ledger
            .submit_and_confirm(&tx, &[&authority])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::WriteOutOfBounds {
                end: 66,
                capacity: 65
            }
        );
    }

    #[tokio::test]
    async fn test_write_with_huge_offset_is_out_of_bounds() {
        let ledger = MemoryLedger::new(Pubkey::from_bytes([9; 32]));
        let payer = funded_keypair(&ledger).await;
        let authority = funded_keypair(&ledger).await;
        let program = ledger.record_program();

        let address = create_record_slot(&ledger, &payer, &authority, "notes", 65).await;

        // An offset near u64::MAX must surface as a bounds error, not wrap
        // around and alias a low offset.
        for offset in [u64::MAX, u64::MAX - (HEADER_LENGTH as u64)] {
            let tx = Transaction::new(vec![instruction::write(
                &address,
                &authority.pubkey(),
                offset,
                b"x",
                &program,
            )]);
            let err = ledger
                .submit_and_confirm(&tx, &[&authority])
                .await
                .unwrap_err();
            assert!(matches!(err, LedgerError::WriteOutOfBounds { .. }));
        }

        // The slot's payload is untouched.
        let snapshot = ledger.account_info(&address).await.unwrap().unwrap();
        assert!(snapshot.data[HEADER_LENGTH..].iter().all(|&b| b == 0));
    }

    #[tokio::test]
    async fn test_missing_signature_rejected() {
        let ledger = MemoryLedger::new(Pubkey::from_bytes([9; 32]));
        let payer = funded_keypair(&ledger).await;
        let authority = funded_keypair(&ledger).await;
        let program = ledger.record_program();

        let address = create_record_slot(&ledger, &payer, &authority, "notes", 65).await;

        // Authority listed as signer but no matching keypair provided.
        let tx = Transaction::new(vec![instruction::write(
            &address,
            &authority.pubkey(),
            0,
            b"x",
            &program,
        )]);
        let err = ledger.submit_and_confirm(&tx, &[&payer]).await.unwrap_err();
        assert_eq!(err, LedgerError::MissingSignature(authority.pubkey()));
    }

    #[tokio::test]
    async fn test_close_moves_balance_and_frees_slot() {
        let ledger = MemoryLedger::new(Pubkey::from_bytes([9; 32]));
        let payer = funded_keypair(&ledger).await;
        let authority = funded_keypair(&ledger).await;
        let program = ledger.record_program();

        let address = create_record_slot(&ledger, &payer, &authority, "notes", 65).await;
        let slot_balance = ledger
            .account_info(&address)
            .await
            .unwrap()
            .unwrap()
            .balance;
        let before = ledger
            .account_info(&payer.pubkey())
            .await
            .unwrap()
            .unwrap()
            .balance;

        let tx = Transaction::new(vec![instruction::close_account(
            &address,
            &authority.pubkey(),
            &payer.pubkey(),
            &program,
        )]);
        ledger.submit_and_confirm(&tx, &[&authority]).await.unwrap();

        assert!(ledger.account_info(&address).await.unwrap().is_none());
        let after = ledger
            .account_info(&payer.pubkey())
            .await
            .unwrap()
            .unwrap()
            .balance;
        assert_eq!(after, before + slot_balance);
    }

    #[tokio::test]
    async fn test_failed_transaction_leaves_state_untouched() {
        let ledger = MemoryLedger::new(Pubkey::from_bytes([9; 32]));
        let payer = funded_keypair(&ledger).await;
        let authority = funded_keypair(&ledger).await;
        let program = ledger.record_program();

        let address = create_record_slot(&ledger, &payer, &authority, "notes", 65).await;

        // First write succeeds, second overruns capacity; neither applies.
        let tx = Transaction::new(vec![
            instruction::write(&address, &authority.pubkey(), 0, b"partial", &program),
            instruction::write(&address, &authority.pubkey(), 0, &[0u8; 64], &program),
        ]);
        ledger
            .submit_and_confirm(&tx, &[&authority])
            .await
            .unwrap_err();

        let snapshot = ledger.account_info(&address).await.unwrap().unwrap();
        assert!(snapshot.data[HEADER_LENGTH..].iter().all(|&b| b == 0));
    }

    #[tokio::test]
    async fn test_address_mismatch_rejected() {
        let ledger = MemoryLedger::new(Pubkey::from_bytes([9; 32]));
        let payer = funded_keypair(&ledger).await;
        let authority = funded_keypair(&ledger).await;
        let program = ledger.record_program();

        let wrong = Pubkey::from_bytes([0xcc; 32]);
        let tx = Transaction::new(vec![create_account_with_seed(
            &payer.pubkey(),
            &authority.pubkey(),
            "notes",
            &wrong,
            1000,
            65,
            &program,
        )]);
        let err = ledger
            .submit_and_confirm(&tx, &[&payer, &authority])
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::AddressMismatch { .. }));
    }
}
