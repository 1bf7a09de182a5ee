//! The record client: lifecycle operations over a [`Ledger`].
//!
//! Every operation is a single transaction. Signers are passed per call;
//! there is no process-wide signer list. Failures are terminal for the
//! call; nothing here retries.

use std::sync::Arc;

use tracing::debug;

use quill_core::{
    derive_address, fixed_data, instruction, Keypair, Pubkey, RecordData, Schema, HEADER_LENGTH,
};
use quill_ledger::{create_account_with_seed, AccountSnapshot, Ledger, Transaction};

use crate::error::{ClientError, Result};

/// Configuration for the record client.
#[derive(Debug, Clone)]
pub struct RecordClientConfig {
    /// Capacity in bytes of dynamic record slots, header included.
    pub dynamic_capacity: usize,
}

impl Default for RecordClientConfig {
    fn default() -> Self {
        Self {
            dynamic_capacity: 150,
        }
    }
}

/// Result of a create-or-fetch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOutcome {
    /// The derived slot address.
    pub address: Pubkey,
    /// The fixed record observed after the call.
    pub record: RecordData,
    /// True when the slot already existed and nothing was submitted.
    pub existed: bool,
}

/// Client for versioned, authority-gated records in fixed-capacity slots.
///
/// Generic over the [`Ledger`] seam: the in-memory ledger for tests, a
/// networked implementation in production.
pub struct RecordClient<L: Ledger> {
    ledger: Arc<L>,
    program_id: Pubkey,
    config: RecordClientConfig,
}

impl<L: Ledger> RecordClient<L> {
    /// Create a client for the record program at `program_id`.
    pub fn new(ledger: Arc<L>, program_id: Pubkey, config: RecordClientConfig) -> Self {
        Self {
            ledger,
            program_id,
            config,
        }
    }

    /// The record program this client targets.
    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// The slot address for `authority`'s record under `seed`.
    ///
    /// Deterministic: the same (authority, seed, program) triple always maps
    /// to the same address. Callers wanting distinct slots per attempt salt
    /// the seed themselves (see [`quill_core::salted_seed`]).
    pub fn derive_address(&self, authority: &Pubkey, seed: &str) -> Pubkey {
        derive_address(authority, seed, &self.program_id)
    }

    /// Create a fixed record slot, or fetch it if it already exists.
    ///
    /// Idempotent on the (authority, seed) pair. When the slot is absent,
    /// submits allocation, initialization, and the first write as one
    /// transaction signed by the payer and the authority. The existence
    /// check and the creation are separate ledger calls; a slot created in
    /// between surfaces as the creation failing, not as silent reuse.
    pub async fn create_or_fetch(
        &self,
        initial: &[u8],
        payer: &Keypair,
        authority: &Keypair,
        seed: &str,
    ) -> Result<CreateOutcome> {
        let authority_key = authority.pubkey();
        let address = self.derive_address(&authority_key, seed);

        if let Some(snapshot) = self.ledger.account_info(&address).await? {
            let record = RecordData::from_bytes(&snapshot.data)?;
            debug!(address = %address, "record slot already exists");
            return Ok(CreateOutcome {
                address,
                record,
                existed: true,
            });
        }

        let capacity = RecordData::account_size();
        let balance = self.ledger.minimum_balance(capacity).await?;
        let tx = Transaction::new(vec![
            create_account_with_seed(
                &payer.pubkey(),
                &authority_key,
                seed,
                &address,
                balance,
                capacity as u64,
                &self.program_id,
            ),
            instruction::initialize(&address, &authority_key, &self.program_id),
            instruction::write(
                &address,
                &authority_key,
                0,
                &fixed_data(initial),
                &self.program_id,
            ),
        ]);
        self.ledger.submit_and_confirm(&tx, &[payer, authority]).await?;

        let record = self.fetch(&address).await.map_err(|err| match err {
            ClientError::RecordNotFound => ClientError::AccountUnavailable,
            other => other,
        })?;
        debug!(address = %address, "record slot created");
        Ok(CreateOutcome {
            address,
            record,
            existed: false,
        })
    }

    /// Create a dynamic record slot holding `value`, or fetch the existing
    /// slot's payload.
    ///
    /// The encoded value must fit the configured capacity after the header;
    /// oversized payloads fail with `CapacityExceeded` before anything is
    /// submitted.
    pub async fn create_or_fetch_dynamic<T: Schema>(
        &self,
        value: &T,
        payer: &Keypair,
        authority: &Keypair,
        seed: &str,
    ) -> Result<(Pubkey, T, bool)> {
        let authority_key = authority.pubkey();
        let address = self.derive_address(&authority_key, seed);

        if let Some(snapshot) = self.ledger.account_info(&address).await? {
            let existing = decode_dynamic(&snapshot)?;
            return Ok((address, existing, true));
        }

        let capacity = self.config.dynamic_capacity;
        let encoded = value.to_vec();
        check_capacity(encoded.len(), capacity)?;

        let balance = self.ledger.minimum_balance(capacity).await?;
        let tx = Transaction::new(vec![
            create_account_with_seed(
                &payer.pubkey(),
                &authority_key,
                seed,
                &address,
                balance,
                capacity as u64,
                &self.program_id,
            ),
            instruction::initialize_dynamic(&address, &authority_key, &self.program_id),
            instruction::write_dynamic(&address, &authority_key, 0, &encoded, &self.program_id),
        ]);
        self.ledger.submit_and_confirm(&tx, &[payer, authority]).await?;

        let stored = self.fetch_dynamic(&address).await.map_err(|err| match err {
            ClientError::RecordNotFound => ClientError::AccountUnavailable,
            other => other,
        })?;
        Ok((address, stored, false))
    }

    /// Overwrite `data.len()` bytes of an existing fixed record's payload
    /// at `offset`, leaving the rest untouched.
    pub async fn update(
        &self,
        data: &[u8],
        offset: u64,
        address: &Pubkey,
        authority: &Keypair,
    ) -> Result<RecordData> {
        if self.ledger.account_info(address).await?.is_none() {
            return Err(ClientError::RecordNotFound);
        }

        let tx = Transaction::new(vec![instruction::write(
            address,
            &authority.pubkey(),
            offset,
            data,
            &self.program_id,
        )]);
        self.ledger.submit_and_confirm(&tx, &[authority]).await?;
        self.fetch(address).await
    }

    /// Replace an existing dynamic record's payload with `value`.
    ///
    /// Whole-value rewrite at offset zero. Fails with `CapacityExceeded`
    /// before submission if the encoding does not fit the slot.
    pub async fn update_dynamic<T: Schema>(
        &self,
        value: &T,
        address: &Pubkey,
        authority: &Keypair,
    ) -> Result<T> {
        let snapshot = self
            .ledger
            .account_info(address)
            .await?
            .ok_or(ClientError::RecordNotFound)?;

        let encoded = value.to_vec();
        check_capacity(encoded.len(), snapshot.capacity())?;

        let tx = Transaction::new(vec![instruction::write_dynamic(
            address,
            &authority.pubkey(),
            0,
            &encoded,
            &self.program_id,
        )]);
        self.ledger.submit_and_confirm(&tx, &[authority]).await?;
        self.fetch_dynamic(address).await
    }

    /// Hand the record's authority to `new_authority`. The payload bytes
    /// are untouched.
    pub async fn set_authority(
        &self,
        address: &Pubkey,
        authority: &Keypair,
        new_authority: &Pubkey,
    ) -> Result<RecordData> {
        if self.ledger.account_info(address).await?.is_none() {
            return Err(ClientError::RecordNotFound);
        }

        let tx = Transaction::new(vec![instruction::set_authority(
            address,
            &authority.pubkey(),
            new_authority,
            &self.program_id,
        )]);
        self.ledger.submit_and_confirm(&tx, &[authority]).await?;
        self.fetch(address).await
    }

    /// Close the record slot, sending its balance to `destination`.
    ///
    /// Returns `true` iff a read-back confirms the slot is gone; `false`
    /// reports an inconclusive read-back as a value, not an error.
    pub async fn close(
        &self,
        address: &Pubkey,
        authority: &Keypair,
        destination: &Pubkey,
    ) -> Result<bool> {
        if self.ledger.account_info(address).await?.is_none() {
            return Err(ClientError::RecordNotFound);
        }

        let tx = Transaction::new(vec![instruction::close_account(
            address,
            &authority.pubkey(),
            destination,
            &self.program_id,
        )]);
        self.ledger.submit_and_confirm(&tx, &[authority]).await?;

        let gone = self.ledger.account_info(address).await?.is_none();
        debug!(address = %address, confirmed = gone, "record slot closed");
        Ok(gone)
    }

    /// Fetch and decode a fixed record.
    pub async fn fetch(&self, address: &Pubkey) -> Result<RecordData> {
        let snapshot = self
            .ledger
            .account_info(address)
            .await?
            .ok_or(ClientError::RecordNotFound)?;
        Ok(RecordData::from_bytes(&snapshot.data)?)
    }

    /// Fetch a dynamic record and decode its payload.
    pub async fn fetch_dynamic<T: Schema>(&self, address: &Pubkey) -> Result<T> {
        let snapshot = self
            .ledger
            .account_info(address)
            .await?
            .ok_or(ClientError::RecordNotFound)?;
        decode_dynamic(&snapshot)
    }
}

fn decode_dynamic<T: Schema>(snapshot: &AccountSnapshot) -> Result<T> {
    let payload =
        snapshot
            .data
            .get(HEADER_LENGTH..)
            .ok_or(quill_core::CodecError::SchemaMismatch {
                needed: HEADER_LENGTH,
                remaining: snapshot.data.len(),
            })?;
    Ok(T::from_bytes(payload)?)
}

fn check_capacity(encoded_len: usize, capacity: usize) -> Result<()> {
    let needed = HEADER_LENGTH + encoded_len;
    if needed > capacity {
        return Err(ClientError::CapacityExceeded { needed, capacity });
    }
    Ok(())
}
