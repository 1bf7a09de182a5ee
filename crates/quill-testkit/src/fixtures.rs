//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use quill::{RecordClient, RecordClientConfig};
use quill_core::{Keypair, Pubkey};
use quill_ledger::{Ledger, MemoryLedger};

/// Faucet amount used for fixture accounts, ample for any test scenario.
pub const FIXTURE_BALANCE: u64 = 1_000_000_000;

/// A test fixture with a funded payer, an in-memory ledger, and a client.
pub struct TestFixture {
    pub program_id: Pubkey,
    pub ledger: Arc<MemoryLedger>,
    pub client: RecordClient<MemoryLedger>,
    pub payer: Keypair,
}

impl TestFixture {
    /// Create a fixture with a random payer keypair.
    pub async fn new() -> Self {
        Self::with_payer(Keypair::generate()).await
    }

    /// Create a fixture with a deterministic payer from a seed.
    pub async fn with_seed(seed: [u8; 32]) -> Self {
        Self::with_payer(Keypair::from_seed(&seed)).await
    }

    async fn with_payer(payer: Keypair) -> Self {
        let program_id = Pubkey::from_bytes([9; 32]);
        let ledger = Arc::new(MemoryLedger::new(program_id));
        ledger
            .request_faucet_funds(&payer.pubkey(), FIXTURE_BALANCE)
            .await
            .unwrap();
        let client = RecordClient::new(
            Arc::clone(&ledger),
            program_id,
            RecordClientConfig::default(),
        );
        Self {
            program_id,
            ledger,
            client,
            payer,
        }
    }

    /// Generate a fresh keypair funded from the fixture's faucet.
    pub async fn funded_keypair(&self) -> Keypair {
        let keypair = Keypair::generate();
        self.ledger
            .request_faucet_funds(&keypair.pubkey(), FIXTURE_BALANCE)
            .await
            .unwrap();
        keypair
    }
}

/// Create multiple deterministic keypairs for multi-party tests.
pub fn multi_party_keypairs(count: usize) -> Vec<Keypair> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            Keypair::from_seed(&seed)
        })
        .collect()
}
