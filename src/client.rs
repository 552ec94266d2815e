//! Async client helpers for the liqz program
//!
//! This module combines address derivation and instruction building with RPC calls.
//!
//! # Features
//! This module is only available with the `async` feature enabled.

use std::time::Duration;

use futures::StreamExt;
use solana_client::nonblocking::{pubsub_client::PubsubClient, rpc_client::RpcClient};
use solana_client::rpc_config::{
    RpcSendTransactionConfig, RpcTransactionLogsConfig, RpcTransactionLogsFilter,
};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::Signature,
    signer::Signer,
    transaction::Transaction,
};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::{
    accounts::ContractAccount,
    config::Cluster,
    error::{LiqzError, LiqzResult},
    events::{self, CalledInitialize},
    instructions::{self, InitializeAccounts, InitializeArgs},
    pda,
    types::{MintSet, SignerSet},
};

/// High-level async client for the liqz program
pub struct LiqzClient {
    /// RPC client for communicating with Solana
    pub rpc: RpcClient,
    /// Program ID to use (defaults to the deployed liqz program ID)
    pub program_id: Pubkey,
}

impl LiqzClient {
    /// Create a new LiqzClient with the default program ID
    pub fn new(rpc_url: String) -> Self {
        Self {
            rpc: RpcClient::new(rpc_url),
            program_id: crate::program_id(),
        }
    }

    /// Create a new LiqzClient with a custom program ID
    pub fn new_with_program_id(rpc_url: String, program_id: Pubkey) -> Self {
        Self {
            rpc: RpcClient::new(rpc_url),
            program_id,
        }
    }

    /// Create a client for a cluster's RPC endpoint
    pub fn for_cluster(cluster: &Cluster, program_id: Pubkey) -> Self {
        Self::new_with_program_id(cluster.url().to_string(), program_id)
    }

    /// Create a client with an existing RpcClient
    pub fn from_rpc_client(rpc: RpcClient) -> Self {
        Self {
            rpc,
            program_id: crate::program_id(),
        }
    }

    /// Get the contract account PDA for an authority
    pub fn get_contract_account_pda(&self, authority: &Pubkey) -> LiqzResult<(Pubkey, u8)> {
        pda::get_contract_account_pda(authority, Some(&self.program_id))
    }

    /// Derive every account `initialize` needs for `authority`
    pub fn initialize_accounts(
        &self,
        authority: &Pubkey,
        mints: &MintSet,
    ) -> LiqzResult<InitializeAccounts> {
        InitializeAccounts::derive(authority, mints, Some(&self.program_id))
    }

    /// Fetch and deserialize the contract account
    pub async fn get_contract_account(&self, address: &Pubkey) -> LiqzResult<ContractAccount> {
        let account = self.rpc.get_account(address).await?;

        if account.owner != self.program_id {
            return Err(LiqzError::InvalidAccountData(format!(
                "{} is owned by {}, not the liqz program",
                address, account.owner
            )));
        }

        ContractAccount::try_from_slice(&account.data)
    }

    /// Build the `initialize` instruction for `authority`
    ///
    /// # Arguments
    /// * `authority` - Wallet that owns and pays for the new contract account
    /// * `mints` - The three token mints
    /// * `seed` - Random key namespacing the new contract account
    pub fn build_initialize(
        &self,
        authority: &Pubkey,
        mints: &MintSet,
        seed: &Pubkey,
    ) -> LiqzResult<Instruction> {
        let accounts = self.initialize_accounts(authority, mints)?;

        debug!(
            contract_account = %accounts.contract_account,
            liz_token = %accounts.liz_token,
            tai_token = %accounts.tai_token,
            dai_token = %accounts.dai_token,
            "derived initialize accounts"
        );

        instructions::initialize(
            &accounts,
            InitializeArgs::from_seed(seed),
            Some(self.program_id),
        )
    }

    /// Initialize the contract account for the fee payer of `signers`
    ///
    /// # Arguments
    /// * `signers` - Signer set; its fee payer is the authority
    /// * `mints` - The three token mints
    /// * `seed` - Random key namespacing the new contract account
    pub async fn initialize(
        &self,
        signers: &SignerSet<'_>,
        mints: &MintSet,
        seed: &Pubkey,
    ) -> LiqzResult<Signature> {
        let ix = self.build_initialize(&signers.fee_payer().pubkey(), mints, seed)?;
        self.send_and_confirm_transaction(&[ix], signers).await
    }

    /// Helper function to send and confirm a transaction
    async fn send_and_confirm_transaction(
        &self,
        instructions: &[Instruction],
        signers: &SignerSet<'_>,
    ) -> LiqzResult<Signature> {
        let recent_blockhash = self.rpc.get_latest_blockhash().await?;

        let mut transaction =
            Transaction::new_with_payer(instructions, Some(&signers.fee_payer().pubkey()));
        transaction.sign(signers.as_slice(), recent_blockhash);

        let config = RpcSendTransactionConfig {
            skip_preflight: false,
            preflight_commitment: Some(CommitmentConfig::confirmed().commitment),
            ..Default::default()
        };

        self.rpc
            .send_and_confirm_transaction_with_spinner_and_config(
                &transaction,
                CommitmentConfig::confirmed(),
                config,
            )
            .await
            .map_err(LiqzError::ClientError)
    }
}

/// Subscribe to logs mentioning `program_id` and pass each `CalledInitialize` to `on_event`
///
/// `ready` fires once the subscription is live; it is dropped unsent if subscribing fails.
/// Runs until the websocket stream ends. Logs of failed transactions are skipped.
pub async fn listen_events<F>(
    ws_url: &str,
    program_id: &Pubkey,
    ready: Option<oneshot::Sender<()>>,
    mut on_event: F,
) -> LiqzResult<()>
where
    F: FnMut(CalledInitialize, u64),
{
    let pubsub = PubsubClient::new(ws_url).await?;
    let (mut stream, unsubscribe) = pubsub
        .logs_subscribe(
            RpcTransactionLogsFilter::Mentions(vec![program_id.to_string()]),
            RpcTransactionLogsConfig {
                commitment: Some(CommitmentConfig::confirmed()),
            },
        )
        .await?;

    info!(%program_id, ws_url, "listening for {}", CalledInitialize::NAME);
    if let Some(ready) = ready {
        let _ = ready.send(());
    }

    while let Some(response) = stream.next().await {
        let slot = response.context.slot;
        let logs = response.value;
        if let Some(err) = logs.err {
            debug!(signature = %logs.signature, slot, ?err, "skipping failed transaction");
            continue;
        }
        for event in events::parse_logs(&logs.logs) {
            on_event(event, slot);
        }
    }

    warn!(%program_id, "log subscription closed");
    unsubscribe().await;
    Ok(())
}

/// Wait up to `within` for the `CalledInitialize` event of `account`
///
/// Events for other accounts are discarded. Returns `None` on timeout or when
/// the sending side goes away.
pub async fn wait_for_initialized(
    events: &mut mpsc::UnboundedReceiver<CalledInitialize>,
    account: &Pubkey,
    within: Duration,
) -> Option<CalledInitialize> {
    let matching = async {
        while let Some(event) = events.recv().await {
            if event.account == *account {
                return Some(event);
            }
        }
        None
    };
    tokio::time::timeout(within, matching).await.ok().flatten()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use borsh::BorshSerialize;
    use serde_json::json;
    use solana_client::rpc_request::RpcRequest;

    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LiqzClient::new("https://api.devnet.solana.com".to_string());
        assert_eq!(client.program_id, crate::program_id());
    }

    #[test]
    fn test_client_with_custom_program_id() {
        let custom_program_id = Pubkey::new_unique();
        let client = LiqzClient::for_cluster(&Cluster::Localnet, custom_program_id);
        assert_eq!(client.program_id, custom_program_id);
        assert_eq!(client.rpc.url(), "http://127.0.0.1:8899");

        let authority = Pubkey::new_unique();
        assert_eq!(
            client.get_contract_account_pda(&authority).unwrap(),
            pda::get_contract_account_pda(&authority, Some(&custom_program_id)).unwrap()
        );
    }

    fn mints() -> MintSet {
        MintSet::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_initialize_fails_without_cluster() {
        // Nothing listens on port 9; the request must surface as a client error
        let client = LiqzClient::new("http://127.0.0.1:9".to_string());
        let authority = solana_sdk::signature::Keypair::new();

        let err = client
            .initialize(&SignerSet::new(&authority), &mints(), &Pubkey::new_unique())
            .await
            .unwrap_err();
        assert!(matches!(err, LiqzError::ClientError(_)));
    }

    #[tokio::test]
    async fn test_initialize_returns_signature() {
        let client = LiqzClient::from_rpc_client(RpcClient::new_mock("succeeds".to_string()));
        let authority = solana_sdk::signature::Keypair::new();
        let mints = mints();
        let seed = Pubkey::new_unique();

        let signature = client
            .initialize(&SignerSet::new(&authority), &mints, &seed)
            .await
            .unwrap();
        assert!(!signature.to_string().is_empty());

        let ix = client
            .build_initialize(&authority.pubkey(), &mints, &seed)
            .unwrap();
        let (contract_account, _) = client
            .get_contract_account_pda(&authority.pubkey())
            .unwrap();
        assert_eq!(ix.program_id, client.program_id);
        assert_eq!(ix.accounts.len(), 11);
        assert_eq!(ix.accounts[0].pubkey, contract_account);
        assert_eq!(ix.accounts[1].pubkey, authority.pubkey());
        assert!(ix.accounts[1].is_signer);
        assert_eq!(ix.accounts[2].pubkey, mints.liz);
        assert_eq!(&ix.data[12..], seed.as_ref());
    }

    #[tokio::test]
    async fn test_listener_never_ready_when_subscribe_fails() {
        let (ready_tx, ready_rx) = oneshot::channel();
        let result = listen_events(
            "ws://127.0.0.1:9",
            &crate::program_id(),
            Some(ready_tx),
            |_, _| {},
        )
        .await;
        assert!(matches!(result, Err(LiqzError::PubsubError(_))));
        assert!(ready_rx.await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_initialized_skips_other_accounts() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let account = Pubkey::new_unique();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            let _ = tx.send(CalledInitialize {
                account: Pubkey::new_unique(),
            });
            tokio::time::sleep(Duration::from_millis(200)).await;
            let _ = tx.send(CalledInitialize { account });
        });

        let event = wait_for_initialized(&mut rx, &account, Duration::from_secs(5)).await;
        assert_eq!(event, Some(CalledInitialize { account }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_initialized_times_out() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let account = Pubkey::new_unique();
        tx.send(CalledInitialize {
            account: Pubkey::new_unique(),
        })
        .unwrap();

        let event = wait_for_initialized(&mut rx, &account, Duration::from_secs(5)).await;
        assert_eq!(event, None);
        drop(tx);
    }

    fn mocked_account_client(owner: &Pubkey, account: &ContractAccount) -> LiqzClient {
        let mut data = ContractAccount::discriminator().to_vec();
        account.serialize(&mut data).unwrap();
        let space = data.len();

        let mut mocks = HashMap::new();
        mocks.insert(
            RpcRequest::GetAccountInfo,
            json!({
                "context": { "slot": 1 },
                "value": {
                    "lamports": 1_000_000,
                    "data": [STANDARD.encode(data), "base64"],
                    "owner": owner.to_string(),
                    "executable": false,
                    "rentEpoch": 0,
                    "space": space,
                }
            }),
        );
        LiqzClient::from_rpc_client(RpcClient::new_mock_with_mocks(
            "succeeds".to_string(),
            mocks,
        ))
    }

    fn pool_state() -> ContractAccount {
        ContractAccount {
            bump_seed: 255,
            owner: Pubkey::new_unique(),
            liz_mint: Pubkey::new_unique(),
            tai_mint: Pubkey::new_unique(),
            dai_mint: Pubkey::new_unique(),
            incentive: 100_000_000_000,
            max_loan_duration: 30 * 24 * 60 * 60,
            service_fee_rate: 500,
            interest_rate: 100,
            mortgage_rate: 9000,
        }
    }

    #[tokio::test]
    async fn test_get_contract_account() {
        let state = pool_state();
        let client = mocked_account_client(&crate::program_id(), &state);
        let (pool, _) = pda::get_pool_pda(None).unwrap();

        let fetched = client.get_contract_account(&pool).await.unwrap();
        assert_eq!(fetched, state);
    }

    #[tokio::test]
    async fn test_get_contract_account_rejects_foreign_owner() {
        let client = mocked_account_client(&Pubkey::new_unique(), &pool_state());
        let (pool, _) = pda::get_pool_pda(None).unwrap();

        let err = client.get_contract_account(&pool).await.unwrap_err();
        assert!(matches!(err, LiqzError::InvalidAccountData(_)));
    }
}
