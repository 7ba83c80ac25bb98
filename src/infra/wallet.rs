// Bridges the operator wallet into the service. The wallet is a keypair file
// on disk; a missing or malformed file is the "no wallet available" condition
// and is surfaced as one generic error.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signer::keypair::{read_keypair_file, Keypair};
use solana_sdk::signer::Signer;

use crate::infra::config;

/// Seam for the page flows: `connect` yields the wallet address or fails
/// when no wallet is available. Test doubles script both outcomes.
#[async_trait::async_trait]
pub trait WalletBridge: Send + Sync {
    async fn connect(&self) -> anyhow::Result<String>;
}

/// The file-backed wallet used by the running gateway.
pub struct FileWallet;

#[async_trait::async_trait]
impl WalletBridge for FileWallet {
    async fn connect(&self) -> anyhow::Result<String> {
        let keypair = load_keypair()?;
        Ok(keypair.pubkey().to_string())
    }
}

/// Everything a chain operation needs: an RPC connection and the keypair
/// that signs (covers both sign-one and sign-all).
pub struct WalletProvider {
    pub client: RpcClient,
    pub address: String,
    pub keypair: Keypair,
}

fn load_keypair() -> anyhow::Result<Keypair> {
    let path = config::wallet_keypair_path();
    read_keypair_file(&*shellexpand::tilde(&path))
        .map_err(|e| anyhow::anyhow!("Wallet unavailable ({}): {}", path, e))
}

/// Builds the provider bundle used by every chain operation.
pub async fn provider() -> anyhow::Result<WalletProvider> {
    let keypair = load_keypair()?;
    let address = keypair.pubkey().to_string();
    let client = RpcClient::new_with_commitment(config::solana_rpc_url(), CommitmentConfig::confirmed());
    Ok(WalletProvider { client, address, keypair })
}
