//! Centralized configuration (environment variables + defaults).

/// Default program id (the devnet deployment of the healthcare program).
pub const DEFAULT_PROGRAM_ID: &str = "Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS";

/// Solana RPC URL (defaults to devnet, where the program lives).
pub fn solana_rpc_url() -> String {
    std::env::var("SOLANA_RPC_URL")
        .unwrap_or_else(|_| "https://api.devnet.solana.com".to_string())
}

/// Solana program id.
///
/// Override this with the Program ID you deployed (e.g. output of `anchor deploy`).
pub fn solana_program_id() -> String {
    std::env::var("SOLANA_PROGRAM_ID").unwrap_or_else(|_| DEFAULT_PROGRAM_ID.to_string())
}

/// Path to the operator wallet keypair (tilde-expanded where it is read).
pub fn wallet_keypair_path() -> String {
    std::env::var("WALLET_KEYPAIR_PATH").unwrap_or_else(|_| "~/.config/solana/id.json".to_string())
}

/// Wallet address allowed onto the admin dashboard (required).
pub fn admin_wallet() -> String {
    std::env::var("ADMIN_WALLET").expect("ADMIN_WALLET must be set")
}

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Listen address for the HTTP gateway.
pub fn listen_addr() -> String {
    std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string())
}
