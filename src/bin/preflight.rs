use solana_client::nonblocking::rpc_client::RpcClient;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signer::keypair::read_keypair_file;
use solana_sdk::signer::Signer;
use std::str::FromStr;

use medchain_gateway::infra::config;
use medchain_gateway::infra::solana;
use medchain_gateway::infra::solana::idl;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--init-platform-if-missing]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL, ADMIN_WALLET\n\
         Optional env vars (defaults shown):\n\
           SOLANA_RPC_URL=https://api.devnet.solana.com\n\
           SOLANA_PROGRAM_ID={}\n\
           WALLET_KEYPAIR_PATH=~/.config/solana/id.json\n",
        config::DEFAULT_PROGRAM_ID
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let init_platform_if_missing = args.iter().any(|a| a == "--init-platform-if-missing");

    // Force-read config (nice error messages if missing)
    let rpc_url = config::solana_rpc_url();
    let program_id_str = config::solana_program_id();
    let admin_wallet = config::admin_wallet();
    let _ = config::database_url();

    println!("> Preflight:");
    println!("  SOLANA_RPC_URL={}", rpc_url);
    println!("  SOLANA_PROGRAM_ID={}", program_id_str);
    println!("  ADMIN_WALLET={}", admin_wallet);

    // Same wallet location the gateway uses.
    let wallet_path = shellexpand::tilde(&config::wallet_keypair_path()).to_string();
    let payer = read_keypair_file(&wallet_path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", wallet_path, e))?;

    let client = RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed());

    // Basic RPC connectivity
    let version = client.get_version().await?;
    println!("  RPC version: {}", version.solana_core);

    // Operator wallet balance
    let balance_lamports = client.get_balance(&payer.pubkey()).await?;
    let sol = balance_lamports as f64 / 1_000_000_000_f64;
    println!("  Operator wallet: {}", payer.pubkey());
    println!("  Operator balance: {} lamports (~{:.6} SOL)", balance_lamports, sol);
    if balance_lamports < 10_000_000 {
        eprintln!("  Warning: operator balance looks low; devnet transactions may fail.");
    }

    // Program account existence
    let program_id = Pubkey::from_str(&program_id_str)
        .map_err(|e| anyhow::anyhow!("SOLANA_PROGRAM_ID is not a valid pubkey: {}", e))?;
    let program_acct = client
        .get_account(&program_id)
        .await
        .map_err(|e| anyhow::anyhow!("Program account not found on cluster: {} ({})", program_id, e))?;
    if !program_acct.executable {
        eprintln!("  Warning: program account exists but is not marked executable.");
    } else {
        println!("  Program account is deployed + executable.");
    }

    // Platform state PDA
    let (pda, _bump) = Pubkey::find_program_address(&[idl::PLATFORM_STATE_SEED], &program_id);
    println!("  Platform state PDA: {}", pda);

    let pda_exists = match client.get_account(&pda).await {
        Ok(account) => {
            let head = &account.data[..8.min(account.data.len())];
            println!("  Platform state account exists (discriminator {})", hex::encode(head));
            true
        }
        Err(_) => false,
    };

    if !pda_exists {
        if init_platform_if_missing {
            println!("  Platform state missing -> initializing on-chain platform state...");
            solana::initialize().await?;
            // Recheck
            client
                .get_account(&pda)
                .await
                .map_err(|e| anyhow::anyhow!("PDA still missing after initialize: {}", e))?;
            println!("  Platform state initialized successfully.");
        } else {
            return Err(anyhow::anyhow!(
                "Platform state PDA does not exist. Re-run with --init-platform-if-missing"
            ));
        }
    }

    // State readable + admin alignment
    let state = solana::read_platform_state().await?;
    println!(
        "  Platform state readable (ok). admin={} doctors={} questions={}",
        state.admin, state.doctor_count, state.question_count
    );
    if state.admin != admin_wallet {
        eprintln!("  Warning: ADMIN_WALLET does not match the on-chain admin.");
    }

    println!("> Preflight OK.");
    Ok(())
}
