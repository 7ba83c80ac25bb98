// Responsible for all communication with the Solana blockchain.

use solana_account_decoder::UiAccountEncoding;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use solana_sdk::{
    signer::{keypair::Keypair, Signer},
    transaction::Transaction,
};
use std::str::FromStr;
use tracing::{info, warn};

use crate::domain::records::{DoctorRecord, QuestionRecord};
use crate::infra::config;
use crate::infra::solana::codec;
use crate::infra::solana::idl;
use crate::infra::wallet;

/// Chain seam consumed by the marketplace service.
///
/// The sentinel policy lives in this surface: fetches reduce any failure to
/// an empty collection and mutations reduce any failure to `false`, with the
/// underlying error logged and discarded. Callers cannot distinguish "no
/// data" from "fetch failed".
#[async_trait::async_trait]
pub trait ChainGateway: Send + Sync {
    async fn fetch_doctors(&self) -> Vec<DoctorRecord>;
    async fn fetch_questions(&self) -> Vec<QuestionRecord>;
    async fn register_doctor(&self, name: &str, specialization: &str) -> bool;
    async fn ask_question(&self, title: &str, content: &str, bounty_lamports: u64) -> bool;
    async fn answer_question(&self, question: &str, doctor: &str, answer: &str) -> bool;
    async fn verify_doctor(&self, doctor: &str) -> bool;
}

/// RPC-backed implementation bound to the configured program id.
pub struct ProgramClient;

#[async_trait::async_trait]
impl ChainGateway for ProgramClient {
    async fn fetch_doctors(&self) -> Vec<DoctorRecord> {
        match try_fetch_doctors().await {
            Ok(doctors) => doctors,
            Err(e) => {
                warn!("doctor fetch failed, returning empty list: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_questions(&self) -> Vec<QuestionRecord> {
        match try_fetch_questions().await {
            Ok(questions) => questions,
            Err(e) => {
                warn!("question fetch failed, returning empty list: {}", e);
                Vec::new()
            }
        }
    }

    async fn register_doctor(&self, name: &str, specialization: &str) -> bool {
        match try_register_doctor(name, specialization).await {
            Ok(_) => true,
            Err(e) => {
                warn!("doctor registration failed: {}", e);
                false
            }
        }
    }

    async fn ask_question(&self, title: &str, content: &str, bounty_lamports: u64) -> bool {
        match try_ask_question(title, content, bounty_lamports).await {
            Ok(_) => true,
            Err(e) => {
                warn!("question submission failed: {}", e);
                false
            }
        }
    }

    async fn answer_question(&self, question: &str, doctor: &str, answer: &str) -> bool {
        match try_answer_question(question, doctor, answer).await {
            Ok(()) => true,
            Err(e) => {
                warn!("answer submission failed: {}", e);
                false
            }
        }
    }

    async fn verify_doctor(&self, doctor: &str) -> bool {
        match try_verify_doctor(doctor).await {
            Ok(()) => true,
            Err(e) => {
                warn!("doctor verification failed: {}", e);
                false
            }
        }
    }
}

fn program_id() -> anyhow::Result<Pubkey> {
    Pubkey::from_str(&config::solana_program_id())
        .map_err(|e| anyhow::anyhow!("SOLANA_PROGRAM_ID is not a valid pubkey: {}", e))
}

// The platform state lives at a predictable PDA so every client finds it.
fn platform_state_pubkey() -> anyhow::Result<(Pubkey, u8)> {
    let program_id = program_id()?;
    Ok(Pubkey::find_program_address(&[idl::PLATFORM_STATE_SEED], &program_id))
}

/// Initializes the on-chain platform state account.
/// This only needs to be called once; the initializing wallet becomes admin.
pub async fn initialize() -> anyhow::Result<()> {
    let provider = wallet::provider().await?;
    let (platform_state, _bump) = platform_state_pubkey()?;
    let program_id = program_id()?;

    // Check if the account already exists.
    if provider.client.get_account(&platform_state).await.is_ok() {
        info!("platform state already initialized");
        return Ok(());
    }

    info!("initializing platform state, admin = {}", provider.address);
    let accounts = vec![
        AccountMeta::new(platform_state, false),
        AccountMeta::new(provider.keypair.pubkey(), true),
        AccountMeta::new_readonly(solana_program::system_program::ID, false),
    ];

    let instruction = Instruction {
        program_id,
        accounts,
        data: idl::INITIALIZE_DISCRIMINATOR.to_vec(),
    };

    let mut transaction = Transaction::new_with_payer(&[instruction], Some(&provider.keypair.pubkey()));
    let recent_blockhash = provider.client.get_latest_blockhash().await?;
    transaction.sign(&[&provider.keypair], recent_blockhash);
    let signature = provider.client.send_and_confirm_transaction(&transaction).await?;

    info!(
        "platform state initialized: https://explorer.solana.com/tx/{}?cluster=devnet",
        signature
    );
    Ok(())
}

/// Reads the platform state account from the chain.
pub async fn read_platform_state() -> anyhow::Result<codec::PlatformState> {
    let provider = wallet::provider().await?;
    let (platform_state, _bump) = platform_state_pubkey()?;
    let account = provider.client.get_account(&platform_state).await?;
    codec::decode_platform_state(&account.data)
}

// Lists every program account of one kind by matching the account
// discriminator at offset 0.
async fn scan_program_accounts(discriminator: [u8; 8]) -> anyhow::Result<Vec<(Pubkey, Vec<u8>)>> {
    let provider = wallet::provider().await?;
    let program_id = program_id()?;

    let scan_config = RpcProgramAccountsConfig {
        filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
            0,
            &discriminator,
        ))]),
        account_config: RpcAccountInfoConfig {
            encoding: Some(UiAccountEncoding::Base64),
            ..Default::default()
        },
        ..Default::default()
    };

    let accounts = provider
        .client
        .get_program_accounts_with_config(&program_id, scan_config)
        .await?;
    Ok(accounts
        .into_iter()
        .map(|(pubkey, account)| (pubkey, account.data))
        .collect())
}

async fn try_fetch_doctors() -> anyhow::Result<Vec<DoctorRecord>> {
    let raw = scan_program_accounts(idl::DOCTOR_ACCOUNT_DISCRIMINATOR).await?;
    let mut doctors = Vec::with_capacity(raw.len());
    for (pubkey, data) in raw {
        // An undecodable account is skipped, not fatal to the listing.
        match codec::decode_doctor(&pubkey, &data) {
            Ok(doctor) => doctors.push(doctor),
            Err(e) => warn!("skipping undecodable doctor account {}: {}", pubkey, e),
        }
    }
    Ok(doctors)
}

async fn try_fetch_questions() -> anyhow::Result<Vec<QuestionRecord>> {
    let raw = scan_program_accounts(idl::QUESTION_ACCOUNT_DISCRIMINATOR).await?;
    let mut questions = Vec::with_capacity(raw.len());
    for (pubkey, data) in raw {
        match codec::decode_question(&pubkey, &data) {
            Ok(question) => questions.push(question),
            Err(e) => warn!("skipping undecodable question account {}: {}", pubkey, e),
        }
    }
    Ok(questions)
}

async fn try_register_doctor(name: &str, specialization: &str) -> anyhow::Result<Pubkey> {
    let provider = wallet::provider().await?;
    let program_id = program_id()?;
    let (platform_state, _bump) = platform_state_pubkey()?;

    // Every registration creates a brand new doctor account.
    let doctor_account = Keypair::new();

    let accounts = vec![
        AccountMeta::new(doctor_account.pubkey(), true),
        AccountMeta::new(platform_state, false),
        AccountMeta::new(provider.keypair.pubkey(), true),
        AccountMeta::new_readonly(solana_program::system_program::ID, false),
    ];

    let mut data = idl::REGISTER_DOCTOR_DISCRIMINATOR.to_vec();
    codec::put_string(&mut data, name);
    codec::put_string(&mut data, specialization);

    let instruction = Instruction { program_id, accounts, data };

    let mut transaction = Transaction::new_with_payer(&[instruction], Some(&provider.keypair.pubkey()));
    let recent_blockhash = provider.client.get_latest_blockhash().await?;
    transaction.sign(&[&provider.keypair, &doctor_account], recent_blockhash);
    let signature = provider.client.send_and_confirm_transaction(&transaction).await?;

    info!("doctor account {} registered (tx {})", doctor_account.pubkey(), signature);
    Ok(doctor_account.pubkey())
}

async fn try_ask_question(title: &str, content: &str, bounty_lamports: u64) -> anyhow::Result<Pubkey> {
    let provider = wallet::provider().await?;
    let program_id = program_id()?;
    let (platform_state, _bump) = platform_state_pubkey()?;

    let question_account = Keypair::new();

    let accounts = vec![
        AccountMeta::new(question_account.pubkey(), true),
        AccountMeta::new(platform_state, false),
        AccountMeta::new(provider.keypair.pubkey(), true),
        AccountMeta::new_readonly(solana_program::system_program::ID, false),
    ];

    let mut data = idl::ASK_QUESTION_DISCRIMINATOR.to_vec();
    codec::put_string(&mut data, title);
    codec::put_string(&mut data, content);
    codec::put_u64(&mut data, bounty_lamports);

    let instruction = Instruction { program_id, accounts, data };

    let mut transaction = Transaction::new_with_payer(&[instruction], Some(&provider.keypair.pubkey()));
    let recent_blockhash = provider.client.get_latest_blockhash().await?;
    transaction.sign(&[&provider.keypair, &question_account], recent_blockhash);
    let signature = provider.client.send_and_confirm_transaction(&transaction).await?;

    info!("question account {} created (tx {})", question_account.pubkey(), signature);
    Ok(question_account.pubkey())
}

async fn try_answer_question(question: &str, doctor: &str, answer: &str) -> anyhow::Result<()> {
    let provider = wallet::provider().await?;
    let program_id = program_id()?;
    let question = Pubkey::from_str(question)
        .map_err(|e| anyhow::anyhow!("question ref is not a valid pubkey: {}", e))?;
    let doctor = Pubkey::from_str(doctor)
        .map_err(|e| anyhow::anyhow!("doctor ref is not a valid pubkey: {}", e))?;

    let accounts = vec![
        AccountMeta::new(question, false),
        AccountMeta::new_readonly(doctor, false),
        AccountMeta::new_readonly(provider.keypair.pubkey(), true),
    ];

    let mut data = idl::ANSWER_QUESTION_DISCRIMINATOR.to_vec();
    codec::put_string(&mut data, answer);

    let instruction = Instruction { program_id, accounts, data };

    let mut transaction = Transaction::new_with_payer(&[instruction], Some(&provider.keypair.pubkey()));
    let recent_blockhash = provider.client.get_latest_blockhash().await?;
    transaction.sign(&[&provider.keypair], recent_blockhash);
    let signature = provider.client.send_and_confirm_transaction(&transaction).await?;

    info!("question {} answered (tx {})", question, signature);
    Ok(())
}

async fn try_verify_doctor(doctor: &str) -> anyhow::Result<()> {
    let provider = wallet::provider().await?;
    let program_id = program_id()?;
    let (platform_state, _bump) = platform_state_pubkey()?;
    let doctor = Pubkey::from_str(doctor)
        .map_err(|e| anyhow::anyhow!("doctor ref is not a valid pubkey: {}", e))?;

    let accounts = vec![
        AccountMeta::new(doctor, false),
        AccountMeta::new_readonly(platform_state, false),
        AccountMeta::new_readonly(provider.keypair.pubkey(), true),
    ];

    let instruction = Instruction {
        program_id,
        accounts,
        data: idl::VERIFY_DOCTOR_DISCRIMINATOR.to_vec(),
    };

    let mut transaction = Transaction::new_with_payer(&[instruction], Some(&provider.keypair.pubkey()));
    let recent_blockhash = provider.client.get_latest_blockhash().await?;
    transaction.sign(&[&provider.keypair], recent_blockhash);
    let signature = provider.client.send_and_confirm_transaction(&transaction).await?;

    info!("doctor {} verified (tx {})", doctor, signature);
    Ok(())
}
