//! The Marketplace Service.
//!
//! This module acts as the intermediary between the page flows and the two
//! backing stores. It is responsible for:
//! 1.  Reading listings from the chain (the authoritative store).
//! 2.  Mirroring registrations and questions into the hosted directory
//!     tables alongside the chain writes.
//! 3.  The admin gate that protects verification.
//!
//! The dual writes are deliberately non-transactional: the chain call lands
//! first, the mirror insert second, and a failure in between leaves the two
//! stores divergent with no reconciliation path.

use std::sync::Arc;

use anyhow::Result;

use crate::domain::records::{
    DoctorRecord, DoctorRow, NewDoctorRow, NewQuestionRow, QuestionRecord, QuestionRow,
};
use crate::infra::solana::client::ChainGateway;
use crate::storage::directory::DirectoryStore;

/// The main service composing the chain gateway and the directory mirror.
pub struct MarketplaceService {
    chain: Arc<dyn ChainGateway>,
    directory: Arc<dyn DirectoryStore>,
    admin_wallet: String,
}

impl MarketplaceService {
    pub fn new(
        chain: Arc<dyn ChainGateway>,
        directory: Arc<dyn DirectoryStore>,
        admin_wallet: String,
    ) -> Self {
        Self { chain, directory, admin_wallet }
    }

    /// Connectivity probe for the health endpoint.
    pub async fn ping(&self) -> Result<()> {
        self.directory.ping().await
    }

    /// True when the wallet is the configured admin.
    pub fn is_admin(&self, wallet: &str) -> bool {
        wallet == self.admin_wallet
    }

    /// Chain listing. Failures were already reduced to an empty list inside
    /// the chain layer.
    pub async fn list_doctors(&self) -> Vec<DoctorRecord> {
        self.chain.fetch_doctors().await
    }

    pub async fn list_questions(&self) -> Vec<QuestionRecord> {
        self.chain.fetch_questions().await
    }

    /// The directory's view of doctors (the mirror, not the chain).
    pub async fn directory_doctors(&self) -> Result<Vec<DoctorRow>> {
        self.directory.list_doctors().await
    }

    pub async fn directory_questions(&self) -> Result<Vec<QuestionRow>> {
        self.directory.list_questions().await
    }

    /// Registers a doctor: chain first, mirror second.
    ///
    /// Returns `Ok(false)` when the chain transaction did not land (nothing
    /// was mirrored), `Err` when the chain write landed but the mirror
    /// insert failed. The partial state in the latter case is left as is.
    pub async fn register_doctor(
        &self,
        wallet: &str,
        name: &str,
        specialization: &str,
    ) -> Result<bool> {
        if !self.chain.register_doctor(name, specialization).await {
            return Ok(false);
        }

        let row = NewDoctorRow {
            wallet: wallet.to_string(),
            name: name.to_string(),
            specialization: specialization.to_string(),
        };
        self.directory.insert_doctor(&row).await?;
        Ok(true)
    }

    /// Asks a question: chain first, mirror second (same shape as
    /// registration).
    pub async fn ask_question(
        &self,
        wallet: &str,
        title: &str,
        content: &str,
        bounty_lamports: u64,
    ) -> Result<bool> {
        if !self.chain.ask_question(title, content, bounty_lamports).await {
            return Ok(false);
        }

        let row = NewQuestionRow {
            author_wallet: wallet.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            bounty_lamports: bounty_lamports as i64,
        };
        self.directory.insert_question(&row).await?;
        Ok(true)
    }

    /// Answers a question. Chain only; the mirror is never told, so its
    /// answered flag goes stale.
    pub async fn answer_question(&self, question: &str, doctor: &str, answer: &str) -> bool {
        self.chain.answer_question(question, doctor, answer).await
    }

    /// Verifies a doctor on chain, then flips the mirror row keyed by the
    /// doctor's wallet. Safe to repeat: the flag only moves false -> true.
    pub async fn verify_doctor(&self, account: &str, wallet: &str) -> Result<bool> {
        if !self.chain.verify_doctor(account).await {
            return Ok(false);
        }
        self.directory.set_verified(wallet).await?;
        Ok(true)
    }
}
