//! Page flows for the three dashboards.
//!
//! Each dashboard is a small linear state machine:
//! `Unauthenticated -> Connecting -> (Loaded | Denied)` when the page opens,
//! then `Loaded -> Submitting -> Loaded` for each user action, with a
//! refetch before returning to `Loaded` after any successful mutation.
//!
//! A failed wallet connection moves any page to `Denied`; no state-changing
//! call can be issued from a page that never reached `Loaded`. The admin
//! page additionally gates on the configured admin wallet before its first
//! fetch, so a denied admin never sees (or requests) any data.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::app::marketplace::MarketplaceService;
use crate::domain::records::{DoctorRecord, QuestionRecord};
use crate::infra::wallet::WalletBridge;

/// Where a page currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Unauthenticated,
    Connecting,
    Denied,
    Loaded,
    Submitting,
}

/// Patient page: the wallet's own questions plus an ask form.
pub struct PatientFlow {
    service: Arc<MarketplaceService>,
    wallet: Arc<dyn WalletBridge>,
    phase: Phase,
    address: Option<String>,
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PatientView {
    pub phase: Phase,
    pub wallet: Option<String>,
    pub questions: Vec<QuestionRecord>,
}

impl PatientFlow {
    pub fn new(service: Arc<MarketplaceService>, wallet: Arc<dyn WalletBridge>) -> Self {
        Self {
            service,
            wallet,
            phase: Phase::Unauthenticated,
            address: None,
            questions: Vec::new(),
        }
    }

    /// Connects the wallet and loads the page.
    pub async fn open(&mut self) -> Phase {
        self.phase = Phase::Connecting;
        match self.wallet.connect().await {
            Ok(address) => self.address = Some(address),
            Err(e) => {
                warn!("wallet connection failed: {}", e);
                self.phase = Phase::Denied;
                return self.phase;
            }
        }
        self.refresh().await;
        self.phase = Phase::Loaded;
        self.phase
    }

    // Only the wallet's own questions are shown on this page.
    async fn refresh(&mut self) {
        let address = self.address.as_deref().unwrap_or("");
        self.questions = self
            .service
            .list_questions()
            .await
            .into_iter()
            .filter(|q| q.authority == address)
            .collect();
    }

    /// Submits one question, refetching on success.
    pub async fn submit_question(
        &mut self,
        title: &str,
        content: &str,
        bounty_lamports: u64,
    ) -> Result<bool> {
        if self.phase != Phase::Loaded {
            return Err(anyhow::anyhow!("page is not loaded"));
        }
        let address = self.address.clone().unwrap_or_default();

        self.phase = Phase::Submitting;
        let outcome = self
            .service
            .ask_question(&address, title, content, bounty_lamports)
            .await;
        if matches!(outcome, Ok(true)) {
            self.refresh().await;
        }
        self.phase = Phase::Loaded;
        outcome
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn view(&self) -> PatientView {
        PatientView {
            phase: self.phase,
            wallet: self.address.clone(),
            questions: self.questions.clone(),
        }
    }
}

/// Doctor page: the wallet's profile (or a registration form when there is
/// none) plus the open questions waiting for an answer.
pub struct DoctorFlow {
    service: Arc<MarketplaceService>,
    wallet: Arc<dyn WalletBridge>,
    phase: Phase,
    address: Option<String>,
    profile: Option<DoctorRecord>,
    open_questions: Vec<QuestionRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DoctorView {
    pub phase: Phase,
    pub wallet: Option<String>,
    pub profile: Option<DoctorRecord>,
    pub open_questions: Vec<QuestionRecord>,
}

impl DoctorFlow {
    pub fn new(service: Arc<MarketplaceService>, wallet: Arc<dyn WalletBridge>) -> Self {
        Self {
            service,
            wallet,
            phase: Phase::Unauthenticated,
            address: None,
            profile: None,
            open_questions: Vec::new(),
        }
    }

    pub async fn open(&mut self) -> Phase {
        self.phase = Phase::Connecting;
        match self.wallet.connect().await {
            Ok(address) => self.address = Some(address),
            Err(e) => {
                warn!("wallet connection failed: {}", e);
                self.phase = Phase::Denied;
                return self.phase;
            }
        }
        self.refresh().await;
        self.phase = Phase::Loaded;
        self.phase
    }

    async fn refresh(&mut self) {
        let address = self.address.as_deref().unwrap_or("");
        self.profile = self
            .service
            .list_doctors()
            .await
            .into_iter()
            .find(|d| d.authority == address);
        self.open_questions = self
            .service
            .list_questions()
            .await
            .into_iter()
            .filter(|q| !q.is_answered)
            .collect();
    }

    /// Registers this wallet as a doctor. Rejected once a profile exists.
    pub async fn submit_registration(&mut self, name: &str, specialization: &str) -> Result<bool> {
        if self.phase != Phase::Loaded {
            return Err(anyhow::anyhow!("page is not loaded"));
        }
        if self.profile.is_some() {
            return Err(anyhow::anyhow!("wallet already has a doctor profile"));
        }
        let address = self.address.clone().unwrap_or_default();

        self.phase = Phase::Submitting;
        let outcome = self
            .service
            .register_doctor(&address, name, specialization)
            .await;
        if matches!(outcome, Ok(true)) {
            self.refresh().await;
        }
        self.phase = Phase::Loaded;
        outcome
    }

    /// Answers an open question on behalf of this wallet's profile.
    pub async fn submit_answer(&mut self, question: &str, answer: &str) -> Result<bool> {
        if self.phase != Phase::Loaded {
            return Err(anyhow::anyhow!("page is not loaded"));
        }
        let doctor_account = match &self.profile {
            Some(profile) => profile.account.clone(),
            None => return Err(anyhow::anyhow!("no doctor profile for this wallet")),
        };

        self.phase = Phase::Submitting;
        let answered = self
            .service
            .answer_question(question, &doctor_account, answer)
            .await;
        if answered {
            self.refresh().await;
        }
        self.phase = Phase::Loaded;
        Ok(answered)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn profile(&self) -> Option<&DoctorRecord> {
        self.profile.as_ref()
    }

    pub fn open_questions(&self) -> &[QuestionRecord] {
        &self.open_questions
    }

    pub fn view(&self) -> DoctorView {
        DoctorView {
            phase: self.phase,
            wallet: self.address.clone(),
            profile: self.profile.clone(),
            open_questions: self.open_questions.clone(),
        }
    }
}

/// Admin page: every doctor, with a verify action per row.
pub struct AdminFlow {
    service: Arc<MarketplaceService>,
    wallet: Arc<dyn WalletBridge>,
    phase: Phase,
    address: Option<String>,
    doctors: Vec<DoctorRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminView {
    pub phase: Phase,
    pub wallet: Option<String>,
    pub doctors: Vec<DoctorRecord>,
}

impl AdminFlow {
    pub fn new(service: Arc<MarketplaceService>, wallet: Arc<dyn WalletBridge>) -> Self {
        Self {
            service,
            wallet,
            phase: Phase::Unauthenticated,
            address: None,
            doctors: Vec::new(),
        }
    }

    /// Connects, gates on the admin wallet, and only then fetches.
    pub async fn open(&mut self) -> Phase {
        self.phase = Phase::Connecting;
        let address = match self.wallet.connect().await {
            Ok(address) => address,
            Err(e) => {
                warn!("wallet connection failed: {}", e);
                self.phase = Phase::Denied;
                return self.phase;
            }
        };

        // The gate runs before the first fetch: a non-admin wallet never
        // triggers a data request from this page.
        if !self.service.is_admin(&address) {
            warn!("admin page denied for wallet {}", address);
            self.phase = Phase::Denied;
            return self.phase;
        }

        self.address = Some(address);
        self.doctors = self.service.list_doctors().await;
        self.phase = Phase::Loaded;
        self.phase
    }

    /// Verifies one doctor, refetching the listing on success.
    pub async fn submit_verification(&mut self, account: &str) -> Result<bool> {
        if self.phase != Phase::Loaded {
            return Err(anyhow::anyhow!("page is not loaded"));
        }
        let doctor = self
            .doctors
            .iter()
            .find(|d| d.account == account)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown doctor account: {}", account))?;

        self.phase = Phase::Submitting;
        let outcome = self
            .service
            .verify_doctor(&doctor.account, &doctor.authority)
            .await;
        if matches!(outcome, Ok(true)) {
            self.doctors = self.service.list_doctors().await;
        }
        self.phase = Phase::Loaded;
        outcome
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn doctors(&self) -> &[DoctorRecord] {
        &self.doctors
    }

    pub fn view(&self) -> AdminView {
        AdminView {
            phase: self.phase,
            wallet: self.address.clone(),
            doctors: self.doctors.clone(),
        }
    }
}
