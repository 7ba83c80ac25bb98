//! Shared doubles for driving the service and the page flows without a
//! cluster or a database. `FakeLedger` plays the role of the chain itself;
//! a `FakeChain` is one wallet's connection to it, mirroring how the real
//! client signs everything with the operator keypair.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use medchain_gateway::domain::records::{
    DoctorRecord, DoctorRow, NewDoctorRow, NewQuestionRow, QuestionRecord, QuestionRow,
};
use medchain_gateway::{ChainGateway, DirectoryStore, WalletBridge};

/// Scripted wallet: connects to a fixed address or always fails.
pub struct FakeWallet {
    address: Option<String>,
}

impl FakeWallet {
    pub fn connected(address: &str) -> Self {
        Self { address: Some(address.to_string()) }
    }

    pub fn unavailable() -> Self {
        Self { address: None }
    }
}

#[async_trait::async_trait]
impl WalletBridge for FakeWallet {
    async fn connect(&self) -> Result<String> {
        match &self.address {
            Some(address) => Ok(address.clone()),
            None => Err(anyhow::anyhow!("wallet unavailable")),
        }
    }
}

/// The shared on-chain state, with call counters for the tests that assert
/// a fetch or mutation never happened.
#[derive(Default)]
pub struct FakeLedger {
    pub doctors: Mutex<Vec<DoctorRecord>>,
    pub questions: Mutex<Vec<QuestionRecord>>,
    pub fetch_calls: AtomicUsize,
    pub mutation_calls: AtomicUsize,
    next_account: AtomicUsize,
}

impl FakeLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_account(&self, kind: &str) -> String {
        let n = self.next_account.fetch_add(1, Ordering::SeqCst);
        format!("{}-account-{}", kind, n)
    }

    pub fn seed_doctor(
        &self,
        authority: &str,
        name: &str,
        specialization: &str,
        is_verified: bool,
    ) -> String {
        let account = self.next_account("doctor");
        self.doctors.lock().unwrap().push(DoctorRecord {
            account: account.clone(),
            authority: authority.to_string(),
            name: name.to_string(),
            specialization: specialization.to_string(),
            is_verified,
            rating: 0,
            review_count: 0,
        });
        account
    }

    pub fn seed_question(&self, authority: &str, title: &str, content: &str, bounty: u64) -> String {
        let account = self.next_account("question");
        self.questions.lock().unwrap().push(QuestionRecord {
            account: account.clone(),
            authority: authority.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            bounty_lamports: bounty,
            is_answered: false,
            doctor: None,
            answer: None,
        });
        account
    }
}

/// One wallet's connection to the fake ledger.
pub struct FakeChain {
    pub ledger: Arc<FakeLedger>,
    wallet: String,
    fail_fetches: bool,
    fail_mutations: bool,
}

impl FakeChain {
    pub fn new(wallet: &str) -> Self {
        Self::with_ledger(FakeLedger::new(), wallet)
    }

    pub fn with_ledger(ledger: Arc<FakeLedger>, wallet: &str) -> Self {
        Self {
            ledger,
            wallet: wallet.to_string(),
            fail_fetches: false,
            fail_mutations: false,
        }
    }

    /// Every fetch behaves like an unreachable cluster.
    pub fn failing_fetches(mut self) -> Self {
        self.fail_fetches = true;
        self
    }

    /// Every transaction fails to land.
    pub fn failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }
}

#[async_trait::async_trait]
impl ChainGateway for FakeChain {
    async fn fetch_doctors(&self) -> Vec<DoctorRecord> {
        self.ledger.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches {
            return Vec::new();
        }
        self.ledger.doctors.lock().unwrap().clone()
    }

    async fn fetch_questions(&self) -> Vec<QuestionRecord> {
        self.ledger.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetches {
            return Vec::new();
        }
        self.ledger.questions.lock().unwrap().clone()
    }

    async fn register_doctor(&self, name: &str, specialization: &str) -> bool {
        self.ledger.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations {
            return false;
        }
        self.ledger.seed_doctor(&self.wallet, name, specialization, false);
        true
    }

    async fn ask_question(&self, title: &str, content: &str, bounty_lamports: u64) -> bool {
        self.ledger.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations {
            return false;
        }
        self.ledger.seed_question(&self.wallet, title, content, bounty_lamports);
        true
    }

    async fn answer_question(&self, question: &str, doctor: &str, answer: &str) -> bool {
        self.ledger.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations {
            return false;
        }
        // Mirrors the program's checks: the doctor must exist, be verified
        // and own the signing wallet; the question must still be open.
        let verified = self
            .ledger
            .doctors
            .lock()
            .unwrap()
            .iter()
            .any(|d| d.account == doctor && d.authority == self.wallet && d.is_verified);
        if !verified {
            return false;
        }
        let mut questions = self.ledger.questions.lock().unwrap();
        match questions.iter_mut().find(|q| q.account == question) {
            Some(q) if !q.is_answered => {
                q.is_answered = true;
                q.doctor = Some(doctor.to_string());
                q.answer = Some(answer.to_string());
                true
            }
            _ => false,
        }
    }

    async fn verify_doctor(&self, doctor: &str) -> bool {
        self.ledger.mutation_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mutations {
            return false;
        }
        let mut doctors = self.ledger.doctors.lock().unwrap();
        match doctors.iter_mut().find(|d| d.account == doctor) {
            Some(d) => {
                // Idempotent like the program: already-verified stays true.
                d.is_verified = true;
                true
            }
            None => false,
        }
    }
}

/// In-memory directory mirror.
#[derive(Default)]
pub struct FakeDirectory {
    pub doctors: Mutex<Vec<DoctorRow>>,
    pub questions: Mutex<Vec<QuestionRow>>,
    fail_inserts: bool,
    next_id: AtomicUsize,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every insert behaves like an unreachable table store.
    pub fn failing_inserts(mut self) -> Self {
        self.fail_inserts = true;
        self
    }
}

#[async_trait::async_trait]
impl DirectoryStore for FakeDirectory {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_doctors(&self) -> Result<Vec<DoctorRow>> {
        Ok(self.doctors.lock().unwrap().clone())
    }

    async fn insert_doctor(&self, row: &NewDoctorRow) -> Result<()> {
        if self.fail_inserts {
            return Err(anyhow::anyhow!("directory unavailable"));
        }
        self.doctors.lock().unwrap().push(DoctorRow {
            wallet: row.wallet.clone(),
            name: row.name.clone(),
            specialization: row.specialization.clone(),
            is_verified: false,
            rating: 0,
            review_count: 0,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn set_verified(&self, wallet: &str) -> Result<()> {
        for row in self.doctors.lock().unwrap().iter_mut() {
            if row.wallet == wallet {
                row.is_verified = true;
            }
        }
        Ok(())
    }

    async fn list_questions(&self) -> Result<Vec<QuestionRow>> {
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn insert_question(&self, row: &NewQuestionRow) -> Result<()> {
        if self.fail_inserts {
            return Err(anyhow::anyhow!("directory unavailable"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        self.questions.lock().unwrap().push(QuestionRow {
            id,
            author_wallet: row.author_wallet.clone(),
            title: row.title.clone(),
            content: row.content.clone(),
            bounty_lamports: row.bounty_lamports,
            is_answered: false,
            created_at: Utc::now(),
        });
        Ok(())
    }
}
