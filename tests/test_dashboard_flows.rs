//! Dashboard flow tests over scripted doubles for the chain and the
//! directory: page lifecycles, the admin gate, and the divergence left
//! behind when one side of a dual write fails.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{FakeChain, FakeDirectory, FakeLedger, FakeWallet};
use medchain_gateway::{
    AdminFlow, DirectoryStore, DoctorFlow, MarketplaceService, NewDoctorRow, NewQuestionRow,
    PatientFlow, Phase,
};

const ADMIN_WALLET: &str = "admin-wallet";
const PATIENT_WALLET: &str = "patient-wallet";
const DOCTOR_WALLET: &str = "doctor-wallet";

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn chain_outage_reads_as_empty_page() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = FakeLedger::new();
    ledger.seed_doctor(DOCTOR_WALLET, "Dr. A", "cardiology", true);
    ledger.seed_question(PATIENT_WALLET, "Chest pain", "Sharp pain when breathing in.", 0);

    let chain = Arc::new(FakeChain::with_ledger(ledger.clone(), PATIENT_WALLET).failing_fetches());
    let directory = Arc::new(FakeDirectory::new());
    let service = Arc::new(MarketplaceService::new(
        chain,
        directory,
        ADMIN_WALLET.to_string(),
    ));

    // The page still opens. An unreachable cluster reads exactly like a
    // chain with no data on it.
    let mut page = PatientFlow::new(
        service.clone(),
        Arc::new(FakeWallet::connected(PATIENT_WALLET)),
    );
    assert_eq!(page.open().await, Phase::Loaded);
    assert!(page.questions().is_empty());

    assert!(service.list_doctors().await.is_empty());
    assert!(service.list_questions().await.is_empty());
    assert!(ledger.fetch_calls.load(Ordering::SeqCst) > 0);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn registration_lands_unverified_and_mirrors() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = FakeLedger::new();
    let chain = Arc::new(FakeChain::with_ledger(ledger.clone(), DOCTOR_WALLET));
    let directory = Arc::new(FakeDirectory::new());
    let service = Arc::new(MarketplaceService::new(
        chain,
        directory,
        ADMIN_WALLET.to_string(),
    ));

    let mut page = DoctorFlow::new(
        service.clone(),
        Arc::new(FakeWallet::connected(DOCTOR_WALLET)),
    );
    assert_eq!(page.open().await, Phase::Loaded);
    assert!(page.profile().is_none());

    assert!(page.submit_registration("Dr. A", "cardiology").await?);
    assert_eq!(page.phase(), Phase::Loaded);

    // The post-submit refetch picked the fresh profile up, still unverified.
    let profile = page.profile().ok_or("profile missing after registration")?;
    assert_eq!(profile.name, "Dr. A");
    assert_eq!(profile.specialization, "cardiology");
    assert!(!profile.is_verified);

    let listed = service.list_doctors().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].authority, DOCTOR_WALLET);
    assert!(!listed[0].is_verified);

    let rows = service.directory_doctors().await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].wallet, DOCTOR_WALLET);
    assert!(!rows[0].is_verified);

    // A wallet that already has a profile cannot register a second one.
    assert!(page.submit_registration("Dr. A", "cardiology").await.is_err());

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn verification_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = FakeLedger::new();
    let account = ledger.seed_doctor(DOCTOR_WALLET, "Dr. A", "cardiology", false);

    let chain = Arc::new(FakeChain::with_ledger(ledger.clone(), ADMIN_WALLET));
    let directory = Arc::new(FakeDirectory::new());
    directory
        .insert_doctor(&NewDoctorRow {
            wallet: DOCTOR_WALLET.to_string(),
            name: "Dr. A".to_string(),
            specialization: "cardiology".to_string(),
        })
        .await?;
    let service = Arc::new(MarketplaceService::new(
        chain,
        directory,
        ADMIN_WALLET.to_string(),
    ));

    let mut page = AdminFlow::new(service.clone(), Arc::new(FakeWallet::connected(ADMIN_WALLET)));
    assert_eq!(page.open().await, Phase::Loaded);
    assert_eq!(page.doctors().len(), 1);

    // First verification flips the flag, the second is a no-op success.
    assert!(page.submit_verification(&account).await?);
    assert!(page.submit_verification(&account).await?);

    let listed = service.list_doctors().await;
    assert!(listed[0].is_verified);
    let rows = service.directory_doctors().await?;
    assert!(rows[0].is_verified);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn admin_gate_blocks_non_admin_before_any_fetch() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = FakeLedger::new();
    let account = ledger.seed_doctor(DOCTOR_WALLET, "Dr. A", "cardiology", false);

    let chain = Arc::new(FakeChain::with_ledger(ledger.clone(), PATIENT_WALLET));
    let directory = Arc::new(FakeDirectory::new());
    let service = Arc::new(MarketplaceService::new(
        chain,
        directory,
        ADMIN_WALLET.to_string(),
    ));

    let mut page = AdminFlow::new(
        service.clone(),
        Arc::new(FakeWallet::connected(PATIENT_WALLET)),
    );
    assert_eq!(page.open().await, Phase::Denied);
    assert!(page.doctors().is_empty());

    // Denied before the first fetch: the page never requested any data.
    assert_eq!(ledger.fetch_calls.load(Ordering::SeqCst), 0);

    // And nothing can be submitted from a page that never loaded.
    assert!(page.submit_verification(&account).await.is_err());
    assert_eq!(ledger.mutation_calls.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn wallet_outage_denies_every_page() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = FakeLedger::new();
    ledger.seed_doctor(DOCTOR_WALLET, "Dr. A", "cardiology", true);

    let chain = Arc::new(FakeChain::with_ledger(ledger.clone(), PATIENT_WALLET));
    let directory = Arc::new(FakeDirectory::new());
    let service = Arc::new(MarketplaceService::new(
        chain,
        directory,
        ADMIN_WALLET.to_string(),
    ));

    let mut patient = PatientFlow::new(service.clone(), Arc::new(FakeWallet::unavailable()));
    assert_eq!(patient.open().await, Phase::Denied);
    assert!(patient.submit_question("t", "c", 0).await.is_err());

    let mut doctor = DoctorFlow::new(service.clone(), Arc::new(FakeWallet::unavailable()));
    assert_eq!(doctor.open().await, Phase::Denied);
    assert!(doctor.submit_registration("Dr. B", "oncology").await.is_err());

    let mut admin = AdminFlow::new(service.clone(), Arc::new(FakeWallet::unavailable()));
    assert_eq!(admin.open().await, Phase::Denied);

    // A page that was never opened at all is just as locked down.
    let mut unopened = PatientFlow::new(
        service.clone(),
        Arc::new(FakeWallet::connected(PATIENT_WALLET)),
    );
    assert!(unopened.submit_question("t", "c", 0).await.is_err());

    // No fetch and no state-changing call ever went out.
    assert_eq!(ledger.fetch_calls.load(Ordering::SeqCst), 0);
    assert_eq!(ledger.mutation_calls.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn mirror_outage_leaves_stores_divergent() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = FakeLedger::new();
    let chain = Arc::new(FakeChain::with_ledger(ledger.clone(), DOCTOR_WALLET));
    let directory = Arc::new(FakeDirectory::new().failing_inserts());
    let service = Arc::new(MarketplaceService::new(
        chain,
        directory,
        ADMIN_WALLET.to_string(),
    ));

    let mut page = DoctorFlow::new(
        service.clone(),
        Arc::new(FakeWallet::connected(DOCTOR_WALLET)),
    );
    assert_eq!(page.open().await, Phase::Loaded);
    assert!(page.submit_registration("Dr. A", "cardiology").await.is_err());
    assert_eq!(page.phase(), Phase::Loaded);

    // The chain write landed, the mirror insert did not, and no
    // reconciliation ever runs.
    assert_eq!(service.list_doctors().await.len(), 1);
    assert!(service.directory_doctors().await?.is_empty());

    // The failed submit did not refetch, so the page still shows no profile.
    assert!(page.profile().is_none());

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn chain_rejection_reports_false_and_skips_mirror() -> Result<(), Box<dyn std::error::Error>>
{
    let ledger = FakeLedger::new();
    let chain = Arc::new(FakeChain::with_ledger(ledger.clone(), DOCTOR_WALLET).failing_mutations());
    let directory = Arc::new(FakeDirectory::new());
    let service = Arc::new(MarketplaceService::new(
        chain,
        directory,
        ADMIN_WALLET.to_string(),
    ));

    let mut page = DoctorFlow::new(
        service.clone(),
        Arc::new(FakeWallet::connected(DOCTOR_WALLET)),
    );
    assert_eq!(page.open().await, Phase::Loaded);

    // A rejected transaction is a clean `false`, and the mirror is
    // never written for it.
    assert!(!page.submit_registration("Dr. A", "cardiology").await?);
    assert!(service.list_doctors().await.is_empty());
    assert!(service.directory_doctors().await?.is_empty());

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn answers_update_chain_only() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = FakeLedger::new();
    ledger.seed_doctor(DOCTOR_WALLET, "Dr. A", "cardiology", true);
    let question = ledger.seed_question(
        PATIENT_WALLET,
        "Chest pain",
        "Sharp pain when breathing in.",
        5_000,
    );

    let chain = Arc::new(FakeChain::with_ledger(ledger.clone(), DOCTOR_WALLET));
    let directory = Arc::new(FakeDirectory::new());
    directory
        .insert_question(&NewQuestionRow {
            author_wallet: PATIENT_WALLET.to_string(),
            title: "Chest pain".to_string(),
            content: "Sharp pain when breathing in.".to_string(),
            bounty_lamports: 5_000,
        })
        .await?;
    let service = Arc::new(MarketplaceService::new(
        chain,
        directory,
        ADMIN_WALLET.to_string(),
    ));

    let mut page = DoctorFlow::new(
        service.clone(),
        Arc::new(FakeWallet::connected(DOCTOR_WALLET)),
    );
    assert_eq!(page.open().await, Phase::Loaded);
    assert!(page.profile().is_some());
    assert_eq!(page.open_questions().len(), 1);

    assert!(page.submit_answer(&question, "Rest and fluids.").await?);
    assert!(page.open_questions().is_empty());

    let answered = service
        .list_questions()
        .await
        .into_iter()
        .find(|q| q.account == question)
        .ok_or("question missing after answer")?;
    assert!(answered.is_answered);
    assert_eq!(answered.answer.as_deref(), Some("Rest and fluids."));
    assert!(answered.doctor.is_some());

    // The mirror row was never told and keeps claiming the question is open.
    let rows = service.directory_questions().await?;
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].is_answered);

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn asking_mirrors_a_row_and_lists_own_questions() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = FakeLedger::new();
    ledger.seed_question("other-patient", "Back pain", "Lower back, worse at night.", 0);

    let chain = Arc::new(FakeChain::with_ledger(ledger.clone(), PATIENT_WALLET));
    let directory = Arc::new(FakeDirectory::new());
    let service = Arc::new(MarketplaceService::new(
        chain,
        directory,
        ADMIN_WALLET.to_string(),
    ));

    let mut page = PatientFlow::new(
        service.clone(),
        Arc::new(FakeWallet::connected(PATIENT_WALLET)),
    );
    assert_eq!(page.open().await, Phase::Loaded);

    // Someone else's question never shows on this page.
    assert!(page.questions().is_empty());

    assert!(
        page.submit_question("Chest pain", "Sharp pain when breathing in.", 10_000)
            .await?
    );
    assert_eq!(page.questions().len(), 1);
    assert_eq!(page.questions()[0].authority, PATIENT_WALLET);
    assert_eq!(page.questions()[0].bounty_lamports, 10_000);

    let rows = service.directory_questions().await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].author_wallet, PATIENT_WALLET);
    assert_eq!(rows[0].bounty_lamports, 10_000);
    assert!(!rows[0].is_answered);

    Ok(())
}
