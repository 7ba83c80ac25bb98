//! Hosted directory store: the relational mirror of marketplace records.

use anyhow::Result;

use crate::domain::records::{DoctorRow, NewDoctorRow, NewQuestionRow, QuestionRow};

/// Contract for the hosted table store.
///
/// Every method propagates its error to the caller; swallowing failures is
/// the chain layer's policy, not this one's.
#[async_trait::async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<()>;

    async fn list_doctors(&self) -> Result<Vec<DoctorRow>>;

    /// Mirror write for a registration, keyed by the registering wallet.
    async fn insert_doctor(&self, row: &NewDoctorRow) -> Result<()>;

    /// Flips the verification flag for a wallet. Idempotent, and a no-op
    /// when the row is absent (the mirror may lag the chain).
    async fn set_verified(&self, wallet: &str) -> Result<()>;

    async fn list_questions(&self) -> Result<Vec<QuestionRow>>;

    /// Mirror write for a newly asked question. Answers never reach this
    /// table.
    async fn insert_question(&self, row: &NewQuestionRow) -> Result<()>;
}
