//! Record kinds persisted across the two backing stores.
//!
//! Each kind exists twice: as an on-chain program account (decoded from raw
//! account bytes, addresses carried as base58 text) and as a row in the
//! hosted directory tables. The two copies are written independently and are
//! never reconciled, so their field sets differ slightly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A doctor account as decoded from the chain.
///
/// `account` is the address of the account itself; mutations (verify) target
/// it. `authority` is the wallet that registered and owns the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DoctorRecord {
    pub account: String,
    pub authority: String,
    pub name: String,
    pub specialization: String,
    pub is_verified: bool,
    /// Populated by an external reputation mechanism; read-only here.
    pub rating: u64,
    pub review_count: u64,
}

/// A question account as decoded from the chain.
///
/// The answered flag, the responding doctor and the answer text are set
/// together by a single answer instruction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuestionRecord {
    pub account: String,
    pub authority: String,
    pub title: String,
    pub content: String,
    pub bounty_lamports: u64,
    pub is_answered: bool,
    pub doctor: Option<String>,
    pub answer: Option<String>,
}

/// A doctor row in the hosted directory, keyed by wallet address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DoctorRow {
    pub wallet: String,
    pub name: String,
    pub specialization: String,
    pub is_verified: bool,
    pub rating: i64,
    pub review_count: i64,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// A question row in the hosted directory.
///
/// Only inserts reach this table; answers stay on chain, so `is_answered`
/// goes stale here once a question is answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuestionRow {
    pub id: i64,
    pub author_wallet: String,
    pub title: String,
    pub content: String,
    pub bounty_lamports: i64,
    pub is_answered: bool,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// Insert shape for `doctors`; the store fills the remaining columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewDoctorRow {
    pub wallet: String,
    pub name: String,
    pub specialization: String,
}

/// Insert shape for `questions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewQuestionRow {
    pub author_wallet: String,
    pub title: String,
    pub content: String,
    pub bounty_lamports: i64,
}
