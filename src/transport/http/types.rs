use crate::app::marketplace::MarketplaceService;
use crate::infra::wallet::WalletBridge;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MarketplaceService>,
    pub wallet: Arc<dyn WalletBridge>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterDoctorRequest {
    pub name: String,
    pub specialization: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct AskQuestionRequest {
    pub title: String,
    pub content: String,
    /// Offered bounty in lamports (0 when omitted).
    #[serde(default)]
    pub bounty_lamports: u64,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct AnswerQuestionRequest {
    /// Account address of the question being answered.
    pub question_account: String,
    pub answer: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct VerifyDoctorRequest {
    /// Account address of the doctor to verify.
    pub doctor_account: String,
}

#[derive(Deserialize, Debug)]
pub struct DoctorListParams {
    /// When set, keep only records whose verification flag matches.
    pub verified: Option<bool>,
}

#[derive(Deserialize, Debug)]
pub struct QuestionListParams {
    /// When true, keep only unanswered questions.
    pub open: Option<bool>,
}

pub fn json_422(err: JsonRejection, expected: &str) -> (StatusCode, Json<ApiResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ApiResponse {
            success: false,
            data: None,
            error: Some(format!("Invalid JSON body: {} (expected: {})", err, expected)),
        }),
    )
}
