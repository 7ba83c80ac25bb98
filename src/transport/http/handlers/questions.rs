use crate::domain::dashboard::{DoctorFlow, PatientFlow, Phase};
use crate::transport::http::handlers::common::{chain_failed, denied, error_json, ok_json};
use crate::transport::http::types::{
    json_422, AnswerQuestionRequest, ApiResponse, AppState, AskQuestionRequest, QuestionListParams,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/questions",
    params(
        ("open" = Option<bool>, Query, description = "When true, keep only unanswered questions")
    ),
    responses(
        (status = 200, description = "Question accounts currently on chain (empty when the cluster is unreachable)", body = ApiResponse)
    )
)]
pub async fn list_questions_handler(
    State(state): State<AppState>,
    Query(params): Query<QuestionListParams>,
) -> impl IntoResponse {
    let mut questions = state.service.list_questions().await;
    if params.open.unwrap_or(false) {
        questions.retain(|q| !q.is_answered);
    }
    ok_json(questions)
}

#[utoipa::path(
    post,
    path = "/api/questions/ask",
    request_body = AskQuestionRequest,
    responses(
        (status = 200, description = "Question submitted; response carries the refreshed patient page", body = ApiResponse),
        (status = 403, description = "Wallet unavailable", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Chain write landed but the directory insert failed", body = ApiResponse),
        (status = 502, description = "Chain transaction failed", body = ApiResponse)
    )
)]
pub async fn ask_question_handler(
    State(state): State<AppState>,
    request: Result<Json<AskQuestionRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(
                e,
                "{\"title\": \"...\", \"content\": \"...\", \"bounty_lamports\": 0}",
            )
            .into_response()
        }
    };

    let mut flow = PatientFlow::new(state.service.clone(), state.wallet.clone());
    if flow.open().await != Phase::Loaded {
        return denied().into_response();
    }

    match flow
        .submit_question(&request.title, &request.content, request.bounty_lamports)
        .await
    {
        Ok(true) => ok_json(flow.view()).into_response(),
        Ok(false) => chain_failed().into_response(),
        Err(e) => error_json(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Directory write failed: {}", e),
        )
        .into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/questions/answer",
    request_body = AnswerQuestionRequest,
    responses(
        (status = 200, description = "Answer submitted; response carries the refreshed doctor page", body = ApiResponse),
        (status = 403, description = "Wallet unavailable", body = ApiResponse),
        (status = 409, description = "No doctor profile for this wallet", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 502, description = "Chain transaction failed", body = ApiResponse)
    )
)]
pub async fn answer_question_handler(
    State(state): State<AppState>,
    request: Result<Json<AnswerQuestionRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"question_account\": \"...\", \"answer\": \"...\"}")
                .into_response()
        }
    };

    let mut flow = DoctorFlow::new(state.service.clone(), state.wallet.clone());
    if flow.open().await != Phase::Loaded {
        return denied().into_response();
    }
    if flow.profile().is_none() {
        return error_json(StatusCode::CONFLICT, "no doctor profile for this wallet")
            .into_response();
    }

    match flow.submit_answer(&request.question_account, &request.answer).await {
        Ok(true) => ok_json(flow.view()).into_response(),
        Ok(false) => chain_failed().into_response(),
        Err(e) => {
            error_json(StatusCode::INTERNAL_SERVER_ERROR, format!("Answer failed: {}", e))
                .into_response()
        }
    }
}
