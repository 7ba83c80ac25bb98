use crate::domain::dashboard::{AdminFlow, Phase};
use crate::transport::http::handlers::common::{chain_failed, denied, error_json, ok_json};
use crate::transport::http::types::{json_422, ApiResponse, AppState, VerifyDoctorRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    post,
    path = "/api/admin/verify",
    request_body = VerifyDoctorRequest,
    responses(
        (status = 200, description = "Doctor verified; response carries the refreshed admin page", body = ApiResponse),
        (status = 403, description = "Wallet is not the configured admin", body = ApiResponse),
        (status = 404, description = "Doctor account not present in the listing", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Chain write landed but the directory update failed", body = ApiResponse),
        (status = 502, description = "Chain transaction failed", body = ApiResponse)
    )
)]
pub async fn verify_doctor_handler(
    State(state): State<AppState>,
    request: Result<Json<VerifyDoctorRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"doctor_account\": \"...\"}").into_response(),
    };

    let mut flow = AdminFlow::new(state.service.clone(), state.wallet.clone());
    if flow.open().await != Phase::Loaded {
        return denied().into_response();
    }
    if !flow.doctors().iter().any(|d| d.account == request.doctor_account) {
        return error_json(StatusCode::NOT_FOUND, "doctor account not found").into_response();
    }

    match flow.submit_verification(&request.doctor_account).await {
        Ok(true) => ok_json(flow.view()).into_response(),
        Ok(false) => chain_failed().into_response(),
        Err(e) => error_json(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Directory update failed: {}", e),
        )
        .into_response(),
    }
}
