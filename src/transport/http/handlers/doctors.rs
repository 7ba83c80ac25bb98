use crate::domain::dashboard::{DoctorFlow, Phase};
use crate::transport::http::handlers::common::{chain_failed, denied, error_json, ok_json};
use crate::transport::http::types::{
    json_422, ApiResponse, AppState, DoctorListParams, RegisterDoctorRequest,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/doctors",
    params(
        ("verified" = Option<bool>, Query, description = "Keep only records whose verification flag matches")
    ),
    responses(
        (status = 200, description = "Doctor accounts currently on chain (empty when the cluster is unreachable)", body = ApiResponse)
    )
)]
pub async fn list_doctors_handler(
    State(state): State<AppState>,
    Query(params): Query<DoctorListParams>,
) -> impl IntoResponse {
    let mut doctors = state.service.list_doctors().await;
    if let Some(verified) = params.verified {
        doctors.retain(|d| d.is_verified == verified);
    }
    ok_json(doctors)
}

#[utoipa::path(
    get,
    path = "/api/directory/doctors",
    responses(
        (status = 200, description = "Doctor rows from the hosted directory mirror", body = ApiResponse),
        (status = 500, description = "Directory store error", body = ApiResponse)
    )
)]
pub async fn directory_doctors_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.service.directory_doctors().await {
        Ok(rows) => ok_json(rows).into_response(),
        Err(e) => {
            error_json(StatusCode::INTERNAL_SERVER_ERROR, format!("Directory read failed: {}", e))
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/doctors/register",
    request_body = RegisterDoctorRequest,
    responses(
        (status = 200, description = "Doctor registered; response carries the refreshed doctor page", body = ApiResponse),
        (status = 403, description = "Wallet unavailable", body = ApiResponse),
        (status = 409, description = "Wallet already has a doctor profile", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Chain write landed but the directory insert failed", body = ApiResponse),
        (status = 502, description = "Chain transaction failed", body = ApiResponse)
    )
)]
pub async fn register_doctor_handler(
    State(state): State<AppState>,
    request: Result<Json<RegisterDoctorRequest>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match request {
        Ok(v) => v,
        Err(e) => {
            return json_422(e, "{\"name\": \"...\", \"specialization\": \"...\"}").into_response()
        }
    };

    let mut flow = DoctorFlow::new(state.service.clone(), state.wallet.clone());
    if flow.open().await != Phase::Loaded {
        return denied().into_response();
    }
    if flow.profile().is_some() {
        return error_json(StatusCode::CONFLICT, "wallet already has a doctor profile")
            .into_response();
    }

    match flow.submit_registration(&request.name, &request.specialization).await {
        Ok(true) => ok_json(flow.view()).into_response(),
        Ok(false) => chain_failed().into_response(),
        Err(e) => error_json(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Directory write failed: {}", e),
        )
        .into_response(),
    }
}
