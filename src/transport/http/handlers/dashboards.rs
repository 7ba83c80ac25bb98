// Read-only page views: each handler runs the corresponding flow to
// `Loaded` and returns what the page would render.

use crate::domain::dashboard::{AdminFlow, DoctorFlow, PatientFlow, Phase};
use crate::transport::http::handlers::common::{denied, ok_json};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::response::IntoResponse;

#[utoipa::path(
    get,
    path = "/api/dashboards/patient",
    responses(
        (status = 200, description = "Patient page view (the wallet's own questions)", body = ApiResponse),
        (status = 403, description = "Wallet unavailable", body = ApiResponse)
    )
)]
pub async fn patient_dashboard_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut flow = PatientFlow::new(state.service.clone(), state.wallet.clone());
    if flow.open().await != Phase::Loaded {
        return denied().into_response();
    }
    ok_json(flow.view()).into_response()
}

#[utoipa::path(
    get,
    path = "/api/dashboards/doctor",
    responses(
        (status = 200, description = "Doctor page view (profile plus open questions)", body = ApiResponse),
        (status = 403, description = "Wallet unavailable", body = ApiResponse)
    )
)]
pub async fn doctor_dashboard_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut flow = DoctorFlow::new(state.service.clone(), state.wallet.clone());
    if flow.open().await != Phase::Loaded {
        return denied().into_response();
    }
    ok_json(flow.view()).into_response()
}

#[utoipa::path(
    get,
    path = "/api/dashboards/admin",
    responses(
        (status = 200, description = "Admin page view (every doctor account)", body = ApiResponse),
        (status = 403, description = "Wallet unavailable or not the configured admin", body = ApiResponse)
    )
)]
pub async fn admin_dashboard_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut flow = AdminFlow::new(state.service.clone(), state.wallet.clone());
    if flow.open().await != Phase::Loaded {
        return denied().into_response();
    }
    ok_json(flow.view()).into_response()
}
