use crate::domain::dashboard::{AdminView, DoctorView, PatientView, Phase};
use crate::domain::records::{DoctorRecord, DoctorRow, QuestionRecord, QuestionRow};
use crate::transport::http::handlers::{admin, dashboards, doctors, health, questions};
use crate::transport::http::types::{
    AnswerQuestionRequest, ApiResponse, AskQuestionRequest, RegisterDoctorRequest,
    VerifyDoctorRequest,
};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        doctors::list_doctors_handler,
        doctors::directory_doctors_handler,
        doctors::register_doctor_handler,
        questions::list_questions_handler,
        questions::ask_question_handler,
        questions::answer_question_handler,
        admin::verify_doctor_handler,
        dashboards::patient_dashboard_handler,
        dashboards::doctor_dashboard_handler,
        dashboards::admin_dashboard_handler
    ),
    components(schemas(
        ApiResponse,
        RegisterDoctorRequest,
        AskQuestionRequest,
        AnswerQuestionRequest,
        VerifyDoctorRequest,
        DoctorRecord,
        QuestionRecord,
        DoctorRow,
        QuestionRow,
        Phase,
        PatientView,
        DoctorView,
        AdminView
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/doctors", get(doctors::list_doctors_handler))
        .route("/api/doctors/register", post(doctors::register_doctor_handler))
        .route("/api/directory/doctors", get(doctors::directory_doctors_handler))
        .route("/api/questions", get(questions::list_questions_handler))
        .route("/api/questions/ask", post(questions::ask_question_handler))
        .route("/api/questions/answer", post(questions::answer_question_handler))
        .route("/api/admin/verify", post(admin::verify_doctor_handler))
        .route("/api/dashboards/patient", get(dashboards::patient_dashboard_handler))
        .route("/api/dashboards/doctor", get(dashboards::doctor_dashboard_handler))
        .route("/api/dashboards/admin", get(dashboards::admin_dashboard_handler))
        .with_state(app_state)
}
