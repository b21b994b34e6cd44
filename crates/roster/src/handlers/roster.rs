//! Handlers for the roster operations.
//!
//! Each handler validates its payload, invokes the facade, and translates
//! failures through [`ApiError`] so callers only ever see a status code and
//! a fixed message.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::Query;

use crate::{
    error::ApiError,
    models::{
        CommonStudentsParams, CommonStudentsResponse, CreateStudentRequest, CreateTeacherRequest,
        DeregisterStudentRequest, RegisterStudentsRequest, TeachersWithStudentsResponse,
    },
    state::AppState,
};

/// Create a student (POST /api/students). Upsert semantics: an existing
/// student with the same email is overwritten.
pub async fn create_student(
    State(state): State<AppState>,
    Json(payload): Json<CreateStudentRequest>,
) -> Result<StatusCode, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;

    state
        .roster
        .create_student(&payload.email, &payload.name)
        .await
        .map_err(|e| ApiError::from_roster(e, "Unable to create student"))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Create a teacher (POST /api/teachers).
pub async fn create_teacher(
    State(state): State<AppState>,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<StatusCode, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;

    state
        .roster
        .create_teacher(&payload.email, &payload.name)
        .await
        .map_err(|e| ApiError::from_roster(e, "Unable to create teacher"))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Register students to a teacher (POST /api/register).
pub async fn register_students(
    State(state): State<AppState>,
    Json(payload): Json<RegisterStudentsRequest>,
) -> Result<StatusCode, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;

    state
        .roster
        .register_students(&payload.teacher, &payload.students)
        .await
        .map_err(|e| ApiError::from_roster(e, "Unable to register students to teacher"))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Deregister one student from one teacher (POST /api/deregister).
pub async fn deregister_student(
    State(state): State<AppState>,
    Json(payload): Json<DeregisterStudentRequest>,
) -> Result<StatusCode, ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;

    state
        .roster
        .deregister_student(&payload.teacher, &payload.student, &payload.reason)
        .await
        .map_err(|e| ApiError::from_roster(e, "Unable to deregister student from teacher"))?;

    Ok(StatusCode::OK)
}

/// Students common to all given teachers (GET /api/commonstudents).
pub async fn common_students(
    State(state): State<AppState>,
    Query(params): Query<CommonStudentsParams>,
) -> Result<Json<CommonStudentsResponse>, ApiError> {
    params.validate().map_err(ApiError::bad_request)?;

    let students = state
        .roster
        .common_students(&params.teacher)
        .await
        .map_err(|e| ApiError::from_roster(e, "Unable to get common students"))?;

    Ok(Json(CommonStudentsResponse { students }))
}

/// All teachers with their registered students (GET /api/teachers).
pub async fn all_teachers_with_students(
    State(state): State<AppState>,
) -> Result<Json<TeachersWithStudentsResponse>, ApiError> {
    let teachers = state
        .roster
        .all_teachers_with_students()
        .await
        .map_err(|e| ApiError::from_roster(e, "Unable to get teachers with students"))?;

    Ok(Json(TeachersWithStudentsResponse { teachers }))
}
