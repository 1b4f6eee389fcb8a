use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use service::roster::{AttendanceStatus, Student, StudentId, Subject, SubjectId};

use crate::errors::JsonApiError;
use crate::routes::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NameInput {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusInput {
    #[serde(default)]
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AttendanceUpdated {
    pub message: &'static str,
    pub student: Student,
}

type JsonBody<T> = Result<Json<T>, JsonRejection>;
type PathParams<T> = Result<Path<T>, PathRejection>;

// A request without a JSON body reads as `{}`: the core decides whether the
// absent field is acceptable. A body that is sent but unreadable is a 400.
fn body_or_default<T: Default>(body: JsonBody<T>) -> Result<T, JsonApiError> {
    match body {
        Ok(Json(v)) => Ok(v),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

#[utoipa::path(get, path = "/subjects", tag = "subjects", responses((status = 200, description = "All subjects with their students", body = [crate::openapi::SubjectDoc])))]
pub async fn list_subjects(State(state): State<AppState>) -> Json<Vec<Subject>> {
    Json(state.roster.list_subjects().await)
}

#[utoipa::path(get, path = "/subjects/{id}", tag = "subjects", params(("id" = u64, Path, description = "Subject id")), responses((status = 200, description = "OK", body = crate::openapi::SubjectDoc), (status = 404, description = "Not Found")))]
pub async fn get_subject(
    State(state): State<AppState>,
    path: PathParams<SubjectId>,
) -> Result<Json<Subject>, JsonApiError> {
    let Path(id) = path?;
    Ok(Json(state.roster.get_subject(id).await?))
}

#[utoipa::path(post, path = "/subjects", tag = "subjects", request_body = crate::openapi::NameRequest, responses((status = 200, description = "Created subject", body = crate::openapi::SubjectDoc), (status = 400, description = "Subject name required")))]
pub async fn create_subject(
    State(state): State<AppState>,
    body: JsonBody<NameInput>,
) -> Result<Json<Subject>, JsonApiError> {
    let input = body_or_default(body)?;
    Ok(Json(state.roster.add_subject(input.name).await?))
}

#[utoipa::path(delete, path = "/subjects/{id}", tag = "subjects", params(("id" = u64, Path, description = "Subject id")), responses((status = 200, description = "Deleted, or already absent")))]
pub async fn delete_subject(
    State(state): State<AppState>,
    path: PathParams<SubjectId>,
) -> Result<Json<Message>, JsonApiError> {
    let Path(id) = path?;
    state.roster.delete_subject(id).await;
    Ok(Json(Message { message: "Subject deleted" }))
}

#[utoipa::path(post, path = "/subjects/{id}/students", tag = "students", params(("id" = u64, Path, description = "Subject id")), request_body = crate::openapi::NameRequest, responses((status = 200, description = "Created student", body = crate::openapi::StudentDoc), (status = 404, description = "Subject not found")))]
pub async fn create_student(
    State(state): State<AppState>,
    path: PathParams<SubjectId>,
    body: JsonBody<NameInput>,
) -> Result<Json<Student>, JsonApiError> {
    let Path(subject_id) = path?;
    let input = body_or_default(body)?;
    let name = input.name.unwrap_or_default();
    Ok(Json(state.roster.add_student(subject_id, name).await?))
}

#[utoipa::path(delete, path = "/subjects/{id}/students/{student_id}", tag = "students", params(("id" = u64, Path, description = "Subject id"), ("student_id" = u64, Path, description = "Student id")), responses((status = 200, description = "Deleted, or already absent"), (status = 404, description = "Subject not found")))]
pub async fn delete_student(
    State(state): State<AppState>,
    path: PathParams<(SubjectId, StudentId)>,
) -> Result<Json<Message>, JsonApiError> {
    let Path((subject_id, student_id)) = path?;
    state.roster.delete_student(subject_id, student_id).await?;
    Ok(Json(Message { message: "Student deleted" }))
}

#[utoipa::path(post, path = "/subjects/{id}/attendance/{student_id}", tag = "students", params(("id" = u64, Path, description = "Subject id"), ("student_id" = u64, Path, description = "Student id")), request_body = crate::openapi::StatusRequest, responses((status = 200, description = "Updated student"), (status = 400, description = "Status missing"), (status = 404, description = "Subject or student not found")))]
pub async fn set_attendance(
    State(state): State<AppState>,
    path: PathParams<(SubjectId, StudentId)>,
    body: JsonBody<StatusInput>,
) -> Result<Json<AttendanceUpdated>, JsonApiError> {
    let Path((subject_id, student_id)) = path?;
    let input = body_or_default(body)?;
    let student = state.roster.set_attendance(subject_id, student_id, input.status).await?;
    Ok(Json(AttendanceUpdated { message: "Attendance updated", student }))
}
