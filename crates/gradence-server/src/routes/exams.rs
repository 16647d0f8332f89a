use crate::routes::exams::error::ExamError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use gradence_core::export::export_exam_pdf;
use gradence_core::selection::select_random_questions;
use gradence_model::exam::{Exam, NewExam};
use gradence_model::question::Question;
use gradence_model_tools::convert::{IntoDbModel, IntoModel};
use http::{StatusCode, header};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;
use validator::Validate;

pub(crate) mod error;

pub(crate) fn create_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(list_exams).post(create_exam))
        .nest(
            "/{exam_id}",
            Router::new()
                .route("/", get(get_exam).put(update_exam).delete(delete_exam))
                .route("/random", get(random_questions))
                .route("/export-pdf", get(export_pdf)),
        )
        .with_state(())
}

async fn load_exam(conn: &DatabaseConnection, exam_id: i64) -> Result<Exam, ExamError> {
    let exam = gradence_db::exam::Query::get_exam_with_questions(conn, exam_id)
        .await?
        .ok_or(ExamError::NotFound(exam_id))?;
    Ok(exam.into_model())
}

fn validated(payload: Result<Json<NewExam>, JsonRejection>) -> Result<NewExam, ExamError> {
    let Json(exam) = payload?;
    exam.validate()?;
    Ok(exam)
}

#[utoipa::path(
    post,
    path = "/exams",
    request_body = NewExam,
    responses(
        (status = OK, body = Exam, description = "The stored exam"),
        (status = BAD_REQUEST, description = "The exam is invalid"),
        (status = CONFLICT, description = "The title is already used by another exam"),
    ),
    tag = "exams"
)]
#[instrument(skip_all)]
pub(crate) async fn create_exam(
    Extension(conn): Extension<DatabaseConnection>,
    payload: Result<Json<NewExam>, JsonRejection>,
) -> Result<Json<Exam>, ExamError> {
    let NewExam { title, questions } = validated(payload)?;
    let questions = questions.into_iter().map(IntoDbModel::into_db_model).collect();

    let exam = gradence_db::exam::Mutation::create_exam(&conn, title, questions).await?;
    Ok(Json(exam.into_model()))
}

#[utoipa::path(
    get,
    path = "/exams",
    responses(
        (status = OK, body = Vec<Exam>, description = "All exams with their questions"),
    ),
    tag = "exams"
)]
#[instrument(skip_all)]
pub(crate) async fn list_exams(Extension(conn): Extension<DatabaseConnection>) -> Result<Json<Vec<Exam>>, ExamError> {
    let exams = gradence_db::exam::Query::get_exams_with_questions(&conn).await?;
    Ok(Json(exams.into_iter().map(IntoModel::into_model).collect()))
}

#[utoipa::path(
    get,
    path = "/exams/{exam_id}",
    params(("exam_id" = i64, Path, description = "Id of the exam")),
    responses(
        (status = OK, body = Exam, description = "The exam with its questions in order"),
        (status = NOT_FOUND, description = "No exam with this id"),
    ),
    tag = "exams"
)]
#[instrument(skip(conn))]
pub(crate) async fn get_exam(
    Extension(conn): Extension<DatabaseConnection>,
    Path(exam_id): Path<i64>,
) -> Result<Json<Exam>, ExamError> {
    Ok(Json(load_exam(&conn, exam_id).await?))
}

#[utoipa::path(
    put,
    path = "/exams/{exam_id}",
    params(("exam_id" = i64, Path, description = "Id of the exam")),
    request_body = NewExam,
    responses(
        (status = OK, body = Exam, description = "The exam after replacing title and questions"),
        (status = BAD_REQUEST, description = "The exam is invalid"),
        (status = NOT_FOUND, description = "No exam with this id"),
        (status = CONFLICT, description = "The title is already used by another exam"),
    ),
    tag = "exams"
)]
#[instrument(skip(conn, payload))]
pub(crate) async fn update_exam(
    Extension(conn): Extension<DatabaseConnection>,
    Path(exam_id): Path<i64>,
    payload: Result<Json<NewExam>, JsonRejection>,
) -> Result<Json<Exam>, ExamError> {
    let NewExam { title, questions } = validated(payload)?;
    let questions = questions.into_iter().map(IntoDbModel::into_db_model).collect();

    let exam = gradence_db::exam::Mutation::update_exam(&conn, exam_id, title, questions).await?;
    Ok(Json(exam.into_model()))
}

#[utoipa::path(
    delete,
    path = "/exams/{exam_id}",
    params(("exam_id" = i64, Path, description = "Id of the exam")),
    responses(
        (status = NO_CONTENT, description = "The exam and its questions were deleted"),
        (status = NOT_FOUND, description = "No exam with this id"),
    ),
    tag = "exams"
)]
#[instrument(skip(conn))]
pub(crate) async fn delete_exam(
    Extension(conn): Extension<DatabaseConnection>,
    Path(exam_id): Path<i64>,
) -> Result<StatusCode, ExamError> {
    gradence_db::exam::Mutation::delete_exam(&conn, exam_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct RandomParams {
    /// Number of questions to draw
    #[serde(default = "default_count")]
    #[param(default = 1)]
    pub count: i64,
    /// Makes the draw reproducible
    pub seed: Option<i64>,
    /// Only draw questions of this type, ignoring case
    pub r#type: Option<String>,
}

fn default_count() -> i64 {
    1
}

#[utoipa::path(
    get,
    path = "/exams/{exam_id}/random",
    params(("exam_id" = i64, Path, description = "Id of the exam"), RandomParams),
    responses(
        (status = OK, body = Vec<Question>, description = "Randomly drawn questions"),
        (status = BAD_REQUEST, description = "A query parameter is not a number"),
        (status = NOT_FOUND, description = "No exam with this id"),
    ),
    tag = "exams"
)]
#[instrument(skip(conn, params))]
pub(crate) async fn random_questions(
    Extension(conn): Extension<DatabaseConnection>,
    Path(exam_id): Path<i64>,
    params: Result<Query<RandomParams>, QueryRejection>,
) -> Result<Json<Vec<Question>>, ExamError> {
    let Query(RandomParams { count, seed, r#type }) = params?;
    let exam = load_exam(&conn, exam_id).await?;

    let selected = select_random_questions(&exam.questions, count, r#type.as_deref(), seed);
    tracing::debug!(count, ?seed, selected = selected.len(), "drew questions");
    Ok(Json(selected))
}

#[utoipa::path(
    get,
    path = "/exams/{exam_id}/export-pdf",
    params(("exam_id" = i64, Path, description = "Id of the exam")),
    responses(
        (status = OK, content_type = "application/pdf", body = Vec<u8>, description = "The exam as pdf attachment"),
        (status = NOT_FOUND, description = "No exam with this id"),
        (status = INTERNAL_SERVER_ERROR, description = "The pdf could not be rendered"),
    ),
    tag = "exams"
)]
#[instrument(skip(conn))]
pub(crate) async fn export_pdf(
    Extension(conn): Extension<DatabaseConnection>,
    Path(exam_id): Path<i64>,
) -> Result<Response, ExamError> {
    let exam = load_exam(&conn, exam_id).await?;
    let bytes = tokio::task::spawn_blocking(move || export_exam_pdf(&exam)).await??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"exam_{exam_id}.pdf\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
