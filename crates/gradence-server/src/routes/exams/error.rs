use crate::routes::error::{ErrorData, ErrorDataProvider, GetStatusCode, error_to_axum_response};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use gradence_core::export::error::ExportError;
use gradence_db::exam::ExamStoreError;
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::Map;
use std::error::Error;
use thiserror::Error;
use tokio::task::JoinError;
use utoipa::ToSchema;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub(crate) enum ExamError {
    #[error("exam {0} not found")]
    NotFound(i64),

    #[error("an exam titled {0:?} already exists")]
    TitleTaken(String),

    #[error("invalid exam")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),

    #[error(transparent)]
    InvalidQuery(#[from] QueryRejection),

    #[error("Database error")]
    Database(#[from] DbErr),

    #[error("Failed to export exam")]
    Export(#[from] ExportError),

    #[error("Export task failed")]
    Task(#[from] JoinError),
}

impl From<ExamStoreError> for ExamError {
    fn from(error: ExamStoreError) -> Self {
        match error {
            ExamStoreError::NotFound(exam_id) => Self::NotFound(exam_id),
            ExamStoreError::TitleTaken(title) => Self::TitleTaken(title),
            ExamStoreError::Db(error) => Self::Database(error),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ExamErrorType {
    ExamNotFound,
    TitleTaken,
    InvalidExam,
    InvalidRequest,
}

impl GetStatusCode for ExamErrorType {
    fn status_code(&self) -> http::StatusCode {
        match self {
            Self::ExamNotFound => http::StatusCode::NOT_FOUND,
            Self::TitleTaken => http::StatusCode::CONFLICT,
            Self::InvalidExam | Self::InvalidRequest => http::StatusCode::BAD_REQUEST,
        }
    }
}

impl GetStatusCode for ExamError {
    fn status_code(&self) -> http::StatusCode {
        match self {
            Self::NotFound(_) => http::StatusCode::NOT_FOUND,
            Self::TitleTaken(_) => http::StatusCode::CONFLICT,
            Self::Validation(_) | Self::InvalidBody(_) | Self::InvalidQuery(_) => http::StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Export(_) | Self::Task(_) => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ErrorDataProvider<ExamErrorType> for ExamError {
    fn error_data(self) -> Option<ErrorData<ExamErrorType>> {
        let description = self.to_string();
        let res = match self {
            Self::NotFound(_) => ErrorData::new(ExamErrorType::ExamNotFound, description),
            Self::TitleTaken(_) => ErrorData::new(ExamErrorType::TitleTaken, description),
            Self::Validation(errors) => {
                let mut data = Map::new();
                if let Ok(fields) = serde_json::to_value(&errors) {
                    data.insert("fields".to_owned(), fields);
                }
                ErrorData::new(ExamErrorType::InvalidExam, description).with_data(data)
            }
            Self::InvalidBody(rejection) => ErrorData::new(ExamErrorType::InvalidRequest, rejection.body_text()),
            Self::InvalidQuery(rejection) => ErrorData::new(ExamErrorType::InvalidRequest, rejection.body_text()),
            Self::Database(error) => {
                tracing::error!(error = &error as &dyn Error, "database error while handling exam request");
                return None;
            }
            Self::Export(error) => {
                tracing::error!(error = &error as &dyn Error, "failed to render exam pdf");
                return None;
            }
            Self::Task(error) => {
                tracing::error!(error = &error as &dyn Error, "pdf export task failed");
                return None;
            }
        };
        Some(res)
    }
}

impl IntoResponse for ExamError {
    fn into_response(self) -> Response {
        error_to_axum_response(self)
    }
}
