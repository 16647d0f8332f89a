use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExamStoreError {
    #[error("exam {0} not found")]
    NotFound(i64),

    #[error("an exam titled {0:?} already exists")]
    TitleTaken(String),

    #[error(transparent)]
    Db(#[from] DbErr),
}
