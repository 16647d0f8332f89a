use chrono::Utc;
use gradence_entity::exam::{self, Entity as Exam};
use gradence_entity::question::Model as QuestionModel;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DbErr, EntityTrait, Set, TransactionTrait};

use super::{ExamStoreError, Query};
use crate::question::{self, QuestionFields};
use crate::util::{FlattenTransactionResultExt, is_unique_violation};

pub struct Mutation;

fn map_title_conflict(error: DbErr, title: &str) -> ExamStoreError {
    if is_unique_violation(&error) {
        ExamStoreError::TitleTaken(title.to_owned())
    } else {
        error.into()
    }
}

impl Mutation {
    /// Stores a new exam together with its questions. `created_at` is set to the current time.
    pub async fn create_exam<C: ConnectionTrait + TransactionTrait>(
        db: &C,
        title: String,
        questions: Vec<QuestionFields>,
    ) -> Result<(exam::Model, Vec<QuestionModel>), ExamStoreError> {
        let txn = db.begin().await?;

        if Query::get_exam_by_title(&txn, &title).await?.is_some() {
            return Err(ExamStoreError::TitleTaken(title));
        }

        let exam = exam::ActiveModel {
            id: NotSet,
            title: Set(title.clone()),
            created_at: Set(Utc::now().naive_utc()),
        };
        let exam = exam
            .insert(&txn)
            .await
            .map_err(|error| map_title_conflict(error, &title))?;

        let questions = question::Mutation::insert_questions(&txn, exam.id, questions).await?;

        txn.commit().await?;

        tracing::info!(exam_id = exam.id, questions = questions.len(), "created exam");
        Ok((exam, questions))
    }

    /// Replaces title and questions of an exam. The previous questions are removed and
    /// `created_at` is reset to the current time.
    pub async fn update_exam<C: ConnectionTrait + TransactionTrait>(
        db: &C,
        exam_id: i64,
        title: String,
        questions: Vec<QuestionFields>,
    ) -> Result<(exam::Model, Vec<QuestionModel>), ExamStoreError> {
        db.transaction::<_, _, ExamStoreError>(|txn| {
            Box::pin(async move {
                let existing = Query::get_exam_by_id(txn, exam_id)
                    .await?
                    .ok_or(ExamStoreError::NotFound(exam_id))?;

                if let Some(other) = Query::get_exam_by_title(txn, &title).await?
                    && other.id != exam_id
                {
                    return Err(ExamStoreError::TitleTaken(title));
                }

                let mut exam: exam::ActiveModel = existing.into();
                exam.title = Set(title.clone());
                exam.created_at = Set(Utc::now().naive_utc());
                let exam = exam
                    .update(txn)
                    .await
                    .map_err(|error| map_title_conflict(error, &title))?;

                let removed = question::Mutation::delete_questions_by_exam(txn, exam_id).await?;
                let questions = question::Mutation::insert_questions(txn, exam_id, questions).await?;
                tracing::info!(exam_id, removed, questions = questions.len(), "replaced exam");

                Ok((exam, questions))
            })
        })
        .await
        .flatten_res()
    }

    /// Deletes an exam and every question it owns.
    pub async fn delete_exam<C: ConnectionTrait + TransactionTrait>(db: &C, exam_id: i64) -> Result<(), ExamStoreError> {
        db.transaction::<_, _, ExamStoreError>(|txn| {
            Box::pin(async move {
                if Query::get_exam_by_id(txn, exam_id).await?.is_none() {
                    return Err(ExamStoreError::NotFound(exam_id));
                }
                question::Mutation::delete_questions_by_exam(txn, exam_id).await?;
                Exam::delete_by_id(exam_id).exec(txn).await?;
                tracing::info!(exam_id, "deleted exam");
                Ok(())
            })
        })
        .await
        .flatten_res()
    }
}
