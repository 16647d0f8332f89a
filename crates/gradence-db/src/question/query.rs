use gradence_entity::question::{self, Entity as Question, Model as QuestionModel};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::error::Error;

pub struct Query;

impl Query {
    pub async fn get_questions_by_exam<C: ConnectionTrait>(db: &C, exam_id: i64) -> Result<Vec<QuestionModel>, DbErr> {
        Question::find()
            .filter(question::Column::ExamId.eq(exam_id))
            .order_by_asc(question::Column::Position)
            .all(db)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, exam_id, "failed to load questions");
            })
    }

    /// Questions of several exams, ordered by exam and then by position.
    pub async fn get_questions_by_exams<C: ConnectionTrait>(
        db: &C,
        exam_ids: &[i64],
    ) -> Result<Vec<QuestionModel>, DbErr> {
        if exam_ids.is_empty() {
            return Ok(Vec::new());
        }
        Question::find()
            .filter(question::Column::ExamId.is_in(exam_ids.iter().copied()))
            .order_by_asc(question::Column::ExamId)
            .order_by_asc(question::Column::Position)
            .all(db)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to load questions of exams");
            })
    }
}
