use gradence_entity::exam::{self, Entity as Exam, Model as ExamModel};
use gradence_entity::question::Model as QuestionModel;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;
use std::error::Error;

pub struct Query;

impl Query {
    pub async fn get_exams<C: ConnectionTrait>(db: &C) -> Result<Vec<ExamModel>, DbErr> {
        Exam::find()
            .order_by_asc(exam::Column::Id)
            .all(db)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to load exams");
            })
    }

    pub async fn get_exam_by_id<C: ConnectionTrait>(db: &C, exam_id: i64) -> Result<Option<ExamModel>, DbErr> {
        Exam::find_by_id(exam_id).one(db).await.inspect_err(|error| {
            tracing::error!(error = error as &dyn Error, exam_id, "failed to load exam by id");
        })
    }

    pub async fn get_exam_by_title<C: ConnectionTrait>(db: &C, title: &str) -> Result<Option<ExamModel>, DbErr> {
        Exam::find()
            .filter(exam::Column::Title.eq(title))
            .one(db)
            .await
            .inspect_err(|error| {
                tracing::error!(error = error as &dyn Error, "failed to load exam by title");
            })
    }

    pub async fn get_exam_with_questions<C: ConnectionTrait>(
        db: &C,
        exam_id: i64,
    ) -> Result<Option<(ExamModel, Vec<QuestionModel>)>, DbErr> {
        let Some(exam) = Self::get_exam_by_id(db, exam_id).await? else {
            return Ok(None);
        };
        let questions = crate::question::Query::get_questions_by_exam(db, exam_id).await?;
        Ok(Some((exam, questions)))
    }

    pub async fn get_exams_with_questions<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<(ExamModel, Vec<QuestionModel>)>, DbErr> {
        let exams = Self::get_exams(db).await?;
        let exam_ids: Vec<i64> = exams.iter().map(|exam| exam.id).collect();
        let questions = crate::question::Query::get_questions_by_exams(db, &exam_ids).await?;

        let mut by_exam: HashMap<i64, Vec<QuestionModel>> = HashMap::new();
        for question in questions {
            by_exam.entry(question.exam_id).or_default().push(question);
        }

        Ok(exams
            .into_iter()
            .map(|exam| {
                let questions = by_exam.remove(&exam.id).unwrap_or_default();
                (exam, questions)
            })
            .collect())
    }
}
