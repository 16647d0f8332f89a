use gradence_entity::question::{self, Entity as Question};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};

/// Field values of a question that is about to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFields {
    pub prompt: String,
    pub r#type: String,
    pub conditions: Option<String>,
}

pub struct Mutation;

impl Mutation {
    /// Inserts the questions in the given order, numbering their positions from zero.
    pub async fn insert_questions<C: ConnectionTrait>(
        db: &C,
        exam_id: i64,
        questions: Vec<QuestionFields>,
    ) -> Result<Vec<question::Model>, DbErr> {
        let mut inserted = Vec::with_capacity(questions.len());
        for (position, fields) in questions.into_iter().enumerate() {
            let position = i32::try_from(position).map_err(|_| DbErr::Custom("too many questions".to_string()))?;
            let question = question::ActiveModel {
                id: NotSet,
                exam_id: Set(exam_id),
                position: Set(position),
                prompt: Set(fields.prompt),
                r#type: Set(fields.r#type),
                conditions: Set(fields.conditions),
            };
            inserted.push(question.insert(db).await?);
        }
        Ok(inserted)
    }

    pub async fn delete_questions_by_exam<C: ConnectionTrait>(db: &C, exam_id: i64) -> Result<u64, DbErr> {
        let res = Question::delete_many()
            .filter(question::Column::ExamId.eq(exam_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
