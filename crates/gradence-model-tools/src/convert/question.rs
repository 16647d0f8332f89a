use gradence_db::question::QuestionFields;
use gradence_entity::question::Model as QuestionModel;
use gradence_model::question::{NewQuestion, Question};

use crate::convert::{FromDbModel, FromModel};

impl FromDbModel<QuestionModel> for Question {
    fn from_db_model(model: QuestionModel) -> Self {
        Self {
            id: model.id,
            prompt: model.prompt,
            r#type: model.r#type,
            conditions: model.conditions,
        }
    }
}

impl FromModel<NewQuestion> for QuestionFields {
    fn from_model(model: NewQuestion) -> Self {
        Self {
            prompt: model.prompt,
            r#type: model.r#type,
            conditions: model.conditions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{IntoDbModel, IntoModel};

    #[test]
    fn test_question_conversions() {
        let fields: QuestionFields = NewQuestion {
            prompt: "Name a prime".to_owned(),
            r#type: "text".to_owned(),
            conditions: Some("below 10".to_owned()),
        }
        .into_db_model();
        assert_eq!(fields.prompt, "Name a prime");
        assert_eq!(fields.conditions.as_deref(), Some("below 10"));

        let question: Question = QuestionModel {
            id: 4,
            exam_id: 2,
            position: 1,
            prompt: fields.prompt,
            r#type: fields.r#type,
            conditions: None,
        }
        .into_model();
        assert_eq!(question.id, 4);
        assert_eq!(question.r#type, "text");
        assert_eq!(question.conditions, None);
    }
}
