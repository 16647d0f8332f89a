use gradence_entity::exam::Model as ExamModel;
use gradence_entity::question::Model as QuestionModel;
use gradence_model::exam::Exam;

use crate::convert::{FromDbModel, IntoModel};

/// Questions are expected in exam order, the store sorts them by position.
impl FromDbModel<(ExamModel, Vec<QuestionModel>)> for Exam {
    fn from_db_model((exam, questions): (ExamModel, Vec<QuestionModel>)) -> Self {
        Self {
            id: exam.id,
            title: exam.title,
            created_at: exam.created_at,
            questions: questions.into_iter().map(IntoModel::into_model).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_exam_from_db_model() {
        let created_at = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let exam = ExamModel {
            id: 3,
            title: "Chemistry".to_owned(),
            created_at,
        };
        let questions = vec![
            QuestionModel {
                id: 10,
                exam_id: 3,
                position: 0,
                prompt: "Define pH".to_owned(),
                r#type: "text".to_owned(),
                conditions: Some("one sentence".to_owned()),
            },
            QuestionModel {
                id: 11,
                exam_id: 3,
                position: 1,
                prompt: "Pick the noble gas".to_owned(),
                r#type: "multiple-choice".to_owned(),
                conditions: None,
            },
        ];

        let exam: Exam = (exam, questions).into_model();
        assert_eq!(exam.id, 3);
        assert_eq!(exam.title, "Chemistry");
        assert_eq!(exam.created_at, created_at);
        let ids: Vec<i64> = exam.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(exam.questions[0].conditions.as_deref(), Some("one sentence"));
        assert_eq!(exam.questions[1].r#type, "multiple-choice");
    }
}
