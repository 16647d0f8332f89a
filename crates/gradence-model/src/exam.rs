use crate::question::{NewQuestion, Question, not_blank};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: i64,
    pub title: String,
    pub created_at: chrono::NaiveDateTime,
    pub questions: Vec<Question>,
}

/// Payload for creating an exam or replacing an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema, Validate)]
pub struct NewExam {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<NewQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_exam_validation() {
        let exam: NewExam = serde_json::from_value(serde_json::json!({
            "title": "Algebra",
            "questions": [{"prompt": "Solve x + 1 = 2", "type": "text"}]
        }))
        .unwrap();
        assert!(exam.validate().is_ok());
        assert_eq!(exam.questions[0].conditions, None);

        let exam = NewExam {
            title: " ".to_owned(),
            questions: vec![NewQuestion {
                prompt: String::new(),
                r#type: "text".to_owned(),
                conditions: None,
            }],
        };
        let errors = exam.validate().unwrap_err();
        let errors = errors.errors();
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("questions"));
    }

    #[test]
    fn test_questions_default_to_empty() {
        let exam: NewExam = serde_json::from_str(r#"{"title": "Empty"}"#).unwrap();
        assert!(exam.questions.is_empty());
    }

    #[test]
    fn test_exam_json_uses_camel_case() {
        let exam = Exam {
            id: 1,
            title: "History".to_owned(),
            created_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            questions: vec![],
        };
        let value = serde_json::to_value(&exam).unwrap();
        assert_eq!(value["createdAt"], "2024-05-01T12:00:00");
        assert!(value.get("created_at").is_none());
    }
}
