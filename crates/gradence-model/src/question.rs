use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidateLength, ValidationError, ValidationErrors};

const PROMPT_MAX_CHARS: u64 = 255;
const CONDITIONS_MAX_CHARS: u64 = 1000;

/// A question as it is handed out to clients. It does not reference its exam.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct Question {
    pub id: i64,
    pub prompt: String,
    #[serde(rename = "type")]
    #[schema(example = "multiple-choice")]
    pub r#type: String,
    pub conditions: Option<String>,
}

/// Validation errors are keyed by the JSON field names, so a blank type is reported under
/// `type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct NewQuestion {
    pub prompt: String,
    #[serde(rename = "type")]
    #[schema(example = "multiple-choice")]
    pub r#type: String,
    #[serde(default)]
    pub conditions: Option<String>,
}

impl Validate for NewQuestion {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Err(error) = not_blank(&self.prompt) {
            errors.add("prompt", error);
        }
        if !self.prompt.validate_length(None, Some(PROMPT_MAX_CHARS), None) {
            errors.add("prompt", too_long(PROMPT_MAX_CHARS));
        }
        if let Err(error) = not_blank(&self.r#type) {
            errors.add("type", error);
        }
        if let Some(conditions) = &self.conditions
            && !conditions.validate_length(None, Some(CONDITIONS_MAX_CHARS), None)
        {
            errors.add("conditions", too_long(CONDITIONS_MAX_CHARS));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn too_long(max: u64) -> ValidationError {
    let mut error = ValidationError::new("length");
    error.add_param(Cow::Borrowed("max"), &max);
    error
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_question(prompt: &str, r#type: &str, conditions: Option<&str>) -> NewQuestion {
        NewQuestion {
            prompt: prompt.to_owned(),
            r#type: r#type.to_owned(),
            conditions: conditions.map(str::to_owned),
        }
    }

    #[test]
    fn test_valid_question() {
        assert!(new_question("What is 2 + 2?", "text", None).validate().is_ok());
        assert!(new_question("What is 2 + 2?", "text", Some("no calculator")).validate().is_ok());
    }

    #[test]
    fn test_blank_fields() {
        let errors = new_question("  ", "\t", None).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("prompt"));
        assert!(fields.contains_key("type"));
        assert!(!fields.contains_key("r#type"));
        assert_eq!(fields["type"][0].code, "blank");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["type"][0]["code"], "blank");
    }

    #[test]
    fn test_length_limits() {
        let prompt = "x".repeat(256);
        let conditions = "y".repeat(1001);
        let errors = new_question(&prompt, "text", Some(&conditions)).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("prompt"));
        assert!(fields.contains_key("conditions"));
        assert_eq!(fields["prompt"][0].code, "length");
        assert_eq!(fields["prompt"][0].params["max"], 255);

        let prompt = "x".repeat(255);
        let conditions = "y".repeat(1000);
        assert!(new_question(&prompt, "text", Some(&conditions)).validate().is_ok());
    }

    #[test]
    fn test_question_json_has_no_exam_reference() {
        let question = Question {
            id: 7,
            prompt: "Name a prime".to_owned(),
            r#type: "text".to_owned(),
            conditions: None,
        };
        let value = serde_json::to_value(&question).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 7, "prompt": "Name a prime", "type": "text", "conditions": null})
        );
    }
}
