use gradence_db::question::QuestionFields;

#[allow(dead_code)]
pub fn question(prompt: &str, r#type: &str) -> QuestionFields {
    QuestionFields {
        prompt: prompt.to_owned(),
        r#type: r#type.to_owned(),
        conditions: None,
    }
}

#[allow(dead_code)]
pub fn question_with_conditions(prompt: &str, r#type: &str, conditions: &str) -> QuestionFields {
    QuestionFields {
        conditions: Some(conditions.to_owned()),
        ..question(prompt, r#type)
    }
}
