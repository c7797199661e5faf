use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::catalog::{QuestionDraft, TestType};

/// `create_test`. The test and its initial question set arrive as one
/// nested object and are inserted atomically.
#[derive(Deserialize, Debug)]
pub struct CreateTestRequest {
    pub test: TestDraft,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TestDraft {
    pub name: String,
    pub test_type: TestType,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub law_branch_id: u64,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

/// `create_question` — one standalone question appended to an existing
/// test.
#[derive(Deserialize, Debug)]
pub struct CreateQuestionRequest {
    pub question: QuestionSpec,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSpec {
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    pub test_id: u64,
}

impl QuestionSpec {
    pub fn into_draft(self) -> (u64, QuestionDraft) {
        (
            self.test_id,
            QuestionDraft {
                text: self.text,
                options: self.options,
                correct_answer: self.correct_answer,
            },
        )
    }
}

/// `create_law_branch`. The description defaults to empty.
#[derive(Deserialize, Debug)]
pub struct CreateLawBranchRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_request_parses_nested_questions() {
        let parsed: CreateTestRequest = serde_json::from_str(
            r#"{
                "action": "create_test",
                "test": {
                    "name": "Contracts",
                    "testType": "SingleChoice",
                    "lawBranchId": "2",
                    "questions": [
                        {"text": "Q1", "options": ["A", "B"], "correctAnswer": "A"}
                    ]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.test.name, "Contracts");
        assert_eq!(parsed.test.test_type, TestType::SingleChoice);
        assert_eq!(parsed.test.law_branch_id, 2);
        assert_eq!(parsed.test.questions.len(), 1);
        assert_eq!(parsed.test.questions[0].correct_answer, "A");
    }

    #[test]
    fn test_create_test_request_rejects_unknown_test_type() {
        let mistyped: Result<CreateTestRequest, _> = serde_json::from_str(
            r#"{
                "action": "create_test",
                "test": {"name": "X", "testType": "Essay", "lawBranchId": 1}
            }"#,
        );
        assert!(mistyped.is_err());
    }

    #[test]
    fn test_question_spec_into_draft() {
        let parsed: CreateQuestionRequest = serde_json::from_str(
            r#"{
                "action": "create_question",
                "question": {
                    "text": "Pair up",
                    "options": ["offer"],
                    "correctAnswer": "offer:acceptance;",
                    "testId": 9
                }
            }"#,
        )
        .unwrap();
        let (test_id, draft) = parsed.question.into_draft();
        assert_eq!(test_id, 9);
        assert_eq!(draft.correct_answer, "offer:acceptance;");
    }

    #[test]
    fn test_create_law_branch_defaults_description() {
        let parsed: CreateLawBranchRequest =
            serde_json::from_str(r#"{"action": "create_law_branch", "name": "Tax Law"}"#)
                .unwrap();
        assert_eq!(parsed.name, "Tax Law");
        assert_eq!(parsed.description, "");
    }
}
