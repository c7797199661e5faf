use serde::Deserialize;

/// `submit_test_answer`. Answers are positional: the n-th answer is graded
/// against the n-th question of the test.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTestAnswerRequest {
    pub test_id: u64,
    pub answers: Vec<String>,
}
