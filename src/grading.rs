use serde::{Deserialize, Serialize};

use crate::catalog::Question;

/// Outcome of grading one submission. Computed per grading call, returned
/// to the client, never persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_id: u64,
    pub correct_answers: usize,
    pub total_questions: usize,
}

/// Scores a submission against a test's stored answer key.
///
/// An answer is correct when it equals the stored key exactly: case
/// sensitive, untrimmed. A submission shorter than the question list is
/// graded over the supplied prefix only, while the total still reflects the
/// full question count. Matching-type keys are delimited
/// `item:match;item:match;...` strings and are compared whole, the same as
/// any other answer.
pub fn grade(test_id: u64, questions: &[Question], answers: &[String]) -> TestResult {
    let compared = questions.len().min(answers.len());
    let correct_answers = (0..compared)
        .filter(|&i| questions[i].correct_answer == answers[i])
        .count();

    TestResult {
        test_id,
        correct_answers,
        total_questions: questions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions_with_keys(keys: &[&str]) -> Vec<Question> {
        keys.iter()
            .enumerate()
            .map(|(i, key)| Question {
                id: i as u64 + 1,
                text: format!("Question {}", i + 1),
                options: vec![String::from("A"), String::from("B"), String::from("C")],
                correct_answer: key.to_string(),
                test_id: 1,
            })
            .collect()
    }

    fn answers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_grade_counts_exact_matches() {
        let questions = questions_with_keys(&["A", "B", "C"]);
        let result = grade(1, &questions, &answers(&["A", "X", "C"]));
        assert_eq!(result.correct_answers, 2);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.test_id, 1);
    }

    #[test]
    fn test_grade_is_case_sensitive_and_untrimmed() {
        let questions = questions_with_keys(&["A", "B"]);
        let result = grade(1, &questions, &answers(&["a", "B "]));
        assert_eq!(result.correct_answers, 0);
    }

    #[test]
    fn test_grade_short_submission_does_not_fault() {
        let questions = questions_with_keys(&["A", "B", "C"]);
        let result = grade(1, &questions, &answers(&["A", "B"]));
        assert_eq!(result.correct_answers, 2);
        assert_eq!(result.total_questions, 3);
    }

    #[test]
    fn test_grade_extra_answers_are_ignored() {
        let questions = questions_with_keys(&["A"]);
        let result = grade(1, &questions, &answers(&["A", "B", "C"]));
        assert_eq!(result.correct_answers, 1);
        assert_eq!(result.total_questions, 1);
    }

    #[test]
    fn test_grade_empty_test() {
        let result = grade(7, &[], &answers(&["A"]));
        assert_eq!(result.correct_answers, 0);
        assert_eq!(result.total_questions, 0);
    }

    #[test]
    fn test_grade_matching_key_compares_whole_string() {
        let questions = questions_with_keys(&["offer:acceptance;breach:damages;"]);
        let exact = grade(1, &questions, &answers(&["offer:acceptance;breach:damages;"]));
        assert_eq!(exact.correct_answers, 1);

        // reordered pairs are a different string, not a structural match
        let reordered = grade(1, &questions, &answers(&["breach:damages;offer:acceptance;"]));
        assert_eq!(reordered.correct_answers, 0);
    }
}
