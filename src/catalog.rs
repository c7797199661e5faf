use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A top-level subject category grouping tests, e.g. "Criminal Law".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LawBranch {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Governs how a question's correct-answer encoding is interpreted.
///
/// Matching tests store their key as a delimited `item:match;item:match;...`
/// string; the other types store the correct option verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestType {
    SingleChoice,
    MultipleChoice,
    TrueFalse,
    Matching,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u64,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub test_id: u64,
}

/// Question fields supplied by an authoring request, before ids exist.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// A multi-question test. Question order is the order answers are submitted
/// and graded in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    pub id: u64,
    pub name: String,
    pub test_type: TestType,
    pub law_branch_id: u64,
    pub questions: Vec<Question>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Law branch {0} not found")]
    BranchNotFound(u64),
    #[error("Test {0} not found")]
    TestNotFound(u64),
}

/// The `Catalog` holds every law branch, test, and question the service
/// knows about. It is shared across all connections behind a
/// `Arc<tokio::sync::RwLock>`; identifiers are generated monotonically
/// under the write lock, so listings in id order equal insertion order.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Catalog {
    branches: BTreeMap<u64, LawBranch>,
    tests: BTreeMap<u64, Test>,
    next_branch_id: u64,
    next_test_id: u64,
    next_question_id: u64,
}

impl Catalog {
    pub fn new() -> Catalog {
        Catalog::default()
    }

    pub fn list_branches(&self) -> Vec<LawBranch> {
        self.branches.values().cloned().collect()
    }

    pub fn insert_branch(&mut self, name: String, description: String) -> LawBranch {
        self.next_branch_id += 1;
        let branch = LawBranch {
            id: self.next_branch_id,
            name,
            description,
        };
        self.branches.insert(branch.id, branch.clone());
        branch
    }

    /// Every test under a branch, each with its full question list.
    pub fn list_tests_by_branch(&self, law_branch_id: u64) -> Vec<Test> {
        self.tests
            .values()
            .filter(|test| test.law_branch_id == law_branch_id)
            .cloned()
            .collect()
    }

    pub fn get_test_with_questions(&self, test_id: u64) -> Option<&Test> {
        self.tests.get(&test_id)
    }

    pub fn list_questions_by_test(&self, test_id: u64) -> Option<Vec<Question>> {
        self.tests
            .get(&test_id)
            .map(|test| test.questions.clone())
    }

    /// Inserts a test and its initial question set atomically. Nothing is
    /// written unless the owning branch exists.
    pub fn insert_test(
        &mut self,
        name: String,
        test_type: TestType,
        law_branch_id: u64,
        drafts: Vec<QuestionDraft>,
    ) -> std::result::Result<Test, CatalogError> {
        if !self.branches.contains_key(&law_branch_id) {
            return Err(CatalogError::BranchNotFound(law_branch_id));
        }
        self.next_test_id += 1;
        let test_id = self.next_test_id;
        let questions = drafts
            .into_iter()
            .map(|draft| {
                self.next_question_id += 1;
                Question {
                    id: self.next_question_id,
                    text: draft.text,
                    options: draft.options,
                    correct_answer: draft.correct_answer,
                    test_id,
                }
            })
            .collect();
        let test = Test {
            id: test_id,
            name,
            test_type,
            law_branch_id,
            questions,
        };
        self.tests.insert(test.id, test.clone());
        Ok(test)
    }

    /// Appends one question to an existing test.
    pub fn insert_question(
        &mut self,
        test_id: u64,
        draft: QuestionDraft,
    ) -> std::result::Result<Question, CatalogError> {
        let test = self
            .tests
            .get_mut(&test_id)
            .ok_or(CatalogError::TestNotFound(test_id))?;
        self.next_question_id += 1;
        let question = Question {
            id: self.next_question_id,
            text: draft.text,
            options: draft.options,
            correct_answer: draft.correct_answer,
            test_id,
        };
        test.questions.push(question.clone());
        Ok(question)
    }
}
