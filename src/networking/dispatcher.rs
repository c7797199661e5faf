use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{event, Level};

use crate::catalog::{Catalog, CatalogError};
use crate::crypto;
use crate::grading;
use crate::networking::envelope;
use crate::networking::message_types::auth::CredentialsRequest;
use crate::networking::message_types::authoring::{
    CreateLawBranchRequest, CreateQuestionRequest, CreateTestRequest,
};
use crate::networking::message_types::catalog::{
    GetTestCollectionsRequest, GetTestQuestionsRequest,
};
use crate::networking::message_types::grading::SubmitTestAnswerRequest;
use crate::storage::Storage;
use crate::users::{self, UserDirectory, UsernameTaken};

pub type SharedCatalog = Arc<RwLock<Catalog>>;
pub type SharedUsers = Arc<RwLock<UserDirectory>>;

/// What a handler hands back to the dispatcher: either the
/// action-specific payload fields merged into the success envelope, or a
/// classified failure rendered as the action-scoped error envelope.
pub type HandlerResult = std::result::Result<Value, HandlerError>;

type HandlerFuture = Pin<Box<dyn Future<Output = HandlerResult> + Send>>;
type Handler = Box<dyn Fn(Value) -> HandlerFuture + Send + Sync>;

/// Classified handler failure. The display string is the exact `message`
/// the client sees, so wording here is wire contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandlerError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Storage(String),
}

impl From<CatalogError> for HandlerError {
    fn from(error: CatalogError) -> HandlerError {
        HandlerError::NotFound(error.to_string())
    }
}

impl From<UsernameTaken> for HandlerError {
    fn from(error: UsernameTaken) -> HandlerError {
        HandlerError::Conflict(error.to_string())
    }
}

/// The `Dispatcher` turns one decoded message into one response envelope.
/// Its table maps action names to handlers and is built once at startup;
/// after that it is shared read-only across every connection. Nothing a
/// handler does can escape this boundary: every failure becomes an error
/// envelope and the session loop only ever sees a response string.
pub struct Dispatcher {
    handlers: HashMap<&'static str, Handler>,
}

impl Dispatcher {
    pub fn new(catalog_lock: SharedCatalog, users_lock: SharedUsers, persist: bool) -> Dispatcher {
        let mut handlers: HashMap<&'static str, Handler> = HashMap::new();

        {
            let catalog_lock = catalog_lock.clone();
            handlers.insert(
                "get_law_branches",
                Box::new(move |request| {
                    Box::pin(get_law_branches(catalog_lock.clone(), request))
                }),
            );
        }
        {
            let catalog_lock = catalog_lock.clone();
            handlers.insert(
                "get_test_collections",
                Box::new(move |request| {
                    Box::pin(get_test_collections(catalog_lock.clone(), request))
                }),
            );
        }
        {
            let catalog_lock = catalog_lock.clone();
            handlers.insert(
                "get_test_questions",
                Box::new(move |request| {
                    Box::pin(get_test_questions(catalog_lock.clone(), request))
                }),
            );
        }
        {
            let catalog_lock = catalog_lock.clone();
            handlers.insert(
                "submit_test_answer",
                Box::new(move |request| {
                    Box::pin(submit_test_answer(catalog_lock.clone(), request))
                }),
            );
        }
        {
            let catalog_lock = catalog_lock.clone();
            handlers.insert(
                "create_test",
                Box::new(move |request| {
                    Box::pin(create_test(catalog_lock.clone(), persist, request))
                }),
            );
        }
        {
            let catalog_lock = catalog_lock.clone();
            handlers.insert(
                "create_question",
                Box::new(move |request| {
                    Box::pin(create_question(catalog_lock.clone(), persist, request))
                }),
            );
        }
        handlers.insert(
            "create_law_branch",
            Box::new(move |request| {
                Box::pin(create_law_branch(catalog_lock.clone(), persist, request))
            }),
        );
        {
            let users_lock = users_lock.clone();
            handlers.insert(
                "register",
                Box::new(move |request| Box::pin(register(users_lock.clone(), persist, request))),
            );
        }
        handlers.insert(
            "login",
            Box::new(move |request| Box::pin(login(users_lock.clone(), persist, request))),
        );

        Dispatcher { handlers }
    }

    /// One decoded message in, one response envelope out.
    pub async fn dispatch(&self, message: &str) -> String {
        let request: Value = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(_) => return envelope::unknown_action(),
        };
        let action = match request.get("action").and_then(Value::as_str) {
            Some(action) => action.to_owned(),
            None => return envelope::unknown_action(),
        };
        let handler = match self.handlers.get(action.as_str()) {
            Some(handler) => handler,
            None => return envelope::unknown_action(),
        };
        match handler(request).await {
            Ok(payload) => envelope::success(&action, payload),
            Err(error) => {
                event!(Level::DEBUG, "{} failed: {}", action, error);
                envelope::error(&action, &error.to_string())
            }
        }
    }
}

fn parse_request<T: DeserializeOwned>(request: Value) -> std::result::Result<T, HandlerError> {
    serde_json::from_value(request).map_err(|error| HandlerError::Validation(error.to_string()))
}

fn persist_catalog(catalog: &Catalog, persist: bool) -> std::result::Result<(), HandlerError> {
    if !persist {
        return Ok(());
    }
    Storage::save_catalog_to_disk(catalog)
        .map_err(|error| HandlerError::Storage(format!("Could not save catalog: {}", error)))
}

fn persist_users(users: &UserDirectory, persist: bool) -> std::result::Result<(), HandlerError> {
    if !persist {
        return Ok(());
    }
    Storage::save_users_to_disk(users)
        .map_err(|error| HandlerError::Storage(format!("Could not save users: {}", error)))
}

async fn get_law_branches(catalog_lock: SharedCatalog, _request: Value) -> HandlerResult {
    let catalog = catalog_lock.read().await;
    Ok(json!({ "branches": catalog.list_branches() }))
}

async fn get_test_collections(catalog_lock: SharedCatalog, request: Value) -> HandlerResult {
    let request: GetTestCollectionsRequest = parse_request(request)?;
    let catalog = catalog_lock.read().await;
    Ok(json!({ "collections": catalog.list_tests_by_branch(request.law_branch_id) }))
}

async fn get_test_questions(catalog_lock: SharedCatalog, request: Value) -> HandlerResult {
    let request: GetTestQuestionsRequest = parse_request(request)?;
    let catalog = catalog_lock.read().await;
    // questions serialize with their stored answer key
    match catalog.list_questions_by_test(request.test_collection_id) {
        Some(questions) => Ok(json!({ "questions": questions })),
        None => Err(HandlerError::NotFound(format!(
            "Test {} not found",
            request.test_collection_id
        ))),
    }
}

async fn submit_test_answer(catalog_lock: SharedCatalog, request: Value) -> HandlerResult {
    let request: SubmitTestAnswerRequest = parse_request(request)?;
    let catalog = catalog_lock.read().await;
    let test = catalog
        .get_test_with_questions(request.test_id)
        .ok_or_else(|| HandlerError::NotFound(format!("Test {} not found", request.test_id)))?;
    let result = grading::grade(test.id, &test.questions, &request.answers);
    Ok(json!({ "result": result }))
}

async fn create_test(catalog_lock: SharedCatalog, persist: bool, request: Value) -> HandlerResult {
    let request: CreateTestRequest = parse_request(request)?;
    let draft = request.test;
    if draft.name.is_empty() {
        return Err(HandlerError::Validation(String::from(
            "Test name must not be empty",
        )));
    }
    if draft.questions.iter().any(|question| question.text.is_empty()) {
        return Err(HandlerError::Validation(String::from(
            "Question text must not be empty",
        )));
    }
    let mut catalog = catalog_lock.write().await;
    let test = catalog.insert_test(
        draft.name,
        draft.test_type,
        draft.law_branch_id,
        draft.questions,
    )?;
    persist_catalog(&catalog, persist)?;
    Ok(json!({ "test": test }))
}

async fn create_question(
    catalog_lock: SharedCatalog,
    persist: bool,
    request: Value,
) -> HandlerResult {
    let request: CreateQuestionRequest = parse_request(request)?;
    let (test_id, draft) = request.question.into_draft();
    if draft.text.is_empty() {
        return Err(HandlerError::Validation(String::from(
            "Question text must not be empty",
        )));
    }
    let mut catalog = catalog_lock.write().await;
    let question = catalog.insert_question(test_id, draft)?;
    persist_catalog(&catalog, persist)?;
    Ok(json!({ "question": question }))
}

async fn create_law_branch(
    catalog_lock: SharedCatalog,
    persist: bool,
    request: Value,
) -> HandlerResult {
    let request: CreateLawBranchRequest = parse_request(request)?;
    if request.name.is_empty() {
        return Err(HandlerError::Validation(String::from(
            "Branch name must not be empty",
        )));
    }
    let mut catalog = catalog_lock.write().await;
    let branch = catalog.insert_branch(request.name, request.description);
    persist_catalog(&catalog, persist)?;
    Ok(json!({ "branch": branch }))
}

async fn register(users_lock: SharedUsers, persist: bool, request: Value) -> HandlerResult {
    let request: CredentialsRequest = parse_request(request)?;
    let digest = crypto::hash_password(&request.password);
    let mut users = users_lock.write().await;
    let user = users.insert_user_if_absent(request.username, digest)?;
    let token = users::mint_token();
    users.set_token(&user.username, token.clone());
    persist_users(&users, persist)?;
    Ok(json!({ "user": user.profile(), "token": token }))
}

async fn login(users_lock: SharedUsers, persist: bool, request: Value) -> HandlerResult {
    let request: CredentialsRequest = parse_request(request)?;
    let mut users = users_lock.write().await;
    let user = match users.find_user_by_username(&request.username) {
        Some(user) if crypto::verify_password(&request.password, &user.password_digest) => {
            user.clone()
        }
        // one message for both causes so usernames cannot be probed
        _ => {
            return Err(HandlerError::Auth(String::from(
                "Invalid username or password",
            )))
        }
    };
    let token = users::mint_token();
    users.set_token(&user.username, token.clone());
    persist_users(&users, persist)?;
    Ok(json!({ "user": user.profile(), "token": token }))
}
