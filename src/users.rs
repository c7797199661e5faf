use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    User,
    Admin,
}

/// A registered account. The digest and token are directory-internal; the
/// only shape that ever reaches a client is [`User::profile`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password_digest: String,
    pub role: UserRole,
    pub token: Option<String>,
}

impl User {
    /// The response-safe projection of this user.
    pub fn profile(&self) -> Value {
        json!({
            "id": self.id,
            "username": self.username,
            "role": self.role,
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Username already exists")]
pub struct UsernameTaken;

/// Mints a fresh opaque session token.
///
/// Tokens are returned to the client on login/register and overwrite the
/// user's stored token. No handler checks one on later actions; the value
/// is opaque and carries no claims.
pub fn mint_token() -> String {
    Uuid::new_v4().to_simple().to_string()
}

/// The `UserDirectory` holds every registered account keyed by username,
/// which makes registration's uniqueness check and login's lookup the same
/// map operation. Shared across connections behind `Arc<tokio::sync::RwLock>`;
/// insert-if-absent is atomic under the write lock, so concurrent
/// registrations of one username resolve here and the loser surfaces as
/// the conflict error.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UserDirectory {
    users: BTreeMap<String, User>,
    next_user_id: u64,
}

impl UserDirectory {
    pub fn new() -> UserDirectory {
        UserDirectory::default()
    }

    pub fn find_user_by_username(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Creates an account unless the username is taken. New accounts get
    /// the `User` role; promotion to `Admin` is out of band.
    pub fn insert_user_if_absent(
        &mut self,
        username: String,
        password_digest: String,
    ) -> std::result::Result<User, UsernameTaken> {
        if self.users.contains_key(&username) {
            return Err(UsernameTaken);
        }
        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            username: username.clone(),
            password_digest,
            role: UserRole::User,
            token: None,
        };
        self.users.insert(username, user.clone());
        Ok(user)
    }

    /// Overwrites the user's stored token with a freshly minted one.
    pub fn set_token(&mut self, username: &str, token: String) {
        if let Some(user) = self.users.get_mut(username) {
            user.token = Some(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_user_if_absent_conflicts_on_duplicate() {
        let mut directory = UserDirectory::new();
        let first = directory
            .insert_user_if_absent(String::from("alice"), String::from("digest"))
            .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.role, UserRole::User);

        let second =
            directory.insert_user_if_absent(String::from("alice"), String::from("digest"));
        assert_eq!(second, Err(UsernameTaken));

        // the losing insert must not clobber the existing account
        assert_eq!(
            directory.find_user_by_username("alice").unwrap().id,
            first.id
        );
    }

    #[test]
    fn test_set_token_overwrites() {
        let mut directory = UserDirectory::new();
        directory
            .insert_user_if_absent(String::from("alice"), String::from("digest"))
            .unwrap();

        directory.set_token("alice", String::from("first"));
        directory.set_token("alice", String::from("second"));
        assert_eq!(
            directory.find_user_by_username("alice").unwrap().token,
            Some(String::from("second"))
        );
    }

    #[test]
    fn test_profile_hides_digest_and_token() {
        let mut directory = UserDirectory::new();
        directory
            .insert_user_if_absent(String::from("alice"), String::from("digest"))
            .unwrap();
        directory.set_token("alice", mint_token());

        let profile = directory.find_user_by_username("alice").unwrap().profile();
        let fields: Vec<&String> = profile.as_object().unwrap().keys().collect();
        assert_eq!(fields, vec!["id", "role", "username"]);
    }

    #[test]
    fn test_mint_token_is_unique() {
        assert_ne!(mint_token(), mint_token());
    }
}
