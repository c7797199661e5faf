use serde::Deserialize;

/// `register` and `login` share a payload shape: a username and a
/// plaintext password. The password only ever exists in memory for the
/// duration of the dispatch; the directory stores its digest.
#[derive(Deserialize, Debug)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_request_requires_both_fields() {
        let parsed: CredentialsRequest = serde_json::from_str(
            r#"{"action": "login", "username": "alice", "password": "hunter2"}"#,
        )
        .unwrap();
        assert_eq!(parsed.username, "alice");
        assert_eq!(parsed.password, "hunter2");

        let missing: Result<CredentialsRequest, _> =
            serde_json::from_str(r#"{"action": "login", "username": "alice"}"#);
        assert!(missing.is_err());
    }
}
