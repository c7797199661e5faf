use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

/// `get_test_collections`. The browser client sends `lawBranchId` as a
/// numeric string, so both encodings are accepted.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GetTestCollectionsRequest {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub law_branch_id: u64,
}

/// `get_test_questions`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GetTestQuestionsRequest {
    pub test_collection_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_law_branch_id_accepts_number_and_numeric_string() {
        let from_number: GetTestCollectionsRequest =
            serde_json::from_str(r#"{"action": "get_test_collections", "lawBranchId": 3}"#)
                .unwrap();
        assert_eq!(from_number.law_branch_id, 3);

        let from_string: GetTestCollectionsRequest =
            serde_json::from_str(r#"{"action": "get_test_collections", "lawBranchId": "3"}"#)
                .unwrap();
        assert_eq!(from_string.law_branch_id, 3);

        let garbage: Result<GetTestCollectionsRequest, _> =
            serde_json::from_str(r#"{"action": "get_test_collections", "lawBranchId": "abc"}"#);
        assert!(garbage.is_err());
    }

    #[test]
    fn test_get_test_questions_requires_id() {
        let parsed: GetTestQuestionsRequest = serde_json::from_str(
            r#"{"action": "get_test_questions", "testCollectionId": 12}"#,
        )
        .unwrap();
        assert_eq!(parsed.test_collection_id, 12);

        let missing: Result<GetTestQuestionsRequest, _> =
            serde_json::from_str(r#"{"action": "get_test_questions"}"#);
        assert!(missing.is_err());
    }
}
