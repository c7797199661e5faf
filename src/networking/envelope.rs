use serde_json::{Map, Value};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Diagnostic used whenever no action name could be determined.
pub const UNKNOWN_ACTION_MESSAGE: &str = "Unknown action";

/// `{action, status: "success", ...payload}`
///
/// The payload's top-level fields are merged into the envelope, so a
/// handler returns `{"branches": [...]}` and the client sees
/// `{"action": ..., "status": ..., "branches": [...]}`.
pub fn success(action: &str, payload: Value) -> String {
    let mut envelope = Map::new();
    envelope.insert(String::from("action"), Value::String(action.to_string()));
    envelope.insert(
        String::from("status"),
        Value::String(STATUS_SUCCESS.to_string()),
    );
    if let Value::Object(fields) = payload {
        for (key, value) in fields {
            envelope.insert(key, value);
        }
    }
    Value::Object(envelope).to_string()
}

/// `{action, status: "error", message}`
pub fn error(action: &str, message: &str) -> String {
    let mut envelope = Map::new();
    envelope.insert(String::from("action"), Value::String(action.to_string()));
    envelope.insert(
        String::from("status"),
        Value::String(STATUS_ERROR.to_string()),
    );
    envelope.insert(
        String::from("message"),
        Value::String(message.to_string()),
    );
    Value::Object(envelope).to_string()
}

/// `{status: "error", message: "Unknown action"}` — no `action` echoed,
/// since none could be determined from the input.
pub fn unknown_action() -> String {
    let mut envelope = Map::new();
    envelope.insert(
        String::from("status"),
        Value::String(STATUS_ERROR.to_string()),
    );
    envelope.insert(
        String::from("message"),
        Value::String(UNKNOWN_ACTION_MESSAGE.to_string()),
    );
    Value::Object(envelope).to_string()
}
