use crate::ipc::error::err;
use crate::store::{OpError, OpResult, Role};

/// Handler-layer failure, rendered as the error half of a response.
pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn bad_params(message: impl Into<String>) -> HandlerErr {
        HandlerErr {
            code: "bad_params",
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<OpError> for HandlerErr {
    fn from(e: OpError) -> Self {
        HandlerErr {
            code: e.code(),
            message: e.to_string(),
            details: None,
        }
    }
}

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn get_role(params: &serde_json::Value) -> Result<Role, HandlerErr> {
    let raw = get_required_str(params, "role")?;
    Role::parse(&raw).ok_or_else(|| HandlerErr::bad_params(format!("unknown role: {}", raw)))
}

/// Accepts a field the UI may send as either a string or a number; the store
/// receives it verbatim as text.
pub fn get_required_text(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    match params.get(key) {
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
        _ => Err(HandlerErr::bad_params(format!("missing {}", key))),
    }
}

/// Maps a store outcome onto the (success, message) boundary contract.
pub fn message_result(outcome: OpResult) -> Result<serde_json::Value, HandlerErr> {
    let message = outcome?;
    Ok(serde_json::json!({ "message": message }))
}
