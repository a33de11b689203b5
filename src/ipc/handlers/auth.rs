use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_required_str, get_role, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::RecordsStore;

fn auth_validate(
    store: &RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let role = get_role(params)?;
    let user_id = get_required_str(params, "userId")?;
    let secret = get_required_str(params, "secret")?;
    Ok(json!({ "valid": store.validate_login(role, &user_id, &secret) }))
}

fn handle_auth_validate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match auth_validate(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.validate" => Some(handle_auth_validate(state, req)),
        _ => None,
    }
}
