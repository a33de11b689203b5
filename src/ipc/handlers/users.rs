use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_required_str, get_role, message_result, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::{RecordsStore, Role, UserSpec};

fn get_course_list(params: &serde_json::Value) -> Result<Vec<String>, HandlerErr> {
    let Some(v) = params.get("courses") else {
        return Ok(Vec::new());
    };
    if v.is_null() {
        return Ok(Vec::new());
    }
    let Some(arr) = v.as_array() else {
        return Err(HandlerErr::bad_params("courses must be an array"));
    };
    let mut out = Vec::with_capacity(arr.len());
    for entry in arr {
        let Some(s) = entry.as_str() else {
            return Err(HandlerErr::bad_params("courses must be strings"));
        };
        out.push(s.to_string());
    }
    Ok(out)
}

fn users_add(
    store: &mut RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let role = get_role(params)?;
    let user_id = get_required_str(params, "userId")?;
    let secret = get_required_str(params, "secret")?;

    let spec = match role {
        Role::Admin => UserSpec::Admin,
        Role::Student => UserSpec::Student,
        Role::Faculty => UserSpec::Faculty {
            courses: get_course_list(params)?,
        },
    };
    message_result(store.add_user(&user_id, &secret, spec))
}

fn users_delete(
    store: &mut RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let role = get_role(params)?;
    let user_id = get_required_str(params, "userId")?;
    message_result(store.delete_user(role, &user_id))
}

fn users_reset_secret(
    store: &mut RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let role = get_role(params)?;
    let user_id = get_required_str(params, "userId")?;
    let new_secret = get_required_str(params, "newSecret")?;
    message_result(store.reset_secret(role, &user_id, &new_secret))
}

fn users_list(
    store: &RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let role = get_role(params)?;
    Ok(json!({ "users": store.list_users(role) }))
}

fn handle_users_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match users_add(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_users_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match users_delete(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_users_reset_secret(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match users_reset_secret(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_users_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match users_list(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "users.add" => Some(handle_users_add(state, req)),
        "users.delete" => Some(handle_users_delete(state, req)),
        "users.resetSecret" => Some(handle_users_reset_secret(state, req)),
        "users.list" => Some(handle_users_list(state, req)),
        _ => None,
    }
}
