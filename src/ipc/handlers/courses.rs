use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::RecordsStore;

fn courses_list(store: &RecordsStore) -> Result<serde_json::Value, HandlerErr> {
    let rows: Vec<serde_json::Value> = store
        .catalog()
        .iter()
        .map(|(id, info)| {
            json!({
                "id": id,
                "name": info.name,
                "faculty": info.faculty,
            })
        })
        .collect();
    Ok(json!({ "courses": rows }))
}

fn courses_name(
    store: &RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let course_id = get_required_str(params, "courseId")?;
    Ok(json!({ "name": store.course_name(&course_id) }))
}

fn courses_taught_by(
    store: &RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let faculty_id = get_required_str(params, "facultyId")?;
    Ok(json!({ "courses": store.courses_taught_by(&faculty_id) }))
}

fn handle_courses_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match courses_list(store) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_courses_name(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match courses_name(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_courses_taught_by(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match courses_taught_by(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "courses.list" => Some(handle_courses_list(state, req)),
        "courses.name" => Some(handle_courses_name(state, req)),
        "courses.taughtBy" => Some(handle_courses_taught_by(state, req)),
        _ => None,
    }
}
