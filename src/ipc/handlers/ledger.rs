use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_required_str, get_required_text, message_result, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::RecordsStore;

fn ledger_courses_of(
    store: &RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    Ok(json!({ "courses": store.courses_of(&student_id) }))
}

fn ledger_students_in(
    store: &RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let course_id = get_required_str(params, "courseId")?;
    Ok(json!({ "students": store.students_in(&course_id) }))
}

fn ledger_set_attendance(
    store: &mut RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let course_id = get_required_str(params, "courseId")?;
    // The UI sends the raw field content; range and format checks live in
    // the store so every caller gets the same validation.
    let percentage = get_required_text(params, "percentage")?;
    message_result(store.set_attendance(&student_id, &course_id, &percentage))
}

fn ledger_attendance(
    store: &RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let course_id = get_required_str(params, "courseId")?;
    Ok(json!({ "attendance": store.attendance(&student_id, &course_id) }))
}

fn ledger_marks(
    store: &RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let course_id = get_required_str(params, "courseId")?;
    Ok(json!({ "marks": store.marks(&student_id, &course_id) }))
}

fn ledger_record_mark(
    store: &mut RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let course_id = get_required_str(params, "courseId")?;
    let subject = get_required_str(params, "subject")?;
    let mark = get_required_text(params, "mark")?;
    message_result(store.record_mark(&student_id, &course_id, &subject, &mark))
}

fn ledger_projects(
    store: &RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let course_id = get_required_str(params, "courseId")?;
    Ok(json!({ "projects": store.projects(&student_id, &course_id) }))
}

fn ledger_add_project(
    store: &mut RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let course_id = get_required_str(params, "courseId")?;
    let title = get_required_str(params, "title")?;
    let due = get_required_str(params, "due")?;
    message_result(store.add_project(&course_id, &title, &due))
}

fn ledger_exam_schedule(store: &RecordsStore) -> Result<serde_json::Value, HandlerErr> {
    Ok(json!({ "exams": store.exam_schedule() }))
}

fn ledger_add_exam(
    store: &mut RecordsStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let subject = get_required_str(params, "subject")?;
    let date = get_required_str(params, "date")?;
    let time = get_required_str(params, "time")?;
    message_result(store.add_exam(&subject, &date, &time))
}

fn handle_ledger_courses_of(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match ledger_courses_of(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_ledger_students_in(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match ledger_students_in(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_ledger_set_attendance(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match ledger_set_attendance(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_ledger_attendance(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match ledger_attendance(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_ledger_marks(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match ledger_marks(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_ledger_record_mark(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match ledger_record_mark(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_ledger_projects(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match ledger_projects(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_ledger_add_project(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match ledger_add_project(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_ledger_exam_schedule(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match ledger_exam_schedule(store) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_ledger_add_exam(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match ledger_add_exam(store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "ledger.coursesOf" => Some(handle_ledger_courses_of(state, req)),
        "ledger.studentsIn" => Some(handle_ledger_students_in(state, req)),
        "ledger.setAttendance" => Some(handle_ledger_set_attendance(state, req)),
        "ledger.attendance" => Some(handle_ledger_attendance(state, req)),
        "ledger.marks" => Some(handle_ledger_marks(state, req)),
        "ledger.recordMark" => Some(handle_ledger_record_mark(state, req)),
        "ledger.projects" => Some(handle_ledger_projects(state, req)),
        "ledger.addProject" => Some(handle_ledger_add_project(state, req)),
        "ledger.examSchedule" => Some(handle_ledger_exam_schedule(state, req)),
        "ledger.addExam" => Some(handle_ledger_add_exam(state, req)),
        _ => None,
    }
}
