use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_recordsd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn recordsd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

fn string_list(result: &serde_json::Value, key: &str) -> Vec<String> {
    result
        .get(key)
        .and_then(|v| v.as_array())
        .map(|rows| {
            rows.iter()
                .filter_map(|r| r.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn new_student_is_enrolled_in_the_whole_catalog() {
    let workspace = temp_dir("recordsd-enrollment");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let added = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "users.add",
        json!({ "role": "student", "userId": "Bob", "secret": "p" }),
    );
    assert!(
        added
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .contains("4 total"),
        "unexpected message: {}",
        added
    );

    let courses = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "ledger.coursesOf",
        json!({ "studentId": "Bob" }),
    );
    assert_eq!(
        string_list(&courses, "courses"),
        vec!["CHEM101", "CS101", "MATH201", "PHYS101"]
    );

    // Each enrolled course starts with an empty record.
    for (i, course_id) in ["CHEM101", "CS101", "MATH201", "PHYS101"].iter().enumerate() {
        let base = 10 + i * 3;
        let attendance = request_ok(
            &mut stdin,
            &mut reader,
            &base.to_string(),
            "ledger.attendance",
            json!({ "studentId": "Bob", "courseId": course_id }),
        );
        assert!(attendance.get("attendance").map(|v| v.is_null()).unwrap_or(false));

        let marks = request_ok(
            &mut stdin,
            &mut reader,
            &(base + 1).to_string(),
            "ledger.marks",
            json!({ "studentId": "Bob", "courseId": course_id }),
        );
        assert_eq!(
            marks.get("marks").and_then(|v| v.as_object()).map(|m| m.len()),
            Some(0)
        );

        let projects = request_ok(
            &mut stdin,
            &mut reader,
            &(base + 2).to_string(),
            "ledger.projects",
            json!({ "studentId": "Bob", "courseId": course_id }),
        );
        assert_eq!(
            projects.get("projects").and_then(|v| v.as_array()).map(|p| p.len()),
            Some(0)
        );
    }

    let students = request_ok(
        &mut stdin,
        &mut reader,
        "30",
        "users.list",
        json!({ "role": "student" }),
    );
    let names = string_list(&students, "users");
    assert!(names.contains(&"Bob".to_string()));
}

#[test]
fn faculty_courses_follow_assignment_and_deletion() {
    let workspace = temp_dir("recordsd-faculty-courses");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let added = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "users.add",
        json!({
            "role": "faculty",
            "userId": "Iyer",
            "secret": "pw",
            "courses": ["CS101", "NOPE999"]
        }),
    );
    let message = added.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert!(message.contains("CS101"), "unexpected message: {}", message);
    assert!(!message.contains("NOPE999"));

    let taught = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "courses.taughtBy",
        json!({ "facultyId": "Iyer" }),
    );
    assert_eq!(
        taught
            .pointer("/courses/CS101")
            .and_then(|v| v.as_str()),
        Some("Intro to Python")
    );

    // Deleting the faculty member unassigns the course but keeps it listed.
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "users.delete",
        json!({ "role": "faculty", "userId": "Iyer" }),
    );
    let taught = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "courses.taughtBy",
        json!({ "facultyId": "Iyer" }),
    );
    assert_eq!(
        taught.get("courses").and_then(|v| v.as_object()).map(|m| m.len()),
        Some(0)
    );

    let name = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "courses.name",
        json!({ "courseId": "CS101" }),
    );
    assert_eq!(name.get("name").and_then(|v| v.as_str()), Some("Intro to Python"));

    let listing = request_ok(&mut stdin, &mut reader, "7", "courses.list", json!({}));
    let row = listing
        .get("courses")
        .and_then(|v| v.as_array())
        .and_then(|rows| {
            rows.iter()
                .find(|r| r.get("id").and_then(|v| v.as_str()) == Some("CS101"))
        })
        .cloned()
        .expect("CS101 row");
    assert!(row.get("faculty").map(|v| v.is_null()).unwrap_or(false));
}

#[test]
fn course_name_falls_back_to_the_id() {
    let workspace = temp_dir("recordsd-course-name");
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let name = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "courses.name",
        json!({ "courseId": "UNKNOWN42" }),
    );
    assert_eq!(name.get("name").and_then(|v| v.as_str()), Some("UNKNOWN42"));
}
