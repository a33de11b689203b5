use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{OpError, OpResult};
use super::{RecordsStore, Role};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    pub students: BTreeMap<String, StudentRecord>,
    pub exam_schedule: Vec<Exam>,
}

impl Ledger {
    /// Derived seed: one empty row per student already present in the
    /// credential directory. Used when `student_data.json` is absent or
    /// unreadable.
    pub fn seed_for<'a, I>(student_ids: I) -> Ledger
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut ledger = Ledger::default();
        for id in student_ids {
            ledger.students.insert(id.clone(), StudentRecord::default());
        }
        ledger
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentRecord {
    pub enrolled_courses: Vec<String>,
    pub course_data: BTreeMap<String, CourseRecord>,
}

impl StudentRecord {
    /// A row enrolled in every given course, with an empty record for each.
    pub fn enrolled_in(course_ids: &[String]) -> StudentRecord {
        StudentRecord {
            enrolled_courses: course_ids.to_vec(),
            course_data: course_ids
                .iter()
                .map(|id| (id.clone(), CourseRecord::default()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseRecord {
    pub attendance: Option<u8>,
    pub marks: BTreeMap<String, String>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub due: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exam {
    pub subject: String,
    pub date: String,
    pub time: String,
}

impl RecordsStore {
    /// Single chokepoint for the enrollment/course-data invariant: returns
    /// the per-course record, creating the student row and the empty course
    /// record as needed, and enrolling the student if the course id was not
    /// yet in their list. Idempotent; every ledger mutation funnels through
    /// here.
    fn course_record_mut(&mut self, student_id: &str, course_id: &str) -> &mut CourseRecord {
        let entry = self
            .ledger
            .students
            .entry(student_id.to_string())
            .or_default();
        if !entry.enrolled_courses.iter().any(|c| c == course_id) {
            entry.enrolled_courses.push(course_id.to_string());
        }
        entry.course_data.entry(course_id.to_string()).or_default()
    }

    pub fn courses_of(&self, student_id: &str) -> Vec<String> {
        self.ledger
            .students
            .get(student_id)
            .map(|rec| rec.enrolled_courses.clone())
            .unwrap_or_default()
    }

    pub fn students_in(&self, course_id: &str) -> Vec<String> {
        self.ledger
            .students
            .iter()
            .filter(|(_, rec)| rec.enrolled_courses.iter().any(|c| c == course_id))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn attendance(&self, student_id: &str, course_id: &str) -> Option<u8> {
        self.course_record(student_id, course_id)
            .and_then(|rec| rec.attendance)
    }

    pub fn marks(&self, student_id: &str, course_id: &str) -> BTreeMap<String, String> {
        self.course_record(student_id, course_id)
            .map(|rec| rec.marks.clone())
            .unwrap_or_default()
    }

    pub fn projects(&self, student_id: &str, course_id: &str) -> Vec<Project> {
        self.course_record(student_id, course_id)
            .map(|rec| rec.projects.clone())
            .unwrap_or_default()
    }

    fn course_record(&self, student_id: &str, course_id: &str) -> Option<&CourseRecord> {
        self.ledger
            .students
            .get(student_id)
            .and_then(|rec| rec.course_data.get(course_id))
    }

    pub fn set_attendance(
        &mut self,
        student_id: &str,
        course_id: &str,
        raw_percentage: &str,
    ) -> OpResult {
        let percent: i64 = raw_percentage
            .trim()
            .parse()
            .map_err(|_| OpError::invalid("Attendance must be a valid number."))?;
        if !(0..=100).contains(&percent) {
            return Err(OpError::invalid("Attendance must be between 0 and 100."));
        }

        self.course_record_mut(student_id, course_id).attendance = Some(percent as u8);
        self.save_ledger()?;
        Ok(format!(
            "Attendance for {} in {} set to {}%.",
            student_id, course_id, percent
        ))
    }

    pub fn record_mark(
        &mut self,
        student_id: &str,
        course_id: &str,
        assessment: &str,
        mark: &str,
    ) -> OpResult {
        if student_id.is_empty() {
            return Err(OpError::invalid("Student ID cannot be empty."));
        }
        if !self.user_exists(Role::Student, student_id) {
            return Err(OpError::not_found("Student not found."));
        }
        if assessment.is_empty() || mark.is_empty() {
            return Err(OpError::invalid("Subject and Mark fields are required."));
        }

        self.course_record_mut(student_id, course_id)
            .marks
            .insert(assessment.to_string(), mark.to_string());
        self.save_ledger()?;
        Ok(format!(
            "Mark recorded for {} in {}.",
            student_id, course_id
        ))
    }

    /// Broadcast write: the project lands on every student currently
    /// enrolled in the course, with a single persist at the end.
    pub fn add_project(&mut self, course_id: &str, title: &str, due: &str) -> OpResult {
        if title.is_empty() || due.is_empty() {
            return Err(OpError::invalid("Project Title and Due Date are required."));
        }
        let enrolled = self.students_in(course_id);
        if enrolled.is_empty() {
            return Err(OpError::invalid("No students are enrolled in this course."));
        }

        let entry = Project {
            title: title.to_string(),
            due: due.to_string(),
        };
        for student_id in &enrolled {
            self.course_record_mut(student_id, course_id)
                .projects
                .push(entry.clone());
        }
        self.save_ledger()?;
        Ok(format!(
            "Project '{}' added for all {} enrolled students in {}.",
            title,
            enrolled.len(),
            course_id
        ))
    }

    pub fn exam_schedule(&self) -> &[Exam] {
        &self.ledger.exam_schedule
    }

    pub fn add_exam(&mut self, subject: &str, date: &str, time: &str) -> OpResult {
        if subject.is_empty() || date.is_empty() || time.is_empty() {
            return Err(OpError::invalid(
                "All fields (Subject, Date, Time) are required.",
            ));
        }
        self.ledger.exam_schedule.push(Exam {
            subject: subject.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        });
        self.save_ledger()?;
        Ok(format!("Exam '{}' scheduled successfully.", subject))
    }
}
