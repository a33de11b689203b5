use serde::{Deserialize, Serialize};

use super::error::{OpError, OpResult};
use super::ledger::StudentRecord;
use super::RecordsStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
    Faculty,
}

impl Role {
    pub fn parse(raw: &str) -> Option<Role> {
        match raw {
            "admin" => Some(Role::Admin),
            "student" => Some(Role::Student),
            "faculty" => Some(Role::Faculty),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
            Role::Faculty => "faculty",
        }
    }

    /// Capitalized form used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Student => "Student",
            Role::Faculty => "Faculty",
        }
    }
}

/// Role-specific payload for account creation. Students get the all-courses
/// default enrollment; faculty may take over a set of catalog courses at
/// creation time; admins are a bare insert.
#[derive(Debug, Clone)]
pub enum UserSpec {
    Admin,
    Student,
    Faculty { courses: Vec<String> },
}

impl UserSpec {
    pub fn role(&self) -> Role {
        match self {
            UserSpec::Admin => Role::Admin,
            UserSpec::Student => Role::Student,
            UserSpec::Faculty { .. } => Role::Faculty,
        }
    }
}

impl RecordsStore {
    pub fn validate_login(&self, role: Role, user_id: &str, secret: &str) -> bool {
        self.credentials
            .get(&role)
            .and_then(|users| users.get(user_id))
            .map(|stored| stored == secret)
            .unwrap_or(false)
    }

    pub fn list_users(&self, role: Role) -> Vec<String> {
        self.credentials
            .get(&role)
            .map(|users| users.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn user_exists(&self, role: Role, user_id: &str) -> bool {
        self.credentials
            .get(&role)
            .map(|users| users.contains_key(user_id))
            .unwrap_or(false)
    }

    pub fn add_user(&mut self, user_id: &str, secret: &str, spec: UserSpec) -> OpResult {
        let user_id = user_id.trim();
        if user_id.is_empty() || secret.is_empty() {
            return Err(OpError::invalid("User ID and password cannot be empty."));
        }

        // A user id is unique across the whole directory, not just its role.
        for (role, users) in &self.credentials {
            if users.contains_key(user_id) {
                return Err(OpError::invalid(format!(
                    "User ID '{}' already exists in the {} role.",
                    user_id,
                    role.as_str()
                )));
            }
        }

        self.credentials
            .entry(spec.role())
            .or_default()
            .insert(user_id.to_string(), secret.to_string());

        match spec {
            UserSpec::Admin => {
                self.save_credentials()?;
                Ok(format!("Admin '{}' added successfully.", user_id))
            }
            UserSpec::Student => {
                let course_ids = self.course_ids();
                self.ledger
                    .students
                    .insert(user_id.to_string(), StudentRecord::enrolled_in(&course_ids));
                self.save_credentials()?;
                self.save_ledger()?;
                Ok(format!(
                    "Student '{}' added successfully and enrolled in all courses ({} total).",
                    user_id,
                    course_ids.len()
                ))
            }
            UserSpec::Faculty { courses } => {
                let mut assigned: Vec<String> = Vec::new();
                for course_id in &courses {
                    if let Some(info) = self.catalog.get_mut(course_id) {
                        info.faculty = Some(user_id.to_string());
                        assigned.push(course_id.clone());
                    }
                }
                if !courses.is_empty() {
                    self.save_catalog()?;
                }
                self.save_credentials()?;
                let course_list = if assigned.is_empty() {
                    "No courses assigned.".to_string()
                } else {
                    assigned.join(", ")
                };
                Ok(format!(
                    "Faculty '{}' added successfully. Courses assigned: {}",
                    user_id, course_list
                ))
            }
        }
    }

    pub fn delete_user(&mut self, role: Role, user_id: &str) -> OpResult {
        let removed = self
            .credentials
            .get_mut(&role)
            .map(|users| users.remove(user_id).is_some())
            .unwrap_or(false);
        if !removed {
            return Err(OpError::not_found(format!("{} ID not found.", role.label())));
        }
        self.save_credentials()?;

        match role {
            Role::Student => {
                if self.ledger.students.remove(user_id).is_some() {
                    self.save_ledger()?;
                }
            }
            Role::Faculty => {
                // Courses survive; they just lose their instructor.
                for info in self.catalog.values_mut() {
                    if info.faculty.as_deref() == Some(user_id) {
                        info.faculty = None;
                    }
                }
                self.save_catalog()?;
            }
            Role::Admin => {}
        }

        Ok(format!(
            "{} '{}' deleted successfully.",
            role.label(),
            user_id
        ))
    }

    pub fn reset_secret(&mut self, role: Role, user_id: &str, new_secret: &str) -> OpResult {
        match self
            .credentials
            .get_mut(&role)
            .and_then(|users| users.get_mut(user_id))
        {
            Some(slot) => {
                *slot = new_secret.to_string();
                self.save_credentials()?;
                Ok(format!(
                    "Password for {} '{}' reset successfully.",
                    role.label(),
                    user_id
                ))
            }
            None => Err(OpError::not_found(format!("{} ID not found.", role.label()))),
        }
    }
}
